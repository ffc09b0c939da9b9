//! Rendering driver: loading placeholder, rows, pagination and sort markers.

use crate::component::collaborators::{PaginationWidget, Placeholder, RowTemplate, TableView};
use crate::component::errors::RenderError;
use crate::domain::request_state::{ColumnSort, RequestState};
use crate::domain::server_page::ServerPage;
use crate::pagination::PageCountPolicy;

/// Placeholder sized to `row_count` rows of the measured row height.
pub fn placeholder(column_count: usize, row_height: Option<u32>, row_count: usize) -> Placeholder {
    let rows = u32::try_from(row_count).unwrap_or(u32::MAX);
    Placeholder {
        colspan: column_count,
        height: row_height.map(|height| height.saturating_mul(rows)),
    }
}

/// Clears every header indicator, then marks only the active sort column.
pub fn mark_sort_headers<V>(view: &mut V, sort: Option<&ColumnSort>)
where
    V: TableView + ?Sized,
{
    view.clear_sort_indicators();
    if let Some(sort) = sort {
        view.set_sort_indicator(&sort.column, sort.direction);
    }
}

/// Renders the fetched page into the view and returns the page count.
///
/// Both templates render before the view is touched, so a template failure
/// leaves the previous content (or placeholder) in place for the caller to
/// replace with an error state.
pub fn render_page<V>(
    view: &mut V,
    rows: &dyn RowTemplate,
    pagination: &dyn PaginationWidget,
    page: &ServerPage,
    state: &RequestState,
    policy: PageCountPolicy,
) -> Result<usize, RenderError>
where
    V: TableView + ?Sized,
{
    let body = rows.render_rows(&page.rows)?;
    let page_count = page.page_count(policy);
    let footer = pagination.render(page.current, page_count, state.clone())?;

    view.replace_body(body);
    view.replace_pagination(footer);

    Ok(page_count)
}
