//! Interfaces of the collaborators the table component drives.
//!
//! Templating, pagination markup, navigation history, networking and the
//! concrete view technology all live behind these traits.

use std::future::Future;

use serde::Serialize;

use crate::component::errors::{FetchError, RenderError};
use crate::domain::request_state::RequestState;
use crate::domain::server_page::{Row, ServerPage};
use crate::domain::types::{ColumnId, SortDirection};
use crate::dto::api::RowsQuery;

/// Issues the GET against the configured endpoint.
pub trait DataSource {
    fn fetch(&self, query: &RowsQuery) -> impl Future<Output = Result<ServerPage, FetchError>>;
}

/// Turns the fetched rows into table-body markup.
pub trait RowTemplate {
    fn render_rows(&self, rows: &[Row]) -> Result<String, RenderError>;
}

/// Builds pagination footer markup.
pub trait PaginationWidget {
    /// `state` is an owned snapshot; the widget may keep or mutate it freely.
    fn render(
        &self,
        current: usize,
        page_count: usize,
        state: RequestState,
    ) -> Result<String, RenderError>;
}

/// Browser-history style navigation state.
pub trait Navigator {
    fn replace(&mut self, state: &RequestState);
    fn push(&mut self, state: &RequestState);
}

/// Loading row shown while a fetch is in flight.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Placeholder {
    /// Number of columns the single row spans.
    pub colspan: usize,
    /// Approximate height of a full page of rows, once a row was measured.
    pub height: Option<u32>,
}

/// The materialized table: header cells, body and pagination footer.
pub trait TableView {
    /// Replaces the body with a single loading row.
    fn show_placeholder(&mut self, placeholder: &Placeholder);
    fn replace_body(&mut self, html: String);
    /// Replaces any previous pagination markup in the footer.
    fn replace_pagination(&mut self, html: String);
    fn clear_sort_indicators(&mut self);
    fn set_sort_indicator(&mut self, column: &ColumnId, direction: SortDirection);
    /// Replaces the body with a visible error state.
    fn show_error(&mut self, message: &str);
    /// Height of the first rendered body row, if one is rendered.
    fn first_row_height(&self) -> Option<u32>;
}
