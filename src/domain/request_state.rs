//! The canonical request parameters sent on every data fetch.

use serde::{Deserialize, Serialize};

use crate::domain::table::TableMarkup;
use crate::domain::types::{ColumnId, PageNumber, RowCount, SearchTerm, SortDirection};
use crate::dto::api::{MAX_ROW_COUNT, RowsQuery};

/// Rows per page when neither the URL nor the host overrides it.
pub const DEFAULT_ROW_COUNT: usize = RowCount::DEFAULT.get();

/// Direction applied when a column becomes sorted for the first time.
pub const DEFAULT_SORT_DIRECTION: SortDirection = SortDirection::Desc;

/// Active sort: a declared column and its direction.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColumnSort {
    pub column: ColumnId,
    pub direction: SortDirection,
}

/// Page, page size, sort and search parameters of the table.
///
/// Constructed once per component by [`RequestState::resolve`] and mutated in
/// place by the event handlers.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequestState {
    page: PageNumber,
    row_count: RowCount,
    sort: Option<ColumnSort>,
    search: Option<SearchTerm>,
}

/// Raw page URL parameters; kept as strings so one bad value does not discard
/// the others.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UrlParams {
    page: Option<String>,
    row_count: Option<String>,
    sort_column: Option<String>,
    sort_direction: Option<String>,
    search: Option<String>,
}

impl Default for RequestState {
    fn default() -> Self {
        Self {
            page: PageNumber::FIRST,
            row_count: RowCount::DEFAULT,
            sort: None,
            search: None,
        }
    }
}

impl RequestState {
    /// Builds the initial state from the page URL query string and the table
    /// markup.
    ///
    /// Precedence is URL parameters, then the header cell declaring the
    /// default sort, then built-in defaults. Unparseable numbers, unknown sort
    /// directions and sort columns the markup does not declare are dropped
    /// with a warning.
    pub fn resolve(url_query: &str, markup: &TableMarkup) -> Self {
        let url_query = url_query.trim_start_matches('?');
        let params: UrlParams = if url_query.is_empty() {
            UrlParams::default()
        } else {
            serde_html_form::from_str(url_query).unwrap_or_else(|err| {
                log::warn!("Ignoring malformed page query {url_query:?}: {err}");
                UrlParams::default()
            })
        };

        let mut state = RequestState::default();

        if let Some(raw) = params.page.as_deref() {
            match raw.parse::<PageNumber>() {
                Ok(page) => state.page = page,
                Err(err) => log::warn!("Invalid page parameter {raw:?}, using default: {err}"),
            }
        }

        if let Some(raw) = params.row_count.as_deref() {
            match raw.parse::<RowCount>() {
                Ok(row_count) if row_count.get() <= MAX_ROW_COUNT => state.row_count = row_count,
                Ok(_) => log::warn!(
                    "rowCount parameter {raw:?} exceeds {MAX_ROW_COUNT}, using default"
                ),
                Err(err) => {
                    log::warn!("Invalid rowCount parameter {raw:?}, using default: {err}")
                }
            }
        }

        let url_column = params.sort_column.as_deref().and_then(|raw| {
            let column = markup.find(raw).cloned();
            if column.is_none() {
                log::warn!("Ignoring sortColumn {raw:?}: not declared by the table header");
            }
            column
        });

        let url_direction = params.sort_direction.as_deref().and_then(|raw| {
            raw.parse::<SortDirection>()
                .map_err(|err| log::warn!("Ignoring sortDirection parameter: {err}"))
                .ok()
        });

        let header_default = markup.default_sort();

        state.sort = match (url_column, header_default) {
            (Some(column), header) => {
                let header_direction = header
                    .filter(|(declared, _)| **declared == column)
                    .map(|(_, direction)| direction);
                let direction = url_direction
                    .or(header_direction)
                    .unwrap_or(DEFAULT_SORT_DIRECTION);
                Some(ColumnSort { column, direction })
            }
            (None, Some((column, direction))) => Some(ColumnSort {
                column: column.clone(),
                direction: url_direction.unwrap_or(direction),
            }),
            (None, None) => None,
        };

        state.search = params
            .search
            .as_deref()
            .and_then(SearchTerm::parse_optional);

        state
    }

    pub fn page(&self) -> PageNumber {
        self.page
    }

    pub fn row_count(&self) -> RowCount {
        self.row_count
    }

    pub fn sort(&self) -> Option<&ColumnSort> {
        self.sort.as_ref()
    }

    pub fn search(&self) -> Option<&SearchTerm> {
        self.search.as_ref()
    }

    /// Sorts by `column`. Re-sorting the active column flips its direction;
    /// any other column starts at [`DEFAULT_SORT_DIRECTION`].
    ///
    /// Page and search are left untouched.
    pub fn toggle_sort(&mut self, column: ColumnId) -> &ColumnSort {
        let direction = match &self.sort {
            Some(active) if active.column == column => active.direction.toggled(),
            _ => DEFAULT_SORT_DIRECTION,
        };
        self.sort.insert(ColumnSort { column, direction })
    }

    pub fn go_to_page(&mut self, page: PageNumber) {
        self.page = page;
    }

    /// Replaces the search term and rewinds to the first page.
    pub fn apply_search(&mut self, search: Option<SearchTerm>) {
        self.page = PageNumber::FIRST;
        self.search = search;
    }

    /// Outgoing query parameters; absent sort and search are omitted.
    pub fn to_query(&self) -> RowsQuery {
        RowsQuery {
            page: Some(self.page.get()),
            row_count: Some(self.row_count.get()),
            sort_column: self.sort.as_ref().map(|s| s.column.to_string()),
            sort_direction: self.sort.as_ref().map(|s| s.direction),
            search: self.search.as_ref().map(|s| s.to_string()),
        }
    }

    /// Same as [`RequestState::to_query`] but with another page, for links.
    pub fn to_query_for_page(&self, page: usize) -> RowsQuery {
        RowsQuery {
            page: Some(page),
            ..self.to_query()
        }
    }
}
