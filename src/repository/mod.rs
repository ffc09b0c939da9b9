use crate::{
    domain::{server_page::Row, types::SortDirection},
    repository::errors::RepositoryResult,
};

pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod rows;

pub use rows::CsvRowRepository;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSort {
    pub column: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowListQuery {
    pub search: Option<String>,
    pub sort: Option<RowSort>,
    pub pagination: Option<Pagination>,
}

impl RowListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn sort(mut self, column: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some(RowSort {
            column: column.into(),
            direction,
        });
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

pub trait RowReader {
    /// Field names every row carries.
    fn columns(&self) -> Vec<String>;
    /// Returns the total number of matching rows and the requested page.
    fn list_rows(&self, query: RowListQuery) -> RepositoryResult<(usize, Vec<Row>)>;
}
