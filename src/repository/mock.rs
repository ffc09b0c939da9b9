//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::server_page::Row;
use crate::repository::errors::RepositoryResult;
use crate::repository::{RowListQuery, RowReader};

mock! {
    pub Repository {}

    impl RowReader for Repository {
        fn columns(&self) -> Vec<String>;
        fn list_rows(&self, query: RowListQuery) -> RepositoryResult<(usize, Vec<Row>)>;
    }
}
