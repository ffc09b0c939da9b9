use validator::Validate;

use crate::domain::request_state::DEFAULT_ROW_COUNT;
use crate::domain::server_page::ServerPage;
use crate::domain::table::TableMarkup;
use crate::domain::types::{ColumnId, SearchTerm, SortDirection};
use crate::dto::api::RowsQuery;
use crate::repository::{RowListQuery, RowReader};
use crate::services::{ServiceError, ServiceResult};

/// Loads one page of rows for the paged JSON endpoint.
///
/// Only columns declared by the table markup may be sorted on. A sort
/// direction without a column is ignored; a column without a direction sorts
/// ascending.
pub fn list_rows<R>(repo: &R, markup: &TableMarkup, query: RowsQuery) -> ServiceResult<ServerPage>
where
    R: RowReader + ?Sized,
{
    if let Err(err) = query.validate() {
        log::error!("Failed to validate rows query: {err}");
        return Err(ServiceError::Validation(err.to_string()));
    }

    let page = query.page.unwrap_or(1);
    let row_count = query.row_count.unwrap_or(DEFAULT_ROW_COUNT);

    let mut list_query = RowListQuery::new().paginate(page, row_count);

    if let Some(column) = query.sort_column {
        let column = ColumnId::new(column)?;
        if !markup.is_declared(&column) {
            return Err(ServiceError::Validation(format!(
                "column {column} is not sortable"
            )));
        }
        let direction = query.sort_direction.unwrap_or(SortDirection::Asc);
        list_query = list_query.sort(column.as_str(), direction);
    }

    if let Some(term) = query.search.as_deref().and_then(SearchTerm::parse_optional) {
        list_query = list_query.search(term.as_str());
    }

    let (total, rows) = repo.list_rows(list_query).map_err(|err| {
        log::error!("Failed to list rows: {err}");
        ServiceError::from(err)
    })?;

    Ok(ServerPage {
        current: page,
        row_count,
        total,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use serde_json::json;

    use super::*;
    use crate::domain::server_page::Row;
    use crate::domain::table::HeaderCell;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn markup() -> TableMarkup {
        TableMarkup::new("/api/v1/rows", "table/rows.html")
            .column(HeaderCell::new(ColumnId::new("id").unwrap()))
            .column(HeaderCell::new(ColumnId::new("name").unwrap()))
    }

    fn row(id: i64) -> Row {
        json!({ "id": id }).as_object().cloned().unwrap()
    }

    #[test]
    fn defaults_page_and_row_count() {
        let mut repo = MockRepository::new();
        repo.expect_list_rows()
            .with(eq(RowListQuery::new().paginate(1, DEFAULT_ROW_COUNT)))
            .times(1)
            .returning(|_| Ok((2, vec![row(1), row(2)])));

        let page = list_rows(&repo, &markup(), RowsQuery::default()).unwrap();

        assert_eq!(page.current, 1);
        assert_eq!(page.row_count, DEFAULT_ROW_COUNT);
        assert_eq!(page.total, 2);
        assert_eq!(page.rows.len(), 2);
    }

    #[test]
    fn forwards_sort_and_trimmed_search() {
        let mut repo = MockRepository::new();
        repo.expect_list_rows()
            .with(eq(RowListQuery::new()
                .paginate(3, 10)
                .sort("name", SortDirection::Desc)
                .search("acme")))
            .times(1)
            .returning(|_| Ok((0, Vec::new())));

        let query = RowsQuery {
            page: Some(3),
            row_count: Some(10),
            sort_column: Some("name".to_string()),
            sort_direction: Some(SortDirection::Desc),
            search: Some("  acme ".to_string()),
        };
        let page = list_rows(&repo, &markup(), query).unwrap();
        assert_eq!(page.current, 3);
        assert!(page.rows.is_empty());
    }

    #[test]
    fn blank_search_is_not_forwarded() {
        let mut repo = MockRepository::new();
        repo.expect_list_rows()
            .withf(|query| query.search.is_none())
            .times(1)
            .returning(|_| Ok((0, Vec::new())));

        let query = RowsQuery {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(list_rows(&repo, &markup(), query).is_ok());
    }

    #[test]
    fn undeclared_sort_column_is_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_list_rows().times(0);

        let query = RowsQuery {
            sort_column: Some("password".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            list_rows(&repo, &markup(), query),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn zero_page_is_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_list_rows().times(0);

        let query = RowsQuery {
            page: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            list_rows(&repo, &markup(), query),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn repository_failure_is_internal() {
        let mut repo = MockRepository::new();
        repo.expect_list_rows()
            .returning(|_| Err(RepositoryError::DatasetError("corrupt".to_string())));

        assert!(matches!(
            list_rows(&repo, &markup(), RowsQuery::default()),
            Err(ServiceError::Internal(_))
        ));
    }
}
