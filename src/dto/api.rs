//! Wire format of the paged rows endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::types::SortDirection;

/// Largest page size the endpoint accepts.
pub const MAX_ROW_COUNT: usize = 500;

/// Query parameters of `GET <data-src>`.
///
/// The component always fills `page` and `row_count`; `sort_*` are sent only
/// while a column is sorted and `search` only when a term is active.
#[derive(Clone, Debug, Default, Serialize, Deserialize, Validate, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RowsQuery {
    #[validate(range(min = 1))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[validate(range(min = 1, max = MAX_ROW_COUNT))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_count: Option<usize>,
    #[validate(length(min = 1))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_column: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<SortDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl RowsQuery {
    /// Serializes the query as an `application/x-www-form-urlencoded` string.
    pub fn to_query_string(&self) -> Result<String, serde_html_form::ser::Error> {
        serde_html_form::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omits_absent_parameters() {
        let query = RowsQuery {
            page: Some(1),
            row_count: Some(15),
            ..Default::default()
        };
        assert_eq!(query.to_query_string().unwrap(), "page=1&rowCount=15");
    }

    #[test]
    fn uses_camel_case_names() {
        let query = RowsQuery {
            page: Some(2),
            row_count: Some(10),
            sort_column: Some("id".to_string()),
            sort_direction: Some(SortDirection::Desc),
            search: Some("acme corp".to_string()),
        };
        assert_eq!(
            query.to_query_string().unwrap(),
            "page=2&rowCount=10&sortColumn=id&sortDirection=desc&search=acme+corp"
        );
    }

    #[test]
    fn validation_rejects_zero_page_and_huge_row_count() {
        let zero_page = RowsQuery {
            page: Some(0),
            ..Default::default()
        };
        assert!(zero_page.validate().is_err());

        let huge = RowsQuery {
            row_count: Some(MAX_ROW_COUNT + 1),
            ..Default::default()
        };
        assert!(huge.validate().is_err());

        assert!(RowsQuery::default().validate().is_ok());
    }
}
