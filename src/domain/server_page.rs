//! One page of rows as returned by the remote endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::pagination::{PageCountPolicy, page_count};

/// An opaque mapping of field name to display value for one table row.
pub type Row = Map<String, Value>;

/// The most recently fetched response payload.
///
/// Replaced wholesale on every fetch; never merged with prior data.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServerPage {
    /// Page the server actually returned.
    pub current: usize,
    /// Page size the server used.
    pub row_count: usize,
    /// Total rows matching the query across all pages.
    pub total: usize,
    pub rows: Vec<Row>,
}

impl ServerPage {
    /// Number of pages under the given rounding policy.
    pub fn page_count(&self, policy: PageCountPolicy) -> usize {
        page_count(self.total, self.row_count, policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_endpoint_payload() {
        let page: ServerPage = serde_json::from_value(json!({
            "current": 1,
            "rowCount": 15,
            "total": 2,
            "rows": [{ "id": 1, "name": "Alice" }, { "id": 2, "name": "Bob" }]
        }))
        .unwrap();

        assert_eq!(page.current, 1);
        assert_eq!(page.row_count, 15);
        assert_eq!(page.rows.len(), 2);
        assert_eq!(page.rows[1]["name"], json!("Bob"));
        assert_eq!(page.page_count(PageCountPolicy::Ceiling), 1);
    }

    #[test]
    fn rejects_payload_without_rows() {
        let result = serde_json::from_value::<ServerPage>(json!({
            "current": 1, "rowCount": 15, "total": 0
        }));
        assert!(result.is_err());
    }
}
