//! Table markup contract consumed from the host page.
//!
//! A host page declares the endpoint (`data-src`), the rows template selector
//! (`data-rows-template`) and one header cell per column (`data-column`, with
//! at most one `data-sort`). [`TableMarkup`] is that contract as data, loaded
//! from configuration or built by the host directly.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::types::{ColumnId, SortDirection};

/// Problems with the host markup or templates detected at initialization.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("rows template not found: {0}")]
    MissingTemplate(String),
    #[error("table endpoint (data-src) is empty")]
    EmptyEndpoint,
    #[error("invalid table endpoint {0}")]
    InvalidEndpoint(String),
    #[error("table declares no columns")]
    NoColumns,
    #[error("column declared twice: {0}")]
    DuplicateColumn(String),
    #[error("more than one header declares a default sort")]
    MultipleDefaultSorts,
}

/// One `th` element of the table header.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeaderCell {
    /// Field identifier (`data-column`).
    pub column: ColumnId,
    /// Caption shown in the header; falls back to the column identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Initial sort direction (`data-sort`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortDirection>,
}

impl HeaderCell {
    pub fn new(column: ColumnId) -> Self {
        Self {
            column,
            label: None,
            sort: None,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn default_sort(mut self, direction: SortDirection) -> Self {
        self.sort = Some(direction);
        self
    }

    /// Caption to render for this header.
    pub fn caption(&self) -> &str {
        self.label.as_deref().unwrap_or(self.column.as_str())
    }
}

/// Attributes of the root table element and its header cells.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableMarkup {
    /// Endpoint URL (`data-src`).
    pub src: String,
    /// Selector of the rows template element (`data-rows-template`).
    pub rows_template: String,
    /// Header cells in display order.
    pub columns: Vec<HeaderCell>,
}

impl TableMarkup {
    pub fn new(src: impl Into<String>, rows_template: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            rows_template: rows_template.into(),
            columns: Vec::new(),
        }
    }

    pub fn column(mut self, cell: HeaderCell) -> Self {
        self.columns.push(cell);
        self
    }

    /// Checks the markup contract, failing fast with the offending element.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.src.trim().is_empty() {
            return Err(ConfigurationError::EmptyEndpoint);
        }
        if self.rows_template.trim().is_empty() {
            return Err(ConfigurationError::MissingTemplate(
                self.rows_template.clone(),
            ));
        }
        if self.columns.is_empty() {
            return Err(ConfigurationError::NoColumns);
        }

        let mut seen: Vec<&ColumnId> = Vec::with_capacity(self.columns.len());
        for cell in &self.columns {
            if seen.contains(&&cell.column) {
                return Err(ConfigurationError::DuplicateColumn(
                    cell.column.to_string(),
                ));
            }
            seen.push(&cell.column);
        }

        if self.columns.iter().filter(|c| c.sort.is_some()).count() > 1 {
            return Err(ConfigurationError::MultipleDefaultSorts);
        }

        Ok(())
    }

    /// The header cell flagged as default sort, if any.
    pub fn default_sort(&self) -> Option<(&ColumnId, SortDirection)> {
        self.columns
            .iter()
            .find_map(|c| c.sort.map(|direction| (&c.column, direction)))
    }

    pub fn is_declared(&self, column: &ColumnId) -> bool {
        self.columns.iter().any(|c| &c.column == column)
    }

    /// Looks up a declared column by its raw identifier.
    pub fn find(&self, column: &str) -> Option<&ColumnId> {
        self.columns
            .iter()
            .map(|c| &c.column)
            .find(|c| c.as_str() == column.trim())
    }

    /// Number of declared columns; the loading placeholder spans all of them.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str) -> HeaderCell {
        HeaderCell::new(ColumnId::new(name).unwrap())
    }

    fn markup() -> TableMarkup {
        TableMarkup::new("/api/v1/rows", "rows.html")
            .column(column("id").default_sort(SortDirection::Asc))
            .column(column("name").label("Name"))
    }

    #[test]
    fn valid_markup_passes() {
        assert_eq!(markup().validate(), Ok(()));
    }

    #[test]
    fn missing_template_names_the_selector() {
        let mut markup = markup();
        markup.rows_template = " ".to_string();
        assert_eq!(
            markup.validate(),
            Err(ConfigurationError::MissingTemplate(" ".to_string()))
        );
    }

    #[test]
    fn rejects_two_default_sorts() {
        let markup = markup().column(column("email").default_sort(SortDirection::Desc));
        assert_eq!(
            markup.validate(),
            Err(ConfigurationError::MultipleDefaultSorts)
        );
    }

    #[test]
    fn rejects_duplicate_columns() {
        let markup = markup().column(column("id"));
        assert_eq!(
            markup.validate(),
            Err(ConfigurationError::DuplicateColumn("id".to_string()))
        );
    }

    #[test]
    fn rejects_empty_endpoint_and_columns() {
        let empty = TableMarkup::new("", "rows.html").column(column("id"));
        assert_eq!(empty.validate(), Err(ConfigurationError::EmptyEndpoint));

        let no_columns = TableMarkup::new("/api", "rows.html");
        assert_eq!(no_columns.validate(), Err(ConfigurationError::NoColumns));
    }

    #[test]
    fn finds_default_sort_and_captions() {
        let markup = markup();
        let (column, direction) = markup.default_sort().unwrap();
        assert_eq!(column.as_str(), "id");
        assert_eq!(direction, SortDirection::Asc);
        assert_eq!(markup.columns[0].caption(), "id");
        assert_eq!(markup.columns[1].caption(), "Name");
        assert!(markup.find("name").is_some());
        assert!(markup.find("email").is_none());
    }

    #[test]
    fn deserializes_from_yaml_like_json() {
        let markup: TableMarkup = serde_json::from_value(serde_json::json!({
            "src": "/api/v1/rows",
            "rows_template": "rows.html",
            "columns": [
                { "column": "id", "sort": "asc" },
                { "column": "name", "label": "Name" }
            ]
        }))
        .unwrap();
        assert_eq!(markup.column_count(), 2);
        assert_eq!(markup.default_sort().map(|(_, d)| d), Some(SortDirection::Asc));
    }
}
