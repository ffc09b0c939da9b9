use std::cmp::Ordering;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use crate::domain::server_page::Row;
use crate::domain::types::SortDirection;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{RowListQuery, RowReader};

/// Read-only row store loaded from a CSV file with a header row.
#[derive(Clone, Debug)]
pub struct CsvRowRepository {
    columns: Arc<Vec<String>>,
    rows: Arc<Vec<Row>>,
}

impl CsvRowRepository {
    pub fn from_path(path: impl AsRef<Path>) -> RepositoryResult<Self> {
        let reader = csv::Reader::from_path(path)?;
        Self::from_reader(reader)
    }

    pub fn from_reader<R: Read>(mut reader: csv::Reader<R>) -> RepositoryResult<Self> {
        let columns = reader
            .headers()?
            .iter()
            .map(|header| header.trim().to_string())
            .collect::<Vec<_>>();

        if columns.iter().all(|c| c.is_empty()) {
            return Err(RepositoryError::ValidationError(
                "dataset has no header row".to_string(),
            ));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let row: Row = columns
                .iter()
                .zip(record.iter())
                .map(|(column, raw)| (column.clone(), field_value(raw)))
                .collect();
            rows.push(row);
        }

        Ok(Self {
            columns: Arc::new(columns),
            rows: Arc::new(rows),
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Integers become JSON numbers; everything else stays text.
fn field_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    match trimmed.parse::<i64>() {
        Ok(number) => Value::from(number),
        Err(_) => Value::String(trimmed.to_string()),
    }
}

fn display_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Numbers compare numerically, everything else case-insensitively as text.
/// Missing fields sort first.
fn compare_fields(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(left), Some(right)) => match (numeric(left), numeric(right)) {
            (Some(l), Some(r)) => l.partial_cmp(&r).unwrap_or(Ordering::Equal),
            _ => display_text(left)
                .to_lowercase()
                .cmp(&display_text(right).to_lowercase()),
        },
    }
}

fn matches_search(row: &Row, needle: &str) -> bool {
    row.values()
        .any(|value| display_text(value).to_lowercase().contains(needle))
}

impl RowReader for CsvRowRepository {
    fn columns(&self) -> Vec<String> {
        self.columns.as_ref().clone()
    }

    fn list_rows(&self, query: RowListQuery) -> RepositoryResult<(usize, Vec<Row>)> {
        let needle = query
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        let mut matching: Vec<&Row> = match &needle {
            Some(needle) => self
                .rows
                .iter()
                .filter(|row| matches_search(row, needle))
                .collect(),
            None => self.rows.iter().collect(),
        };

        let total = matching.len();

        if let Some(sort) = &query.sort {
            if !self.columns.contains(&sort.column) {
                return Err(RepositoryError::ValidationError(format!(
                    "unknown column {}",
                    sort.column
                )));
            }
            matching.sort_by(|a, b| {
                let ordering = compare_fields(a.get(&sort.column), b.get(&sort.column));
                match sort.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }

        let rows = match &query.pagination {
            Some(pagination) => {
                let offset = pagination
                    .page
                    .saturating_sub(1)
                    .saturating_mul(pagination.per_page);
                matching
                    .into_iter()
                    .skip(offset)
                    .take(pagination.per_page)
                    .cloned()
                    .collect()
            }
            None => matching.into_iter().cloned().collect(),
        };

        Ok((total, rows))
    }
}
