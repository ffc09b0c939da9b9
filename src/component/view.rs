//! In-memory rendering target.

use std::fmt::{Display, Formatter};

use crate::component::collaborators::{Placeholder, TableView};
use crate::domain::table::TableMarkup;
use crate::domain::types::{ColumnId, SortDirection};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderState {
    pub column: ColumnId,
    pub caption: String,
    /// Value of the `data-sort` indicator, when set.
    pub sort: Option<SortDirection>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum BodyState {
    #[default]
    Empty,
    Loading(Placeholder),
    Rows(String),
    Error(String),
}

/// Table materialized as plain data: header indicators, body and footer.
#[derive(Clone, Debug)]
pub struct MaterializedView {
    headers: Vec<HeaderState>,
    body: BodyState,
    pagination: Option<String>,
    row_height: u32,
}

impl MaterializedView {
    /// `row_height` is reported for the first row once rows are rendered.
    pub fn new(markup: &TableMarkup, row_height: u32) -> Self {
        let headers = markup
            .columns
            .iter()
            .map(|cell| HeaderState {
                column: cell.column.clone(),
                caption: cell.caption().to_string(),
                sort: None,
            })
            .collect();
        Self {
            headers,
            body: BodyState::Empty,
            pagination: None,
            row_height,
        }
    }

    pub fn headers(&self) -> &[HeaderState] {
        &self.headers
    }

    pub fn body(&self) -> &BodyState {
        &self.body
    }

    pub fn pagination(&self) -> Option<&str> {
        self.pagination.as_deref()
    }

    /// Header cells currently carrying a sort indicator.
    pub fn sorted_headers(&self) -> Vec<(&ColumnId, SortDirection)> {
        self.headers
            .iter()
            .filter_map(|h| h.sort.map(|direction| (&h.column, direction)))
            .collect()
    }
}

impl TableView for MaterializedView {
    fn show_placeholder(&mut self, placeholder: &Placeholder) {
        self.body = BodyState::Loading(placeholder.clone());
    }

    fn replace_body(&mut self, html: String) {
        self.body = BodyState::Rows(html);
    }

    fn replace_pagination(&mut self, html: String) {
        self.pagination = Some(html);
    }

    fn clear_sort_indicators(&mut self) {
        for header in &mut self.headers {
            header.sort = None;
        }
    }

    fn set_sort_indicator(&mut self, column: &ColumnId, direction: SortDirection) {
        if let Some(header) = self.headers.iter_mut().find(|h| &h.column == column) {
            header.sort = Some(direction);
        }
    }

    fn show_error(&mut self, message: &str) {
        self.body = BodyState::Error(message.to_string());
    }

    fn first_row_height(&self) -> Option<u32> {
        match &self.body {
            BodyState::Rows(html) if !html.trim().is_empty() => Some(self.row_height),
            _ => None,
        }
    }
}

impl Display for MaterializedView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let captions = self
            .headers
            .iter()
            .map(|h| match h.sort {
                Some(SortDirection::Asc) => format!("{} ^", h.caption),
                Some(SortDirection::Desc) => format!("{} v", h.caption),
                None => h.caption.clone(),
            })
            .collect::<Vec<_>>();
        writeln!(f, "| {} |", captions.join(" | "))?;

        match &self.body {
            BodyState::Empty => writeln!(f, "(empty)")?,
            BodyState::Loading(_) => writeln!(f, "Loading...")?,
            BodyState::Rows(html) => writeln!(f, "{}", html.trim())?,
            BodyState::Error(message) => writeln!(f, "Error: {message}")?,
        }

        if let Some(pagination) = &self.pagination {
            writeln!(f, "{}", pagination.trim())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::HeaderCell;

    fn view() -> MaterializedView {
        let markup = TableMarkup::new("/api", "rows.html")
            .column(HeaderCell::new(ColumnId::new("id").unwrap()).label("ID"))
            .column(HeaderCell::new(ColumnId::new("name").unwrap()));
        MaterializedView::new(&markup, 24)
    }

    #[test]
    fn indicator_moves_between_headers() {
        let mut view = view();
        let id = ColumnId::new("id").unwrap();
        let name = ColumnId::new("name").unwrap();

        view.set_sort_indicator(&id, SortDirection::Asc);
        view.clear_sort_indicators();
        view.set_sort_indicator(&name, SortDirection::Desc);

        assert_eq!(view.sorted_headers(), vec![(&name, SortDirection::Desc)]);
    }

    #[test]
    fn row_height_is_known_only_with_rows() {
        let mut view = view();
        assert_eq!(view.first_row_height(), None);
        view.show_placeholder(&Placeholder {
            colspan: 2,
            height: None,
        });
        assert_eq!(view.first_row_height(), None);
        view.replace_body("<tr><td>1</td></tr>".to_string());
        assert_eq!(view.first_row_height(), Some(24));
        view.replace_body(String::new());
        assert_eq!(view.first_row_height(), None);
    }

    #[test]
    fn error_replaces_body_but_keeps_footer() {
        let mut view = view();
        view.replace_pagination("<nav></nav>".to_string());
        view.show_error("endpoint answered with status 500");
        assert_eq!(
            view.body(),
            &BodyState::Error("endpoint answered with status 500".to_string())
        );
        assert_eq!(view.pagination(), Some("<nav></nav>"));
    }

    #[test]
    fn displays_sort_markers() {
        let mut view = view();
        view.set_sort_indicator(&ColumnId::new("id").unwrap(), SortDirection::Asc);
        let text = view.to_string();
        assert!(text.starts_with("| ID ^ | name |"));
        assert!(text.contains("(empty)"));
    }
}
