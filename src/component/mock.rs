//! Mock collaborators for isolating the component in tests.

use mockall::mock;

use crate::component::collaborators::{
    Navigator, PaginationWidget, Placeholder, RowTemplate, TableView,
};
use crate::component::errors::RenderError;
use crate::domain::request_state::RequestState;
use crate::domain::server_page::Row;
use crate::domain::types::{ColumnId, SortDirection};

mock! {
    pub View {}

    impl TableView for View {
        fn show_placeholder(&mut self, placeholder: &Placeholder);
        fn replace_body(&mut self, html: String);
        fn replace_pagination(&mut self, html: String);
        fn clear_sort_indicators(&mut self);
        fn set_sort_indicator(&mut self, column: &ColumnId, direction: SortDirection);
        fn show_error(&mut self, message: &str);
        fn first_row_height(&self) -> Option<u32>;
    }
}

mock! {
    pub Navigation {}

    impl Navigator for Navigation {
        fn replace(&mut self, state: &RequestState);
        fn push(&mut self, state: &RequestState);
    }
}

mock! {
    pub Rows {}

    impl RowTemplate for Rows {
        fn render_rows(&self, rows: &[Row]) -> Result<String, RenderError>;
    }
}

mock! {
    pub Pagination {}

    impl PaginationWidget for Pagination {
        fn render(
            &self,
            current: usize,
            page_count: usize,
            state: RequestState,
        ) -> Result<String, RenderError>;
    }
}
