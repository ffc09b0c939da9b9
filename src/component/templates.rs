//! Tera-backed row template and the default pagination widget.

use serde::Serialize;
use tera::{Context, Tera};

use crate::component::collaborators::{PaginationWidget, RowTemplate};
use crate::component::errors::RenderError;
use crate::domain::request_state::RequestState;
use crate::domain::server_page::Row;
use crate::domain::table::ConfigurationError;
use crate::pagination::PageWindow;

/// Renders rows with a named Tera template; the template iterates `rows`.
#[derive(Debug, Clone)]
pub struct TeraRowTemplate {
    tera: Tera,
    name: String,
}

impl TeraRowTemplate {
    /// Binds to the template registered under `selector`.
    pub fn new(tera: Tera, selector: &str) -> Result<Self, ConfigurationError> {
        if !tera.get_template_names().any(|name| name == selector) {
            return Err(ConfigurationError::MissingTemplate(selector.to_string()));
        }
        Ok(Self {
            tera,
            name: selector.to_string(),
        })
    }

    /// Registers `source` under `selector` in a fresh Tera instance.
    pub fn from_source(selector: &str, source: &str) -> Result<Self, ConfigurationError> {
        let mut tera = Tera::default();
        tera.add_raw_template(selector, source).map_err(|err| {
            log::error!("Failed to parse rows template {selector}: {err}");
            ConfigurationError::MissingTemplate(selector.to_string())
        })?;
        Self::new(tera, selector)
    }
}

impl RowTemplate for TeraRowTemplate {
    fn render_rows(&self, rows: &[Row]) -> Result<String, RenderError> {
        let mut context = Context::new();
        context.insert("rows", rows);
        Ok(self.tera.render(&self.name, &context)?)
    }
}

const PAGINATION_TEMPLATE: &str = r#"<nav class="pagination">
{%- if previous %}<a class="page-prev" href="?{{ previous.href }}" data-page="{{ previous.page }}">&laquo;</a>{% endif -%}
{%- for link in links -%}
{%- if link.page -%}
{%- if link.current %}<span class="page current" aria-current="page">{{ link.page }}</span>
{%- else %}<a class="page" href="?{{ link.href }}" data-page="{{ link.page }}">{{ link.page }}</a>{% endif -%}
{%- else %}<span class="page-gap">&hellip;</span>{% endif -%}
{%- endfor -%}
{%- if next %}<a class="page-next" href="?{{ next.href }}" data-page="{{ next.page }}">&raquo;</a>{% endif -%}
</nav>"#;

#[derive(Serialize)]
struct PageLink {
    page: Option<usize>,
    href: Option<String>,
    current: bool,
}

/// Windowed list of page links carrying the full request state in each href.
#[derive(Debug, Default, Clone, Copy)]
pub struct LinkPagination;

impl LinkPagination {
    fn link(state: &RequestState, page: usize, current: usize) -> Result<PageLink, RenderError> {
        let href = state
            .to_query_for_page(page)
            .to_query_string()
            .map_err(|err| RenderError::Template(err.to_string()))?;
        Ok(PageLink {
            page: Some(page),
            href: Some(href),
            current: page == current,
        })
    }
}

impl PaginationWidget for LinkPagination {
    fn render(
        &self,
        current: usize,
        page_count: usize,
        state: RequestState,
    ) -> Result<String, RenderError> {
        let window = PageWindow::new(current, page_count);

        let links = window
            .pages
            .iter()
            .map(|page| match page {
                Some(page) => Self::link(&state, *page, window.page),
                None => Ok(PageLink {
                    page: None,
                    href: None,
                    current: false,
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let previous = if window.has_previous() {
            Some(Self::link(&state, window.page - 1, window.page)?)
        } else {
            None
        };
        let next = if window.has_next() {
            Some(Self::link(&state, window.page + 1, window.page)?)
        } else {
            None
        };

        let mut context = Context::new();
        context.insert("links", &links);
        context.insert("previous", &previous);
        context.insert("next", &next);

        Ok(Tera::one_off(PAGINATION_TEMPLATE, &context, true)?)
    }
}
