//! The remote data table component.
//!
//! [`DataTable`] owns the [`RequestState`] of one table and keeps it in sync
//! with three triggers (header clicks, pagination links, the search form) and
//! the navigation history. Every accepted [`TableEvent`] mutates the state,
//! shows the loading placeholder and issues a single fetch; the response is
//! rendered only if it answers the most recently issued request.

use std::future::Future;
use std::pin::Pin;

use crate::component::collaborators::{DataSource, Navigator, PaginationWidget, RowTemplate, TableView};
use crate::component::errors::{ComponentError, ComponentResult, FetchError, RenderError};
use crate::component::events::{TableEvent, TableEvents};
use crate::component::history::{HistoryAction, HistorySync};
use crate::domain::request_state::RequestState;
use crate::domain::server_page::ServerPage;
use crate::domain::table::TableMarkup;
use crate::domain::types::{PageNumber, SearchTerm};
use crate::dto::api::RowsQuery;
use crate::pagination::PageCountPolicy;

pub mod collaborators;
pub mod driver;
pub mod errors;
pub mod events;
pub mod history;
pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod templates;
pub mod view;

type FetchOutcome = (PendingFetch, Result<ServerPage, FetchError>);
type InFlight = Pin<Box<dyn Future<Output = FetchOutcome>>>;

/// A fetch issued for one request-state snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingFetch {
    generation: u64,
    query: RowsQuery,
}

impl PendingFetch {
    /// Sequence number; only the latest issued generation is rendered.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn query(&self) -> &RowsQuery {
        &self.query
    }
}

/// Result of applying a fetch response.
#[derive(Debug, PartialEq)]
pub enum LoadOutcome {
    Rendered {
        rows: usize,
        page_count: usize,
        history: HistoryAction,
    },
    /// A newer request was issued; the response was discarded.
    Stale,
    FetchFailed(FetchError),
    RenderFailed(RenderError),
}

/// Row and pagination templating collaborators.
pub struct Renderers {
    rows: Box<dyn RowTemplate>,
    pagination: Box<dyn PaginationWidget>,
}

impl Renderers {
    pub fn new(
        rows: impl RowTemplate + 'static,
        pagination: impl PaginationWidget + 'static,
    ) -> Self {
        Self {
            rows: Box::new(rows),
            pagination: Box::new(pagination),
        }
    }
}

pub struct DataTable<S, V, N> {
    markup: TableMarkup,
    state: RequestState,
    source: S,
    renderers: Renderers,
    view: V,
    navigator: N,
    history: HistorySync,
    policy: PageCountPolicy,
    generation: u64,
    row_height: Option<u32>,
    last_page: Option<ServerPage>,
}

impl<S, V, N> DataTable<S, V, N>
where
    S: DataSource + Clone + 'static,
    V: TableView,
    N: Navigator,
{
    /// Validates the markup, resolves the initial state from `url_query` and
    /// marks the initially sorted header.
    pub fn new(
        markup: TableMarkup,
        url_query: &str,
        source: S,
        renderers: Renderers,
        mut view: V,
        navigator: N,
    ) -> ComponentResult<Self> {
        markup.validate()?;
        let state = RequestState::resolve(url_query, &markup);
        driver::mark_sort_headers(&mut view, state.sort());

        Ok(Self {
            markup,
            state,
            source,
            renderers,
            view,
            navigator,
            history: HistorySync::default(),
            policy: PageCountPolicy::default(),
            generation: 0,
            row_height: None,
            last_page: None,
        })
    }

    pub fn page_count_policy(mut self, policy: PageCountPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn markup(&self) -> &TableMarkup {
        &self.markup
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// The most recently rendered response.
    pub fn last_page(&self) -> Option<&ServerPage> {
        self.last_page.as_ref()
    }

    /// Shows the loading placeholder and issues a fetch for the current state.
    pub fn reload(&mut self) -> PendingFetch {
        let placeholder = driver::placeholder(
            self.markup.column_count(),
            self.row_height,
            self.state.row_count().get(),
        );
        self.view.show_placeholder(&placeholder);

        self.generation += 1;
        let pending = PendingFetch {
            generation: self.generation,
            query: self.state.to_query(),
        };
        log::debug!(
            "Issuing fetch #{} for {:?}",
            pending.generation,
            pending.query
        );
        pending
    }

    /// Applies `event` to the request state and issues the reload.
    ///
    /// Rejected events leave the state and the view untouched.
    pub fn begin(&mut self, event: TableEvent) -> ComponentResult<PendingFetch> {
        match event {
            TableEvent::Sort { column } => {
                let column = self.markup.find(&column).cloned().ok_or_else(|| {
                    ComponentError::InvalidParameter(format!("unknown sort column {column:?}"))
                })?;
                self.state.toggle_sort(column);
                driver::mark_sort_headers(&mut self.view, self.state.sort());
            }
            TableEvent::Paginate { page } => {
                let page = PageNumber::new(page).map_err(|err| {
                    ComponentError::InvalidParameter(format!("page {page}: {err}"))
                })?;
                self.state.go_to_page(page);
            }
            TableEvent::Search { term } => {
                self.state.apply_search(SearchTerm::parse_optional(&term));
            }
        }

        Ok(self.reload())
    }

    /// Renders the response of `pending` unless a newer fetch was issued.
    pub fn complete(
        &mut self,
        pending: PendingFetch,
        result: Result<ServerPage, FetchError>,
    ) -> LoadOutcome {
        if pending.generation != self.generation {
            log::debug!(
                "Discarding response #{} superseded by #{}",
                pending.generation,
                self.generation
            );
            return LoadOutcome::Stale;
        }

        let page = match result {
            Ok(page) => page,
            Err(err) => {
                log::error!("Failed to load table rows: {err}");
                self.view.show_error(&err.to_string());
                return LoadOutcome::FetchFailed(err);
            }
        };

        let page_count = match driver::render_page(
            &mut self.view,
            self.renderers.rows.as_ref(),
            self.renderers.pagination.as_ref(),
            &page,
            &self.state,
            self.policy,
        ) {
            Ok(page_count) => page_count,
            Err(err) => {
                log::error!("Failed to render table rows: {err}");
                self.view.show_error(&err.to_string());
                return LoadOutcome::RenderFailed(err);
            }
        };

        if self.row_height.is_none() {
            self.row_height = self.view.first_row_height();
        }

        let history = self.history.record(&mut self.navigator, &self.state);
        let rows = page.rows.len();
        self.last_page = Some(page);

        LoadOutcome::Rendered {
            rows,
            page_count,
            history,
        }
    }

    /// Reloads the current state and waits for the response.
    pub async fn load(&mut self) -> LoadOutcome {
        let pending = self.reload();
        let result = self.source.fetch(&pending.query).await;
        self.complete(pending, result)
    }

    /// Handles one event end to end.
    pub async fn dispatch(&mut self, event: TableEvent) -> ComponentResult<LoadOutcome> {
        let pending = self.begin(event)?;
        let result = self.source.fetch(&pending.query).await;
        Ok(self.complete(pending, result))
    }

    /// Performs the initial load, then consumes events until every
    /// [`TableHandle`](events::TableHandle) is dropped.
    ///
    /// An event arriving while a fetch is outstanding cancels that fetch.
    pub async fn run(&mut self, mut events: TableEvents) {
        let initial = self.reload();
        let mut in_flight: Option<InFlight> = Some(self.fetch(initial));
        let mut open = true;

        while open || in_flight.is_some() {
            tokio::select! {
                biased;

                (pending, result) = next_outcome(&mut in_flight) => {
                    in_flight = None;
                    let outcome = self.complete(pending, result);
                    log::debug!("Load finished: {outcome:?}");
                }
                event = events.recv(), if open => match event {
                    Some(event) => {
                        let name = event.name();
                        match self.begin(event) {
                            Ok(pending) => {
                                if in_flight.is_some() {
                                    log::debug!("Cancelling outstanding fetch for {name}");
                                }
                                in_flight = Some(self.fetch(pending));
                            }
                            Err(err) => log::warn!("Rejected {name}: {err}"),
                        }
                    }
                    None => open = false,
                },
            }
        }
    }

    fn fetch(&self, pending: PendingFetch) -> InFlight {
        let source = self.source.clone();
        Box::pin(async move {
            let result = source.fetch(&pending.query).await;
            (pending, result)
        })
    }
}

async fn next_outcome(in_flight: &mut Option<InFlight>) -> FetchOutcome {
    match in_flight {
        Some(fetch) => fetch.await,
        None => std::future::pending().await,
    }
}
