//! Typed events emitted by the header, pagination and search widgets.

use tokio::sync::mpsc;

use crate::component::errors::{ComponentError, ComponentResult};

/// A user interaction that changes the request state and triggers a reload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableEvent {
    /// A header cell was clicked (`sort-request`).
    Sort { column: String },
    /// A pagination link was followed (`pagination-request`).
    Paginate { page: usize },
    /// The search form was submitted (`search-request`).
    Search { term: String },
}

impl TableEvent {
    pub fn sort(column: impl Into<String>) -> Self {
        TableEvent::Sort {
            column: column.into(),
        }
    }

    pub fn paginate(page: usize) -> Self {
        TableEvent::Paginate { page }
    }

    pub fn search(term: impl Into<String>) -> Self {
        TableEvent::Search { term: term.into() }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TableEvent::Sort { .. } => "sort-request",
            TableEvent::Paginate { .. } => "pagination-request",
            TableEvent::Search { .. } => "search-request",
        }
    }
}

/// Cloneable sender handed to the widgets of one table.
#[derive(Clone, Debug)]
pub struct TableHandle {
    sender: mpsc::UnboundedSender<TableEvent>,
}

/// Receiving end consumed by [`DataTable::run`](crate::component::DataTable::run).
#[derive(Debug)]
pub struct TableEvents {
    receiver: mpsc::UnboundedReceiver<TableEvent>,
}

/// Creates the event channel of one table component.
pub fn channel() -> (TableHandle, TableEvents) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (TableHandle { sender }, TableEvents { receiver })
}

impl TableHandle {
    pub fn emit(&self, event: TableEvent) -> ComponentResult<()> {
        self.sender
            .send(event)
            .map_err(|_| ComponentError::Detached)
    }

    pub fn sort(&self, column: impl Into<String>) -> ComponentResult<()> {
        self.emit(TableEvent::sort(column))
    }

    pub fn paginate(&self, page: usize) -> ComponentResult<()> {
        self.emit(TableEvent::paginate(page))
    }

    pub fn search(&self, term: impl Into<String>) -> ComponentResult<()> {
        self.emit(TableEvent::search(term))
    }
}

impl TableEvents {
    /// Next event in emission order; `None` once every handle is dropped.
    pub async fn recv(&mut self) -> Option<TableEvent> {
        self.receiver.recv().await
    }
}
