//! History synchronisation after successful loads.

use crate::component::collaborators::Navigator;
use crate::domain::request_state::RequestState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryAction {
    Replace,
    Push,
}

/// Replaces the current history entry on the first successful load and
/// pushes a new entry on every later one.
#[derive(Debug, Default)]
pub struct HistorySync {
    recorded: bool,
}

impl HistorySync {
    pub fn record<N>(&mut self, navigator: &mut N, state: &RequestState) -> HistoryAction
    where
        N: Navigator + ?Sized,
    {
        if self.recorded {
            navigator.push(state);
            HistoryAction::Push
        } else {
            navigator.replace(state);
            self.recorded = true;
            HistoryAction::Replace
        }
    }
}

/// One entry of a [`HistoryStack`]: the query string the state serializes to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub query: String,
    pub state: RequestState,
}

/// In-memory navigation history.
///
/// Behaves like a browser session history without back/forward: `replace`
/// overwrites the current entry and `push` appends a new one.
#[derive(Clone, Debug, Default)]
pub struct HistoryStack {
    entries: Vec<HistoryEntry>,
    actions: Vec<HistoryAction>,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Every navigator call received, in order.
    pub fn actions(&self) -> &[HistoryAction] {
        &self.actions
    }

    pub fn current(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    fn entry(state: &RequestState) -> HistoryEntry {
        let query = state.to_query().to_query_string().unwrap_or_else(|err| {
            log::error!("Failed to encode history entry: {err}");
            String::new()
        });
        HistoryEntry {
            query,
            state: state.clone(),
        }
    }
}

impl Navigator for HistoryStack {
    fn replace(&mut self, state: &RequestState) {
        let entry = Self::entry(state);
        match self.entries.last_mut() {
            Some(current) => *current = entry,
            None => self.entries.push(entry),
        }
        self.actions.push(HistoryAction::Replace);
    }

    fn push(&mut self, state: &RequestState) {
        self.entries.push(Self::entry(state));
        self.actions.push(HistoryAction::Push);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::mock::MockNavigation;
    use crate::domain::types::PageNumber;

    #[test]
    fn replaces_once_then_pushes() {
        let mut navigator = MockNavigation::new();
        navigator.expect_replace().times(1).return_const(());
        navigator.expect_push().times(3).return_const(());

        let mut sync = HistorySync::default();
        let state = RequestState::default();
        assert_eq!(sync.record(&mut navigator, &state), HistoryAction::Replace);
        for _ in 0..3 {
            assert_eq!(sync.record(&mut navigator, &state), HistoryAction::Push);
        }
    }

    #[test]
    fn stack_replace_overwrites_current_entry() {
        let mut stack = HistoryStack::new();
        let mut state = RequestState::default();
        stack.replace(&state);
        state.go_to_page(PageNumber::new(2).unwrap());
        stack.replace(&state);

        assert_eq!(stack.entries().len(), 1);
        assert_eq!(stack.current().unwrap().query, "page=2&rowCount=15");
    }

    #[test]
    fn stack_push_appends() {
        let mut stack = HistoryStack::new();
        let mut state = RequestState::default();
        stack.replace(&state);
        state.go_to_page(PageNumber::new(3).unwrap());
        stack.push(&state);

        assert_eq!(stack.entries().len(), 2);
        assert_eq!(stack.entries()[0].query, "page=1&rowCount=15");
        assert_eq!(stack.current().unwrap().state.page().get(), 3);
        assert_eq!(
            stack.actions(),
            &[HistoryAction::Replace, HistoryAction::Push]
        );
    }
}
