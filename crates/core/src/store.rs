use crate::DrawError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub index: usize,
    pub label: String,
    pub revealed: bool,
}

impl Ticket {
    pub fn new(index: usize, label: impl Into<String>) -> Self {
        Self {
            index,
            label: label.into(),
            revealed: false,
        }
    }

    /// One-based number shown in the hidden placeholder.
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    pub total: usize,
    pub picked: usize,
}

impl Counts {
    /// Tickets still hidden.
    pub fn remaining(self) -> usize {
        self.total - self.picked
    }
}

/// Localized status messages that can occupy the result slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    EnterOptions,
    DrawnOut,
}

impl Notice {
    pub fn key(self) -> &'static str {
        match self {
            Self::EnterOptions => "enterOptions",
            Self::DrawnOut => "drawnOut",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ResultSlot {
    #[default]
    Empty,
    Label(String),
    Notice(Notice),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealOutcome {
    Revealed(String),
    AlreadyRevealed,
}

#[derive(Debug, Default, Clone)]
pub struct TicketStore {
    tickets: Vec<Ticket>,
    picked_count: usize,
    history: Vec<String>,
    last_result: ResultSlot,
}

impl TicketStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initialize<I, S>(&mut self, options: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tickets = options
            .into_iter()
            .enumerate()
            .map(|(index, label)| Ticket::new(index, label))
            .collect();
        self.picked_count = 0;
        self.history.clear();
        self.last_result = ResultSlot::Empty;
    }

    /// Reveals the ticket at `index` and returns its label. Revealing an already revealed
    /// ticket is a no-op.
    pub fn reveal(&mut self, index: usize) -> Result<RevealOutcome, DrawError> {
        let ticket = self
            .tickets
            .get_mut(index)
            .ok_or(DrawError::InvalidTicket(index))?;
        if ticket.revealed {
            return Ok(RevealOutcome::AlreadyRevealed);
        }
        ticket.revealed = true;
        let label = ticket.label.clone();
        self.record_reveal(&label);
        Ok(RevealOutcome::Revealed(label))
    }

    /// Reveals the `nth` hidden ticket counting in index order, returning its index and
    /// label. `None` when fewer than `nth + 1` tickets are hidden.
    pub fn reveal_nth_hidden(&mut self, nth: usize) -> Option<(usize, String)> {
        let ticket = self
            .tickets
            .iter_mut()
            .filter(|ticket| !ticket.revealed)
            .nth(nth)?;
        ticket.revealed = true;
        let (index, label) = (ticket.index, ticket.label.clone());
        self.record_reveal(&label);
        Some((index, label))
    }

    fn record_reveal(&mut self, label: &str) {
        self.picked_count += 1;
        self.history.insert(0, label.to_string());
        self.last_result = ResultSlot::Label(label.to_string());
    }

    pub fn reset(&mut self) {
        self.tickets.clear();
        self.picked_count = 0;
        self.history.clear();
        self.last_result = ResultSlot::Empty;
    }

    pub fn set_notice(&mut self, notice: Notice) {
        self.last_result = ResultSlot::Notice(notice);
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn ticket(&self, index: usize) -> Option<&Ticket> {
        self.tickets.get(index)
    }

    pub fn counts(&self) -> Counts {
        Counts {
            total: self.tickets.len(),
            picked: self.picked_count,
        }
    }

    /// Revealed labels, newest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn last_result(&self) -> &ResultSlot {
        &self.last_result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(labels: &[&str]) -> TicketStore {
        let mut store = TicketStore::new();
        store.initialize(labels.iter().copied());
        store
    }

    fn revealed_count(store: &TicketStore) -> usize {
        store.tickets().iter().filter(|t| t.revealed).count()
    }

    #[test]
    fn initialize_creates_hidden_tickets_in_order() {
        let store = store_with(&["Apple", "Banana", "Cherry"]);
        let labels: Vec<&str> = store.tickets().iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["Apple", "Banana", "Cherry"]);
        assert!(store.tickets().iter().all(|t| !t.revealed));
        assert_eq!(store.tickets()[2].index, 2);
        assert_eq!(store.counts(), Counts { total: 3, picked: 0 });
        assert_eq!(store.last_result(), &ResultSlot::Empty);
    }

    #[test]
    fn reveal_is_idempotent() {
        let mut store = store_with(&["a", "b"]);
        assert_eq!(store.reveal(1), Ok(RevealOutcome::Revealed("b".to_string())));
        assert_eq!(store.reveal(1), Ok(RevealOutcome::AlreadyRevealed));
        assert_eq!(store.counts().picked, 1);
        assert_eq!(store.history(), ["b".to_string()]);
        assert_eq!(revealed_count(&store), 1);
    }

    #[test]
    fn nth_hidden_skips_revealed_tickets() {
        let mut store = store_with(&["a", "b", "c", "d"]);
        store.reveal(1).expect("reveal");
        assert_eq!(store.reveal_nth_hidden(1), Some((2, "c".to_string())));
        assert_eq!(store.counts().remaining(), 2);
        assert_eq!(store.history(), ["c".to_string(), "b".to_string()]);
        assert_eq!(store.reveal_nth_hidden(2), None);
        assert_eq!(store.counts().picked, 2);
    }

    #[test]
    fn history_is_newest_first() {
        let mut store = store_with(&["a", "b", "c"]);
        store.reveal(0).expect("reveal");
        store.reveal(2).expect("reveal");
        assert_eq!(store.history(), ["c".to_string(), "a".to_string()]);
        assert_eq!(store.last_result(), &ResultSlot::Label("c".to_string()));
    }

    #[test]
    fn reveal_out_of_range_leaves_store_untouched() {
        let mut store = store_with(&["a"]);
        assert_eq!(store.reveal(3), Err(DrawError::InvalidTicket(3)));
        assert_eq!(store.counts(), Counts { total: 1, picked: 0 });
        assert!(store.history().is_empty());
    }

    #[test]
    fn reset_after_partial_reveal_clears_everything() {
        let mut store = store_with(&["a", "b", "c"]);
        store.reveal(0).expect("reveal");
        store.reveal(1).expect("reveal");
        store.reset();
        assert_eq!(store.counts(), Counts { total: 0, picked: 0 });
        assert!(store.history().is_empty());
        assert_eq!(store.last_result(), &ResultSlot::Empty);
    }

    #[test]
    fn initialize_replaces_previous_set() {
        let mut store = store_with(&["a", "b"]);
        store.reveal(0).expect("reveal");
        store.initialize(["x"]);
        assert_eq!(store.counts(), Counts { total: 1, picked: 0 });
        assert!(store.history().is_empty());
        assert!(!store.tickets()[0].revealed);
    }
}
