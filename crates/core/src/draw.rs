use crate::{RngState, TicketStore};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawOutcome {
    Drawn { index: usize, label: String },
    NoneAvailable,
}

/// Reveals one hidden ticket chosen uniformly among the hidden ones.
pub fn draw_random(store: &mut TicketStore, rng: &mut RngState) -> DrawOutcome {
    let hidden = store.counts().remaining();
    if hidden == 0 {
        return DrawOutcome::NoneAvailable;
    }
    match store.reveal_nth_hidden(rng.pick_index(hidden)) {
        Some((index, label)) => DrawOutcome::Drawn { index, label },
        None => DrawOutcome::NoneAvailable,
    }
}
