use storyboard_core::BoardResult;

use crate::CardCollection;

pub mod card_commands;

pub use card_commands::*;

/// A user intent that changes the board.
///
/// Commands never mutate the collection they are given. They return the next
/// snapshot, or an error when the result would break a card invariant, in
/// which case nothing changes.
pub trait BoardCommand: Send + Sync {
    fn apply(&self, cards: &CardCollection) -> BoardResult<CardCollection>;

    /// Human-readable description of what this command does
    fn description(&self) -> String;
}
