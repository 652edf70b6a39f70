//! Error taxonomy shared by the engine and the session layer.
//!
//! Every variant is recoverable at the room boundary: a failed action leaves
//! the match untouched and is reported back to the caller as a structured
//! `error` event. Nothing here ever escalates to a process-level failure.

use serde::Serialize;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum GameError {
    /// The acting player does not own the current turn (or the match is
    /// suspended awaiting the other side's blockers).
    #[error("it is not your turn")]
    NotYourTurn,

    /// A hand or zone index is out of range.
    #[error("index out of range")]
    InvalidIndex,

    /// The effective cost exceeds the player's available mana.
    #[error("insufficient mana")]
    InsufficientMana,

    /// A custom deck or champion payload failed validation.
    #[error("invalid deck: {reason}")]
    InvalidDeck { reason: String },

    /// The chosen target does not satisfy the action's targeting rules.
    #[error("invalid target: {reason}")]
    InvalidTarget { reason: String },

    /// No room with that id exists.
    #[error("room not found")]
    RoomNotFound,

    /// The connection is not a participant of the addressed room.
    #[error("not in this room")]
    NotInRoom,
}

impl GameError {
    /// Convenience constructor for targeting failures.
    #[must_use]
    pub fn target(reason: impl Into<String>) -> Self {
        GameError::InvalidTarget {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for deck validation failures.
    #[must_use]
    pub fn deck(reason: impl Into<String>) -> Self {
        GameError::InvalidDeck {
            reason: reason.into(),
        }
    }
}
