//! Error types for duel operations.
//!
//! Every rejected engine call produces a `DuelError`. The engine reports
//! it through `EventSink::on_error` and returns it; nothing panics across
//! the engine boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::side::Side;
use crate::cards::CardId;

/// Broad class of a `DuelError`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Bad input: undersized roster, unavailable card, missing selection.
    Validation,
    /// Call not allowed in the current lifecycle state.
    State,
    /// A side has no card left where one is required.
    ResourceExhaustion,
}

/// Errors reported by the duel engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DuelError {
    /// A roster is below the configured minimum at `start`.
    #[error("{side} roster has {size} cards, at least {required} are required to start")]
    RosterTooSmall {
        side: Side,
        size: usize,
        required: usize,
    },

    /// No selection was supplied.
    #[error("a card selection is required")]
    MissingSelection,

    /// The selected card is not in the submitting side's live roster.
    #[error("{card} is not available in the {side} roster")]
    CardUnavailable { side: Side, card: CardId },

    /// `resolve_pending_exchange` without both selections in place.
    #[error("no pending {side} selection to resolve")]
    PendingSelectionMissing { side: Side },

    /// Mutating call before `start`.
    #[error("the duel has not started")]
    NotStarted,

    /// Mutating call after the duel ended.
    #[error("the duel has already ended")]
    AlreadyEnded,

    /// `start` while a duel is still in progress.
    #[error("a duel is already in progress")]
    AlreadyActive,

    /// Automatic play hit its step limit with the duel still running.
    #[error("the duel is still running after {steps} auto-play steps")]
    Unfinished { steps: usize },

    /// A side must field a card but its roster is empty.
    #[error("{side} has no cards available")]
    NoCardsAvailable { side: Side },
}

impl DuelError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            DuelError::RosterTooSmall { .. }
            | DuelError::MissingSelection
            | DuelError::CardUnavailable { .. }
            | DuelError::PendingSelectionMissing { .. } => ErrorKind::Validation,
            DuelError::NotStarted
            | DuelError::AlreadyEnded
            | DuelError::AlreadyActive
            | DuelError::Unfinished { .. } => ErrorKind::State,
            DuelError::NoCardsAvailable { .. } => ErrorKind::ResourceExhaustion,
        }
    }
}

/// Result alias for engine operations.
pub type DuelResult<T> = Result<T, DuelError>;
