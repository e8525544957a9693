//! Duel state: lifecycle phase, scores, turn and pending selections.
//!
//! ## DuelPhase
//!
//! The lifecycle is one explicit tagged state rather than a set of flags:
//!
//! ```text
//! NotStarted --start--> AwaitingSelection --set_selection--> AwaitingResolution
//! AwaitingResolution --resolve--> AwaitingSelection | AwaitingReplacement | Ended
//! AwaitingReplacement --set_selection--> AwaitingResolution
//! Ended --start--> AwaitingSelection
//! ```
//!
//! ## DuelSnapshot
//!
//! Everything needed to observe or checkpoint a duel, encodable with
//! `bincode`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::events::Outcome;
use crate::cards::{Card, CardId, Roster, Selection};
use crate::core::{DuelConfig, Side, SideMap};

/// Where a duel is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuelPhase {
    /// Constructed, `start` not yet called.
    NotStarted,
    /// Waiting for the player's fresh selection.
    AwaitingSelection,
    /// Both selections are in; waiting for `resolve_pending_exchange`.
    AwaitingResolution,
    /// The player's attacker fell mid-chain; waiting for a replacement.
    AwaitingReplacement,
    /// Terminal condition reached.
    Ended(Outcome),
}

impl DuelPhase {
    /// Whether mutating duel calls are accepted.
    #[must_use]
    pub fn is_active(self) -> bool {
        !matches!(self, DuelPhase::NotStarted | DuelPhase::Ended(_))
    }
}

/// Cards removed and points earned during one exchange.
///
/// Survives a replacement pause so the completed exchange reports every
/// elimination at once.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeTally {
    /// Eliminated cards per owning side, in elimination order.
    pub removed: SideMap<SmallVec<[Card; 4]>>,

    /// Points earned per side.
    pub points: SideMap<u8>,
}

impl ExchangeTally {
    /// Record an elimination: `card` leaves `owner`'s roster and the
    /// opposing side earns a point.
    pub fn record_elimination(&mut self, owner: Side, card: Card) {
        self.removed[owner].push(card);
        self.points[owner.opponent()] += 1;
    }

    /// Round outcome by points earned in this exchange.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        Outcome::from_points(self.points[Side::Player], self.points[Side::Ai])
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.removed[Side::Player].is_empty() && self.removed[Side::Ai].is_empty()
    }
}

/// Mutable duel bookkeeping (rosters live beside it in the engine).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelState {
    pub phase: DuelPhase,

    /// Duel score per side.
    pub scores: SideMap<u8>,

    /// Side attacking first in the current exchange.
    pub turn: Side,

    /// Selections committed to the current exchange.
    pub pending: SideMap<Option<Selection>>,

    /// AI card currently standing as defender.
    pub current_defender: Option<CardId>,

    /// Bookkeeping for the exchange in progress.
    pub tally: ExchangeTally,

    /// Completed exchanges since `start`.
    pub exchanges_resolved: u32,
}

impl DuelState {
    /// State of a freshly constructed duel.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: DuelPhase::NotStarted,
            scores: SideMap::with_value(0),
            turn: Side::Player,
            pending: SideMap::with_default(),
            current_defender: None,
            tally: ExchangeTally::default(),
            exchanges_resolved: 0,
        }
    }

    /// State at the beginning of a duel with `turn` moving first.
    #[must_use]
    pub fn started(turn: Side) -> Self {
        Self {
            phase: DuelPhase::AwaitingSelection,
            turn,
            ..Self::new()
        }
    }

    /// Drop everything tied to the exchange in progress.
    pub fn clear_exchange(&mut self) {
        self.pending = SideMap::with_default();
        self.current_defender = None;
        self.tally = ExchangeTally::default();
    }

    /// Whether either side has reached `winning_score`.
    #[must_use]
    pub fn score_reached(&self, winning_score: u8) -> bool {
        self.scores.iter().any(|(_, &s)| s >= winning_score)
    }

    /// Winner by score comparison.
    #[must_use]
    pub fn leader(&self) -> Outcome {
        Outcome::from_points(self.scores[Side::Player], self.scores[Side::Ai])
    }
}

impl Default for DuelState {
    fn default() -> Self {
        Self::new()
    }
}

/// Observable copy of a duel, usable as a checkpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DuelSnapshot {
    pub config: DuelConfig,

    /// Lineups as supplied at construction.
    pub lineups: SideMap<Vec<Card>>,

    /// Live rosters with life pools.
    pub rosters: SideMap<Roster>,

    pub state: DuelState,
}

impl DuelSnapshot {
    /// Encode with bincode.
    pub fn encode(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Decode a snapshot produced by `encode`.
    pub fn decode(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}
