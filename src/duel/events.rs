//! Duel events and the sinks that receive them.
//!
//! The engine reports every state transition by calling an `EventSink`
//! synchronously, inline, from the mutating call that caused it. Sinks
//! decide what to do with the events: record them, log them, or marshal
//! them to a UI thread.
//!
//! ## Stock sinks
//!
//! - `EventLog`: records `DuelEvent`s in order (tests, replays)
//! - `LogSink`: forwards every event to the `log` facade
//! - `()`: discards everything

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Selection};
use crate::core::{DuelError, ErrorKind, Side};

/// Result of an exchange or of a whole duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The player came out ahead.
    Player,
    /// The AI came out ahead.
    Ai,
    /// Neither side came out ahead.
    Draw,
}

impl Outcome {
    /// Compare two point totals.
    ///
    /// ```
    /// use chain_duel::duel::Outcome;
    ///
    /// assert_eq!(Outcome::from_points(2, 1), Outcome::Player);
    /// assert_eq!(Outcome::from_points(0, 1), Outcome::Ai);
    /// assert_eq!(Outcome::from_points(1, 1), Outcome::Draw);
    /// ```
    #[must_use]
    pub fn from_points(player: u8, ai: u8) -> Self {
        match player.cmp(&ai) {
            std::cmp::Ordering::Greater => Outcome::Player,
            std::cmp::Ordering::Less => Outcome::Ai,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    /// The winning side, if any.
    #[must_use]
    pub fn winner(self) -> Option<Side> {
        match self {
            Outcome::Player => Some(Side::Player),
            Outcome::Ai => Some(Side::Ai),
            Outcome::Draw => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Player => write!(f, "Player"),
            Outcome::Ai => write!(f, "AI"),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// Listener for duel state transitions.
///
/// All methods are called synchronously by the engine. Implementations
/// must not call back into the engine.
pub trait EventSink {
    /// A duel began; `starting_side` takes the first turn.
    fn on_duel_started(&mut self, starting_side: Side);

    /// An exchange was fully resolved.
    fn on_turn_resolved(
        &mut self,
        player_selection: &Selection,
        ai_selection: &Selection,
        attacking_side: Side,
        outcome: Outcome,
    );

    fn on_score_changed(&mut self, player_score: u8, ai_score: u8);

    /// The duel reached a terminal condition.
    fn on_duel_ended(&mut self, winner: Outcome);

    /// `side` must submit a replacement attacker before resolution resumes.
    fn on_replacement_requested(&mut self, side: Side);

    /// Cards eliminated during the exchange that just completed.
    fn on_cards_removed(&mut self, player_removed: &[Card], ai_removed: &[Card]);

    /// A call was rejected.
    fn on_error(&mut self, error: &DuelError);
}

impl EventSink for () {
    fn on_duel_started(&mut self, _starting_side: Side) {}
    fn on_turn_resolved(&mut self, _: &Selection, _: &Selection, _: Side, _: Outcome) {}
    fn on_score_changed(&mut self, _player_score: u8, _ai_score: u8) {}
    fn on_duel_ended(&mut self, _winner: Outcome) {}
    fn on_replacement_requested(&mut self, _side: Side) {}
    fn on_cards_removed(&mut self, _player_removed: &[Card], _ai_removed: &[Card]) {}
    fn on_error(&mut self, _error: &DuelError) {}
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn on_duel_started(&mut self, starting_side: Side) {
        (**self).on_duel_started(starting_side);
    }

    fn on_turn_resolved(
        &mut self,
        player_selection: &Selection,
        ai_selection: &Selection,
        attacking_side: Side,
        outcome: Outcome,
    ) {
        (**self).on_turn_resolved(player_selection, ai_selection, attacking_side, outcome);
    }

    fn on_score_changed(&mut self, player_score: u8, ai_score: u8) {
        (**self).on_score_changed(player_score, ai_score);
    }

    fn on_duel_ended(&mut self, winner: Outcome) {
        (**self).on_duel_ended(winner);
    }

    fn on_replacement_requested(&mut self, side: Side) {
        (**self).on_replacement_requested(side);
    }

    fn on_cards_removed(&mut self, player_removed: &[Card], ai_removed: &[Card]) {
        (**self).on_cards_removed(player_removed, ai_removed);
    }

    fn on_error(&mut self, error: &DuelError) {
        (**self).on_error(error);
    }
}

/// An owned record of one sink callback.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuelEvent {
    DuelStarted {
        starting_side: Side,
    },
    TurnResolved {
        player_selection: Selection,
        ai_selection: Selection,
        attacking_side: Side,
        outcome: Outcome,
    },
    ScoreChanged {
        player_score: u8,
        ai_score: u8,
    },
    DuelEnded {
        winner: Outcome,
    },
    ReplacementRequested {
        side: Side,
    },
    CardsRemoved {
        player_removed: Vec<Card>,
        ai_removed: Vec<Card>,
    },
    Error {
        kind: ErrorKind,
        message: String,
    },
}

/// Sink that records every event in order.
///
/// ```
/// use chain_duel::core::Side;
/// use chain_duel::duel::{DuelEvent, EventLog, EventSink};
///
/// let mut log = EventLog::new();
/// log.on_duel_started(Side::Ai);
/// log.on_score_changed(0, 0);
///
/// assert_eq!(log.len(), 2);
/// assert_eq!(log.events()[0], DuelEvent::DuelStarted { starting_side: Side::Ai });
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<DuelEvent>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[DuelEvent] {
        &self.events
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Most recent event.
    #[must_use]
    pub fn last(&self) -> Option<&DuelEvent> {
        self.events.last()
    }

    /// Drop recorded events, returning them.
    pub fn drain(&mut self) -> Vec<DuelEvent> {
        std::mem::take(&mut self.events)
    }

    /// Recorded errors, oldest first.
    pub fn errors(&self) -> impl Iterator<Item = (ErrorKind, &str)> + '_ {
        self.events.iter().filter_map(|e| match e {
            DuelEvent::Error { kind, message } => Some((*kind, message.as_str())),
            _ => None,
        })
    }

    /// Every card reported removed, per side, across the whole log.
    #[must_use]
    pub fn removed_cards(&self) -> (Vec<Card>, Vec<Card>) {
        let mut player = Vec::new();
        let mut ai = Vec::new();
        for event in &self.events {
            if let DuelEvent::CardsRemoved {
                player_removed,
                ai_removed,
            } = event
            {
                player.extend(player_removed.iter().cloned());
                ai.extend(ai_removed.iter().cloned());
            }
        }
        (player, ai)
    }

    /// Winner reported by the last `DuelEnded` event.
    #[must_use]
    pub fn winner(&self) -> Option<Outcome> {
        self.events.iter().rev().find_map(|e| match e {
            DuelEvent::DuelEnded { winner } => Some(*winner),
            _ => None,
        })
    }
}

impl EventSink for EventLog {
    fn on_duel_started(&mut self, starting_side: Side) {
        self.events.push(DuelEvent::DuelStarted { starting_side });
    }

    fn on_turn_resolved(
        &mut self,
        player_selection: &Selection,
        ai_selection: &Selection,
        attacking_side: Side,
        outcome: Outcome,
    ) {
        self.events.push(DuelEvent::TurnResolved {
            player_selection: player_selection.clone(),
            ai_selection: ai_selection.clone(),
            attacking_side,
            outcome,
        });
    }

    fn on_score_changed(&mut self, player_score: u8, ai_score: u8) {
        self.events.push(DuelEvent::ScoreChanged {
            player_score,
            ai_score,
        });
    }

    fn on_duel_ended(&mut self, winner: Outcome) {
        self.events.push(DuelEvent::DuelEnded { winner });
    }

    fn on_replacement_requested(&mut self, side: Side) {
        self.events.push(DuelEvent::ReplacementRequested { side });
    }

    fn on_cards_removed(&mut self, player_removed: &[Card], ai_removed: &[Card]) {
        self.events.push(DuelEvent::CardsRemoved {
            player_removed: player_removed.to_vec(),
            ai_removed: ai_removed.to_vec(),
        });
    }

    fn on_error(&mut self, error: &DuelError) {
        self.events.push(DuelEvent::Error {
            kind: error.kind(),
            message: error.to_string(),
        });
    }
}

/// Sink that writes every event to the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

fn names(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl EventSink for LogSink {
    fn on_duel_started(&mut self, starting_side: Side) {
        log::info!("duel started, first turn: {}", starting_side);
    }

    fn on_turn_resolved(
        &mut self,
        player_selection: &Selection,
        ai_selection: &Selection,
        attacking_side: Side,
        outcome: Outcome,
    ) {
        log::info!(
            "{} attacks. Player: {}. AI: {}. Result: {}",
            attacking_side,
            player_selection,
            ai_selection,
            outcome
        );
    }

    fn on_score_changed(&mut self, player_score: u8, ai_score: u8) {
        log::info!("score: Player {} - {} AI", player_score, ai_score);
    }

    fn on_duel_ended(&mut self, winner: Outcome) {
        log::info!("duel ended, winner: {}", winner);
    }

    fn on_replacement_requested(&mut self, side: Side) {
        log::info!("{} must choose a replacement monster", side);
    }

    fn on_cards_removed(&mut self, player_removed: &[Card], ai_removed: &[Card]) {
        if !player_removed.is_empty() {
            log::info!("player lost: {}", names(player_removed));
        }
        if !ai_removed.is_empty() {
            log::info!("AI lost: {}", names(ai_removed));
        }
    }

    fn on_error(&mut self, error: &DuelError) {
        log::warn!("{:?} error: {}", error.kind(), error);
    }
}
