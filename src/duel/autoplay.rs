//! Automatic play for the player side.
//!
//! `play_out` drives a started duel to its end with a `SelectionChooser`
//! standing in for the human player. Used by tests, benchmarks and hosts
//! offering an "auto" button.

use super::engine::{Duel, Resolution};
use super::events::{EventSink, Outcome};
use crate::cards::{Position, Roster, Selection};
use crate::core::{CoinSource, DuelError, DuelResult, DuelRng, Side};

// =============================================================================
// Choosers
// =============================================================================

/// Picks the player's next selection from its live roster.
pub trait SelectionChooser {
    /// Return `None` if nothing can be selected.
    fn choose(&mut self, roster: &Roster) -> Option<Selection>;
}

/// First live card, in attack position.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstAvailable;

impl SelectionChooser for FirstAvailable {
    fn choose(&mut self, roster: &Roster) -> Option<Selection> {
        roster.first().cloned().map(Selection::attack)
    }
}

/// Uniformly random live card and position.
#[derive(Clone, Debug)]
pub struct RandomChoice {
    rng: DuelRng,
}

impl RandomChoice {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: DuelRng::new(seed),
        }
    }
}

impl SelectionChooser for RandomChoice {
    fn choose(&mut self, roster: &Roster) -> Option<Selection> {
        if roster.is_empty() {
            return None;
        }
        let idx = self.rng.gen_range_usize(0..roster.len());
        let card = roster.cards().nth(idx)?.clone();
        let position = Position::from_index(self.rng.gen_range_usize(0..2));
        Some(Selection::new(card, position))
    }
}

// =============================================================================
// Driver
// =============================================================================

/// Play a started duel to the end, returning the winner.
///
/// Each step submits one selection and resolves it. The loop is bounded by
/// the exchange limit plus one replacement per player card.
pub fn play_out<S, C>(duel: &mut Duel<S, C>, chooser: &mut impl SelectionChooser) -> DuelResult<Outcome>
where
    S: EventSink,
    C: CoinSource,
{
    let max_steps = duel.config().max_exchanges as usize + duel.roster(Side::Player).len() + 1;

    for _ in 0..max_steps {
        let Some(selection) = chooser.choose(duel.roster(Side::Player)) else {
            return Err(DuelError::NoCardsAvailable { side: Side::Player });
        };
        duel.set_selection(selection)?;
        if let Resolution::Ended { winner, .. } = duel.resolve_pending_exchange()? {
            return Ok(winner);
        }
    }

    log::warn!("auto-play stopped after {} steps with the duel unfinished", max_steps);
    Err(DuelError::Unfinished { steps: max_steps })
}
