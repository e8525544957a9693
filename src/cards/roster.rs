//! Rosters: the live, shrinking lineup of one side plus its life pool.
//!
//! A `Roster` keeps two structures in lockstep:
//! - the ordered card lineup (iteration order drives the responder policy)
//! - the life pool, keyed by `CardId`
//!
//! A card is in the life pool iff it is in the lineup, and every pooled
//! life is positive. Cards only ever leave a roster; they are never
//! re-added during a duel.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::card::{Card, CardId};
use crate::core::DuelConfig;

/// Result of applying damage to a pooled card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Wound {
    /// The card is still in the roster with this much life left.
    Survived(i64),
    /// Life dropped to zero or below; the card left the roster.
    Eliminated(Card),
}

/// One side's live cards and their remaining life.
///
/// ## Example
///
/// ```
/// use chain_duel::cards::{Card, CardId, Roster};
/// use chain_duel::core::DuelConfig;
///
/// let config = DuelConfig::default();
/// let mut roster = Roster::new(
///     [
///         Card::monster(CardId::new(1), "A", 1000, 0),
///         Card::monster(CardId::new(2), "B", 500, 500),
///     ],
///     &config,
/// );
///
/// assert_eq!(roster.life(CardId::new(1)), Some(1100));
/// assert_eq!(roster.life(CardId::new(2)), Some(1500));
///
/// roster.remove(CardId::new(1));
/// assert_eq!(roster.len(), 1);
/// assert_eq!(roster.life(CardId::new(1)), None);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Roster {
    /// Live cards in lineup order.
    cards: Vector<Card>,

    /// Remaining life per live card.
    life: FxHashMap<CardId, i64>,
}

impl Roster {
    /// Build a roster, computing each card's starting life from `config`.
    ///
    /// A card whose id already appears earlier in the lineup is skipped.
    #[must_use]
    pub fn new(cards: impl IntoIterator<Item = Card>, config: &DuelConfig) -> Self {
        let mut roster = Self::default();
        for card in cards {
            if roster.life.contains_key(&card.id) {
                log::warn!("skipping duplicate {} ({}) in roster", card.id, card.name);
                continue;
            }
            roster.life.insert(card.id, config.initial_life(card.defense));
            roster.cards.push_back(card);
        }
        roster
    }

    /// Number of live cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate live cards in lineup order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> + '_ {
        self.cards.iter()
    }

    /// Copy the live lineup out.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Card> {
        self.cards.iter().cloned().collect()
    }

    /// First live card in lineup order.
    #[must_use]
    pub fn first(&self) -> Option<&Card> {
        self.cards.front()
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.life.contains_key(&id)
    }

    /// Look up a live card.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        if !self.contains(id) {
            return None;
        }
        self.cards.iter().find(|c| c.id == id)
    }

    /// Remaining life of a live card.
    #[must_use]
    pub fn life(&self, id: CardId) -> Option<i64> {
        self.life.get(&id).copied()
    }

    /// Sum of remaining life across the roster.
    #[must_use]
    pub fn total_life(&self) -> i64 {
        self.life.values().sum()
    }

    /// Subtract `amount` from a live card's life.
    ///
    /// Returns `None` if the card is not in the roster.
    pub fn wound(&mut self, id: CardId, amount: i64) -> Option<Wound> {
        let life = self.life.get_mut(&id)?;
        *life = life.saturating_sub(amount);
        if *life > 0 {
            return Some(Wound::Survived(*life));
        }
        self.remove(id).map(Wound::Eliminated)
    }

    /// Take a card out of the roster and its life pool.
    ///
    /// Returns the card, or `None` if it was not live.
    pub fn remove(&mut self, id: CardId) -> Option<Card> {
        self.life.remove(&id)?;
        let index = self.cards.iter().position(|c| c.id == id)?;
        Some(self.cards.remove(index))
    }
}
