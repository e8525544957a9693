//! Card catalog boundary.
//!
//! The duel engine only consumes resolved `Card` values. Where those come
//! from is the catalog's business: a remote card database, a bundled data
//! file, or a test fixture. `CardCatalog` is the seam; `InMemoryCatalog`
//! is the stock implementation over a local registry of cards.

use rustc_hash::FxHashMap;
use thiserror::Error;

use super::card::{Card, CardId};
use crate::core::DuelRng;

/// Random draws attempted per requested card before giving up.
pub const DRAW_ATTEMPTS_PER_CARD: usize = 8;

/// Errors raised by a card catalog.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The catalog holds no card at all.
    #[error("the catalog is empty")]
    Empty,

    /// The monster-only filter could not be satisfied.
    #[error("could not collect {wanted} monster cards after {attempts} attempts (got {found})")]
    Transport {
        wanted: usize,
        found: usize,
        attempts: usize,
    },
}

/// Source of card records.
pub trait CardCatalog {
    /// Look up a card by its exact name (case-insensitive).
    fn fetch_card_by_name(&mut self, name: &str) -> Result<Option<Card>, CatalogError>;

    /// Draw `count` distinct random monster cards.
    fn fetch_random_monster_cards(&mut self, count: usize) -> Result<Vec<Card>, CatalogError>;
}

/// Catalog over an in-memory card registry.
///
/// Random draws behave like a "random card" endpoint: each attempt samples
/// one card from the whole catalog, non-monsters and repeats are thrown
/// away, and the request fails after `count * DRAW_ATTEMPTS_PER_CARD`
/// attempts.
///
/// ## Example
///
/// ```
/// use chain_duel::cards::{Card, CardCatalog, CardId, InMemoryCatalog};
///
/// let mut catalog = InMemoryCatalog::new(42);
/// catalog.register(Card::monster(CardId::new(1), "Kuriboh", 300, 200));
/// catalog.register(Card::new(CardId::new(2), "Pot of Greed", "Spell Card", 0, 0));
///
/// let found = catalog.fetch_card_by_name("kuriboh").unwrap().unwrap();
/// assert_eq!(found.id, CardId::new(1));
///
/// // Draws never yield the spell card.
/// let drawn = catalog.fetch_random_monster_cards(1).unwrap_or_default();
/// assert!(drawn.iter().all(|c| c.id == CardId::new(1)));
/// ```
#[derive(Clone, Debug)]
pub struct InMemoryCatalog {
    cards: Vec<Card>,
    index: FxHashMap<CardId, usize>,
    rng: DuelRng,
}

impl InMemoryCatalog {
    /// Create an empty catalog whose draws are seeded with `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            cards: Vec::new(),
            index: FxHashMap::default(),
            rng: DuelRng::new(seed),
        }
    }

    /// Create a catalog pre-filled with `cards`.
    #[must_use]
    pub fn with_cards(seed: u64, cards: impl IntoIterator<Item = Card>) -> Self {
        let mut catalog = Self::new(seed);
        for card in cards {
            catalog.register(card);
        }
        catalog
    }

    /// Register a card, replacing any previous record with the same id.
    pub fn register(&mut self, card: Card) {
        match self.index.get(&card.id) {
            Some(&slot) => self.cards[slot] = card,
            None => {
                self.index.insert(card.id, self.cards.len());
                self.cards.push(card);
            }
        }
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.index.get(&id).map(|&slot| &self.cards[slot])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl CardCatalog for InMemoryCatalog {
    fn fetch_card_by_name(&mut self, name: &str) -> Result<Option<Card>, CatalogError> {
        let wanted = name.trim().to_lowercase();
        Ok(self
            .cards
            .iter()
            .find(|c| c.name.to_lowercase() == wanted)
            .cloned())
    }

    fn fetch_random_monster_cards(&mut self, count: usize) -> Result<Vec<Card>, CatalogError> {
        if count == 0 {
            return Ok(Vec::new());
        }
        if self.cards.is_empty() {
            return Err(CatalogError::Empty);
        }

        // Draws stop once every distinct monster is in hand.
        let available = self.cards.iter().filter(|c| c.is_monster()).count();
        let target = count.min(available);
        let max_attempts = count.saturating_mul(DRAW_ATTEMPTS_PER_CARD);
        let mut drawn: Vec<Card> = Vec::with_capacity(target);
        let mut attempts = 0;

        while drawn.len() < target && attempts < max_attempts {
            attempts += 1;
            let card = &self.cards[self.rng.gen_range_usize(0..self.cards.len())];
            if card.is_monster() && !drawn.contains(card) {
                drawn.push(card.clone());
            }
        }

        if drawn.len() < count {
            log::warn!(
                "monster draw gave up after {} attempts ({}/{})",
                attempts,
                drawn.len(),
                count
            );
            return Err(CatalogError::Transport {
                wanted: count,
                found: drawn.len(),
                attempts,
            });
        }

        self.rng.shuffle(&mut drawn);
        log::debug!("drew {} monster cards in {} attempts", count, attempts);
        Ok(drawn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monsters(n: u32) -> Vec<Card> {
        (1..=n)
            .map(|i| Card::monster(CardId::new(i), format!("Monster {}", i), i as i64 * 100, 100))
            .collect()
    }

    #[test]
    fn test_register_and_get() {
        let mut catalog = InMemoryCatalog::with_cards(1, monsters(3));
        assert_eq!(catalog.len(), 3);

        catalog.register(Card::monster(CardId::new(2), "Renamed", 1, 1));
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get(CardId::new(2)).map(|c| c.name.as_str()), Some("Renamed"));
    }

    #[test]
    fn test_fetch_by_name() {
        let mut catalog = InMemoryCatalog::with_cards(1, monsters(3));

        let found = catalog.fetch_card_by_name("  MONSTER 2 ").unwrap();
        assert_eq!(found.map(|c| c.id), Some(CardId::new(2)));
        assert_eq!(catalog.fetch_card_by_name("Monster 9").unwrap(), None);
    }

    #[test]
    fn test_random_draw_distinct_monsters() {
        let mut cards = monsters(10);
        cards.push(Card::new(CardId::new(99), "Mirror Force", "Trap Card", 0, 0));
        let mut catalog = InMemoryCatalog::with_cards(42, cards);

        let drawn = catalog.fetch_random_monster_cards(3).unwrap();

        assert_eq!(drawn.len(), 3);
        assert!(drawn.iter().all(Card::is_monster));
        assert_ne!(drawn[0], drawn[1]);
        assert_ne!(drawn[1], drawn[2]);
        assert_ne!(drawn[0], drawn[2]);
    }

    #[test]
    fn test_random_draw_is_seeded() {
        let mut a = InMemoryCatalog::with_cards(7, monsters(20));
        let mut b = InMemoryCatalog::with_cards(7, monsters(20));

        assert_eq!(
            a.fetch_random_monster_cards(5).unwrap(),
            b.fetch_random_monster_cards(5).unwrap()
        );
    }

    #[test]
    fn test_random_draw_gives_up() {
        let cards = vec![
            Card::monster(CardId::new(1), "Only Monster", 100, 100),
            Card::new(CardId::new(2), "Spell", "Spell Card", 0, 0),
        ];
        let mut catalog = InMemoryCatalog::with_cards(3, cards);

        let err = catalog.fetch_random_monster_cards(3).unwrap_err();
        let CatalogError::Transport { wanted, found, attempts } = err else {
            panic!("expected a transport error, got {err:?}");
        };
        assert_eq!((wanted, found), (3, 1));
        assert!(attempts >= 1 && attempts <= 3 * DRAW_ATTEMPTS_PER_CARD);
    }

    #[test]
    fn test_random_draw_huge_count_terminates() {
        let mut cards = monsters(2);
        cards.push(Card::new(CardId::new(9), "Spell", "Spell Card", 0, 0));
        let mut catalog = InMemoryCatalog::with_cards(5, cards);

        let err = catalog.fetch_random_monster_cards(usize::MAX).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Transport { wanted: usize::MAX, found: 2, .. }
        ));
    }

    #[test]
    fn test_random_draw_spells_only() {
        let mut catalog =
            InMemoryCatalog::with_cards(5, [Card::new(CardId::new(9), "Spell", "Spell Card", 0, 0)]);

        let err = catalog.fetch_random_monster_cards(2).unwrap_err();
        assert!(matches!(err, CatalogError::Transport { wanted: 2, found: 0, attempts: 0 }));
    }

    #[test]
    fn test_empty_catalog() {
        let mut catalog = InMemoryCatalog::new(1);

        assert_eq!(catalog.fetch_random_monster_cards(0).unwrap(), Vec::new());
        assert_eq!(catalog.fetch_random_monster_cards(1), Err(CatalogError::Empty));
    }
}
