//! Card records - immutable monster data supplied by a catalog.
//!
//! A `Card` is identity-bearing: two cards are equal iff their ids match,
//! whatever their other fields say. Battle-time data (remaining life)
//! never lives on the card; it is tracked by the owning `Roster`.

use serde::{Deserialize, Serialize};

/// Stable catalog identifier for a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Immutable card record.
///
/// ## Example
///
/// ```
/// use chain_duel::cards::{Card, CardId};
///
/// let dragon = Card::monster(CardId::new(89631139), "Blue-Eyes White Dragon", 3000, 2500)
///     .with_description("This legendary dragon is a powerful engine of destruction.");
///
/// assert!(dragon.is_monster());
/// assert_eq!(dragon, Card::monster(CardId::new(89631139), "Renamed", 0, 0));
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Card {
    /// Catalog identity.
    pub id: CardId,

    /// Display name.
    pub name: String,

    /// Catalog category, e.g. "Normal Monster" or "Spell Card".
    pub category: String,

    /// Attack stat. Drives all battle arithmetic.
    pub attack: i64,

    /// Defense stat. Seeds the card's life pool.
    pub defense: i64,

    pub description: String,

    /// Reference to the card art (URL or asset key), empty if unknown.
    pub image_ref: String,
}

impl Card {
    /// Create a card with an explicit category.
    #[must_use]
    pub fn new(
        id: CardId,
        name: impl Into<String>,
        category: impl Into<String>,
        attack: i64,
        defense: i64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            attack,
            defense,
            description: String::new(),
            image_ref: String::new(),
        }
    }

    /// Create a card in the "Normal Monster" category.
    #[must_use]
    pub fn monster(id: CardId, name: impl Into<String>, attack: i64, defense: i64) -> Self {
        Self::new(id, name, "Normal Monster", attack, defense)
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_image_ref(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = image_ref.into();
        self
    }

    /// Whether the catalog category names a monster.
    #[must_use]
    pub fn is_monster(&self) -> bool {
        self.category.to_lowercase().contains("monster")
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Card {}

impl std::hash::Hash for Card {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (ATK: {}, DEF: {})", self.name, self.attack, self.defense)
    }
}
