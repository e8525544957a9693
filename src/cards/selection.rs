//! Battle positions and card selections.

use serde::{Deserialize, Serialize};

use super::card::Card;

/// Battle position a card is committed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Attack,
    Defense,
}

impl Position {
    /// Map a UI option index to a position (0 = attack, anything else = defense).
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        if index == 0 {
            Position::Attack
        } else {
            Position::Defense
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Position::Attack => write!(f, "ATTACK"),
            Position::Defense => write!(f, "DEFENSE"),
        }
    }
}

/// A card committed to an exchange in a position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub card: Card,
    pub position: Position,
}

impl Selection {
    #[must_use]
    pub fn new(card: Card, position: Position) -> Self {
        Self { card, position }
    }

    /// Shorthand for an attack-position selection.
    #[must_use]
    pub fn attack(card: Card) -> Self {
        Self::new(card, Position::Attack)
    }

    /// Shorthand for a defense-position selection.
    #[must_use]
    pub fn defense(card: Card) -> Self {
        Self::new(card, Position::Defense)
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.card.name, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;

    #[test]
    fn test_position_from_index() {
        assert_eq!(Position::from_index(0), Position::Attack);
        assert_eq!(Position::from_index(1), Position::Defense);
        assert_eq!(Position::from_index(7), Position::Defense);
    }

    #[test]
    fn test_selection_shorthands() {
        let card = Card::monster(CardId::new(3), "Celtic Guardian", 1400, 1200);

        assert_eq!(Selection::attack(card.clone()).position, Position::Attack);
        assert_eq!(Selection::defense(card.clone()).position, Position::Defense);
        assert_eq!(Selection::attack(card).to_string(), "Celtic Guardian [ATTACK]");
    }
}
