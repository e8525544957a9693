//! Responder policies for the AI side.
//!
//! Whenever the AI must field a card (responding to a fresh player
//! selection, replacing an eliminated defender mid-chain, or leading a
//! counter-offensive) the engine asks a `ResponderPolicy`. Policies are
//! deterministic: the same roster in the same order yields the same card.

use crate::cards::{Card, Roster};

/// Policy for picking the AI's card from its live roster.
pub trait ResponderPolicy: Send + Sync {
    /// Pick a card, or `None` if the roster is empty.
    fn choose<'a>(&self, roster: &'a Roster) -> Option<&'a Card>;
}

/// Pick the card with the strictly greatest attack.
///
/// Ties keep the first card encountered in lineup order.
///
/// ```
/// use chain_duel::cards::{Card, CardId, Roster};
/// use chain_duel::core::DuelConfig;
/// use chain_duel::duel::{ResponderPolicy, StrongestAttack};
///
/// let roster = Roster::new(
///     [
///         Card::monster(CardId::new(4), "A", 800, 300),
///         Card::monster(CardId::new(5), "B", 1500, 100),
///         Card::monster(CardId::new(6), "C", 1500, 900),
///     ],
///     &DuelConfig::default(),
/// );
///
/// assert_eq!(StrongestAttack.choose(&roster).map(|c| c.id), Some(CardId::new(5)));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct StrongestAttack;

impl ResponderPolicy for StrongestAttack {
    fn choose<'a>(&self, roster: &'a Roster) -> Option<&'a Card> {
        let mut best: Option<&Card> = None;
        for card in roster.cards() {
            match best {
                Some(current) if card.attack <= current.attack => {}
                _ => best = Some(card),
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;
    use crate::core::DuelConfig;

    fn roster(stats: &[(u32, i64)]) -> Roster {
        Roster::new(
            stats
                .iter()
                .map(|&(id, atk)| Card::monster(CardId::new(id), format!("Card {}", id), atk, 0)),
            &DuelConfig::default(),
        )
    }

    #[test]
    fn test_picks_highest_attack() {
        let roster = roster(&[(4, 800), (5, 100), (6, 1500)]);
        assert_eq!(StrongestAttack.choose(&roster).map(|c| c.id), Some(CardId::new(6)));
    }

    #[test]
    fn test_first_wins_ties() {
        let roster = roster(&[(1, 700), (2, 900), (3, 900), (4, 100)]);
        assert_eq!(StrongestAttack.choose(&roster).map(|c| c.id), Some(CardId::new(2)));
    }

    #[test]
    fn test_all_zero_attack_picks_first() {
        let roster = roster(&[(7, 0), (8, 0), (9, 0)]);
        assert_eq!(StrongestAttack.choose(&roster).map(|c| c.id), Some(CardId::new(7)));
    }

    #[test]
    fn test_empty_roster() {
        let roster = Roster::default();
        assert!(StrongestAttack.choose(&roster).is_none());
    }

    #[test]
    fn test_reproducible() {
        let roster = roster(&[(1, 300), (2, 1200), (3, 1200)]);
        let first = StrongestAttack.choose(&roster).map(|c| c.id);
        for _ in 0..10 {
            assert_eq!(StrongestAttack.choose(&roster).map(|c| c.id), first);
        }
    }
}
