//! Duel configuration.
//!
//! `DuelConfig` carries the rule constants the engine reads during a duel:
//! - Roster size requirement checked by `start`
//! - Score needed to win
//! - Life pool formula (`max(defense, minimum_floor) + base_hp`)
//! - A hard bound on committed exchanges
//!
//! The defaults describe the standard best-of-three duel.

use serde::{Deserialize, Serialize};

/// Rule constants for one duel.
///
/// ## Example
///
/// ```
/// use chain_duel::core::DuelConfig;
///
/// let config = DuelConfig::default().with_max_exchanges(10);
///
/// assert_eq!(config.min_roster_size, 3);
/// assert_eq!(config.initial_life(0), 1100);
/// assert_eq!(config.initial_life(900), 1900);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelConfig {
    /// Cards each side must field at `start`.
    pub min_roster_size: usize,

    /// Score at which the duel ends.
    pub winning_score: u8,

    /// Life added on top of a card's (floored) defense.
    pub base_hp: i64,

    /// Lowest defense value used for life computation.
    /// Absorbs cards with zero or unknown defense.
    pub minimum_floor: i64,

    /// Committed exchanges after which the duel ends by score comparison.
    pub max_exchanges: u32,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            min_roster_size: 3,
            winning_score: 2,
            base_hp: 1000,
            minimum_floor: 100,
            max_exchanges: 64,
        }
    }
}

impl DuelConfig {
    /// Create the standard configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_min_roster_size(mut self, size: usize) -> Self {
        self.min_roster_size = size;
        self
    }

    #[must_use]
    pub fn with_winning_score(mut self, score: u8) -> Self {
        self.winning_score = score;
        self
    }

    #[must_use]
    pub fn with_base_hp(mut self, base_hp: i64) -> Self {
        self.base_hp = base_hp;
        self
    }

    #[must_use]
    pub fn with_minimum_floor(mut self, floor: i64) -> Self {
        self.minimum_floor = floor;
        self
    }

    #[must_use]
    pub fn with_max_exchanges(mut self, limit: u32) -> Self {
        self.max_exchanges = limit;
        self
    }

    /// Life a card starts the duel with.
    #[must_use]
    pub fn initial_life(&self, defense: i64) -> i64 {
        defense.max(self.minimum_floor).saturating_add(self.base_hp)
    }

    /// Life assumed for a card with no life pool entry.
    #[must_use]
    pub fn fallback_life(&self, defense: i64) -> i64 {
        defense.max(self.minimum_floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DuelConfig::default();

        assert_eq!(config.min_roster_size, 3);
        assert_eq!(config.winning_score, 2);
        assert_eq!(config.base_hp, 1000);
        assert_eq!(config.minimum_floor, 100);
        assert_eq!(config.max_exchanges, 64);
    }

    #[test]
    fn test_initial_life_floor() {
        let config = DuelConfig::default();

        assert_eq!(config.initial_life(0), 1100);
        assert_eq!(config.initial_life(50), 1100);
        assert_eq!(config.initial_life(100), 1100);
        assert_eq!(config.initial_life(300), 1300);
        assert_eq!(config.initial_life(i64::MAX), i64::MAX);
        assert_eq!(config.fallback_life(50), 100);
        assert_eq!(config.fallback_life(900), 900);
    }

    #[test]
    fn test_builder() {
        let config = DuelConfig::new()
            .with_min_roster_size(1)
            .with_winning_score(3)
            .with_base_hp(500)
            .with_minimum_floor(0)
            .with_max_exchanges(5);

        assert_eq!(config.min_roster_size, 1);
        assert_eq!(config.winning_score, 3);
        assert_eq!(config.initial_life(0), 500);
        assert_eq!(config.max_exchanges, 5);
    }

    #[test]
    fn test_config_serde() {
        let config = DuelConfig::default().with_max_exchanges(12);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: DuelConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
