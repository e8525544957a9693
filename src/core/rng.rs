//! Deterministic randomness for duels.
//!
//! A duel consumes exactly three kinds of coin toss (see `Toss`). All of
//! them go through the `CoinSource` trait so a host can swap the seeded
//! `DuelRng` for `ScriptedCoins` and replay a duel toss by toss.
//!
//! ```
//! use chain_duel::core::{CoinSource, DuelRng, Toss};
//!
//! let mut a = DuelRng::new(42);
//! let mut b = DuelRng::new(42);
//!
//! for _ in 0..16 {
//!     assert_eq!(a.flip(Toss::TieBreak), b.flip(Toss::TieBreak));
//! }
//! ```

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// The random decisions a duel makes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Toss {
    /// `true` means the player takes the first turn.
    StartingSide,
    /// `true` means the AI responder is placed in attack position.
    AiPosition,
    /// `true` means the attacking card wins an exact tie.
    TieBreak,
}

/// Source of unweighted coin flips.
pub trait CoinSource {
    /// Flip a fair coin for the given decision.
    fn flip(&mut self, toss: Toss) -> bool;
}

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct DuelRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl DuelRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from the thread RNG.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// Seed this RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> DuelRngState {
        DuelRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &DuelRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl CoinSource for DuelRng {
    fn flip(&mut self, _toss: Toss) -> bool {
        self.inner.gen_bool(0.5)
    }
}

/// Serializable RNG state for checkpointing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position
    pub word_pos: u128,
}

/// Coin source that replays fixed outcomes per toss kind.
///
/// Each toss kind has its own queue. When a queue runs dry the toss falls
/// back to a seeded `DuelRng`.
///
/// ```
/// use chain_duel::core::{CoinSource, ScriptedCoins, Toss};
///
/// let mut coins = ScriptedCoins::new(7)
///     .starting_side([true])
///     .tie_breaks([false, true]);
///
/// assert!(coins.flip(Toss::StartingSide));
/// assert!(!coins.flip(Toss::TieBreak));
/// assert!(coins.flip(Toss::TieBreak));
/// ```
#[derive(Clone, Debug)]
pub struct ScriptedCoins {
    starting_side: VecDeque<bool>,
    ai_positions: VecDeque<bool>,
    tie_breaks: VecDeque<bool>,
    fallback: DuelRng,
}

impl ScriptedCoins {
    /// Create an empty script; every toss falls back to `DuelRng::new(seed)`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            starting_side: VecDeque::new(),
            ai_positions: VecDeque::new(),
            tie_breaks: VecDeque::new(),
            fallback: DuelRng::new(seed),
        }
    }

    /// Queue starting-side outcomes (`true` = player starts).
    #[must_use]
    pub fn starting_side(mut self, outcomes: impl IntoIterator<Item = bool>) -> Self {
        self.starting_side.extend(outcomes);
        self
    }

    /// Queue AI position outcomes (`true` = attack position).
    #[must_use]
    pub fn ai_positions(mut self, outcomes: impl IntoIterator<Item = bool>) -> Self {
        self.ai_positions.extend(outcomes);
        self
    }

    /// Queue tie-break outcomes (`true` = attacker wins).
    #[must_use]
    pub fn tie_breaks(mut self, outcomes: impl IntoIterator<Item = bool>) -> Self {
        self.tie_breaks.extend(outcomes);
        self
    }

    /// Scripted outcomes not yet consumed for a toss kind.
    #[must_use]
    pub fn remaining(&self, toss: Toss) -> usize {
        match toss {
            Toss::StartingSide => self.starting_side.len(),
            Toss::AiPosition => self.ai_positions.len(),
            Toss::TieBreak => self.tie_breaks.len(),
        }
    }
}

impl CoinSource for ScriptedCoins {
    fn flip(&mut self, toss: Toss) -> bool {
        let queue = match toss {
            Toss::StartingSide => &mut self.starting_side,
            Toss::AiPosition => &mut self.ai_positions,
            Toss::TieBreak => &mut self.tie_breaks,
        };
        match queue.pop_front() {
            Some(outcome) => outcome,
            None => self.fallback.flip(toss),
        }
    }
}

impl<C: CoinSource + ?Sized> CoinSource for Box<C> {
    fn flip(&mut self, toss: Toss) -> bool {
        (**self).flip(toss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = DuelRng::new(42);
        let mut rng2 = DuelRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_range_usize(0..1000), rng2.gen_range_usize(0..1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = DuelRng::new(1);
        let mut rng2 = DuelRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.gen_range_usize(0..1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.gen_range_usize(0..1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_flip_produces_both_sides() {
        let mut rng = DuelRng::new(42);
        let flips: Vec<_> = (0..64).map(|_| rng.flip(Toss::TieBreak)).collect();

        assert!(flips.iter().any(|&f| f));
        assert!(flips.iter().any(|&f| !f));
    }

    #[test]
    fn test_shuffle() {
        let mut rng = DuelRng::new(42);
        let mut data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let original = data.clone();

        rng.shuffle(&mut data);

        // Should be same elements, different order (very likely)
        assert_ne!(data, original);

        data.sort();
        assert_eq!(data, original);
    }

    #[test]
    fn test_state_serialization() {
        let mut rng = DuelRng::new(42);

        for _ in 0..100 {
            rng.flip(Toss::AiPosition);
        }

        let state = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.flip(Toss::TieBreak)).collect();

        let mut restored = DuelRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.flip(Toss::TieBreak)).collect();

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_state_serde() {
        let state = DuelRngState {
            seed: 42,
            word_pos: 12345,
        };

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: DuelRngState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, deserialized);
    }

    #[test]
    fn test_scripted_queues_are_independent() {
        let mut coins = ScriptedCoins::new(1)
            .starting_side([false])
            .ai_positions([true, true])
            .tie_breaks([false]);

        assert!(!coins.flip(Toss::StartingSide));
        assert!(!coins.flip(Toss::TieBreak));
        assert!(coins.flip(Toss::AiPosition));

        assert_eq!(coins.remaining(Toss::StartingSide), 0);
        assert_eq!(coins.remaining(Toss::AiPosition), 1);
        assert_eq!(coins.remaining(Toss::TieBreak), 0);
    }

    #[test]
    fn test_scripted_falls_back_deterministically() {
        let mut a = ScriptedCoins::new(9);
        let mut b = ScriptedCoins::new(9);

        for _ in 0..20 {
            assert_eq!(a.flip(Toss::TieBreak), b.flip(Toss::TieBreak));
        }
    }
}
