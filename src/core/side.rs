//! Duel sides and per-side data storage.
//!
//! ## Side
//!
//! A duel always has exactly two contestants: the human-driven `Player`
//! and the policy-driven `Ai`.
//!
//! ## SideMap
//!
//! Fixed two-slot storage indexed by `Side`, used for scores, rosters,
//! pending selections and per-exchange bookkeeping.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two contestants in a duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The side driven by the caller through `set_selection`.
    Player,
    /// The side driven by the engine's responder policy.
    Ai,
}

impl Side {
    /// Both sides, player first.
    pub const BOTH: [Side; 2] = [Side::Player, Side::Ai];

    /// Get the opposing side.
    ///
    /// ```
    /// use chain_duel::core::Side;
    ///
    /// assert_eq!(Side::Player.opponent(), Side::Ai);
    /// assert_eq!(Side::Ai.opponent(), Side::Player);
    /// ```
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Ai,
            Side::Ai => Side::Player,
        }
    }

    /// Storage slot for this side.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Ai => 1,
        }
    }

    /// Side whose turn it is, given the `turn_is_player` bit.
    #[must_use]
    pub const fn from_turn_bit(turn_is_player: bool) -> Self {
        if turn_is_player {
            Side::Player
        } else {
            Side::Ai
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Player => write!(f, "Player"),
            Side::Ai => write!(f, "AI"),
        }
    }
}

/// Per-side data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use chain_duel::core::{Side, SideMap};
///
/// let mut scores: SideMap<u8> = SideMap::with_default();
/// scores[Side::Ai] += 1;
///
/// assert_eq!(scores[Side::Player], 0);
/// assert_eq!(scores[Side::Ai], 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create a new SideMap with values from a factory function.
    pub fn new(mut factory: impl FnMut(Side) -> T) -> Self {
        Self {
            data: [factory(Side::Player), factory(Side::Ai)],
        }
    }

    /// Create from explicit player and AI values.
    pub fn from_pair(player: T, ai: T) -> Self {
        Self { data: [player, ai] }
    }

    /// Create a new SideMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::from_pair(value.clone(), value)
    }

    /// Create a new SideMap with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Get a reference to a side's data.
    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        &self.data[side.index()]
    }

    /// Get a mutable reference to a side's data.
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        &mut self.data[side.index()]
    }

    /// Iterate over (Side, &T) pairs, player first.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::BOTH.into_iter().zip(self.data.iter())
    }

    /// Iterate over (Side, &mut T) pairs, player first.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Side, &mut T)> {
        Side::BOTH.into_iter().zip(self.data.iter_mut())
    }

    /// Apply `f` to both entries.
    pub fn map<U>(&self, mut f: impl FnMut(Side, &T) -> U) -> SideMap<U> {
        SideMap::new(|side| f(side, self.get(side)))
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}
