//! Core duel types: sides, configuration, errors, randomness.
//!
//! This module contains the building blocks the card and duel layers
//! share. Nothing here knows about chains or exchanges.

pub mod side;
pub mod rng;
pub mod config;
pub mod error;

pub use side::{Side, SideMap};
pub use rng::{CoinSource, DuelRng, DuelRngState, ScriptedCoins, Toss};
pub use config::DuelConfig;
pub use error::{DuelError, DuelResult, ErrorKind};
