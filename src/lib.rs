//! # chain-duel
//!
//! A duel engine for a two-contestant monster card game, the human player
//! against a computer opponent, resolved by chain combat.
//!
//! ## Rules in brief
//!
//! - Each side fields a roster of at least three monster cards.
//! - A coin flip decides who attacks first; turns alternate per exchange.
//! - An attacker's `attack` is compared against the defender's remaining
//!   life (defense, floored, plus a base pool). Greater eliminates,
//!   smaller wounds, equal is settled by a coin flip.
//! - On the player's turn a winning attacker keeps going through the AI's
//!   roster. On the AI's turn only the player's submitted card is hit.
//! - Every elimination earns a point; two points win the duel.
//!
//! ## Design Principles
//!
//! 1. **Explicit lifecycle**: one `DuelPhase` tag rather than flags.
//!    Every rejected call returns a `DuelError` and also reaches the sink.
//!
//! 2. **Injected randomness**: all coin flips go through `CoinSource`, so a
//!    seeded `DuelRng` or a `ScriptedCoins` makes any duel reproducible.
//!
//! 3. **Observer, not UI**: the engine reports through `EventSink` and
//!    never renders anything.
//!
//! ## Modules
//!
//! - `core`: sides, configuration, RNG, errors
//! - `cards`: cards, selections, rosters with life pools, catalogs
//! - `duel`: the engine, chain resolution, events, policies, autoplay

pub mod cards;
pub mod core;
pub mod duel;

// Re-export commonly used types
pub use crate::core::{
    CoinSource, DuelConfig, DuelError, DuelResult, DuelRng, DuelRngState, ErrorKind,
    ScriptedCoins, Side, SideMap, Toss,
};

pub use crate::cards::{
    Card, CardCatalog, CardId, CatalogError, InMemoryCatalog, Position, Roster, Selection,
};

pub use crate::duel::{
    play_out, Duel, DuelEvent, DuelPhase, DuelSnapshot, EventLog, EventSink, FirstAvailable,
    LogSink, Outcome, RandomChoice, Resolution, ResponderPolicy, SelectionChooser, SharedDuel,
    StrongestAttack,
};
