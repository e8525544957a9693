//! The duel engine and everything it reports through.
//!
//! - `engine`: `Duel`, the lifecycle state machine
//! - `chain`: battle arithmetic and chain continuation
//! - `state`: phase, scores, pending selections, snapshots
//! - `events`: `EventSink` callbacks and the stock sinks
//! - `policy`: AI responder selection
//! - `shared`: mutex-guarded handle for threaded hosts
//! - `autoplay`: drive a duel to completion without a human

mod autoplay;
mod chain;
mod engine;
mod events;
mod policy;
mod shared;
mod state;

pub use autoplay::{play_out, FirstAvailable, RandomChoice, SelectionChooser};
pub use chain::{ChainEnd, Clash};
pub use engine::{Duel, Resolution};
pub use events::{DuelEvent, EventLog, EventSink, LogSink, Outcome};
pub use policy::{ResponderPolicy, StrongestAttack};
pub use shared::SharedDuel;
pub use state::{DuelPhase, DuelSnapshot, DuelState, ExchangeTally};
