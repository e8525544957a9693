//! Card system: records, selections, rosters, and the catalog boundary.
//!
//! ## Key Types
//!
//! - `CardId`: Stable catalog identifier; card identity is the id alone
//! - `Card`: Immutable monster record
//! - `Position` / `Selection`: A card committed to an exchange
//! - `Roster`: One side's live lineup and life pool
//! - `CardCatalog`: Where cards come from (`InMemoryCatalog` for local data)

pub mod card;
pub mod selection;
pub mod roster;
pub mod catalog;

pub use card::{Card, CardId};
pub use selection::{Position, Selection};
pub use roster::{Roster, Wound};
pub use catalog::{CardCatalog, CatalogError, InMemoryCatalog, DRAW_ATTEMPTS_PER_CARD};
