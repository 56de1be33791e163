//! Roster Valuation - dynasty values and positional totals
//!
//! Leaf crate shared by every analysis component. It owns the player/value
//! data model, name normalisation used to join rosters against value feeds,
//! and the positional aggregation that the need matcher builds on.

pub mod names;
pub mod player;
pub mod position;
pub mod totals;
pub mod transaction;
pub mod values;

pub use names::normalize_name;
pub use player::RosterPlayer;
pub use position::Position;
pub use totals::{aggregate, PositionalTotals};
pub use transaction::CompletedTrade;
pub use values::{DynastyValue, ValuationMode, ValueTable, ValueTableError};
