//! # Pick Ledger
//!
//! Resolves who currently owns every draft pick in a league.
//!
//! A pick's identity never changes: it is always "season X, round Y, the slot
//! that originally belonged to team Z" ([`PickKey`]). The ledger seeds every
//! team with its own picks for a forward window and then replays the league's
//! traded-pick feed in order, so a pick that moved A → B → C ends with C while
//! still remembering that it is A's slot.
//!
//! ## Usage
//!
//! ```rust
//! use pick_ledger::{build_ledger, extract_team_picks, TradeEvent};
//! use std::collections::HashMap;
//!
//! let events = vec![TradeEvent::new(2026, 1, 1, 2)];
//! let ledger = build_ledger(&[1, 2, 3], &events, 3, 2026);
//!
//! let names = HashMap::from([(1, "TeamA".to_string())]);
//! let picks = extract_team_picks(&ledger, 2, &names);
//! assert!(picks.iter().any(|p| p.original_owner_name.as_deref() == Some("TeamA")));
//! ```

pub mod config;
pub mod event;
pub mod ledger;
pub mod picks;
pub mod projection;

pub use config::LedgerConfig;
pub use event::TradeEvent;
pub use ledger::{
    build_ledger, build_ledger_with_window, ApplyOutcome, OwnershipLedger, PickKey, ReplaySummary,
    TeamId,
};
pub use picks::{
    extract_team_picks, resolve_team_picks, summarize_pick_inventory, DraftCapital,
    PickInventorySummary, ResolvedDraftPick,
};
pub use projection::{project_picks, ProjectedDraftPick, TeamStanding};
