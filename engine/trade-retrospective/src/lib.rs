//! # Trade Retrospective
//!
//! Decides who won a trade over time. The first time a completed trade is
//! seen its trade-day values are persisted; every later run re-values the
//! same assets against current dynasty values and declares a winner once one
//! side is ahead by more than the configured swing threshold.
//!
//! ## Storage
//!
//! Snapshots go through the [`SnapshotStore`] trait:
//! - [`LocalSnapshotStore`]: one JSON file per trade, grouped by league
//! - [`InMemorySnapshotStore`]: process-local map for tests
//!
//! Each store hands out a per-trade [`SnapshotLock`] so the tracker's read,
//! recompute and write cycle is exclusive across trackers sharing the store.
//! Storage failures are logged and never surface as errors from the tracker.

pub mod config;
pub mod error;
pub mod locks;
pub mod snapshot;
pub mod store;
pub mod tracker;

pub use config::RetrospectiveConfig;
pub use error::{Result, SnapshotStoreError};
pub use locks::{KeyGuard, KeyLocks, LockFile, SnapshotLock};
pub use snapshot::{trade_id, TradeSnapshot, Verdict};
pub use store::{InMemorySnapshotStore, LocalSnapshotStore, SnapshotStore};
pub use tracker::{RetrospectiveTracker, TradeRetrospective};
