//! Ownership ledger keyed by immutable pick identity

use crate::config::DEFAULT_WINDOW_YEARS;
use crate::event::TradeEvent;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info, warn};

/// League roster identifier (Sleeper `roster_id`); 0 means "no team"
pub type TeamId = u32;

/// Identity of a draft slot: season, round and the team it originally belonged to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PickKey {
    pub season: i32,
    pub round: u32,
    pub original_owner: TeamId,
}

/// Result of applying one trade event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Pick moved to a new holder
    Transferred { key: PickKey, from: TeamId, to: TeamId, hint_mismatch: bool },

    /// New owner missing or zero, the pick is no longer tracked
    Deleted { key: PickKey },

    /// Season, round or original owner missing
    SkippedMalformed,

    /// Pick not present in the ledger (outside the window or already deleted)
    SkippedUnknownPick { key: PickKey },
}

/// Counters for one replay pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub transferred: usize,
    pub deleted: usize,
    pub skipped_malformed: usize,
    pub skipped_unknown: usize,
    pub hint_mismatches: usize,
}

impl ReplaySummary {
    fn record(&mut self, outcome: &ApplyOutcome) {
        match outcome {
            ApplyOutcome::Transferred { hint_mismatch, .. } => {
                self.transferred += 1;
                if *hint_mismatch {
                    self.hint_mismatches += 1;
                }
            }
            ApplyOutcome::Deleted { .. } => self.deleted += 1,
            ApplyOutcome::SkippedMalformed => self.skipped_malformed += 1,
            ApplyOutcome::SkippedUnknownPick { .. } => self.skipped_unknown += 1,
        }
    }
}

/// Current holder of every known pick
///
/// Invariant: each present key has exactly one owner. A key that is absent
/// either was never seeded or was deleted because its ownership could not be
/// determined; both read as "no pick".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnershipLedger {
    owners: HashMap<PickKey, TeamId>,
}

impl OwnershipLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger where every given pick is held by its original owner
    pub fn seeded(keys: impl IntoIterator<Item = PickKey>) -> Self {
        let owners = keys.into_iter().map(|key| (key, key.original_owner)).collect();
        Self { owners }
    }

    /// Give every team its own picks for each round of each year
    pub fn seed(&mut self, teams: &[TeamId], rounds_per_draft: u32, years: &BTreeSet<i32>) {
        for &year in years {
            for round in 1..=rounds_per_draft {
                for &team in teams {
                    if team == 0 {
                        continue;
                    }
                    let key = PickKey { season: year, round, original_owner: team };
                    self.owners.insert(key, team);
                }
            }
        }
    }

    pub fn owner(&self, key: &PickKey) -> Option<TeamId> {
        self.owners.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PickKey, &TeamId)> {
        self.owners.iter()
    }

    /// Keys currently held by `team`, ascending by (season, round, original owner)
    pub fn picks_owned_by(&self, team: TeamId) -> Vec<PickKey> {
        let mut keys: Vec<PickKey> = self
            .owners
            .iter()
            .filter(|(_, owner)| **owner == team)
            .map(|(key, _)| *key)
            .collect();
        keys.sort();
        keys
    }

    /// Apply one trade event
    pub fn apply(&mut self, event: &TradeEvent) -> ApplyOutcome {
        let Some(key) = event.key() else {
            debug!(?event, "Skipping malformed pick trade");
            return ApplyOutcome::SkippedMalformed;
        };

        let Some(current) = self.owners.get(&key).copied() else {
            debug!(?key, "Pick not in ledger, skipping trade");
            return ApplyOutcome::SkippedUnknownPick { key };
        };

        let Some(new_owner) = event.new_owner() else {
            self.owners.remove(&key);
            debug!(?key, "Pick has no owner after trade, removed from ledger");
            return ApplyOutcome::Deleted { key };
        };

        let hint_mismatch = matches!(event.previous_owner(), Some(prev) if prev != current);
        if hint_mismatch {
            warn!(
                ?key,
                ledger_owner = current,
                hinted_owner = ?event.previous_owner(),
                "Previous owner hint disagrees with ledger, keeping ledger value"
            );
        }

        self.owners.insert(key, new_owner);
        debug!(?key, from = current, to = new_owner, "Pick transferred");

        ApplyOutcome::Transferred { key, from: current, to: new_owner, hint_mismatch }
    }

    /// Apply events strictly in the given order
    pub fn replay(&mut self, events: &[TradeEvent]) -> ReplaySummary {
        let mut summary = ReplaySummary::default();
        for event in events {
            let outcome = self.apply(event);
            summary.record(&outcome);
        }
        summary
    }
}

/// Build a ledger seeding a three-year window from `year_window_start`
pub fn build_ledger(
    teams: &[TeamId],
    trade_events: &[TradeEvent],
    rounds_per_draft: u32,
    year_window_start: i32,
) -> OwnershipLedger {
    build_ledger_with_window(
        teams,
        trade_events,
        rounds_per_draft,
        year_window_start,
        DEFAULT_WINDOW_YEARS,
    )
}

/// Build a ledger for an arbitrary window length
///
/// Any season referenced by a trade event is seeded too, so historical or
/// far-future trades still have a pick to land on.
pub fn build_ledger_with_window(
    teams: &[TeamId],
    trade_events: &[TradeEvent],
    rounds_per_draft: u32,
    year_window_start: i32,
    window_years: u32,
) -> OwnershipLedger {
    let mut years: BTreeSet<i32> =
        (0..window_years as i32).map(|offset| year_window_start + offset).collect();
    years.extend(trade_events.iter().filter_map(TradeEvent::season));

    let mut ledger = OwnershipLedger::new();
    ledger.seed(teams, rounds_per_draft, &years);
    debug!("Seeded {} picks across {} drafts", ledger.len(), years.len());

    let summary = ledger.replay(trade_events);
    info!(
        transferred = summary.transferred,
        deleted = summary.deleted,
        skipped_malformed = summary.skipped_malformed,
        skipped_unknown = summary.skipped_unknown,
        hint_mismatches = summary.hint_mismatches,
        "Replayed {} pick trades",
        trade_events.len()
    );

    ledger
}
