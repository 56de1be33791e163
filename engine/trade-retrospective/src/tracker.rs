//! Re-evaluation of completed trades against current valuations

use crate::config::RetrospectiveConfig;
use crate::snapshot::{league_key, trade_id, TradeSnapshot, Verdict};
use crate::store::SnapshotStore;
use chrono::{DateTime, Utc};
use roster_valuation::{CompletedTrade, ValuationMode, ValueTable};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Outcome surfaced for a trade seen on an earlier run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRetrospective {
    pub trade_id: String,
    pub verdict: Verdict,
    pub value_swing: i64,
    pub days_elapsed: i64,

    /// Short description for display, e.g. "+1100 value vs trade day"
    pub winner_gain: String,
}

impl TradeRetrospective {
    fn from_snapshot(snapshot: &TradeSnapshot) -> Self {
        let winner_gain = match snapshot.verdict {
            Verdict::Winner { .. } => format!("+{} value vs trade day", snapshot.value_swing),
            _ => "No significant change".to_string(),
        };

        Self {
            trade_id: snapshot.trade_id.clone(),
            verdict: snapshot.verdict.clone(),
            value_swing: snapshot.value_swing,
            days_elapsed: snapshot.days_elapsed,
            winner_gain,
        }
    }
}

/// Tracks trades across runs through a [`SnapshotStore`]
///
/// Each trade's read, recompute and write happen under the store's lock for
/// that trade, so concurrent runs over the same store never interleave
/// updates to one snapshot. Different trades proceed independently.
#[derive(Clone)]
pub struct RetrospectiveTracker {
    store: Arc<dyn SnapshotStore>,
    config: RetrospectiveConfig,
}

impl RetrospectiveTracker {
    pub fn new(store: Arc<dyn SnapshotStore>, config: RetrospectiveConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &RetrospectiveConfig {
        &self.config
    }

    /// Track one trade as of now
    pub async fn track(
        &self,
        trade: &CompletedTrade,
        values: &ValueTable,
        mode: ValuationMode,
    ) -> Option<TradeRetrospective> {
        self.track_at(trade, values, mode, Utc::now()).await
    }

    /// Track a batch of trades as of now, results in input order
    pub async fn track_all(
        &self,
        trades: &[CompletedTrade],
        values: &ValueTable,
        mode: ValuationMode,
    ) -> Vec<Option<TradeRetrospective>> {
        let now = Utc::now();
        let mut results = Vec::with_capacity(trades.len());
        for trade in trades {
            results.push(self.track_at(trade, values, mode, now).await);
        }

        let surfaced = results.iter().filter(|r| r.is_some()).count();
        info!("Tracked {} trades, {} with retrospective results", trades.len(), surfaced);
        results
    }

    /// Track one trade as of `now`
    ///
    /// The first observation records the trade-day values and returns `None`.
    /// Later observations re-value each side's given assets and return the
    /// verdict. Store failures never abort tracking: an unreadable snapshot
    /// counts as unseen and a failed write still returns the fresh result.
    pub async fn track_at(
        &self,
        trade: &CompletedTrade,
        values: &ValueTable,
        mode: ValuationMode,
        now: DateTime<Utc>,
    ) -> Option<TradeRetrospective> {
        let league_id = league_key(&trade.league_id);
        let trade_id = trade_id(trade);

        let _lock = match self.store.lock(&league_id, &trade_id).await {
            Ok(lock) => Some(lock),
            Err(e) => {
                warn!("Failed to lock snapshot for trade {}, updating without it: {}", trade_id, e);
                None
            }
        };

        let existing = match self.store.load(&league_id, &trade_id).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Failed to read snapshot for trade {}, treating as unseen: {}", trade_id, e);
                None
            }
        };

        let (snapshot, retrospective) = match existing {
            None => {
                debug!(
                    "First observation of trade {} ({} vs {})",
                    trade_id, trade.team1, trade.team2
                );
                (TradeSnapshot::first_observation(trade, now), None)
            }
            Some(mut snapshot) => {
                let team1_now = CompletedTrade::asset_value(&snapshot.team1_assets, values, mode);
                let team2_now = CompletedTrade::asset_value(&snapshot.team2_assets, values, mode);
                snapshot.reevaluate(team1_now, team2_now, self.config.swing_threshold, now);

                debug!(
                    "Trade {} re-evaluated after {} days: {} (swing {})",
                    trade_id, snapshot.days_elapsed, snapshot.verdict, snapshot.value_swing
                );
                let retrospective = TradeRetrospective::from_snapshot(&snapshot);
                (snapshot, Some(retrospective))
            }
        };

        if let Err(e) = self.store.save(&snapshot).await {
            error!("Failed to write snapshot for trade {}: {}", trade_id, e);
        }

        retrospective
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, SnapshotStoreError};
    use crate::locks::SnapshotLock;
    use crate::store::{InMemorySnapshotStore, LocalSnapshotStore};
    use chrono::{Duration, TimeZone};
    use roster_valuation::{DynastyValue, Position};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    fn trade() -> CompletedTrade {
        CompletedTrade {
            league_id: "league-1".to_string(),
            team1: "Alpha".to_string(),
            team2: "Beta".to_string(),
            timestamp: Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0).unwrap(),
            team1_gave: vec!["Player A".to_string()],
            team2_gave: vec!["Player B".to_string(), "2027 Round 1".to_string()],
            team1_gave_value: 1000,
            team2_gave_value: 1200,
        }
    }

    fn current_values() -> ValueTable {
        ValueTable::from_values([
            DynastyValue::new("Player A", Position::WR, 800, 800),
            DynastyValue::new("Player B", Position::RB, 1700, 1700),
        ])
    }

    fn tracker(store: Arc<dyn SnapshotStore>) -> RetrospectiveTracker {
        RetrospectiveTracker::new(store, RetrospectiveConfig::default())
    }

    #[tokio::test]
    async fn test_first_observation_records_pending() {
        let store = InMemorySnapshotStore::new();
        let tracker = tracker(Arc::new(store.clone()));
        let now = trade().timestamp + Duration::days(1);

        let result =
            tracker.track_at(&trade(), &current_values(), ValuationMode::SingleQb, now).await;
        assert!(result.is_none());

        let stored = store.load("league-1", &trade_id(&trade())).await.unwrap().unwrap();
        assert_eq!(stored.verdict, Verdict::Pending);
        assert_eq!(stored.team1_value_now, 1000);
        assert_eq!(stored.team2_value_now, 1200);
    }

    #[tokio::test]
    async fn test_later_observation_declares_winner() {
        let store = InMemorySnapshotStore::new();
        let tracker = tracker(Arc::new(store.clone()));
        let start = trade().timestamp;

        tracker.track_at(&trade(), &current_values(), ValuationMode::SingleQb, start).await;
        let result = tracker
            .track_at(
                &trade(),
                &current_values(),
                ValuationMode::SingleQb,
                start + Duration::days(30),
            )
            .await
            .unwrap();

        assert_eq!(result.verdict, Verdict::Winner { team: "Alpha".to_string() });
        assert_eq!(result.value_swing, 1100);
        assert_eq!(result.days_elapsed, 30);
        assert_eq!(result.winner_gain, "+1100 value vs trade day");

        let stored = store.load("league-1", &result.trade_id).await.unwrap().unwrap();
        assert_eq!(stored.team1_value_now, 800);
        assert_eq!(stored.team2_value_now, 1700);
        assert_eq!(stored.team1_value_then, 1000);
    }

    #[tokio::test]
    async fn test_small_change_is_even() {
        let mut even_trade = trade();
        even_trade.team2_gave_value = 1000;
        let values = ValueTable::from_values([
            DynastyValue::new("Player A", Position::WR, 1000, 1000),
            DynastyValue::new("Player B", Position::RB, 1100, 1100),
        ]);

        let tracker = tracker(Arc::new(InMemorySnapshotStore::new()));
        let start = even_trade.timestamp;
        tracker.track_at(&even_trade, &values, ValuationMode::SingleQb, start).await;
        let result = tracker
            .track_at(&even_trade, &values, ValuationMode::SingleQb, start)
            .await
            .unwrap();

        assert_eq!(result.verdict, Verdict::Even);
        assert_eq!(result.value_swing, 0);
        assert_eq!(result.winner_gain, "No significant change");
    }

    /// Store that fails every operation and counts the attempts
    #[derive(Default)]
    struct BrokenStore {
        saves: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl SnapshotStore for BrokenStore {
        async fn lock(&self, _league_id: &str, _trade_id: &str) -> Result<SnapshotLock> {
            Err(SnapshotStoreError::unavailable("disk offline"))
        }

        async fn load(&self, _league_id: &str, _trade_id: &str) -> Result<Option<TradeSnapshot>> {
            Err(SnapshotStoreError::unavailable("disk offline"))
        }

        async fn save(&self, _snapshot: &TradeSnapshot) -> Result<()> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            Err(SnapshotStoreError::unavailable("disk offline"))
        }
    }

    #[tokio::test]
    async fn test_store_failures_are_tolerated() {
        let store = Arc::new(BrokenStore::default());
        let tracker = tracker(store.clone());

        let first = tracker.track(&trade(), &current_values(), ValuationMode::SingleQb).await;
        let second = tracker.track(&trade(), &current_values(), ValuationMode::SingleQb).await;

        assert!(first.is_none());
        assert!(second.is_none());
        assert_eq!(store.saves.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_local_store_persists_across_trackers() {
        let temp_dir = TempDir::new().unwrap();
        let start = trade().timestamp;

        let first_run = tracker(Arc::new(LocalSnapshotStore::with_data_dir(temp_dir.path())));
        let first = first_run
            .track_at(&trade(), &current_values(), ValuationMode::Superflex, start)
            .await;
        assert!(first.is_none());

        let second_run = tracker(Arc::new(LocalSnapshotStore::with_data_dir(temp_dir.path())));
        let result = second_run
            .track_at(
                &trade(),
                &current_values(),
                ValuationMode::Superflex,
                start + Duration::days(7),
            )
            .await;

        assert_eq!(result.map(|r| r.value_swing), Some(1100));
    }

    #[tokio::test]
    async fn test_track_all_in_input_order() {
        let tracker = tracker(Arc::new(InMemorySnapshotStore::new()));
        let mut other = trade();
        other.team1 = "Gamma".to_string();

        tracker.track_all(&[trade()], &current_values(), ValuationMode::SingleQb).await;
        let results = tracker
            .track_all(&[other, trade()], &current_values(), ValuationMode::SingleQb)
            .await;

        assert_eq!(results.len(), 2);
        assert!(results[0].is_none());
        assert!(results[1].is_some());
    }

    #[tokio::test]
    async fn test_concurrent_tracking_of_one_trade() {
        let store = InMemorySnapshotStore::new();
        let tracker = tracker(Arc::new(store.clone()));
        let values = Arc::new(current_values());

        let mut handles = Vec::new();
        for _ in 0..8 {
            let tracker = tracker.clone();
            let values = values.clone();
            handles.push(tokio::spawn(async move {
                tracker.track(&trade(), &values, ValuationMode::SingleQb).await
            }));
        }

        let mut first_observations = 0;
        for handle in handles {
            if handle.await.unwrap().is_none() {
                first_observations += 1;
            }
        }

        assert_eq!(first_observations, 1);
        assert_eq!(store.len().await, 1);
    }

    /// Store that yields between reading and writing so unguarded updates interleave
    #[derive(Clone, Default)]
    struct SlowStore {
        inner: InMemorySnapshotStore,
    }

    #[async_trait::async_trait]
    impl SnapshotStore for SlowStore {
        async fn lock(&self, league_id: &str, trade_id: &str) -> Result<SnapshotLock> {
            self.inner.lock(league_id, trade_id).await
        }

        async fn load(&self, league_id: &str, trade_id: &str) -> Result<Option<TradeSnapshot>> {
            let snapshot = self.inner.load(league_id, trade_id).await;
            tokio::task::yield_now().await;
            snapshot
        }

        async fn save(&self, snapshot: &TradeSnapshot) -> Result<()> {
            tokio::task::yield_now().await;
            self.inner.save(snapshot).await
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_separate_trackers_on_one_store_serialize_updates() {
        let store = Arc::new(SlowStore::default());
        let values = Arc::new(current_values());

        let mut handles = Vec::new();
        for _ in 0..4 {
            // A fresh tracker per run, as each league-report invocation builds its own
            let tracker = tracker(store.clone());
            let values = values.clone();
            handles.push(tokio::spawn(async move {
                tracker.track(&trade(), &values, ValuationMode::SingleQb).await
            }));
        }

        let mut first_observations = 0;
        for handle in handles {
            if handle.await.unwrap().is_none() {
                first_observations += 1;
            }
        }

        assert_eq!(first_observations, 1);
        assert_eq!(store.inner.len().await, 1);
    }
}
