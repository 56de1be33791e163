//! Snapshot store trait and implementations

use crate::config::RetrospectiveConfig;
use crate::error::{Result, SnapshotStoreError};
use crate::locks::{KeyLocks, LockFile, SnapshotLock};
use crate::snapshot::{sanitize_segment, TradeSnapshot};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Get/put storage for trade snapshots, keyed by league and trade id
#[async_trait::async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Take exclusive hold of one trade's snapshot
    ///
    /// Every caller sharing this store, and for file-backed stores every
    /// process sharing its directory, waits until the returned lock drops.
    async fn lock(&self, league_id: &str, trade_id: &str) -> Result<SnapshotLock>;

    /// Load a snapshot; `Ok(None)` when the trade has never been recorded
    async fn load(&self, league_id: &str, trade_id: &str) -> Result<Option<TradeSnapshot>>;

    /// Write a snapshot, replacing any previous record for the same trade
    async fn save(&self, snapshot: &TradeSnapshot) -> Result<()>;
}

/// One JSON file per trade under `<data_dir>/<league>/<trade_id>.json`
///
/// Updates are guarded by an in-process lock plus a `<trade_id>.json.lock`
/// file next to the record.
#[derive(Clone)]
pub struct LocalSnapshotStore {
    data_dir: PathBuf,
    locks: KeyLocks,
}

impl LocalSnapshotStore {
    pub fn new(config: &RetrospectiveConfig) -> Result<Self> {
        config.validate().map_err(SnapshotStoreError::config)?;
        Ok(Self::with_data_dir(config.data_dir.clone()))
    }

    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into(), locks: KeyLocks::new() }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn league_dir(&self, league_id: &str) -> PathBuf {
        self.data_dir.join(sanitize_segment(league_id))
    }

    fn snapshot_path(&self, league_id: &str, trade_id: &str) -> PathBuf {
        self.league_dir(league_id).join(format!("{trade_id}.json"))
    }
}

#[async_trait::async_trait]
impl SnapshotStore for LocalSnapshotStore {
    async fn lock(&self, league_id: &str, trade_id: &str) -> Result<SnapshotLock> {
        let key = self.locks.acquire(format!("{}/{}", sanitize_segment(league_id), trade_id)).await;

        tokio::fs::create_dir_all(self.league_dir(league_id)).await?;
        let lock_path = self.league_dir(league_id).join(format!("{trade_id}.json.lock"));
        let file = LockFile::acquire(&lock_path).await?;

        Ok(SnapshotLock::with_lock_file(key, file))
    }

    async fn load(&self, league_id: &str, trade_id: &str) -> Result<Option<TradeSnapshot>> {
        let path = self.snapshot_path(league_id, trade_id);
        let data = match tokio::fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SnapshotStoreError::Io(e)),
        };

        let snapshot: TradeSnapshot = serde_json::from_slice(&data)?;
        if snapshot.trade_id != trade_id {
            return Err(SnapshotStoreError::corruption(format!(
                "{} holds trade {}",
                path.display(),
                snapshot.trade_id
            )));
        }

        Ok(Some(snapshot))
    }

    async fn save(&self, snapshot: &TradeSnapshot) -> Result<()> {
        let league_dir = self.league_dir(&snapshot.league_id);
        tokio::fs::create_dir_all(&league_dir).await?;

        let path = self.snapshot_path(&snapshot.league_id, &snapshot.trade_id);
        let temp_name = format!("{}.{}.json.tmp", snapshot.trade_id, Uuid::new_v4().simple());
        let temp_path = league_dir.join(temp_name);
        let data = serde_json::to_vec_pretty(snapshot)?;

        // Rename is atomic within a directory, readers see the old or new record
        tokio::fs::write(&temp_path, &data).await?;
        tokio::fs::rename(&temp_path, &path).await?;

        tracing::debug!("Saved trade snapshot {}", path.display());
        Ok(())
    }
}

/// In-memory snapshot store (for testing)
#[derive(Clone, Default)]
pub struct InMemorySnapshotStore {
    snapshots: Arc<Mutex<HashMap<(String, String), TradeSnapshot>>>,
    locks: KeyLocks,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.snapshots.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.snapshots.lock().await.is_empty()
    }
}

#[async_trait::async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn lock(&self, league_id: &str, trade_id: &str) -> Result<SnapshotLock> {
        Ok(SnapshotLock::new(self.locks.acquire(format!("{league_id}/{trade_id}")).await))
    }

    async fn load(&self, league_id: &str, trade_id: &str) -> Result<Option<TradeSnapshot>> {
        let snapshots = self.snapshots.lock().await;
        Ok(snapshots.get(&(league_id.to_string(), trade_id.to_string())).cloned())
    }

    async fn save(&self, snapshot: &TradeSnapshot) -> Result<()> {
        let mut snapshots = self.snapshots.lock().await;
        snapshots.insert((snapshot.league_id.clone(), snapshot.trade_id.clone()), snapshot.clone());
        Ok(())
    }
}
