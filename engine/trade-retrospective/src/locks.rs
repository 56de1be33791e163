//! Per-snapshot exclusive locks

use crate::error::{Result, SnapshotStoreError};
use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, warn};

/// Poll interval while another process holds a lock file
const LOCK_FILE_RETRY: Duration = Duration::from_millis(10);

/// Give up waiting for a lock file after this long
const LOCK_FILE_TIMEOUT: Duration = Duration::from_secs(10);

/// Lock files older than this were left behind by a crashed writer
const LOCK_FILE_STALE_AFTER: Duration = Duration::from_secs(30);

/// In-process lock table keyed by snapshot
///
/// Clones share the same table. An entry lives only while some task holds
/// or waits for its lock.
#[derive(Clone, Default)]
pub struct KeyLocks {
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl KeyLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `key`
    pub async fn acquire(&self, key: String) -> KeyGuard {
        let mutex = self
            .locks
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let guard = mutex.lock_owned().await;
        KeyGuard { guard: Some(guard), key, locks: self.locks.clone() }
    }

    /// Number of keys currently held or awaited
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

/// Held lock on one key, released on drop
pub struct KeyGuard {
    guard: Option<OwnedMutexGuard<()>>,
    key: String,
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl Drop for KeyGuard {
    fn drop(&mut self) {
        self.guard.take();
        // Only the table's own reference left: nobody holds or waits for this key
        self.locks.remove_if(&self.key, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}

/// Lock file shared across processes, removed on drop
pub struct LockFile {
    path: PathBuf,
}

impl LockFile {
    /// Create `path` exclusively, waiting while another writer holds it
    pub async fn acquire(path: &Path) -> Result<Self> {
        let started = SystemTime::now();
        loop {
            match tokio::fs::OpenOptions::new().write(true).create_new(true).open(path).await {
                Ok(_) => return Ok(Self { path: path.to_path_buf() }),
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
                Err(e) => return Err(SnapshotStoreError::Io(e)),
            }

            if is_stale(path).await {
                warn!("Removing stale snapshot lock {}", path.display());
                let _ = tokio::fs::remove_file(path).await;
                continue;
            }

            if started.elapsed().unwrap_or_default() > LOCK_FILE_TIMEOUT {
                return Err(SnapshotStoreError::unavailable(format!(
                    "timed out waiting for {}",
                    path.display()
                )));
            }

            tokio::time::sleep(LOCK_FILE_RETRY).await;
        }
    }
}

impl Drop for LockFile {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            debug!("Failed to remove snapshot lock {}: {}", self.path.display(), e);
        }
    }
}

async fn is_stale(path: &Path) -> bool {
    let Ok(metadata) = tokio::fs::metadata(path).await else {
        return false;
    };
    metadata
        .modified()
        .ok()
        .and_then(|modified| modified.elapsed().ok())
        .is_some_and(|age| age > LOCK_FILE_STALE_AFTER)
}

/// Exclusive hold on one trade snapshot for a read, recompute, write cycle
///
/// Dropping it releases the file lock before the in-process lock.
pub struct SnapshotLock {
    _file: Option<LockFile>,
    _key: KeyGuard,
}

impl SnapshotLock {
    pub fn new(key: KeyGuard) -> Self {
        Self { _file: None, _key: key }
    }

    pub fn with_lock_file(key: KeyGuard, file: LockFile) -> Self {
        Self { _file: Some(file), _key: key }
    }
}
