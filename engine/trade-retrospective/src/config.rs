//! Configuration for the retrospective tracker

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default margin a side must win by to be declared the longitudinal winner
pub const DEFAULT_SWING_THRESHOLD: i64 = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrospectiveConfig {
    /// Base directory for snapshot files (one subdirectory per league)
    pub data_dir: PathBuf,

    /// Absolute value margin required to name a winner
    pub swing_threshold: i64,
}

impl Default for RetrospectiveConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data/trade_snapshots"),
            swing_threshold: DEFAULT_SWING_THRESHOLD,
        }
    }
}

impl RetrospectiveConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into(), ..Self::default() }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("DYNASTY_SNAPSHOT_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        if let Ok(threshold) = std::env::var("DYNASTY_SWING_THRESHOLD") {
            config.swing_threshold = threshold.parse().unwrap_or(DEFAULT_SWING_THRESHOLD);
        }

        config
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.data_dir.as_os_str().is_empty() {
            return Err("data_dir must not be empty".to_string());
        }

        if self.swing_threshold < 0 {
            return Err("swing_threshold must not be negative".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RetrospectiveConfig::default();
        assert_eq!(config.swing_threshold, 200);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config() {
        let mut config = RetrospectiveConfig::new("");
        assert!(config.validate().is_err());

        config.data_dir = PathBuf::from("/tmp/snapshots");
        config.swing_threshold = -1;
        assert!(config.validate().is_err());
    }
}
