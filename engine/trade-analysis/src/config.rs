//! # Configuration Management
//!
//! Thresholds used by need matching, proposal balancing and fairness scoring.

use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for trade analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AnalysisConfig {
    /// Surplus/deficit detection
    #[serde(default)]
    pub needs: NeedThresholds,
    /// Proposal balancing
    #[serde(default)]
    pub proposal: ProposalConfig,
    /// Fairness labels
    #[serde(default)]
    pub fairness: FairnessConfig,
}

/// Positional share thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeedThresholds {
    /// Share of skill-position value above which a position is surplus
    pub surplus_share: f64,
    /// Share below which a position is a deficit
    pub deficit_share: f64,
    /// Number of trade targets returned
    pub max_targets: usize,
}

impl Default for NeedThresholds {
    fn default() -> Self {
        Self { surplus_share: 0.30, deficit_share: 0.15, max_targets: 3 }
    }
}

/// Proposal balancing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalConfig {
    /// Accepted value gap for a 1-for-1, as a fraction of the pair's average
    pub value_tolerance: f64,
}

impl Default for ProposalConfig {
    fn default() -> Self {
        Self { value_tolerance: 0.10 }
    }
}

/// Fairness label thresholds (percent of the smaller side)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FairnessConfig {
    /// Below this the trade is fair
    pub fair_pct: f64,
    /// At or above this the gap is extreme
    pub extreme_pct: f64,
}

impl Default for FairnessConfig {
    fn default() -> Self {
        Self { fair_pct: 5.0, extreme_pct: 15.0 }
    }
}

impl AnalysisConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, AnalysisError> {
        let content = std::fs::read_to_string(path)?;
        let config: AnalysisConfig = toml::from_str(&content)?;
        config.validate().map_err(|message| AnalysisError::InvalidConfig { message })?;
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(share) = std::env::var("DYNASTY_SURPLUS_SHARE") {
            config.needs.surplus_share = share.parse().unwrap_or(0.30);
        }

        if let Ok(share) = std::env::var("DYNASTY_DEFICIT_SHARE") {
            config.needs.deficit_share = share.parse().unwrap_or(0.15);
        }

        if let Ok(tolerance) = std::env::var("DYNASTY_VALUE_TOLERANCE") {
            config.proposal.value_tolerance = tolerance.parse().unwrap_or(0.10);
        }

        config
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        let needs = &self.needs;
        if !(0.0..=1.0).contains(&needs.surplus_share)
            || !(0.0..=1.0).contains(&needs.deficit_share)
        {
            return Err("need thresholds must be shares between 0 and 1".to_string());
        }

        if needs.deficit_share >= needs.surplus_share {
            return Err("deficit_share must be below surplus_share".to_string());
        }

        if self.proposal.value_tolerance < 0.0 {
            return Err("value_tolerance must not be negative".to_string());
        }

        if self.fairness.fair_pct > self.fairness.extreme_pct {
            return Err("fair_pct must not exceed extreme_pct".to_string());
        }

        Ok(())
    }
}
