use crate::values::{ValuationMode, ValueTable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A completed two-team trade with already-resolved asset lists
///
/// `team1_gave` are the assets team1 sent to team2 (and vice versa). The
/// `*_gave_value` fields hold the total dynasty value of each side at the
/// time the trade was processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedTrade {
    #[serde(default)]
    pub league_id: String,
    pub team1: String,
    pub team2: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub team1_gave: Vec<String>,
    #[serde(default)]
    pub team2_gave: Vec<String>,
    #[serde(default)]
    pub team1_gave_value: i64,
    #[serde(default)]
    pub team2_gave_value: i64,
}

impl CompletedTrade {
    /// Whether an asset label names a draft pick rather than a player
    pub fn is_pick_asset(asset: &str) -> bool {
        asset.contains("Round")
    }

    /// Current value of a list of player assets; draft picks are skipped
    pub fn asset_value(assets: &[String], values: &ValueTable, mode: ValuationMode) -> i64 {
        assets
            .iter()
            .filter(|asset| !Self::is_pick_asset(asset))
            .map(|asset| values.value_of(asset, mode))
            .sum()
    }
}
