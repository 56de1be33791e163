//! Value-gap labels for completed trades

use crate::config::FairnessConfig;
use roster_valuation::CompletedTrade;
use serde::{Deserialize, Serialize};
use tracing::debug;

const EXTREME_CONTEXT: &str = "Extreme value gap - verify trade validity";
const FAIR_CONTEXT: &str = "Fair trade";
const EXTREME_MARKER: &str = "\u{1F534}";

/// Side that came out ahead on value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FairnessWinner {
    Team1,
    Team2,
    Fair,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeFairness {
    pub winner: FairnessWinner,

    /// Label of the winning team, empty for a fair trade
    pub winner_team: String,

    /// Absolute gap between what the two sides gave
    pub value_delta: i64,

    /// Gap as a percentage of the smaller nonzero side
    pub value_delta_pct: f64,

    /// Gap at or above the extreme threshold
    pub extreme: bool,

    pub context: String,
    pub display_badge: String,
}

impl TradeFairness {
    fn unjudged() -> Self {
        Self {
            winner: FairnessWinner::Fair,
            winner_team: String::new(),
            value_delta: 0,
            value_delta_pct: 0.0,
            extreme: false,
            context: String::new(),
            display_badge: String::new(),
        }
    }
}

/// Classifies value gaps with configurable thresholds
#[derive(Debug, Clone, Default)]
pub struct FairnessClassifier {
    config: FairnessConfig,
}

impl FairnessClassifier {
    pub fn new(config: FairnessConfig) -> Self {
        Self { config }
    }

    /// Label a trade where team1 gave `team1_gave` and team2 gave `team2_gave`
    pub fn classify(
        &self,
        team1: &str,
        team2: &str,
        team1_gave: i64,
        team2_gave: i64,
    ) -> TradeFairness {
        if team1_gave == 0 && team2_gave == 0 {
            return TradeFairness::unjudged();
        }

        let value_delta = (team1_gave - team2_gave).abs();
        let (winner, winner_team) = if team1_gave > team2_gave {
            (FairnessWinner::Team2, team2.to_string())
        } else if team2_gave > team1_gave {
            (FairnessWinner::Team1, team1.to_string())
        } else {
            (FairnessWinner::Fair, String::new())
        };

        let smaller_side = [team1_gave, team2_gave]
            .into_iter()
            .filter(|v| *v > 0)
            .min()
            .unwrap_or(0);
        let value_delta_pct = if smaller_side > 0 {
            value_delta as f64 / smaller_side as f64 * 100.0
        } else {
            0.0
        };

        let extreme = value_delta_pct >= self.config.extreme_pct;
        let (context, display_badge) = if extreme {
            (
                EXTREME_CONTEXT.to_string(),
                format!("{winner_team} +{value_delta_pct:.0}% {EXTREME_MARKER}"),
            )
        } else if value_delta_pct >= self.config.fair_pct {
            (format!("{winner_team} won on value"), format!("{winner_team} +{value_delta_pct:.0}%"))
        } else {
            (FAIR_CONTEXT.to_string(), FAIR_CONTEXT.to_string())
        };

        if extreme {
            debug!("Extreme value gap: {} vs {} ({:.1}%)", team1_gave, team2_gave, value_delta_pct);
        }

        TradeFairness {
            winner,
            winner_team,
            value_delta,
            value_delta_pct,
            extreme,
            context,
            display_badge,
        }
    }

    pub fn classify_trade(&self, trade: &CompletedTrade) -> TradeFairness {
        self.classify(&trade.team1, &trade.team2, trade.team1_gave_value, trade.team2_gave_value)
    }
}

/// Classify with default thresholds and generic side labels
pub fn classify_fairness(team1_gave: i64, team2_gave: i64) -> TradeFairness {
    FairnessClassifier::default().classify("Team 1", "Team 2", team1_gave, team2_gave)
}

/// Classify a completed trade with default thresholds
pub fn classify_trade(trade: &CompletedTrade) -> TradeFairness {
    FairnessClassifier::default().classify_trade(trade)
}
