//! Durable trade snapshots and the winner rule applied to them

use chrono::{DateTime, Utc};
use roster_valuation::CompletedTrade;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Bytes of the digest kept in a trade id
const TRADE_ID_BYTES: usize = 10;

/// Longitudinal outcome of a tracked trade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Recorded but not yet re-evaluated
    Pending,
    Even,
    Winner { team: String },
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Verdict::Pending => write!(f, "TBD"),
            Verdict::Even => write!(f, "Even"),
            Verdict::Winner { team } => write!(f, "{team}"),
        }
    }
}

/// A trade's value at the time it happened and as last re-measured
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeSnapshot {
    pub trade_id: String,
    pub league_id: String,
    pub timestamp: DateTime<Utc>,
    pub team1: String,
    pub team2: String,

    /// Assets team1 gave up
    pub team1_assets: Vec<String>,
    /// Assets team2 gave up
    pub team2_assets: Vec<String>,

    pub team1_value_then: i64,
    pub team2_value_then: i64,
    pub team1_value_now: i64,
    pub team2_value_now: i64,

    pub verdict: Verdict,
    pub value_swing: i64,
    pub days_elapsed: i64,

    #[serde(default)]
    pub last_evaluated: Option<DateTime<Utc>>,
}

impl TradeSnapshot {
    /// First observation: current values are the trade-day values
    pub fn first_observation(trade: &CompletedTrade, now: DateTime<Utc>) -> Self {
        Self {
            trade_id: trade_id(trade),
            league_id: league_key(&trade.league_id),
            timestamp: trade.timestamp,
            team1: trade.team1.clone(),
            team2: trade.team2.clone(),
            team1_assets: trade.team1_gave.clone(),
            team2_assets: trade.team2_gave.clone(),
            team1_value_then: trade.team1_gave_value,
            team2_value_then: trade.team2_gave_value,
            team1_value_now: trade.team1_gave_value,
            team2_value_now: trade.team2_gave_value,
            verdict: Verdict::Pending,
            value_swing: 0,
            days_elapsed: days_between(trade.timestamp, now),
            last_evaluated: Some(now),
        }
    }

    /// Apply re-measured values and recompute the verdict
    pub fn reevaluate(
        &mut self,
        team1_now: i64,
        team2_now: i64,
        swing_threshold: i64,
        now: DateTime<Utc>,
    ) {
        self.team1_value_now = team1_now;
        self.team2_value_now = team2_now;
        self.days_elapsed = days_between(self.timestamp, now);
        self.last_evaluated = Some(now);

        let (verdict, swing) = self.verdict_for(swing_threshold);
        self.verdict = verdict;
        self.value_swing = swing;
    }

    /// Team1 nets the current value of what it received over what it gave;
    /// team2 nets the trade-day value of the same exchange. A side wins when
    /// its net exceeds the other's by more than `swing_threshold`.
    fn verdict_for(&self, swing_threshold: i64) -> (Verdict, i64) {
        let team1_net = self.team2_value_now - self.team1_value_now;
        let team2_net = self.team1_value_then - self.team2_value_then;
        let excess = team1_net - team2_net;

        if excess > swing_threshold {
            (Verdict::Winner { team: self.team1.clone() }, excess)
        } else if -excess > swing_threshold {
            (Verdict::Winner { team: self.team2.clone() }, -excess)
        } else {
            (Verdict::Even, 0)
        }
    }
}

/// Stable identifier for a trade
///
/// Hex of the leading bytes of SHA-256 over league, teams, unix timestamp and
/// both sorted asset lists, so the same trade maps to the same id across runs.
pub fn trade_id(trade: &CompletedTrade) -> String {
    let mut team1_assets = trade.team1_gave.clone();
    let mut team2_assets = trade.team2_gave.clone();
    team1_assets.sort();
    team2_assets.sort();

    let base = [
        trade.league_id.clone(),
        trade.team1.clone(),
        trade.team2.clone(),
        trade.timestamp.timestamp().to_string(),
        team1_assets.join("|"),
        team2_assets.join("|"),
    ]
    .join("||");

    let digest = Sha256::digest(base.as_bytes());
    digest[..TRADE_ID_BYTES].iter().map(|b| format!("{b:02x}")).collect()
}

/// League id as stored; blank ids share the "unknown" bucket
pub fn league_key(league_id: &str) -> String {
    let trimmed = league_id.trim();
    if trimmed.is_empty() {
        "unknown".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Make a league id safe to use as a single directory name
pub fn sanitize_segment(segment: &str) -> String {
    league_key(segment)
        .chars()
        .map(|c| match c {
            '/' | '\\' | ' ' | ':' | '.' => '_',
            c => c,
        })
        .collect()
}

fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_days().max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

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

    #[test]
    fn test_trade_id_is_stable_and_order_insensitive() {
        let original = trade();
        let mut reordered = trade();
        reordered.team2_gave.reverse();

        let id = trade_id(&original);
        assert_eq!(id.len(), 20);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(id, trade_id(&reordered));

        let mut later = trade();
        later.timestamp = later.timestamp + Duration::seconds(1);
        assert_ne!(id, trade_id(&later));
    }

    #[test]
    fn test_first_observation_is_pending() {
        let now = trade().timestamp + Duration::days(3);
        let snapshot = TradeSnapshot::first_observation(&trade(), now);

        assert_eq!(snapshot.verdict, Verdict::Pending);
        assert_eq!(snapshot.verdict.to_string(), "TBD");
        assert_eq!(snapshot.team1_value_now, 1000);
        assert_eq!(snapshot.team2_value_now, 1200);
        assert_eq!(snapshot.days_elapsed, 3);
    }

    #[test]
    fn test_team1_wins_by_swing() {
        let now = trade().timestamp + Duration::days(30);
        let mut snapshot = TradeSnapshot::first_observation(&trade(), now);
        snapshot.reevaluate(800, 1700, 200, now);

        assert_eq!(snapshot.verdict, Verdict::Winner { team: "Alpha".to_string() });
        assert_eq!(snapshot.value_swing, 1100);
        assert_eq!(snapshot.days_elapsed, 30);
    }

    #[test]
    fn test_team2_wins_and_even() {
        let now = trade().timestamp + Duration::days(10);
        let mut snapshot = TradeSnapshot::first_observation(&trade(), now);

        snapshot.reevaluate(1500, 1000, 200, now);
        assert_eq!(snapshot.verdict, Verdict::Winner { team: "Beta".to_string() });
        assert_eq!(snapshot.value_swing, 300);

        snapshot.reevaluate(1000, 900, 200, now);
        assert_eq!(snapshot.verdict, Verdict::Even);
        assert_eq!(snapshot.value_swing, 0);
    }

    #[test]
    fn test_sanitize_segment() {
        assert_eq!(sanitize_segment("  "), "unknown");
        assert_eq!(sanitize_segment("my league/2025: ../x"), "my_league_2025_____x");
        assert_eq!(league_key(""), "unknown");
    }
}
