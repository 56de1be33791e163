//! League snapshot loaded from a JSON fixture

use anyhow::{Context, Result};
use pick_ledger::{TeamId, TeamStanding, TradeEvent};
use roster_valuation::{CompletedTrade, DynastyValue, RosterPlayer, ValuationMode, ValueTable};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureTeam {
    pub team_id: TeamId,
    pub name: String,
    #[serde(default)]
    pub roster: Vec<RosterPlayer>,
}

/// Everything the report needs about one league
#[derive(Debug, Clone, Deserialize)]
pub struct LeagueFixture {
    pub league_id: String,

    /// First draft year of the pick window
    pub season: i32,

    #[serde(default)]
    pub valuation_mode: ValuationMode,

    pub teams: Vec<FixtureTeam>,

    #[serde(default)]
    pub values: Vec<DynastyValue>,

    #[serde(default)]
    pub traded_picks: Vec<TradeEvent>,

    #[serde(default)]
    pub standings: Vec<TeamStanding>,

    #[serde(default)]
    pub trades: Vec<CompletedTrade>,
}

impl LeagueFixture {
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read fixture {}", path.display()))?;
        let fixture = Self::from_json(&content)
            .with_context(|| format!("invalid fixture {}", path.display()))?;

        info!(
            "Loaded league {} with {} teams, {} traded picks, {} trades",
            fixture.league_id,
            fixture.teams.len(),
            fixture.traded_picks.len(),
            fixture.trades.len()
        );
        Ok(fixture)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let mut fixture: LeagueFixture = serde_json::from_str(content)?;
        for trade in &mut fixture.trades {
            if trade.league_id.trim().is_empty() {
                trade.league_id = fixture.league_id.clone();
            }
        }
        Ok(fixture)
    }

    pub fn value_table(&self) -> ValueTable {
        ValueTable::from_values(self.values.iter().cloned())
    }

    pub fn team(&self, team_id: TeamId) -> Option<&FixtureTeam> {
        self.teams.iter().find(|t| t.team_id == team_id)
    }

    pub fn team_ids(&self) -> Vec<TeamId> {
        self.teams.iter().map(|t| t.team_id).collect()
    }

    pub fn owner_names(&self) -> HashMap<TeamId, String> {
        self.teams.iter().map(|t| (t.team_id, t.name.clone())).collect()
    }

    /// Team analysed when none is requested
    pub fn default_subject(&self) -> Option<TeamId> {
        self.teams.first().map(|t| t.team_id)
    }
}

impl FixtureTeam {
    /// Roster joined against the value table
    pub fn valued_roster(&self, table: &ValueTable) -> Vec<RosterPlayer> {
        self.roster.iter().cloned().map(|player| player.with_values_from(table)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = include_str!("../fixtures/sample_league.json");

    #[test]
    fn test_sample_fixture_parses() {
        let fixture = LeagueFixture::from_json(SAMPLE).unwrap();

        assert_eq!(fixture.teams.len(), 4);
        assert_eq!(fixture.valuation_mode, ValuationMode::SingleQb);
        assert_eq!(fixture.default_subject(), Some(1));
        assert!(fixture.trades.iter().all(|t| t.league_id == "demo-league"));
        assert_eq!(fixture.traded_picks[0].key().map(|k| k.season), Some(2026));
    }

    #[test]
    fn test_rosters_join_values_by_normalized_name() {
        let fixture = LeagueFixture::from_json(SAMPLE).unwrap();
        let table = fixture.value_table();
        let roster = fixture.team(3).unwrap().valued_roster(&table);

        let harrison = roster.iter().find(|p| p.name == "Marvin Harrison Jr.").unwrap();
        assert_eq!(harrison.value(ValuationMode::SingleQb), 6500);

        let kicker = fixture.team(1).unwrap().valued_roster(&table);
        assert!(kicker.iter().any(|p| p.valuation.is_none()));
    }
}
