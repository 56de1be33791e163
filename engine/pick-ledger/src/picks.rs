//! Per-team pick inventory extracted from the ledger

use crate::config::LedgerConfig;
use crate::event::TradeEvent;
use crate::ledger::{build_ledger_with_window, OwnershipLedger, PickKey, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// A pick currently held by one team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDraftPick {
    pub year: i32,
    pub round: u32,

    /// Team holding the pick now
    pub owner: TeamId,

    /// Team whose slot this is
    pub original_owner: TeamId,

    /// Display name of the original owner, `None` for the holder's own pick
    pub original_owner_name: Option<String>,

    /// True when the pick came from another team
    pub acquired: bool,
}

impl ResolvedDraftPick {
    pub fn key(&self) -> PickKey {
        PickKey { season: self.year, round: self.round, original_owner: self.original_owner }
    }
}

/// Placeholder used when an original owner has no known display name
fn placeholder_name(team: TeamId) -> String {
    format!("Team {team}")
}

/// Picks currently owned by `team_id`, ascending by (year, round)
pub fn extract_team_picks(
    ledger: &OwnershipLedger,
    team_id: TeamId,
    owner_names: &HashMap<TeamId, String>,
) -> Vec<ResolvedDraftPick> {
    let picks: Vec<ResolvedDraftPick> = ledger
        .picks_owned_by(team_id)
        .into_iter()
        .map(|key| {
            let acquired = key.original_owner != team_id;
            let original_owner_name = acquired.then(|| {
                owner_names
                    .get(&key.original_owner)
                    .cloned()
                    .unwrap_or_else(|| placeholder_name(key.original_owner))
            });

            if let Some(name) = &original_owner_name {
                debug!(
                    "Pick {} round {}: acquired from {} ({})",
                    key.season, key.round, key.original_owner, name
                );
            }

            ResolvedDraftPick {
                year: key.season,
                round: key.round,
                owner: team_id,
                original_owner: key.original_owner,
                original_owner_name,
                acquired,
            }
        })
        .collect();

    debug!("Team {} holds {} draft picks", team_id, picks.len());
    picks
}

/// Build the ledger and extract one team's picks in a single step
///
/// A zero `subject` means there is no team to resolve for, so nothing is built.
pub fn resolve_team_picks(
    subject: TeamId,
    teams: &[TeamId],
    trade_events: &[TradeEvent],
    owner_names: &HashMap<TeamId, String>,
    config: &LedgerConfig,
    year_window_start: i32,
) -> Vec<ResolvedDraftPick> {
    if subject == 0 {
        warn!("No subject team for pick resolution, returning no picks");
        return Vec::new();
    }

    let ledger = build_ledger_with_window(
        teams,
        trade_events,
        config.rounds_per_draft,
        year_window_start,
        config.window_years,
    );
    extract_team_picks(&ledger, subject, owner_names)
}

/// How much rookie-draft capital a team holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftCapital {
    Low,
    Medium,
    High,
}

/// Short description of a team's pick inventory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickInventorySummary {
    pub summary: String,
    pub capital: DraftCapital,
}

/// Summarize picks in the next two drafts starting at `first_year`
///
/// Three or more first-rounders is high capital; two firsts or four picks of
/// any kind is medium.
pub fn summarize_pick_inventory(
    picks: &[ResolvedDraftPick],
    first_year: i32,
) -> PickInventorySummary {
    if picks.is_empty() {
        return PickInventorySummary { summary: "No picks".to_string(), capital: DraftCapital::Low };
    }

    let near_term: Vec<&ResolvedDraftPick> =
        picks.iter().filter(|p| p.year == first_year || p.year == first_year + 1).collect();
    let first_rounders = near_term.iter().filter(|p| p.round == 1).count();

    let capital = if first_rounders >= 3 {
        DraftCapital::High
    } else if first_rounders >= 2 || picks.len() >= 4 {
        DraftCapital::Medium
    } else {
        DraftCapital::Low
    };

    let summary = if near_term.is_empty() {
        String::new()
    } else if first_rounders > 0 {
        let mut text = format!("{first_rounders} 1st");
        if picks.len() > first_rounders {
            text.push_str(&format!(", {} total", picks.len()));
        }
        text
    } else {
        format!("{} picks", picks.len())
    };

    PickInventorySummary { summary, capital }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::build_ledger;

    fn owner_names() -> HashMap<TeamId, String> {
        HashMap::from([
            (1, "TeamA".to_string()),
            (2, "TeamB".to_string()),
            (3, "TeamC".to_string()),
        ])
    }

    #[test]
    fn test_original_picks_only() {
        let ledger = build_ledger(&[1, 2, 3], &[], 1, 2026);
        let picks = extract_team_picks(&ledger, 2, &owner_names());

        assert_eq!(picks.len(), 3);
        for pick in &picks {
            assert_eq!(pick.owner, 2);
            assert!(!pick.acquired);
            assert_eq!(pick.original_owner_name, None);
        }
        let years: Vec<i32> = picks.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![2026, 2027, 2028]);
    }

    #[test]
    fn test_acquired_pick_keeps_own() {
        let events = vec![TradeEvent::new(2026, 1, 1, 2).with_previous_owner(1)];
        let ledger = build_ledger(&[1, 2, 3], &events, 1, 2026);
        let picks = extract_team_picks(&ledger, 2, &owner_names());

        let from_a = picks
            .iter()
            .find(|p| p.year == 2026 && p.original_owner_name.as_deref() == Some("TeamA"));
        assert!(from_a.is_some_and(|p| p.acquired));
        assert!(picks.iter().any(|p| p.year == 2026 && p.round == 1 && !p.acquired));
    }

    #[test]
    fn test_traded_away_pick_disappears() {
        let events = vec![TradeEvent::new(2026, 1, 2, 3).with_previous_owner(2)];
        let ledger = build_ledger(&[1, 2, 3], &events, 1, 2026);
        let picks = extract_team_picks(&ledger, 2, &owner_names());

        assert!(!picks.iter().any(|p| p.year == 2026 && !p.acquired));
        assert_eq!(picks.len(), 2);
    }

    #[test]
    fn test_two_hop_shows_original_not_intermediate() {
        let events = vec![TradeEvent::new(2027, 2, 1, 2), TradeEvent::new(2027, 2, 1, 3)];
        let ledger = build_ledger(&[1, 2, 3], &events, 2, 2026);

        let picks_c = extract_team_picks(&ledger, 3, &owner_names());
        let hop = picks_c.iter().find(|p| p.year == 2027 && p.round == 2 && p.acquired);
        assert_eq!(hop.map(|p| p.original_owner), Some(1));
        assert_eq!(hop.and_then(|p| p.original_owner_name.clone()), Some("TeamA".to_string()));

        let picks_b = extract_team_picks(&ledger, 2, &owner_names());
        assert!(!picks_b.iter().any(|p| p.acquired));
    }

    #[test]
    fn test_unknown_owner_gets_placeholder() {
        let events = vec![TradeEvent::new(2026, 1, 9, 2)];
        let ledger = build_ledger(&[2, 9], &events, 1, 2026);
        let picks = extract_team_picks(&ledger, 2, &owner_names());

        let acquired = picks.iter().find(|p| p.acquired);
        assert_eq!(
            acquired.and_then(|p| p.original_owner_name.clone()),
            Some("Team 9".to_string())
        );
    }

    #[test]
    fn test_output_sorted_by_year_then_round() {
        let events = vec![TradeEvent::new(2028, 1, 1, 2), TradeEvent::new(2026, 3, 3, 2)];
        let ledger = build_ledger(&[1, 2, 3], &events, 3, 2026);
        let picks = extract_team_picks(&ledger, 2, &owner_names());

        let order: Vec<(i32, u32)> = picks.iter().map(|p| (p.year, p.round)).collect();
        let mut sorted = order.clone();
        sorted.sort();
        assert_eq!(order, sorted);
    }

    #[test]
    fn test_reseed_and_replay_matches() {
        let teams = [1, 2, 3, 4];
        let events = vec![
            TradeEvent::new(2026, 1, 1, 2),
            TradeEvent::new(2026, 1, 1, 3).with_previous_owner(2),
            TradeEvent::new(2027, 2, 4, 1),
            TradeEvent::new(2029, 1, 2, 4),
            TradeEvent::new(2026, 7, 1, 2),
        ];
        let ledger = build_ledger(&teams, &events, 2, 2026);

        let mut keys = Vec::new();
        for team in teams {
            keys.extend(extract_team_picks(&ledger, team, &owner_names()).iter().map(|p| p.key()));
        }

        let mut reseeded = OwnershipLedger::seeded(keys);
        reseeded.replay(&events);
        assert_eq!(reseeded, ledger);
    }

    #[test]
    fn test_resolve_with_zero_subject_is_empty() {
        let events = vec![TradeEvent::new(2026, 1, 1, 2)];
        let picks =
            resolve_team_picks(0, &[1, 2], &events, &owner_names(), &LedgerConfig::default(), 2026);
        assert!(picks.is_empty());
    }

    #[test]
    fn test_resolve_uses_configured_rounds() {
        let config = LedgerConfig::with_rounds(4);
        let picks = resolve_team_picks(1, &[1, 2], &[], &owner_names(), &config, 2026);
        assert_eq!(picks.len(), 12);
    }

    #[test]
    fn test_inventory_summary() {
        let pick = |year, round| ResolvedDraftPick {
            year,
            round,
            owner: 1,
            original_owner: 1,
            original_owner_name: None,
            acquired: false,
        };

        let empty = summarize_pick_inventory(&[], 2026);
        assert_eq!(empty.summary, "No picks");
        assert_eq!(empty.capital, DraftCapital::Low);

        let rich = vec![pick(2026, 1), pick(2026, 1), pick(2027, 1), pick(2027, 2)];
        let summary = summarize_pick_inventory(&rich, 2026);
        assert_eq!(summary.summary, "3 1st, 4 total");
        assert_eq!(summary.capital, DraftCapital::High);

        let thin = vec![pick(2026, 2), pick(2027, 3)];
        let summary = summarize_pick_inventory(&thin, 2026);
        assert_eq!(summary.summary, "2 picks");
        assert_eq!(summary.capital, DraftCapital::Low);

        let deep = vec![pick(2026, 2), pick(2026, 3), pick(2027, 2), pick(2028, 1)];
        assert_eq!(summarize_pick_inventory(&deep, 2026).capital, DraftCapital::Medium);
    }
}
