//! Projected draft slots from current standings

use crate::ledger::TeamId;
use crate::picks::ResolvedDraftPick;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A team's place in the standings (rank 1 = best record)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub team_id: TeamId,
    pub team_name: String,
    pub rank: u32,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
}

impl TeamStanding {
    pub fn record(&self) -> String {
        format!("{}-{}", self.wins, self.losses)
    }
}

/// A held pick with its estimated draft position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectedDraftPick {
    #[serde(flatten)]
    pub pick: ResolvedDraftPick,

    /// Position within the round (1 = first pick of the round)
    pub slot_in_round: u32,

    /// Overall pick number (1.01 = 1, 2.01 = league size + 1)
    pub overall_pick: u32,

    /// Standing rank of the team whose record decides this slot
    pub standing_rank: u32,

    /// Win-loss record of that team, e.g. "3-11"
    pub record: String,
}

impl ProjectedDraftPick {
    /// Conventional "round.slot" label, e.g. "1.03"
    pub fn label(&self) -> String {
        format!("{}.{:02}", self.pick.round, self.slot_in_round)
    }
}

/// Project draft slots for every pick in `target_year`
///
/// Draft order follows the record of the team the slot belongs to, so the
/// original owner's standing controls the projection, falling back to the
/// current holder when the original owner is not in the standings. Worst
/// record picks first. Output is ascending by overall pick.
pub fn project_picks(
    resolved_picks: &[ResolvedDraftPick],
    standings: &[TeamStanding],
    target_year: i32,
) -> Vec<ProjectedDraftPick> {
    let league_size = standings.len() as u32;
    if league_size == 0 {
        debug!("No standings available, skipping pick projection");
        return Vec::new();
    }

    let mut projected: Vec<ProjectedDraftPick> = resolved_picks
        .iter()
        .filter(|pick| pick.year == target_year)
        .filter_map(|pick| {
            let Some(standing) = controlling_standing(pick, standings) else {
                debug!("No standing for pick {} round {}, not projected", pick.year, pick.round);
                return None;
            };

            let rank = standing.rank.clamp(1, league_size);
            let slot_in_round = league_size - rank + 1;
            let overall_pick = (pick.round.saturating_sub(1)) * league_size + slot_in_round;

            Some(ProjectedDraftPick {
                pick: pick.clone(),
                slot_in_round,
                overall_pick,
                standing_rank: standing.rank,
                record: standing.record(),
            })
        })
        .collect();

    projected.sort_by_key(|p| (p.overall_pick, p.pick.original_owner));
    projected
}

fn controlling_standing<'a>(
    pick: &ResolvedDraftPick,
    standings: &'a [TeamStanding],
) -> Option<&'a TeamStanding> {
    standings
        .iter()
        .find(|s| s.team_id == pick.original_owner)
        .or_else(|| {
            let name = pick.original_owner_name.as_deref()?;
            standings.iter().find(|s| s.team_name == name)
        })
        .or_else(|| standings.iter().find(|s| s.team_id == pick.owner))
}
