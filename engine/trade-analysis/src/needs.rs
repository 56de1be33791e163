//! Positional need detection and trade partner matching

use crate::config::NeedThresholds;
use roster_valuation::{Position, PositionalTotals};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

/// One position's slice of a roster's skill-position value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionShare {
    pub position: Position,
    pub share: f64,
    pub value: i64,
}

/// Surplus and deficit positions for one roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionalNeed {
    pub surplus: Vec<PositionShare>,
    pub deficit: Vec<PositionShare>,
}

impl PositionalNeed {
    /// A roster only drives matching when it is long somewhere and short somewhere
    pub fn has_signal(&self) -> bool {
        !self.surplus.is_empty() && !self.deficit.is_empty()
    }
}

/// Another team in the league, summarized for matching
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamProfile {
    pub team_id: u32,
    pub team_name: String,
    pub totals: PositionalTotals,
}

/// A ranked trade partner whose needs mirror the user's
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeTarget {
    pub team_id: u32,
    pub team_name: String,
    pub reason: String,

    /// Position the user is long at (what the user would give)
    pub your_surplus: Position,

    /// Position the partner is long at (what the user would get)
    pub their_surplus: Position,

    pub your_surplus_value: i64,
    pub their_surplus_value: i64,

    /// Higher means a cleaner swap of excess for need
    pub complementarity: f64,
}

/// Classify each skill position as surplus, deficit or neither
///
/// Returns `None` for a roster with no skill-position value.
pub fn compute_need(
    totals: &PositionalTotals,
    thresholds: &NeedThresholds,
) -> Option<PositionalNeed> {
    if totals.total() <= 0 {
        return None;
    }

    let mut need = PositionalNeed { surplus: Vec::new(), deficit: Vec::new() };
    for position in Position::SKILL {
        let share = totals.share(&position);
        let value = totals.get(&position);

        if share > thresholds.surplus_share {
            need.surplus.push(PositionShare { position, share, value });
        } else if share < thresholds.deficit_share {
            need.deficit.push(PositionShare { position, share, value });
        }
    }

    Some(need)
}

/// Rank teams that are long where the user is short and short where the user is long
pub fn find_trade_targets(
    user_totals: &PositionalTotals,
    others: &[TeamProfile],
    thresholds: &NeedThresholds,
) -> Vec<TradeTarget> {
    let Some(user_need) =
        compute_need(user_totals, thresholds).filter(PositionalNeed::has_signal)
    else {
        debug!("User roster has no positional surplus/deficit pair, no trade targets");
        return Vec::new();
    };

    let mut targets: Vec<TradeTarget> =
        others.iter().filter_map(|team| best_pairing(&user_need, team, thresholds)).collect();

    targets.sort_by(|a, b| {
        b.complementarity
            .partial_cmp(&a.complementarity)
            .unwrap_or(Ordering::Equal)
            .then(a.team_id.cmp(&b.team_id))
    });
    targets.truncate(thresholds.max_targets);

    debug!("Found {} trade targets among {} teams", targets.len(), others.len());
    targets
}

fn best_pairing(
    user_need: &PositionalNeed,
    team: &TeamProfile,
    thresholds: &NeedThresholds,
) -> Option<TradeTarget> {
    if team.totals.total() <= 0 {
        return None;
    }

    let mut best: Option<TradeTarget> = None;
    for ours in &user_need.surplus {
        for short in &user_need.deficit {
            let team_surplus_share = team.totals.share(&short.position);
            let team_deficit_share = team.totals.share(&ours.position);

            if team_surplus_share <= thresholds.surplus_share
                || team_deficit_share >= thresholds.deficit_share
            {
                continue;
            }

            let complementarity =
                (ours.share - team_deficit_share) + (team_surplus_share - short.share);
            if best.as_ref().is_some_and(|b| b.complementarity >= complementarity) {
                continue;
            }

            best = Some(TradeTarget {
                team_id: team.team_id,
                team_name: team.team_name.clone(),
                reason: format!("Has {} depth, needs {}", short.position, ours.position),
                your_surplus: ours.position.clone(),
                their_surplus: short.position.clone(),
                your_surplus_value: ours.value,
                their_surplus_value: team.totals.get(&short.position),
                complementarity,
            });
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(qb: i64, rb: i64, wr: i64, te: i64) -> PositionalTotals {
        PositionalTotals { qb, rb, wr, te }
    }

    fn team(team_id: u32, name: &str, totals: PositionalTotals) -> TeamProfile {
        TeamProfile { team_id, team_name: name.to_string(), totals }
    }

    #[test]
    fn test_compute_need_thresholds() {
        let need =
            compute_need(&totals(4000, 1000, 3000, 2000), &NeedThresholds::default()).unwrap();

        let surplus: Vec<&Position> = need.surplus.iter().map(|s| &s.position).collect();
        let deficit: Vec<&Position> = need.deficit.iter().map(|s| &s.position).collect();
        // WR sits exactly at 30% and is not surplus
        assert_eq!(surplus, vec![&Position::QB]);
        assert_eq!(deficit, vec![&Position::RB]);
        assert!(need.has_signal());
    }

    #[test]
    fn test_empty_roster_has_no_need() {
        assert!(compute_need(&PositionalTotals::default(), &NeedThresholds::default()).is_none());
    }

    #[test]
    fn test_balanced_roster_no_targets() {
        let others = vec![team(2, "Mirror", totals(1000, 5000, 2500, 1500))];
        let targets = find_trade_targets(
            &totals(2500, 2500, 2500, 2500),
            &others,
            &NeedThresholds::default(),
        );
        assert!(targets.is_empty());
    }

    #[test]
    fn test_mirror_team_matched() {
        let others = vec![
            team(2, "RB Factory", totals(1000, 5000, 2500, 1500)),
            team(3, "Same Shape", totals(4000, 1000, 3000, 2000)),
            team(4, "Empty", PositionalTotals::default()),
        ];
        let targets = find_trade_targets(
            &totals(4000, 1000, 3000, 2000),
            &others,
            &NeedThresholds::default(),
        );

        assert_eq!(targets.len(), 1);
        let target = &targets[0];
        assert_eq!(target.team_name, "RB Factory");
        assert_eq!(target.your_surplus, Position::QB);
        assert_eq!(target.their_surplus, Position::RB);
        assert_eq!(target.reason, "Has RB depth, needs QB");
        assert_eq!(target.your_surplus_value, 4000);
        assert_eq!(target.their_surplus_value, 5000);
        assert!((target.complementarity - 0.70).abs() < 1e-9);
    }

    #[test]
    fn test_ranked_and_truncated() {
        let others = vec![
            team(2, "Weak", totals(1400, 3500, 2600, 2500)),
            team(3, "Strong", totals(500, 6000, 2000, 1500)),
            team(4, "Middle", totals(1000, 5000, 2500, 1500)),
            team(5, "Also Middle", totals(1000, 5000, 2500, 1500)),
        ];
        let targets = find_trade_targets(
            &totals(4000, 1000, 3000, 2000),
            &others,
            &NeedThresholds::default(),
        );

        let names: Vec<&str> = targets.iter().map(|t| t.team_name.as_str()).collect();
        assert_eq!(names, vec!["Strong", "Middle", "Also Middle"]);
    }

    #[test]
    fn test_best_pairing_per_team() {
        // User is long QB and WR, short TE and RB
        let user = totals(3500, 500, 5000, 1000);
        let others = vec![team(2, "Deep Tight Ends", totals(500, 3500, 1000, 5000))];
        let targets = find_trade_targets(&user, &others, &NeedThresholds::default());

        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].your_surplus, Position::WR);
        assert_eq!(targets[0].their_surplus, Position::TE);
    }
}
