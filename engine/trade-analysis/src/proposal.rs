//! Concrete 1-for-1 trade proposals

use crate::config::ProposalConfig;
use crate::message::{draft_message, MessageRequest, TradeMessageWriter};
use crate::needs::TradeTarget;
use roster_valuation::{Position, RosterPlayer, ValuationMode};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Typical age used for an empty side
const DEFAULT_AGE: f64 = 26.0;

/// Impact scores are clamped to this magnitude
const MAX_IMPACT: i32 = 100;

/// Impact above which the rationale calls it out
const NOTABLE_IMPACT: i32 = 30;

/// A player on either side of a proposal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalPlayer {
    pub name: String,
    pub position: Position,
    pub value: i64,
}

/// How a proposal looks from the proposing side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalFairness {
    #[serde(rename = "Big win")]
    BigWin,
    #[serde(rename = "Slight win")]
    SlightWin,
    Fair,
    Overpay,
}

impl ProposalFairness {
    /// Label a value delta relative to what is given up
    ///
    /// Thresholds are integer tenths and twentieths of the given value.
    pub fn from_delta(delta: i64, given: i64) -> Self {
        if delta > given / 10 {
            ProposalFairness::BigWin
        } else if delta > given / 20 {
            ProposalFairness::SlightWin
        } else if delta < -(given / 10) {
            ProposalFairness::Overpay
        } else {
            ProposalFairness::Fair
        }
    }

    pub fn is_win(&self) -> bool {
        matches!(self, ProposalFairness::BigWin | ProposalFairness::SlightWin)
    }
}

impl fmt::Display for ProposalFairness {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProposalFairness::BigWin => write!(f, "Big win"),
            ProposalFairness::SlightWin => write!(f, "Slight win"),
            ProposalFairness::Fair => write!(f, "Fair"),
            ProposalFairness::Overpay => write!(f, "Overpay"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// High when receiving more than double, medium when overpaying by 20%
    pub fn assess(given: i64, received: i64) -> Self {
        if received > given * 2 {
            RiskLevel::High
        } else if given as f64 > received as f64 * 1.2 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

/// A proposed trade with a target team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeProposal {
    pub target_team_name: String,
    pub your_offer: Vec<ProposalPlayer>,
    pub their_return: Vec<ProposalPlayer>,

    /// Received value minus given value
    pub value_delta: i64,
    pub fairness: ProposalFairness,
    pub risk_level: RiskLevel,

    /// -100..=100, positive when the return helps this season
    pub win_now_impact: i32,

    /// -100..=100, positive when the return adds long-term value
    pub future_impact: i32,

    pub rationale: String,
    pub draft_message: String,
}

impl TradeProposal {
    pub fn given_value(&self) -> i64 {
        total_value(&self.your_offer)
    }

    pub fn received_value(&self) -> i64 {
        total_value(&self.their_return)
    }
}

/// Builds balanced proposals from two rosters
pub struct ProposalBuilder {
    config: ProposalConfig,
    writer: Option<Box<dyn TradeMessageWriter>>,
}

impl ProposalBuilder {
    pub fn new(config: ProposalConfig) -> Self {
        Self { config, writer: None }
    }

    /// Use `writer` for draft messages instead of the fixed template
    pub fn with_message_writer(mut self, writer: Box<dyn TradeMessageWriter>) -> Self {
        self.writer = Some(writer);
        self
    }

    /// Build a proposal trading from `user_surplus` for `target_surplus`
    ///
    /// A `None` position widens the candidate pool to the whole roster.
    /// Returns `None` when either side has no valued candidate.
    pub fn build(
        &self,
        user_roster: &[RosterPlayer],
        target_roster: &[RosterPlayer],
        target_team_name: &str,
        user_surplus: Option<&Position>,
        target_surplus: Option<&Position>,
        mode: ValuationMode,
    ) -> Option<TradeProposal> {
        let yours = surplus_candidates(user_roster, user_surplus, mode);
        let theirs = surplus_candidates(target_roster, target_surplus, mode);

        let Some((offer, ask)) = balanced_pairing(&yours, &theirs, self.config.value_tolerance)
        else {
            debug!(
                "No proposal with {}: {} candidates offered, {} requested",
                target_team_name,
                yours.len(),
                theirs.len()
            );
            return None;
        };

        let your_offer = vec![offer];
        let their_return = vec![ask];
        let given = total_value(&your_offer);
        let received = total_value(&their_return);
        let value_delta = received - given;

        let mut proposal = TradeProposal {
            target_team_name: target_team_name.to_string(),
            win_now_impact: win_now_impact(&your_offer, &their_return),
            future_impact: future_impact(value_delta),
            fairness: ProposalFairness::from_delta(value_delta, given),
            risk_level: RiskLevel::assess(given, received),
            your_offer,
            their_return,
            value_delta,
            rationale: String::new(),
            draft_message: String::new(),
        };
        proposal.rationale = rationale(&proposal, user_surplus, target_surplus);

        let request = MessageRequest::new(&proposal, user_surplus, target_surplus);
        let message = draft_message(self.writer.as_deref(), &request);
        proposal.draft_message = message;

        debug!(
            "Proposal with {}: delta {} ({}), risk {}",
            proposal.target_team_name, proposal.value_delta, proposal.fairness, proposal.risk_level
        );
        Some(proposal)
    }

    /// Build a proposal for a matched trade target
    pub fn build_for_target(
        &self,
        target: &TradeTarget,
        user_roster: &[RosterPlayer],
        target_roster: &[RosterPlayer],
        mode: ValuationMode,
    ) -> Option<TradeProposal> {
        self.build(
            user_roster,
            target_roster,
            &target.team_name,
            Some(&target.your_surplus),
            Some(&target.their_surplus),
            mode,
        )
    }
}

impl Default for ProposalBuilder {
    fn default() -> Self {
        Self::new(ProposalConfig::default())
    }
}

/// Valued players at `position` (any position when `None`), most valuable first
pub fn surplus_candidates(
    roster: &[RosterPlayer],
    position: Option<&Position>,
    mode: ValuationMode,
) -> Vec<ProposalPlayer> {
    let mut candidates: Vec<ProposalPlayer> = roster
        .iter()
        .filter(|player| position.map_or(true, |pos| &player.position == pos))
        .filter_map(|player| {
            let value = player.value(mode);
            (value > 0).then(|| ProposalPlayer {
                name: player.name.clone(),
                position: player.position.clone(),
                value,
            })
        })
        .collect();

    candidates.sort_by(|a, b| b.value.cmp(&a.value));
    candidates
}

/// Pair the user's best candidate with the closest-valued target candidate
///
/// When even the closest match is outside `tolerance` of the pair's average
/// value, both top candidates are paired anyway.
pub fn balanced_pairing(
    yours: &[ProposalPlayer],
    theirs: &[ProposalPlayer],
    tolerance: f64,
) -> Option<(ProposalPlayer, ProposalPlayer)> {
    let offer = yours.first()?;
    let top = theirs.first()?;

    let mut closest = top;
    let mut best_diff = (offer.value - top.value).abs();
    for candidate in theirs {
        let diff = (offer.value - candidate.value).abs();
        if diff < best_diff {
            best_diff = diff;
            closest = candidate;
        }
    }

    let average = (offer.value + closest.value) / 2;
    if average > 0 && best_diff as f64 / average as f64 <= tolerance {
        Some((offer.clone(), closest.clone()))
    } else {
        Some((offer.clone(), top.clone()))
    }
}

fn total_value(players: &[ProposalPlayer]) -> i64 {
    players.iter().map(|p| p.value).sum()
}

fn average_age(players: &[ProposalPlayer]) -> f64 {
    if players.is_empty() {
        return DEFAULT_AGE;
    }
    players.iter().map(|p| p.position.typical_age()).sum::<f64>() / players.len() as f64
}

/// Older return than offer helps now; truncated tenths of a year
fn win_now_impact(given: &[ProposalPlayer], received: &[ProposalPlayer]) -> i32 {
    let age_diff = ((average_age(received) - average_age(given)) * 10.0) as i32;
    age_diff.clamp(-MAX_IMPACT, MAX_IMPACT)
}

fn future_impact(value_delta: i64) -> i32 {
    (value_delta / 50).clamp(-(MAX_IMPACT as i64), MAX_IMPACT as i64) as i32
}

fn rationale(
    proposal: &TradeProposal,
    user_surplus: Option<&Position>,
    target_surplus: Option<&Position>,
) -> String {
    let mut parts = Vec::new();

    if let (Some(ours), Some(theirs)) = (user_surplus, target_surplus) {
        parts.push(format!("Trade your {ours} depth for their {theirs} upgrade"));
    }

    if proposal.fairness.is_win() {
        parts.push(format!("Value advantage: +{} ({})", proposal.value_delta, proposal.fairness));
    }

    if proposal.win_now_impact > NOTABLE_IMPACT {
        parts.push("Boosts playoff chances this year".to_string());
    } else if proposal.future_impact > NOTABLE_IMPACT {
        parts.push("Builds long-term value".to_string());
    }

    if parts.is_empty() {
        return "Addresses positional needs".to_string();
    }
    parts.join(". ")
}
