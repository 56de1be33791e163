//! Full analysis of one team in a league fixture

use crate::fixture::LeagueFixture;
use anyhow::{Context, Result};
use pick_ledger::{
    project_picks, resolve_team_picks, summarize_pick_inventory, LedgerConfig, PickInventorySummary,
    ProjectedDraftPick, ResolvedDraftPick, TeamId,
};
use roster_valuation::{aggregate, CompletedTrade, PositionalTotals};
use serde::Serialize;
use std::fmt;
use trade_analysis::{
    find_trade_targets, AnalysisConfig, FairnessClassifier, ProposalBuilder, TeamProfile,
    TradeFairness, TradeProposal, TradeTarget,
};
use trade_retrospective::{RetrospectiveTracker, TradeRetrospective};
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct ReportSettings {
    pub ledger: LedgerConfig,
    pub analysis: AnalysisConfig,
}

/// One completed trade with its fairness label and longitudinal result
#[derive(Debug, Clone, Serialize)]
pub struct TradeReview {
    pub trade: CompletedTrade,
    pub fairness: TradeFairness,
    pub retrospective: Option<TradeRetrospective>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeagueReport {
    pub team_id: TeamId,
    pub team_name: String,
    pub totals: PositionalTotals,
    pub picks: Vec<ResolvedDraftPick>,
    pub projected: Vec<ProjectedDraftPick>,
    pub inventory: PickInventorySummary,
    pub targets: Vec<TradeTarget>,
    pub proposals: Vec<TradeProposal>,
    pub trades: Vec<TradeReview>,
}

/// Run every analysis for `subject` over the fixture
pub async fn build_report(
    fixture: &LeagueFixture,
    subject: TeamId,
    settings: &ReportSettings,
    tracker: &RetrospectiveTracker,
) -> Result<LeagueReport> {
    let team = fixture
        .team(subject)
        .with_context(|| format!("team {subject} is not in the fixture"))?;
    let mode = fixture.valuation_mode;
    let table = fixture.value_table();

    let user_roster = team.valued_roster(&table);
    let totals = aggregate(&user_roster, mode);

    let picks = resolve_team_picks(
        subject,
        &fixture.team_ids(),
        &fixture.traded_picks,
        &fixture.owner_names(),
        &settings.ledger,
        fixture.season,
    );
    let projected = project_picks(&picks, &fixture.standings, fixture.season);
    let inventory = summarize_pick_inventory(&picks, fixture.season);

    let others: Vec<TeamProfile> = fixture
        .teams
        .iter()
        .filter(|t| t.team_id != subject)
        .map(|t| TeamProfile {
            team_id: t.team_id,
            team_name: t.name.clone(),
            totals: aggregate(&t.valued_roster(&table), mode),
        })
        .collect();
    let targets = find_trade_targets(&totals, &others, &settings.analysis.needs);

    let builder = ProposalBuilder::new(settings.analysis.proposal.clone());
    let proposals: Vec<TradeProposal> = targets
        .iter()
        .filter_map(|target| {
            let target_roster = fixture.team(target.team_id)?.valued_roster(&table);
            builder.build_for_target(target, &user_roster, &target_roster, mode)
        })
        .collect();

    let classifier = FairnessClassifier::new(settings.analysis.fairness.clone());
    let retrospectives = tracker.track_all(&fixture.trades, &table, mode).await;
    let trades = fixture
        .trades
        .iter()
        .zip(retrospectives)
        .map(|(trade, retrospective)| TradeReview {
            trade: trade.clone(),
            fairness: classifier.classify_trade(trade),
            retrospective,
        })
        .collect();

    info!(
        "Report for {}: {} picks, {} targets, {} proposals",
        team.name,
        picks.len(),
        targets.len(),
        proposals.len()
    );

    Ok(LeagueReport {
        team_id: subject,
        team_name: team.name.clone(),
        totals,
        picks,
        projected,
        inventory,
        targets,
        proposals,
        trades,
    })
}

impl fmt::Display for LeagueReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "== {} ==", self.team_name)?;
        let t = &self.totals;
        writeln!(f, "Positional value: QB {} | RB {} | WR {} | TE {}", t.qb, t.rb, t.wr, t.te)?;

        writeln!(
            f,
            "\nDraft picks ({}, {:?} capital):",
            self.inventory.summary, self.inventory.capital
        )?;
        for pick in &self.picks {
            match &pick.original_owner_name {
                Some(from) => writeln!(f, "  {} round {} (from {})", pick.year, pick.round, from)?,
                None => writeln!(f, "  {} round {}", pick.year, pick.round)?,
            }
        }

        if !self.projected.is_empty() {
            writeln!(f, "\nProjected slots:")?;
            for pick in &self.projected {
                writeln!(
                    f,
                    "  {} (#{} overall, {} record)",
                    pick.label(),
                    pick.overall_pick,
                    pick.record
                )?;
            }
        }

        writeln!(f, "\nTrade targets:")?;
        if self.targets.is_empty() {
            writeln!(f, "  No positional trade signal")?;
        }
        for target in &self.targets {
            writeln!(
                f,
                "  {}: {} (score {:.2})",
                target.team_name, target.reason, target.complementarity
            )?;
        }

        for proposal in &self.proposals {
            let offer: Vec<&str> = proposal.your_offer.iter().map(|p| p.name.as_str()).collect();
            let ask: Vec<&str> = proposal.their_return.iter().map(|p| p.name.as_str()).collect();
            writeln!(
                f,
                "\nProposal to {}: give {} for {} [{} {:+}, risk {}]",
                proposal.target_team_name,
                offer.join(", "),
                ask.join(", "),
                proposal.fairness,
                proposal.value_delta,
                proposal.risk_level
            )?;
            writeln!(f, "  {}", proposal.rationale)?;
            writeln!(
                f,
                "  Win-now {:+} / Future {:+}",
                proposal.win_now_impact, proposal.future_impact
            )?;
        }

        writeln!(f, "\nLeague trades:")?;
        for review in &self.trades {
            let badge = match review.fairness.display_badge.as_str() {
                "" => "unvalued",
                badge => badge,
            };
            write!(f, "  {} / {}: {}", review.trade.team1, review.trade.team2, badge)?;
            match &review.retrospective {
                Some(retro) => writeln!(f, " | since: {} ({})", retro.verdict, retro.winner_gain)?,
                None => writeln!(f, " | since: TBD")?,
            }
        }

        Ok(())
    }
}
