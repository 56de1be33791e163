//! Print a dynasty report for one team of a league fixture
//!
//! Environment:
//! - `LEAGUE_REPORT_FIXTURE`: fixture path (defaults to the bundled sample league)
//! - `LEAGUE_REPORT_TEAM`: team id to analyse (defaults to the first team)
//! - `LEAGUE_REPORT_CONFIG`: optional TOML file with analysis thresholds
//! - `RUST_LOG`: log filter, `info` by default

mod fixture;
mod report;

use anyhow::{Context, Result};
use fixture::LeagueFixture;
use pick_ledger::{LedgerConfig, TeamId};
use report::{build_report, ReportSettings};
use std::sync::Arc;
use trade_analysis::AnalysisConfig;
use trade_retrospective::{LocalSnapshotStore, RetrospectiveConfig, RetrospectiveTracker};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FIXTURE: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/sample_league.json");

fn initialize_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false))
        .init();
}

fn load_settings() -> Result<ReportSettings> {
    let ledger = LedgerConfig::from_env();
    ledger.validate().map_err(anyhow::Error::msg).context("invalid ledger configuration")?;

    let analysis = match std::env::var("LEAGUE_REPORT_CONFIG") {
        Ok(path) => AnalysisConfig::load_from_file(&path)
            .with_context(|| format!("failed to load {path}"))?,
        Err(_) => AnalysisConfig::from_env(),
    };
    analysis.validate().map_err(anyhow::Error::msg).context("invalid analysis configuration")?;

    Ok(ReportSettings { ledger, analysis })
}

#[tokio::main]
async fn main() -> Result<()> {
    initialize_logging();

    let fixture_path =
        std::env::var("LEAGUE_REPORT_FIXTURE").unwrap_or_else(|_| DEFAULT_FIXTURE.to_string());
    let fixture = LeagueFixture::load(&fixture_path).await?;

    let subject: TeamId = match std::env::var("LEAGUE_REPORT_TEAM") {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("LEAGUE_REPORT_TEAM is not a team id: {raw}"))?,
        Err(_) => fixture.default_subject().context("fixture has no teams")?,
    };

    let settings = load_settings()?;

    let retrospective_config = RetrospectiveConfig::from_env();
    let store = LocalSnapshotStore::new(&retrospective_config)?;
    info!("Trade snapshots stored under {}", store.data_dir().display());
    let tracker = RetrospectiveTracker::new(Arc::new(store), retrospective_config);

    let report = build_report(&fixture, subject, &settings, &tracker).await?;
    println!("{report}");

    Ok(())
}
