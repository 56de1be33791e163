//! Configuration for pick ledger construction

use serde::{Deserialize, Serialize};

/// Default number of rookie draft rounds when the league does not say
pub const DEFAULT_ROUNDS_PER_DRAFT: u32 = 3;

/// Default number of future drafts seeded for every team
pub const DEFAULT_WINDOW_YEARS: u32 = 3;

/// Pick ledger configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Rounds in each rookie draft
    pub rounds_per_draft: u32,

    /// Number of drafts seeded starting at the window start year
    pub window_years: u32,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self { rounds_per_draft: DEFAULT_ROUNDS_PER_DRAFT, window_years: DEFAULT_WINDOW_YEARS }
    }
}

impl LedgerConfig {
    /// Configuration for a league with a known number of draft rounds
    pub fn with_rounds(rounds_per_draft: u32) -> Self {
        Self { rounds_per_draft, ..Default::default() }
    }

    /// Load overrides from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(rounds) = std::env::var("DYNASTY_ROUNDS_PER_DRAFT") {
            config.rounds_per_draft = rounds.parse().unwrap_or(DEFAULT_ROUNDS_PER_DRAFT);
        }

        config
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.rounds_per_draft == 0 {
            return Err("rounds_per_draft must be greater than 0".to_string());
        }

        if self.window_years == 0 {
            return Err("window_years must be greater than 0".to_string());
        }

        Ok(())
    }
}
