use crate::names::normalize_name;
use crate::position::Position;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Which dynasty scale a league reads values from
///
/// Single-QB and superflex leagues price quarterbacks very differently, so the
/// same player has two numbers. A league picks one mode and sticks with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuationMode {
    #[default]
    SingleQb,
    Superflex,
}

/// Dynasty trade value for one player on both scales (0-10000)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynastyValue {
    pub name: String,
    pub position: Position,
    pub value_1qb: i64,
    pub value_2qb: i64,
}

impl DynastyValue {
    pub fn new(
        name: impl Into<String>,
        position: Position,
        value_1qb: i64,
        value_2qb: i64,
    ) -> Self {
        Self { name: name.into(), position, value_1qb, value_2qb }
    }

    /// Value on the scale selected for the league
    pub fn value(&self, mode: ValuationMode) -> i64 {
        match mode {
            ValuationMode::SingleQb => self.value_1qb,
            ValuationMode::Superflex => self.value_2qb,
        }
    }
}

/// Errors that can occur while loading a value table
#[derive(Error, Debug)]
pub enum ValueTableError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Current dynasty values keyed by normalized player name
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValueTable {
    values: HashMap<String, DynastyValue>,
}

impl ValueTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a list of values, later duplicates win
    pub fn from_values(values: impl IntoIterator<Item = DynastyValue>) -> Self {
        let mut table = Self::new();
        for value in values {
            table.insert(value);
        }
        table
    }

    /// Load a JSON array of `DynastyValue` records
    pub async fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ValueTableError> {
        info!("Loading dynasty values from: {:?}", path.as_ref());

        let content = tokio::fs::read_to_string(&path).await?;
        let values: Vec<DynastyValue> = serde_json::from_str(&content)?;
        let table = Self::from_values(values);

        info!("Loaded {} dynasty values", table.len());
        Ok(table)
    }

    pub fn insert(&mut self, value: DynastyValue) {
        self.values.insert(normalize_name(&value.name), value);
    }

    /// Look up a player by display name
    pub fn get(&self, name: &str) -> Option<&DynastyValue> {
        self.values.get(&normalize_name(name))
    }

    /// Value for a display name, 0 when the player is unknown
    pub fn value_of(&self, name: &str, mode: ValuationMode) -> i64 {
        match self.get(name) {
            Some(dv) => dv.value(mode),
            None => {
                debug!("No dynasty value for {}", name);
                0
            }
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
