use crate::position::Position;
use crate::values::{DynastyValue, ValuationMode, ValueTable};
use serde::{Deserialize, Serialize};

/// A player on a league roster, optionally joined to its dynasty value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterPlayer {
    /// Display name (e.g., "Ja'Marr Chase")
    pub name: String,

    /// Roster position
    pub position: Position,

    /// Both dynasty scales, `None` when the value feed has no entry
    #[serde(default)]
    pub valuation: Option<DynastyValue>,
}

impl RosterPlayer {
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self { name: name.into(), position, valuation: None }
    }

    /// Player with an explicit valuation on both scales
    pub fn valued(
        name: impl Into<String>,
        position: Position,
        value_1qb: i64,
        value_2qb: i64,
    ) -> Self {
        let name = name.into();
        let valuation = DynastyValue::new(name.clone(), position.clone(), value_1qb, value_2qb);
        Self { name, position, valuation: Some(valuation) }
    }

    /// Join this player against the current value table
    pub fn with_values_from(mut self, table: &ValueTable) -> Self {
        self.valuation = table.get(&self.name).cloned();
        self
    }

    /// Valuation in the league's mode, 0 when missing
    pub fn value(&self, mode: ValuationMode) -> i64 {
        self.valuation.as_ref().map_or(0, |dv| dv.value(mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_valuation_is_zero() {
        let player = RosterPlayer::new("Practice Squad Guy", Position::WR);
        assert_eq!(player.value(ValuationMode::SingleQb), 0);
        assert_eq!(player.value(ValuationMode::Superflex), 0);
    }

    #[test]
    fn test_join_against_table() {
        let table = ValueTable::from_values(vec![DynastyValue::new(
            "C.J. Stroud",
            Position::QB,
            5000,
            8700,
        )]);

        let player = RosterPlayer::new("CJ Stroud", Position::QB).with_values_from(&table);
        assert_eq!(player.value(ValuationMode::Superflex), 8700);
    }
}
