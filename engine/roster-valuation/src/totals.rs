use crate::player::RosterPlayer;
use crate::position::Position;
use crate::values::ValuationMode;
use serde::{Deserialize, Serialize};

/// Sum of dynasty value per skill position for one roster
///
/// Derived data: recomputed from the roster whenever it is needed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionalTotals {
    pub qb: i64,
    pub rb: i64,
    pub wr: i64,
    pub te: i64,
}

impl PositionalTotals {
    /// Combined skill-position value
    pub fn total(&self) -> i64 {
        self.qb + self.rb + self.wr + self.te
    }

    pub fn get(&self, position: &Position) -> i64 {
        match position {
            Position::QB => self.qb,
            Position::RB => self.rb,
            Position::WR => self.wr,
            Position::TE => self.te,
            Position::Other(_) => 0,
        }
    }

    /// Fraction of the combined value held at `position` (0.0 when empty)
    pub fn share(&self, position: &Position) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.get(position) as f64 / total as f64
    }

    fn add(&mut self, position: &Position, value: i64) {
        match position {
            Position::QB => self.qb += value,
            Position::RB => self.rb += value,
            Position::WR => self.wr += value,
            Position::TE => self.te += value,
            Position::Other(_) => {}
        }
    }
}

/// Aggregate a roster into positional totals
pub fn aggregate(roster: &[RosterPlayer], mode: ValuationMode) -> PositionalTotals {
    let mut totals = PositionalTotals::default();
    for player in roster {
        let value = player.value(mode);
        if value <= 0 {
            continue;
        }
        totals.add(&player.position, value);
    }
    totals
}
