use serde::{Deserialize, Serialize};
use std::fmt;

/// Roster position as reported by the league feed
///
/// Only the four skill positions carry dynasty value in positional analysis;
/// everything else (K, DEF, IDP slots) is kept as `Other` so that it can be
/// displayed but never aggregated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    Other(String),
}

impl Position {
    /// The closed set of skill positions, in display order
    pub const SKILL: [Position; 4] = [Position::QB, Position::RB, Position::WR, Position::TE];

    /// Parse a feed label; unknown labels are preserved verbatim
    pub fn parse(label: &str) -> Self {
        match label.trim().to_uppercase().as_str() {
            "QB" => Position::QB,
            "RB" => Position::RB,
            "WR" => Position::WR,
            "TE" => Position::TE,
            _ => Position::Other(label.trim().to_string()),
        }
    }

    pub fn is_skill(&self) -> bool {
        !matches!(self, Position::Other(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::Other(label) => label,
        }
    }

    /// Typical age of a fantasy-relevant player at this position
    ///
    /// Used as a stand-in for real ages when judging win-now vs. future value.
    pub fn typical_age(&self) -> f64 {
        match self {
            Position::QB => 28.0,
            Position::RB => 25.0,
            Position::WR => 26.5,
            Position::TE => 27.0,
            Position::Other(_) => 26.0,
        }
    }
}

impl From<String> for Position {
    fn from(label: String) -> Self {
        Position::parse(&label)
    }
}

impl From<Position> for String {
    fn from(position: Position) -> Self {
        position.as_str().to_string()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skill_positions() {
        assert_eq!(Position::parse("qb"), Position::QB);
        assert_eq!(Position::parse(" WR "), Position::WR);
        assert_eq!(Position::parse("K"), Position::Other("K".to_string()));
        assert!(!Position::parse("DEF").is_skill());
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&Position::TE).unwrap();
        assert_eq!(json, "\"TE\"");

        let parsed: Position = serde_json::from_str("\"RB\"").unwrap();
        assert_eq!(parsed, Position::RB);
    }
}
