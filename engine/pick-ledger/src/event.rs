//! Traded-pick events as delivered by the league feed

use crate::ledger::{PickKey, TeamId};
use serde::{Deserialize, Deserializer, Serialize};

/// One ownership change reported by the draft-pick trade feed
///
/// Every field is optional because the feed is not fully reliable; `0` is
/// treated the same as a missing value. The raw feed sends numbers either as
/// JSON numbers or as strings (`"season": "2026"`), both are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeEvent {
    #[serde(default, deserialize_with = "lenient_number")]
    pub season: Option<i32>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub round: Option<u32>,

    /// Team whose slot this pick is (feed field `roster_id`)
    #[serde(default, alias = "roster_id", deserialize_with = "lenient_number")]
    pub original_owner: Option<TeamId>,

    /// Team holding the pick after this trade (feed field `owner_id`)
    #[serde(default, alias = "owner_id", deserialize_with = "lenient_number")]
    pub new_owner: Option<TeamId>,

    /// Holder before this trade, as claimed by the feed
    #[serde(default, alias = "previous_owner_id", deserialize_with = "lenient_number")]
    pub previous_owner: Option<TeamId>,
}

impl TradeEvent {
    /// Event moving `season`/`round` slot of `original_owner` to `new_owner`
    pub fn new(season: i32, round: u32, original_owner: TeamId, new_owner: TeamId) -> Self {
        Self {
            season: Some(season),
            round: Some(round),
            original_owner: Some(original_owner),
            new_owner: Some(new_owner),
            previous_owner: None,
        }
    }

    pub fn with_previous_owner(mut self, previous_owner: TeamId) -> Self {
        self.previous_owner = Some(previous_owner);
        self
    }

    /// Season year, `None` when missing or zero
    pub fn season(&self) -> Option<i32> {
        self.season.filter(|s| *s > 0)
    }

    /// The pick this event refers to, `None` for malformed events
    pub fn key(&self) -> Option<PickKey> {
        let season = self.season()?;
        let round = nonzero(self.round)?;
        let original_owner = nonzero(self.original_owner)?;
        Some(PickKey { season, round, original_owner })
    }

    /// New holder, `None` means the pick is unassigned
    pub fn new_owner(&self) -> Option<TeamId> {
        nonzero(self.new_owner)
    }

    pub fn previous_owner(&self) -> Option<TeamId> {
        nonzero(self.previous_owner)
    }
}

fn nonzero(value: Option<u32>) -> Option<u32> {
    value.filter(|v| *v > 0)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

/// Accept `2026`, `2026.0`, `"2026"` or `null`; anything unparseable is `None`
fn lenient_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    let raw: Option<NumberOrString> = Option::deserialize(deserializer)?;
    let number = match raw {
        Some(NumberOrString::Number(n)) if n.is_finite() => Some(n as i64),
        Some(NumberOrString::Text(text)) => text.trim().parse::<i64>().ok(),
        _ => None,
    };
    Ok(number.and_then(|n| T::try_from(n).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_feed_record() {
        let json = r#"{"season":"2026","round":1,"roster_id":3,"owner_id":7,"previous_owner_id":3}"#;
        let event: TradeEvent = serde_json::from_str(json).unwrap();

        assert_eq!(event.key(), Some(PickKey { season: 2026, round: 1, original_owner: 3 }));
        assert_eq!(event.new_owner(), Some(7));
        assert_eq!(event.previous_owner(), Some(3));
    }

    #[test]
    fn test_deserialize_missing_and_garbage_fields() {
        let json = r#"{"season":"abc","round":2.0,"roster_id":null}"#;
        let event: TradeEvent = serde_json::from_str(json).unwrap();

        assert_eq!(event.season, None);
        assert_eq!(event.round, Some(2));
        assert_eq!(event.key(), None);
        assert_eq!(event.new_owner(), None);
    }

    #[test]
    fn test_zero_identifiers_are_missing() {
        let event = TradeEvent::new(2026, 1, 0, 4);
        assert_eq!(event.key(), None);

        let event = TradeEvent::new(2026, 1, 2, 0);
        assert!(event.key().is_some());
        assert_eq!(event.new_owner(), None);
    }

    #[test]
    fn test_negative_numbers_rejected_for_team_ids() {
        let json = r#"{"season":2027,"round":1,"roster_id":-4,"owner_id":2}"#;
        let event: TradeEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.original_owner, None);
    }
}
