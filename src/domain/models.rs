use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fields::{self, WinnerIndicator};

/// Name given to opponents whose name is missing or blank
pub const UNKNOWN_TEAM: &str = "Unknown";

// --- API Response Structures ---

/// Raw match API response from LiquipediaDB
///
/// Decoding never fails once the body is valid JSON: a `result` that is not an
/// array yields no records, and each record is read on its own.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(from = "Value")]
pub struct MatchPayload {
    pub result: Option<Vec<MatchRecord>>,
}

impl From<Value> for MatchPayload {
    fn from(value: Value) -> Self {
        let result = match value {
            Value::Object(mut map) => match map.remove("result") {
                Some(Value::Array(records)) => Some(records.into_iter().map(MatchRecord::from).collect()),
                _ => None,
            },
            _ => None,
        };
        Self { result }
    }
}

impl MatchPayload {
    pub fn into_matches(self) -> Vec<MatchRecord> {
        self.result.unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.result.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Raw match record from LiquipediaDB
///
/// Fields are kept close to the wire shape; the accessors below apply the
/// defaulting rules (missing name, missing flag, missing winner). Values of an
/// unexpected type fall back to those defaults instead of failing the record.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(from = "Value")]
pub struct MatchRecord {
    #[serde(rename = "match2id")]
    pub match_id: Option<String>,
    #[serde(rename = "match2opponents")]
    pub opponents: Option<Vec<Opponent>>,
    pub winner: Option<Value>,
    pub finished: Option<Value>,
}

impl From<Value> for MatchRecord {
    fn from(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return Self::default();
        };

        let opponents = match map.remove("match2opponents") {
            Some(Value::Array(items)) => Some(items.into_iter().map(Opponent::from).collect()),
            _ => None,
        };

        Self {
            match_id: map.remove("match2id").and_then(scalar_text),
            opponents,
            winner: map.remove("winner").filter(|v| !v.is_null()),
            finished: map.remove("finished").filter(|v| !v.is_null()),
        }
    }
}

impl MatchRecord {
    pub fn id(&self) -> &str {
        self.match_id.as_deref().unwrap_or("")
    }

    pub fn opponents(&self) -> &[Opponent] {
        self.opponents.as_deref().unwrap_or(&[])
    }

    pub fn is_finished(&self) -> bool {
        self.finished.as_ref().is_some_and(fields::is_truthy_flag)
    }

    pub fn winner_indicator(&self) -> WinnerIndicator {
        WinnerIndicator::from_value(self.winner.as_ref())
    }
}

/// One side of a match
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(from = "Value")]
pub struct Opponent {
    pub name: Option<String>,
}

impl From<Value> for Opponent {
    fn from(value: Value) -> Self {
        let name = match value {
            Value::Object(mut map) => map.remove("name").and_then(scalar_text),
            _ => None,
        };
        Self { name }
    }
}

impl Opponent {
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
        }
    }

    /// Team name, or [`UNKNOWN_TEAM`] when absent or blank
    pub fn resolved_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(UNKNOWN_TEAM)
    }
}

// Strings pass through, numbers keep their JSON spelling, anything else is missing
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_use_defaults() {
        let record: MatchRecord = serde_json::from_value(json!({})).unwrap();

        assert_eq!(record.id(), "");
        assert!(record.opponents().is_empty());
        assert!(!record.is_finished());
        assert_eq!(record.winner_indicator(), WinnerIndicator::Absent);
    }

    #[test]
    fn test_null_fields_use_defaults() {
        let record: MatchRecord = serde_json::from_value(json!({
            "match2id": null,
            "match2opponents": null,
            "winner": null,
            "finished": null,
        }))
        .unwrap();

        assert_eq!(record.id(), "");
        assert!(record.opponents().is_empty());
        assert!(!record.is_finished());
        assert_eq!(record.winner_indicator(), WinnerIndicator::Absent);
    }

    #[test]
    fn test_opponent_name_resolution() {
        let opponents: Vec<Opponent> = serde_json::from_value(json!([
            { "name": "Team Spirit", "type": "team", "template": "team spirit" },
            { "type": "team" },
            { "name": null },
            { "name": "   " },
        ]))
        .unwrap();

        let names: Vec<&str> = opponents.iter().map(Opponent::resolved_name).collect();
        assert_eq!(names, vec!["Team Spirit", UNKNOWN_TEAM, UNKNOWN_TEAM, UNKNOWN_TEAM]);
    }

    #[test]
    fn test_payload_without_result_is_empty() {
        let payload: MatchPayload = serde_json::from_value(json!({ "error": [] })).unwrap();
        assert!(payload.is_empty());
        assert!(payload.into_matches().is_empty());
    }

    #[test]
    fn test_odd_field_types_fall_back() {
        let record: MatchRecord = serde_json::from_value(json!({
            "match2id": 42,
            "match2opponents": [
                { "name": 1337, "template": false },
                { "name": ["NAVI"], "type": 7 },
                "TBD",
            ],
            "winner": "1",
            "finished": 1,
        }))
        .unwrap();

        assert_eq!(record.id(), "42");
        let names: Vec<&str> = record.opponents().iter().map(Opponent::resolved_name).collect();
        assert_eq!(names, vec!["1337", UNKNOWN_TEAM, UNKNOWN_TEAM]);
    }

    #[test]
    fn test_one_odd_record_keeps_the_others() {
        let payload: MatchPayload = serde_json::from_value(json!({
            "result": [
                { "match2id": "M1", "match2opponents": [{ "name": "A" }, { "name": "B" }], "winner": "1", "finished": 1 },
                { "match2id": 42, "match2opponents": [{ "name": "C", "template": false }, { "name": 7 }], "winner": "2", "finished": 1 },
                "garbage",
                { "match2id": "M3", "match2opponents": { "name": "D" }, "finished": 1 },
            ]
        }))
        .unwrap();

        let matches = payload.into_matches();
        assert_eq!(matches.len(), 4);
        assert_eq!(matches[0].id(), "M1");
        assert_eq!(matches[0].opponents()[1].resolved_name(), "B");
        assert_eq!(matches[1].id(), "42");
        assert_eq!(matches[1].opponents()[1].resolved_name(), "7");
        assert_eq!(matches[2].id(), "");
        assert!(matches[3].opponents().is_empty());
    }

    #[test]
    fn test_non_array_result_is_empty() {
        let payload: MatchPayload = serde_json::from_value(json!({ "result": { "M1": {} } })).unwrap();
        assert!(payload.is_empty());
    }
}
