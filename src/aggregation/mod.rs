pub mod progress;
pub mod ranking;
pub mod tally;
pub mod types;

use serde::Serialize;

use crate::domain::MatchRecord;

pub use progress::{EliminationProgress, ProgressStatus, ProgressTracker, TeamProgress};
pub use ranking::Standings;
pub use tally::Tally;
pub use types::{Diagnostic, Outcome, SkipReason, TeamRecord};

/// Result of one aggregation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Aggregation {
    pub standings: Standings,
    pub diagnostics: Vec<Diagnostic>,
    pub counted: usize,
    pub skipped: usize,
}

/// Tally and rank a batch of match records.
///
/// Pure: each call owns a fresh [`Tally`]. Malformed records never abort the
/// run; they are dropped and reported through `diagnostics`.
pub fn aggregate<'a, I>(matches: I) -> Aggregation
where
    I: IntoIterator<Item = &'a MatchRecord>,
{
    let mut tally = Tally::new();
    let mut aggregation = Aggregation::default();

    for record in matches {
        match tally.record(record) {
            Outcome::Counted => aggregation.counted += 1,
            Outcome::Skipped(_) => aggregation.skipped += 1,
            Outcome::Rejected(diagnostic) => aggregation.diagnostics.push(diagnostic),
        }
    }

    aggregation.standings = tally.into_standings();
    aggregation
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse_matches(value: serde_json::Value) -> Vec<MatchRecord> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_input() {
        let aggregation = aggregate(&Vec::<MatchRecord>::new());

        assert!(aggregation.standings.is_empty());
        assert!(aggregation.diagnostics.is_empty());
        assert_eq!(aggregation.counted, 0);
    }

    #[test]
    fn test_counts_and_diagnostics() {
        let matches = parse_matches(json!([
            { "match2id": "M1", "match2opponents": [{ "name": "A" }, { "name": "B" }], "winner": "1", "finished": 1 },
            { "match2id": "M2", "match2opponents": [{ "name": "A" }, { "name": "C" }], "winner": "", "finished": 0 },
            { "match2id": "M3", "match2opponents": [{ "name": "B" }, { "name": "C" }], "winner": "abc", "finished": 1 },
        ]));

        let aggregation = aggregate(&matches);

        assert_eq!(aggregation.counted, 1);
        assert_eq!(aggregation.skipped, 1);
        assert_eq!(aggregation.diagnostics.len(), 1);
        assert_eq!(aggregation.diagnostics[0].match_id(), "M3");
        assert_eq!(aggregation.standings.names(), vec!["A", "C", "B"]);
    }
}
