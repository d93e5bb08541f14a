use std::collections::HashMap;

use super::ranking::Standings;
use super::types::{Diagnostic, Outcome, SkipReason, TeamName, TeamRecord};
use crate::domain::{MatchRecord, WinnerIndicator};

/// Caller-owned win/loss accumulator
///
/// Teams are registered the first time they appear in a finished two-opponent
/// match, before the winner field is validated, so a team whose only match had
/// a broken winner still shows up with a 0-0 record.
#[derive(Debug, Clone, Default)]
pub struct Tally {
    teams: HashMap<TeamName, TeamRecord>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a single record and report what happened to it
    pub fn record(&mut self, record: &MatchRecord) -> Outcome {
        if !record.is_finished() {
            return Outcome::Skipped(SkipReason::Unfinished);
        }

        let winner = match record.winner_indicator() {
            WinnerIndicator::Absent => return Outcome::Skipped(SkipReason::NoWinner),
            WinnerIndicator::Index(index) => Ok(index),
            WinnerIndicator::Malformed(raw) => Err(raw),
        };

        let [first, second] = match record.opponents() {
            [first, second] => [first.resolved_name(), second.resolved_name()],
            other => return Outcome::Skipped(SkipReason::OpponentCount(other.len())),
        };

        self.register(first);
        self.register(second);

        match winner {
            Ok(1) => self.credit(first, second),
            Ok(2) => self.credit(second, first),
            Ok(value) => Outcome::Rejected(Diagnostic::UnexpectedWinner {
                match_id: record.id().to_string(),
                value,
            }),
            Err(raw) => Outcome::Rejected(Diagnostic::MalformedWinner {
                match_id: record.id().to_string(),
                raw,
            }),
        }
    }

    /// Fold another tally into this one
    pub fn merge(&mut self, other: Tally) {
        for (name, theirs) in other.teams {
            let ours = self.register(&name);
            ours.wins += theirs.wins;
            ours.losses += theirs.losses;
        }
    }

    pub fn get(&self, name: &str) -> Option<&TeamRecord> {
        self.teams.get(name)
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn standings(&self) -> Standings {
        Standings::rank(self.teams.values().cloned())
    }

    pub fn into_standings(self) -> Standings {
        Standings::rank(self.teams.into_values())
    }

    fn register(&mut self, name: &str) -> &mut TeamRecord {
        self.teams
            .entry(name.to_string())
            .or_insert_with(|| TeamRecord::new(name))
    }

    fn credit(&mut self, winner: &str, loser: &str) -> Outcome {
        self.register(winner).wins += 1;
        self.register(loser).losses += 1;
        Outcome::Counted
    }
}
