use std::fmt;

use serde::Serialize;

pub type TeamName = String;

/// Running win/loss record of a single team
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamRecord {
    pub name: TeamName,
    pub wins: u32,
    pub losses: u32,
}

impl TeamRecord {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            wins: 0,
            losses: 0,
        }
    }

    pub fn decided_matches(&self) -> u32 {
        self.wins + self.losses
    }
}

impl fmt::Display for TeamRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}-{}", self.name, self.wins, self.losses)
    }
}

/// Advisory condition raised for a record that was dropped from the tally
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Winner field present but not an integer
    MalformedWinner { match_id: String, raw: String },
    /// Winner field is an integer other than 1 or 2
    UnexpectedWinner { match_id: String, value: i64 },
}

impl Diagnostic {
    pub fn match_id(&self) -> &str {
        match self {
            Diagnostic::MalformedWinner { match_id, .. } => match_id,
            Diagnostic::UnexpectedWinner { match_id, .. } => match_id,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MalformedWinner { match_id, raw } => {
                write!(f, "Skipping match {} due to invalid winner field: {}", match_id, raw)
            }
            Diagnostic::UnexpectedWinner { match_id, value } => {
                write!(f, "Unexpected winner value '{}' for match {}", value, match_id)
            }
        }
    }
}

/// Why a record was silently left out of the tally
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Unfinished,
    NoWinner,
    OpponentCount(usize),
}

/// What happened to a single record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Counted,
    Skipped(SkipReason),
    Rejected(Diagnostic),
}
