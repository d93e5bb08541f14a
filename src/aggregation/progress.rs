use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use super::types::TeamName;
use crate::domain::{MatchRecord, UNKNOWN_TEAM, WinnerIndicator};

/// Placeholder Liquipedia uses for an opponent that is not decided yet
pub const TBD_TEAM: &str = "TBD";

/// Where a team stands in a single-elimination bracket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    Pending,
    Advanced,
    Eliminated,
}

impl ProgressStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Advanced => "advanced",
            Self::Eliminated => "eliminated",
        }
    }
}

impl fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Furthest known round of one team
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamProgress {
    pub name: TeamName,
    pub round: String,
    pub status: ProgressStatus,
    #[serde(skip)]
    rank: i64,
}

/// Progress of every team seen in an elimination stage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EliminationProgress {
    pub teams: Vec<TeamProgress>,
    /// Match ids without a `_Rxx-Myyy` suffix; they take no part in the result
    pub unplaced: Vec<String>,
}

impl EliminationProgress {
    pub fn get(&self, name: &str) -> Option<&TeamProgress> {
        self.teams.iter().find(|team| team.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

/// Round and slot decoded from a bracket match id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSlot {
    pub round: u32,
    pub slot: u32,
}

/// Name of the round `depth` steps before the final (0 is the final)
pub fn round_name(depth: usize) -> String {
    match depth {
        0 => "Grand Final".to_string(),
        1 => "Semi Final".to_string(),
        2 => "Quarter Final".to_string(),
        _ => format!("Best of {}", 1u64 << (depth + 1).min(63)),
    }
}

/// Rounds needed to play `match_count` matches, ceil(log2(n + 1))
pub fn round_count(match_count: usize) -> usize {
    (usize::BITS - match_count.leading_zeros()) as usize
}

/// Builds [`EliminationProgress`] from bracket match records
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    round_slot_regex: Regex,
}

impl ProgressTracker {
    pub fn new() -> Result<Self> {
        Ok(Self {
            round_slot_regex: Regex::new(r"_R(\d+)-M(\d+)$").context("Failed to compile round id regex")?,
        })
    }

    /// Decode `<bracketid>_R03-M001` style ids
    pub fn round_slot(&self, match_id: &str) -> Option<RoundSlot> {
        let captures = self.round_slot_regex.captures(match_id)?;
        Some(RoundSlot {
            round: captures.get(1)?.as_str().parse().ok()?,
            slot: captures.get(2)?.as_str().parse().ok()?,
        })
    }

    /// Resolve each team's furthest round.
    ///
    /// The round table is sized from the number of placed two-opponent
    /// matches. A team entry is only replaced by one from a later round, or
    /// by a decided result from the same round.
    pub fn track<'a, I>(&self, matches: I) -> EliminationProgress
    where
        I: IntoIterator<Item = &'a MatchRecord>,
    {
        let mut placed = Vec::new();
        let mut unplaced = Vec::new();

        for record in matches {
            if record.opponents().len() != 2 {
                continue;
            }
            match self.round_slot(record.id()) {
                Some(slot) => placed.push((record, slot.round)),
                None => unplaced.push(record.id().to_string()),
            }
        }

        let rounds = round_count(placed.len());
        let mut teams: HashMap<TeamName, TeamProgress> = HashMap::new();

        for (record, round) in placed {
            let (label, rank) = label_round(round, rounds);
            let [first, second] = [record.opponents()[0].resolved_name(), record.opponents()[1].resolved_name()];

            for name in [first, second] {
                place(&mut teams, name, &label, rank, ProgressStatus::Pending);
            }

            let winner = match decided_winner(record) {
                Some(1) => Some((first, second)),
                Some(2) => Some((second, first)),
                _ => None,
            };
            if let Some((winner, loser)) = winner {
                place(&mut teams, winner, &label, rank, ProgressStatus::Advanced);
                place(&mut teams, loser, &label, rank, ProgressStatus::Eliminated);
            }
        }

        let mut teams: Vec<TeamProgress> = teams.into_values().collect();
        teams.sort_by(|a, b| b.rank.cmp(&a.rank).then_with(|| a.name.cmp(&b.name)));

        EliminationProgress { teams, unplaced }
    }
}

// Rounds outside the table keep a plain "Round N" label and rank below every named round
fn label_round(round: u32, rounds: usize) -> (String, i64) {
    let round = round as usize;
    if round >= 1 && round <= rounds {
        (round_name(rounds - round), round as i64)
    } else {
        (format!("Round {round}"), -1)
    }
}

fn decided_winner(record: &MatchRecord) -> Option<i64> {
    if !record.is_finished() {
        return None;
    }
    match record.winner_indicator() {
        WinnerIndicator::Index(index) => Some(index),
        _ => None,
    }
}

fn is_placeholder(name: &str) -> bool {
    name == UNKNOWN_TEAM || name == TBD_TEAM
}

fn place(teams: &mut HashMap<TeamName, TeamProgress>, name: &str, round: &str, rank: i64, status: ProgressStatus) {
    if is_placeholder(name) {
        return;
    }

    let replace = match teams.get(name) {
        None => true,
        Some(existing) if status == ProgressStatus::Pending => rank > existing.rank,
        Some(existing) => rank >= existing.rank,
    };

    if replace {
        teams.insert(
            name.to_string(),
            TeamProgress {
                name: name.to_string(),
                round: round.to_string(),
                status,
                rank,
            },
        );
    }
}
