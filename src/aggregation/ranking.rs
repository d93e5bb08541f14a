use std::cmp::Ordering;

use serde::Serialize;

use super::types::TeamRecord;

/// Teams ordered by record, best first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Standings {
    entries: Vec<TeamRecord>,
}

impl Standings {
    /// Sort by wins descending, then losses ascending, then name ascending.
    pub fn rank<I>(records: I) -> Self
    where
        I: IntoIterator<Item = TeamRecord>,
    {
        let mut entries: Vec<TeamRecord> = records.into_iter().collect();
        entries.sort_by(compare_records);
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TeamRecord> {
        self.entries.iter()
    }

    pub fn get(&self, name: &str) -> Option<&TeamRecord> {
        self.entries.iter().find(|record| record.name == name)
    }

    /// Zero-based rank of a team
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|record| record.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|record| record.name.as_str()).collect()
    }

    /// `(name, wins, losses)` triples in rank order
    pub fn triples(&self) -> Vec<(&str, u32, u32)> {
        self.entries
            .iter()
            .map(|record| (record.name.as_str(), record.wins, record.losses))
            .collect()
    }

    pub fn as_slice(&self) -> &[TeamRecord] {
        &self.entries
    }
}

impl<'a> IntoIterator for &'a Standings {
    type Item = &'a TeamRecord;
    type IntoIter = std::slice::Iter<'a, TeamRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for Standings {
    type Item = TeamRecord;
    type IntoIter = std::vec::IntoIter<TeamRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

fn compare_records(a: &TeamRecord, b: &TeamRecord) -> Ordering {
    b.wins
        .cmp(&a.wins)
        .then_with(|| a.losses.cmp(&b.losses))
        .then_with(|| a.name.cmp(&b.name))
}
