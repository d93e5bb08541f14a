use std::fmt;

use serde::Serialize;

/// Stage format declared in a tournament page's `== Format ==` section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TournamentFormat {
    Swiss,
    SingleElimination,
    Unknown,
}

impl TournamentFormat {
    /// Classify the text following the Format heading
    pub fn from_section(section: &str) -> Self {
        let lower = section.to_lowercase();
        let swiss = lower.contains("swiss");
        let single_elimination = lower.contains("single-elimination");

        match (swiss, single_elimination) {
            // Pages describing both stages are read as the playoff bracket
            (_, true) => TournamentFormat::SingleElimination,
            (true, false) => TournamentFormat::Swiss,
            (false, false) => TournamentFormat::Unknown,
        }
    }

    /// Templates whose `id` parameter names a bracket for this format
    pub fn template_names(&self) -> &'static [&'static str] {
        match self {
            TournamentFormat::Swiss => &["Matchlist"],
            TournamentFormat::SingleElimination => &["Bracket"],
            TournamentFormat::Unknown => &["Matchlist", "Bracket"],
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TournamentFormat::Swiss => "swiss",
            TournamentFormat::SingleElimination => "single-elimination",
            TournamentFormat::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TournamentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
