use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

use crate::aggregation::{Aggregation, EliminationProgress, ProgressStatus, Standings};
use crate::services::{Discovery, StandingsReport};

pub fn render_standings(standings: &Standings) -> String {
    let mut out = format!("{}\n", "Team Records (sorted by performance):".bold());

    for (rank, team) in standings.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}. {}: {}-{}\n",
            rank + 1,
            team.name,
            team.wins.to_string().green(),
            team.losses.to_string().red()
        ));
    }

    out
}

pub fn render_aggregation(aggregation: &Aggregation) -> String {
    let mut out = render_standings(&aggregation.standings);

    if !aggregation.diagnostics.is_empty() {
        let note = format!("{} match(es) skipped due to an invalid winner field", aggregation.diagnostics.len());
        out.push_str(&format!("{}\n", note.yellow()));
    }

    out
}

pub fn render_progress(progress: &EliminationProgress) -> String {
    let mut out = format!("{}\n", "Bracket Progress:".bold());

    for team in &progress.teams {
        let status = match team.status {
            ProgressStatus::Advanced => team.status.as_str().green(),
            ProgressStatus::Eliminated => team.status.as_str().red(),
            ProgressStatus::Pending => team.status.as_str().normal(),
        };
        out.push_str(&format!("  {}: {} ({})\n", team.name, team.round, status));
    }

    if !progress.unplaced.is_empty() {
        let note = format!("{} match(es) without a round in their id", progress.unplaced.len());
        out.push_str(&format!("{}\n", note.yellow()));
    }

    out
}

pub fn render_report(report: &StandingsReport) -> String {
    let mut out = String::new();

    if let Some(page) = &report.page {
        out.push_str(&format!("Page: {}\n", page));
    }
    if let Some(format) = report.format {
        out.push_str(&format!("Format: {}\n", format));
    }
    if !report.bracket_ids.is_empty() {
        out.push_str(&format!("Brackets: {}\n", report.bracket_ids.join(", ")));
    }
    out.push_str(&format!("Matches: {}\n\n", report.matches));

    out.push_str(&render_aggregation(&report.aggregation));
    if let Some(progress) = &report.progress {
        out.push('\n');
        out.push_str(&render_progress(progress));
    }
    out
}

pub fn render_discovery(discovery: &Discovery) -> String {
    let mut out = format!("Page: {}\nFormat: {}\n", discovery.page, discovery.format);

    if discovery.bracket_ids.is_empty() {
        out.push_str(&format!("{}\n", "No bracket ids found.".yellow()));
        return out;
    }

    out.push_str(&format!("Found {} bracket ids:\n", discovery.bracket_ids.len()));
    for id in &discovery.bracket_ids {
        out.push_str(&format!("- {}\n", id));
    }
    out
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
