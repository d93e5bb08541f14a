pub mod aggregation;
pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod fetchers;
pub mod http;
pub mod rate_limiter;
pub mod render;
pub mod services;
pub mod wikitext;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::{Cli, SourceArgs};
use std::path::Path;

use crate::cli::Command;
use crate::config::AppConfig;
use crate::services::{DiscoveryService, StandingsRequest, StandingsService};

pub use aggregation::{Aggregation, Diagnostic, EliminationProgress, Standings, TeamRecord, aggregate};
pub use domain::{MatchPayload, MatchRecord, Opponent};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_standings(
    page: Option<&str>,
    ids: &[String],
    limit: Option<u32>,
    source: &SourceArgs,
    elimination: bool,
    json: bool,
) -> Result<()> {
    let mut config = build_config(source);
    if let Some(limit) = limit {
        config.api.limit = limit;
    }

    let request = StandingsRequest {
        page: page.map(str::to_string),
        bracket_ids: ids.to_vec(),
        refresh: source.refresh,
        elimination,
    };

    let runtime = tokio::runtime::Runtime::new()?;
    let report = runtime.block_on(async {
        let mut service = StandingsService::new(&config)?;
        service.run(&request).await
    })?;

    if json {
        render::print_json(&report)
    } else {
        print!("{}", render::render_report(&report));
        Ok(())
    }
}

pub fn handle_extract(page: &str, source: &SourceArgs, json: bool) -> Result<()> {
    let config = build_config(source);

    let runtime = tokio::runtime::Runtime::new()?;
    let discovery = runtime.block_on(async {
        let cache = cache::Cache::new(&config.cache.dir)?;
        let mut service = DiscoveryService::new(&config, cache)?;
        service.discover(page, source.refresh).await
    })?;

    if json {
        render::print_json(&discovery)
    } else {
        print!("{}", render::render_discovery(&discovery));
        Ok(())
    }
}

pub fn handle_aggregate(file: &Path, elimination: bool, json: bool) -> Result<()> {
    let report = services::report_payload_file(file, elimination)?;

    if json {
        render::print_json(&report)
    } else {
        print!("{}", render::render_report(&report));
        Ok(())
    }
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}

fn build_config(source: &SourceArgs) -> AppConfig {
    let mut config = AppConfig::from_env();
    if let Some(wiki) = &source.wiki {
        config.api.wiki = wiki.clone();
    }
    config
}
