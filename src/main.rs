use anyhow::Result;

use bracket_standings::cli::Command;
use bracket_standings::{handle_aggregate, handle_completions, handle_extract, handle_standings, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Standings {
            page,
            ids,
            limit,
            source,
            elimination,
            json,
        } => handle_standings(page.as_deref(), ids, *limit, source, *elimination, *json),
        Command::Extract { page, source, json } => handle_extract(page, source, *json),
        Command::Aggregate { file, elimination, json } => handle_aggregate(file, *elimination, *json),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
