use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "Team records and rankings from Liquipedia brackets")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Fetch matches for a tournament stage and print team records
    Standings {
        /// Wiki page title, e.g. BLAST/Major/2025/Austin/Stage_1
        #[arg(short, long, required_unless_present = "ids")]
        page: Option<String>,
        /// Bracket id to include (repeatable); the page is not read when given
        #[arg(short = 'i', long = "id")]
        ids: Vec<String>,
        /// Maximum number of match records requested from the API
        #[arg(short, long)]
        limit: Option<u32>,
        #[command(flatten)]
        source: SourceArgs,
        /// Also report bracket progress when the page is not detected as single elimination
        #[arg(short, long)]
        elimination: bool,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the format and bracket ids found on a tournament page
    Extract {
        /// Wiki page title
        #[arg(short, long)]
        page: String,
        #[command(flatten)]
        source: SourceArgs,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compute records from a saved match API response
    Aggregate {
        /// Path to a JSON file shaped like `{ "result": [...] }`
        file: PathBuf,
        /// Also report single-elimination bracket progress
        #[arg(short, long)]
        elimination: bool,
        /// Print the standings as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct SourceArgs {
    /// Liquipedia wiki (defaults to counterstrike)
    #[arg(short, long)]
    pub wiki: Option<String>,
    /// Ignore cached wikitext and match data
    #[arg(long)]
    pub refresh: bool,
}
