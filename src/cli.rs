use crate::services::policy::parse_duration;
use chrono::TimeDelta;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "data-release",
    version,
    about = "Suspense-date scheduling and data release against a metadata service"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(long, global = true, help = "Config file (default ~/.config/data-release/config.toml)")]
    pub config: Option<PathBuf>,
    #[arg(long, global = true, help = "Metadata service base URL (overrides config and env)")]
    pub endpoint: Option<String>,
    #[arg(long, short, global = true, help = "Debug logging on stderr")]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Set suspense dates, then release transactions whose suspense date passed.
    Run {
        #[arg(long, help = "<collection>.<date field>, see `keywords`")]
        keyword: String,
        #[arg(long, value_parser = parse_duration, help = "Lookback window, e.g. 30d")]
        time_ago: TimeDelta,
        #[arg(long, value_parser = parse_duration, help = "Offset added to the keyword date, e.g. 365d")]
        time_after: TimeDelta,
        #[arg(long, num_args = 1.., help = "Ids to leave out of release resolution")]
        exclude: Vec<String>,
    },
    /// List accepted keywords.
    Keywords,
    /// Print the resolved configuration.
    Config,
}
