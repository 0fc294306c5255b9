use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Count word frequencies in a remote text document and chart the most common ones.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "wordtally", version)]
pub struct Cli {
    /// Document to fetch [default: Pride and Prejudice on Project Gutenberg]
    pub url: Option<String>,

    /// Worker count for the map and reduce stages
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Whole-request timeout for the fetch, in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Connection timeout for the fetch, in seconds
    #[arg(long, value_name = "SECS")]
    pub connect_timeout: Option<u64>,

    /// Upper bound on each of the map and reduce stages, in seconds
    #[arg(long, value_name = "SECS")]
    pub deadline: Option<u64>,

    /// How many of the most frequent words to show
    #[arg(short = 'n', long)]
    pub top: Option<usize>,

    /// RON file with default settings; flags override it
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Also write all counts as JSON to this file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Width of the longest bar, in characters
    #[arg(long, default_value_t = 50)]
    pub width: usize,

    /// Skip the bar chart
    #[arg(long)]
    pub no_chart: bool,

    /// Also log to ./wordtally.log
    #[arg(long)]
    pub log_file: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,

    /// More log output; repeat for trace
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
