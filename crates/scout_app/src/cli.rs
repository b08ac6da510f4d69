use std::path::PathBuf;

use clap::Parser;

/// Pick the largest JPEG preview images referenced by a web page.
#[derive(Debug, Clone, Parser)]
#[command(name = "scout", version)]
pub struct Cli {
    /// Page to scrape.
    pub url: String,

    /// Number of image slots in the result.
    #[arg(short = 'n', long, default_value_t = 3)]
    pub count: usize,

    /// Title to use when the page declares none.
    #[arg(long)]
    pub title: Option<String>,

    /// User-Agent header for page and probe requests.
    #[arg(long)]
    pub user_agent: Option<String>,

    /// RON file with tuning overrides.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Also write logs to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}
