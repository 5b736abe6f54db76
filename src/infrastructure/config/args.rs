use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "revfeed",
    version,
    about = "A headless paginated review feed with tiered photo caching",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Reviews requested per page.
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Simulated provider latency in milliseconds.
    #[arg(long)]
    pub latency_ms: Option<u64>,

    /// External reviews JSON file to serve instead of the bundled one.
    #[arg(long, value_name = "PATH")]
    pub fixture: Option<PathBuf>,

    /// Disk cache directory for photo bytes.
    #[arg(long, value_name = "PATH")]
    pub cache_dir: Option<PathBuf>,

    /// Maximum photos resolving concurrently.
    #[arg(long)]
    pub max_concurrent_fetches: Option<usize>,
}
