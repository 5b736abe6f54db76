//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const APP_NAME: &str = "revfeed";
const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "linuxmobile";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration from file and CLI.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Feed behavior.
    #[serde(default)]
    pub feed: FeedSettings,

    /// Photo loading behavior.
    #[serde(default)]
    pub photos: PhotoSettings,

    /// Review source behavior.
    #[serde(default)]
    pub provider: ProviderSettings,

    /// Presentation settings.
    #[serde(default)]
    pub ui: UiSettings,
}

/// Feed pagination settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedSettings {
    /// Reviews requested per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// How many screen heights of remaining content trigger the next
    /// page request.
    #[serde(default = "default_screens_to_preload")]
    pub screens_to_preload: f64,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            screens_to_preload: default_screens_to_preload(),
        }
    }
}

/// Photo pipeline settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoSettings {
    /// Maximum blobs held in the memory cache.
    #[serde(default = "default_memory_cache_entries")]
    pub memory_cache_entries: usize,

    /// Maximum photos resolving concurrently.
    #[serde(default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,

    /// Per-request network timeout in seconds.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Disk cache directory override.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
}

impl Default for PhotoSettings {
    fn default() -> Self {
        Self {
            memory_cache_entries: default_memory_cache_entries(),
            max_concurrent_fetches: default_max_concurrent_fetches(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            cache_dir: None,
        }
    }
}

/// Review source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Simulated network latency per page request, in milliseconds.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,

    /// External reviews JSON file; the bundled payload is used when unset.
    #[serde(default)]
    pub fixture_path: Option<PathBuf>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
            fixture_path: None,
        }
    }
}

/// Presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    /// Timestamp format string (chrono format).
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            timestamp_format: default_timestamp_format(),
        }
    }
}

fn default_page_size() -> usize {
    20
}

fn default_screens_to_preload() -> f64 {
    2.5
}

fn default_memory_cache_entries() -> usize {
    64
}

fn default_max_concurrent_fetches() -> usize {
    8
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

fn default_latency_ms() -> u64 {
    300
}

fn default_timestamp_format() -> String {
    "%d %b %Y".to_string()
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(page_size) = args.page_size {
            self.feed.page_size = page_size;
        }
        if let Some(latency_ms) = args.latency_ms {
            self.provider.latency_ms = latency_ms;
        }
        if let Some(fixture) = args.fixture {
            self.provider.fixture_path = Some(fixture);
        }
        if let Some(cache_dir) = args.cache_dir {
            self.photos.cache_dir = Some(cache_dir);
        }
        if let Some(max_concurrent) = args.max_concurrent_fetches {
            self.photos.max_concurrent_fetches = max_concurrent;
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        Self::default_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("revfeed.log"))
    }

    /// Returns effective config path.
    #[must_use]
    pub fn effective_config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(Self::default_config_path)
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            feed: FeedSettings::default(),
            photos: PhotoSettings::default(),
            provider: ProviderSettings::default(),
            ui: UiSettings::default(),
        }
    }
}
