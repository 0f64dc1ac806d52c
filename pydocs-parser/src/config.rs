use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Root of the Python documentation site
    #[serde(default = "default_main_doc_url")]
    pub main_doc_url: String,

    /// Root of the PEP index site
    #[serde(default = "default_peps_url")]
    pub peps_url: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    /// Size at which the log file is rotated
    #[serde(default = "default_max_log_bytes")]
    pub max_log_bytes: u64,

    /// Number of rotated log files kept on disk
    #[serde(default = "default_max_log_files")]
    pub max_log_files: usize,

    /// Directory holding the persistent HTTP response cache
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    #[serde(default = "default_downloads_dir")]
    pub downloads_dir: PathBuf,

    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_main_doc_url() -> String {
    "https://docs.python.org/3/".to_string()
}

fn default_peps_url() -> String {
    "https://peps.python.org/".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_max_log_bytes() -> u64 {
    1_000_000
}

fn default_max_log_files() -> usize {
    5
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(".http_cache")
}

fn default_downloads_dir() -> PathBuf {
    PathBuf::from("downloads")
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("pydocs-parser/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            main_doc_url: default_main_doc_url(),
            peps_url: default_peps_url(),
            log_level: default_log_level(),
            log_dir: default_log_dir(),
            max_log_bytes: default_max_log_bytes(),
            max_log_files: default_max_log_files(),
            cache_dir: default_cache_dir(),
            downloads_dir: default_downloads_dir(),
            results_dir: default_results_dir(),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ParserConfig {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: ParserConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to the built-in defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
