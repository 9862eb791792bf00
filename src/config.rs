//! Configuration file support for ferro-overlap.
//!
//! This module loads `.ferro-overlap.toml` files that set the database
//! endpoints and transport options used by the HTTP clients.
//!
//! # Example Configuration
//!
//! ```toml
//! [ena]
//! base-url = "https://www.ebi.ac.uk/ena"
//!
//! [uniprot]
//! base-url = "https://www.uniprot.org"
//!
//! [http]
//! timeout-secs = 60
//! accept-invalid-certs = false
//! user-agent = "my-lab-pipeline/1.0"
//! ```
//!
//! # Config File Locations
//!
//! Configuration is searched in this order (first found wins):
//! 1. `.ferro-overlap.toml` in current directory
//! 2. `~/.config/ferro/overlap.toml`
//!
//! CLI flags take precedence over config file settings.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::error::FerroError;

/// Parsed configuration from a .ferro-overlap.toml file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FerroConfig {
    /// ENA base URL.
    pub ena_base_url: Option<String>,
    /// UniProt base URL.
    pub uniprot_base_url: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Skip TLS certificate verification for the database clients.
    pub accept_invalid_certs: Option<bool>,
    /// User-Agent header override.
    pub user_agent: Option<String>,
}

/// On-disk layout of the config file
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    ena: Option<EndpointSection>,
    uniprot: Option<EndpointSection>,
    http: Option<HttpSection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct EndpointSection {
    base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct HttpSection {
    timeout_secs: Option<u64>,
    accept_invalid_certs: Option<bool>,
    user_agent: Option<String>,
}

impl FerroConfig {
    /// Load configuration from the default locations.
    ///
    /// Searches for config in:
    /// 1. `.ferro-overlap.toml` in current directory
    /// 2. `~/.config/ferro/overlap.toml`
    pub fn load() -> Option<Self> {
        let cwd_config = PathBuf::from(".ferro-overlap.toml");
        let home_config =
            dirs_home().map(|home| home.join(".config").join("ferro").join("overlap.toml"));

        Self::load_first(std::iter::once(cwd_config).chain(home_config))
    }

    /// Load the first existing candidate that parses.
    ///
    /// Candidates that fail to load are logged and skipped.
    pub fn load_first<I: IntoIterator<Item = PathBuf>>(candidates: I) -> Option<Self> {
        for path in candidates {
            if !path.exists() {
                continue;
            }
            match Self::load_from_path(&path) {
                Ok(config) => return Some(config),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping config file"),
            }
        }

        None
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML content.
    ///
    /// Only the `[ena]`, `[uniprot]` and `[http]` tables are read; other
    /// tables and unknown keys are ignored.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let file: FileConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let http = file.http.unwrap_or_default();

        Ok(FerroConfig {
            ena_base_url: file.ena.and_then(|s| s.base_url),
            uniprot_base_url: file.uniprot.and_then(|s| s.base_url),
            timeout_secs: http.timeout_secs,
            accept_invalid_certs: http.accept_invalid_certs,
            user_agent: http.user_agent,
        })
    }

    /// Merge this config with CLI arguments.
    /// CLI arguments take precedence.
    pub fn merge_with_cli(&self, cli_insecure: bool, cli_timeout: Option<u64>) -> Self {
        let mut merged = self.clone();
        if cli_insecure {
            merged.accept_invalid_certs = Some(true);
        }
        if cli_timeout.is_some() {
            merged.timeout_secs = cli_timeout;
        }
        merged
    }

    /// Convert this config to transport settings, filling gaps with defaults.
    #[cfg(feature = "remote")]
    pub fn to_client_config(&self) -> crate::client::ClientConfig {
        let defaults = crate::client::ClientConfig::default();
        crate::client::ClientConfig {
            ena_base_url: self
                .ena_base_url
                .clone()
                .unwrap_or(defaults.ena_base_url),
            uniprot_base_url: self
                .uniprot_base_url
                .clone()
                .unwrap_or(defaults.uniprot_base_url),
            timeout_secs: self.timeout_secs.unwrap_or(defaults.timeout_secs),
            accept_invalid_certs: self
                .accept_invalid_certs
                .unwrap_or(defaults.accept_invalid_certs),
            user_agent: self.user_agent.clone().or(defaults.user_agent),
        }
    }
}

/// Configuration loading error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(String),
    /// Parse error in config file.
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "Config IO error: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Config parse error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for FerroError {
    fn from(err: ConfigError) -> Self {
        FerroError::Config {
            msg: err.to_string(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
