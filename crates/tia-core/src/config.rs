//! Configuration management for TIA
//!
//! Loads configuration with priority:
//! 1. config.toml (or specified config file)
//! 2. Environment variable references inside the file
//! 3. Defaults
//!
//! A missing config file is not an error: the app is fully usable with
//! defaults (no retrieval endpoint configured, dataset at the default
//! relative path).

use crate::error::{Error, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// TIA configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TiaConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub retrieval: RetrievalConfig,

    #[serde(default)]
    pub dataset: DatasetConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Retrieval collaborator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Endpoint of the index service exposing ask(query, k).
    /// Absent means retrieval is not wired; the agent answers with a
    /// fallback message instead (can reference an env var with ${VAR_NAME}).
    pub endpoint: Option<String>,

    /// Result-count budget passed to the collaborator on every query
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Maximum number of example bullets in a summarized answer
    #[serde(default = "default_summary_limit")]
    pub summary_limit: usize,
}

/// Tender dataset configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Path of the tender CSV used for local counting. A missing file is a
    /// normal condition (counting questions fall through to retrieval).
    #[serde(default = "default_dataset_path")]
    pub path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            top_k: default_top_k(),
            summary_limit: default_summary_limit(),
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
        }
    }
}

impl TiaConfig {
    /// Load configuration with the following priority:
    /// 1. config.toml found in the current directory or a parent
    /// 2. Defaults when no file exists
    pub fn load() -> Result<Self> {
        match Self::find_config_file() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::debug!("No config.toml found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        tracing::debug!("Loading configuration from: {:?}", path);

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let mut config: TiaConfig = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config file {:?}: {}", path, e)))?;

        config.resolve_env_vars();

        Ok(config)
    }

    /// Find config.toml by searching current directory and parents
    fn find_config_file() -> Option<PathBuf> {
        let mut current = env::current_dir().ok()?;

        loop {
            let config_path = current.join("config.toml");
            if config_path.exists() {
                return Some(config_path);
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve ${VAR_NAME} references to environment variables
    fn resolve_env_vars(&mut self) {
        if let Some(ref endpoint) = self.retrieval.endpoint {
            self.retrieval.endpoint = Self::resolve_env_var(endpoint);
        }
    }

    /// Resolve a single ${VAR_NAME} reference; a reference to an unset
    /// variable resolves to None (retrieval stays unwired)
    fn resolve_env_var(value: &str) -> Option<String> {
        if value.starts_with("${") && value.ends_with('}') {
            let var_name = &value[2..value.len() - 1];
            env::var(var_name).ok()
        } else {
            Some(value.to_string())
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_top_k() -> usize {
    5
}

fn default_summary_limit() -> usize {
    3
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("data/tenders_details.csv")
}
