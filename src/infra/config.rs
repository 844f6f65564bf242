// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Looked for in the working directory when no --config flag is given.
pub const DEFAULT_CONFIG_FILE: &str = "cvxserve.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub solver: SolverConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub limits: LimitsConfig,

    #[serde(default)]
    pub history: HistoryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// When set, requests must present this value in X-API-Key.
    pub api_token: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8000,
            api_token: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Executable invoked once per solve. Solves are refused while unset.
    pub command: Option<String>,
    pub args: Vec<String>,
    pub timeout_seconds: u64,
    pub max_inflight: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            command: None,
            args: Vec::new(),
            timeout_seconds: 8,
            max_inflight: 4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./data/cvxserve.db"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub enabled: bool,
    pub per_minute: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            per_minute: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub default_limit: u32,
    pub max_limit: u32,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            default_limit: 50,
            max_limit: 500,
        }
    }
}

impl Config {
    /// Load config from the default file, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = Path::new(DEFAULT_CONFIG_FILE);
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Apply environment overrides. CVXSERVE_API_TOKEN wins over the
    /// config file so deployments can keep the token out of it.
    pub fn apply_env(&mut self) {
        if let Ok(token) = std::env::var("CVXSERVE_API_TOKEN") {
            if !token.is_empty() {
                self.server.api_token = Some(token);
            }
        }
    }
}
