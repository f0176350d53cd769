use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::{default_links, NavLink, DEFAULT_ACTIVE};
use crate::infrastructure::ethereum::{ProviderConfig, DEFAULT_RPC};

/// Sepolia
pub const DEFAULT_CHAIN_ID: u64 = 11_155_111;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// JSON-RPC endpoint (http(s):// or ws(s)://)
    #[serde(default = "default_rpc")]
    pub rpc: String,

    /// Chain the client expects the endpoint to serve
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,

    /// Sidebar entry highlighted at startup
    #[serde(default = "default_active")]
    pub default_link: String,

    /// Sidebar entries; the built-in list when empty
    #[serde(default)]
    pub links: Vec<NavLink>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc: default_rpc(),
            chain_id: default_chain_id(),
            default_link: default_active(),
            links: Vec::new(),
        }
    }
}

fn default_rpc() -> String {
    DEFAULT_RPC.to_string()
}

fn default_chain_id() -> u64 {
    DEFAULT_CHAIN_ID
}

fn default_active() -> String {
    DEFAULT_ACTIVE.to_string()
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid config TOML")
    }

    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml(&content)
    }

    pub fn links(&self) -> Vec<NavLink> {
        if self.links.is_empty() {
            default_links()
        } else {
            self.links.clone()
        }
    }

    pub fn endpoint(&self) -> ProviderConfig {
        ProviderConfig::from_url(&self.rpc)
    }
}

/// Load the config file, falling back to defaults when it is missing or broken
pub fn load(explicit: Option<&Path>) -> Config {
    let Some(path) = explicit.map(Path::to_path_buf).or_else(config_path) else {
        return Config::default();
    };
    if !path.exists() {
        if explicit.is_some() {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
        }
        return Config::default();
    }
    match Config::read(&path) {
        Ok(config) => {
            tracing::info!(path = %path.display(), "loaded config");
            config
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %format!("{:#}", err), "ignoring config");
            Config::default()
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("CROWDFUND_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("crowdfund").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("crowdfund").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "crowdfund", "crowdfund")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn data_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").map(PathBuf::from) {
        return Some(xdg.join("crowdfund"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".local").join("share").join("crowdfund"));
    }
    directories::ProjectDirs::from("io", "crowdfund", "crowdfund")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

pub fn log_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("crowdfund.log"))
}
