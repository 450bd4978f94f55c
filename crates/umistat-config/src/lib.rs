//! Shared configuration for the umistat widget.
//!
//! Built-in defaults (the published share endpoint), a TOML file at the
//! platform config path, and `UMISTAT_`-prefixed environment variables,
//! merged in that order via figment.

use std::path::PathBuf;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Share endpoint baked into the widget.
pub const DEFAULT_ENDPOINT: &str = "https://static.ets2la.cn";

/// Public share identifier of the tracked website.
pub const DEFAULT_SHARE_ID: &str = "3X23lyKTw4dYOm54";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Config struct ───────────────────────────────────────────────────

/// Widget configuration.
///
/// An empty `endpoint` or `share_id` is not a loading error -- the widget
/// treats it as "nothing to fetch" and shows placeholders.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Analytics endpoint base URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Public share identifier.
    #[serde(default = "default_share_id")]
    pub share_id: String,

    /// Reporting timezone passed to the stats endpoint.
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Page path the counters are scoped to.
    #[serde(default = "default_page_url")]
    pub page_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            share_id: default_share_id(),
            timezone: default_timezone(),
            page_url: default_page_url(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.into()
}
fn default_share_id() -> String {
    DEFAULT_SHARE_ID.into()
}
fn default_timezone() -> String {
    "Asia/Shanghai".into()
}
fn default_page_url() -> String {
    "/".into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "umistat", "umistat").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("umistat");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from defaults + file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("UMISTAT_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, falling back to defaults if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}
