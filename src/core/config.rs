//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.hail/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::api::DEFAULT_BASE_URL;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct HailConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub rides: RidesConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RidesConfig {
    pub page_size: Option<u32>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_PAGE_SIZE: u32 = 10;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub page_size: u32,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.hail/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".hail").join("config.toml"))
}

/// Load config from `~/.hail/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `HailConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<HailConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(HailConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(HailConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: HailConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# hail Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [api]
# base_url = "https://api.solidcab.com/v1"   # Or set HAIL_BASE_URL env var

# [rides]
# page_size = 10                             # Bookings per history page
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env
/// vars → CLI.
///
/// `cli_base_url` comes from the `--base-url` flag (None = not specified).
pub fn resolve(config: &HailConfig, cli_base_url: Option<&str>) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli_base_url
        .map(|s| s.to_string())
        .or_else(|| std::env::var("HAIL_BASE_URL").ok())
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    ResolvedConfig {
        base_url,
        page_size: config.rides.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
    }
}
