//! Server configuration module.
//!
//! Configuration is layered. Each layer overrides only the keys it sets:
//!
//! ```text
//! stock defaults  →  --config file.toml  →  PORT env var  →  CLI flags
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [server]
//! host = "0.0.0.0"            # Interface to bind (all interfaces by default)
//! port = 5000                 # Overridden by the PORT environment variable
//!
//! [handler]
//! mode = "grayscale"          # "metadata" (JSON) or "grayscale" (PNG bytes)
//!
//! [cors]
//! enabled = true              # Allow cross-origin requests from any origin
//!
//! [limits]
//! max_upload_bytes = 26214400 # Request body limit (25 MiB)
//! max_image_dimension = 16384 # Largest accepted width or height in pixels
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use crate::imaging::{DEFAULT_MAX_DIMENSION, DecodeLimits};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use thiserror::Error;

/// Environment variable that overrides `server.port`.
pub const PORT_ENV: &str = "PORT";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Process-wide configuration, fixed at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Listen address.
    pub server: ListenConfig,
    /// Which image handler serves `/predict`.
    pub handler: HandlerConfig,
    /// Cross-origin policy.
    pub cors: CorsConfig,
    /// Upload and decode limits.
    pub limits: LimitsConfig,
}

impl ServerConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port must be non-zero".into(),
            ));
        }
        if self.server.host.parse::<IpAddr>().is_err() {
            return Err(ConfigError::Validation(format!(
                "server.host must be an IP address, got {:?}",
                self.server.host
            )));
        }
        if self.limits.max_upload_bytes == 0 {
            return Err(ConfigError::Validation(
                "limits.max_upload_bytes must be non-zero".into(),
            ));
        }
        if self.limits.max_image_dimension == 0 {
            return Err(ConfigError::Validation(
                "limits.max_image_dimension must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// The socket address to bind. Call after [`validate`](Self::validate).
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.server.host.parse().map_err(|_| {
            ConfigError::Validation(format!("invalid server.host {:?}", self.server.host))
        })?;
        Ok(SocketAddr::new(ip, self.server.port))
    }

    pub fn decode_limits(&self) -> DecodeLimits {
        DecodeLimits::new(self.limits.max_image_dimension)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListenConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// Which behavior `/predict` has in this deployment.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum HandlerMode {
    /// JSON description of size and color mode.
    Metadata,
    /// The upload converted to grayscale, as PNG bytes.
    #[default]
    Grayscale,
}

impl HandlerMode {
    pub fn as_str(self) -> &'static str {
        match self {
            HandlerMode::Metadata => "metadata",
            HandlerMode::Grayscale => "grayscale",
        }
    }
}

impl fmt::Display for HandlerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HandlerConfig {
    pub mode: HandlerMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsConfig {
    /// Permit any origin on every route.
    pub enabled: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitsConfig {
    /// Maximum request body size in bytes.
    pub max_upload_bytes: usize,
    /// Maximum decoded width or height in pixels.
    pub max_image_dimension: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: 25 * 1024 * 1024,
            max_image_dimension: DEFAULT_MAX_DIMENSION,
        }
    }
}

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer every override is merged on top of.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(ServerConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Lay one config layer over another.
///
/// A sparse file that only sets `[server] port` keeps the stock `host`;
/// the `PORT` overlay replaces just `server.port`. Scalars and arrays are
/// replaced whole.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
///
/// The path was given explicitly, so a missing file is an error.
pub fn load_raw_config(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(value)
}

/// Build an overlay from environment variables.
///
/// `lookup` abstracts `std::env::var` so tests never touch the process
/// environment. Returns `Ok(None)` when nothing relevant is set.
pub fn env_overlay(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Option<toml::Value>, ConfigError> {
    let Some(raw) = lookup(PORT_ENV) else {
        return Ok(None);
    };
    let port: u16 = raw.trim().parse().map_err(|_| {
        ConfigError::Validation(format!("{PORT_ENV} must be a port number, got {raw:?}"))
    })?;

    let mut server = toml::Table::new();
    server.insert("port".into(), toml::Value::Integer(i64::from(port)));
    let mut root = toml::Table::new();
    root.insert("server".into(), toml::Value::Table(server));
    Ok(Some(toml::Value::Table(root)))
}

/// Merge overlays in order onto `base`, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlays: impl IntoIterator<Item = toml::Value>,
) -> Result<ServerConfig, ConfigError> {
    let merged = overlays.into_iter().fold(base, merge_toml);
    let config: ServerConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the full configuration: stock defaults, then the optional file, then
/// the environment.
pub fn load_config(
    file: Option<&Path>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ServerConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let file_overlay = file.map(load_raw_config).transpose()?;
    let env = env_overlay(lookup)?;
    resolve_config(base, file_overlay.into_iter().chain(env))
}

/// Returns a fully-commented stock config file with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# image-probe configuration
# =========================
#
# All keys are optional. Remove anything you don't want to change; missing
# keys fall back to the defaults shown here. Unknown keys are rejected.
#
# Precedence (lowest to highest):
#   stock defaults -> this file -> PORT environment variable -> CLI flags

# ---------------------------------------------------------------------------
# Listen address
# ---------------------------------------------------------------------------
[server]
# Interface to bind. 0.0.0.0 listens on all interfaces.
host = "0.0.0.0"
# TCP port. The PORT environment variable takes precedence.
port = 5000

# ---------------------------------------------------------------------------
# Image handler
# ---------------------------------------------------------------------------
[handler]
# What POST /predict returns:
#   "metadata"  - JSON with prediction, image_size, image_mode, message
#   "grayscale" - the upload converted to grayscale, as image/png bytes
mode = "grayscale"

# ---------------------------------------------------------------------------
# Cross-origin requests
# ---------------------------------------------------------------------------
[cors]
# Allow any origin, any method, any header on every route.
enabled = true

# ---------------------------------------------------------------------------
# Limits
# ---------------------------------------------------------------------------
[limits]
# Largest accepted request body, in bytes (25 MiB).
max_upload_bytes = 26214400
# Largest accepted image width or height, in pixels. Larger images are
# rejected as undecodable instead of being allocated.
max_image_dimension = 16384
"##
}
