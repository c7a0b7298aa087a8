//! Configuration schema and loading.
//!
//! All fields have defaults so a minimal config file (or none at all) is
//! valid. Serde handles the syntactic side; there is nothing semantic to
//! validate — malformed host specs compile to patterns that never match.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Root configuration for the gate.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GateConfig {
    /// Bind address for the demo server (e.g. "127.0.0.1:8080").
    pub bind_address: String,

    /// Host specs admitted through the gate: exact names
    /// ("example.com"), wildcard subdomains ("*.example.com"), or
    /// FQDN-style trailing-dot names ("example.com.").
    pub allowed_hosts: Vec<String>,

    /// Server name checked alongside the Host header, the `SERVER_NAME`
    /// equivalent. Requests are rejected while this is unset.
    pub server_name: Option<String>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            allowed_hosts: Vec::new(),
            server_name: None,
        }
    }
}

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Load configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GateConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = toml::from_str(&content)?;
    Ok(config)
}
