//! Site and contact configuration.
//!
//! # Responsibility
//! - Hold deploy-time switches (relay vs mailto, endpoint, mailbox).
//! - Load them from an optional JSON file plus `FOLIO_*` environment overrides.
//!
//! # Invariants
//! - Missing file keys take defaults; unknown keys are rejected.
//! - `validate()` must pass before the config is used.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DEFAULT_MANIFEST: &str = "projects.json";
pub const DEFAULT_BASE_URL: &str = "http://localhost:5173";
pub const DEFAULT_RELAY_ENDPOINT: &str = "https://formspree.io/f/your-id";
pub const DEFAULT_MAILBOX: &str = "chamberspeter1@outlook.com";

pub const ENV_MANIFEST: &str = "FOLIO_MANIFEST";
pub const ENV_BASE_URL: &str = "FOLIO_BASE_URL";
pub const ENV_USE_RELAY: &str = "FOLIO_USE_RELAY";
pub const ENV_RELAY_ENDPOINT: &str = "FOLIO_RELAY_ENDPOINT";
pub const ENV_MAILBOX: &str = "FOLIO_MAILBOX";

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration load or validation failure.
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidEnv {
        key: &'static str,
        value: String,
    },
    EmptyManifest,
    InvalidBaseUrl(String),
    InvalidMailbox(String),
    InvalidRelayEndpoint(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid config `{}`: {source}", path.display())
            }
            Self::InvalidEnv { key, value } => {
                write!(f, "environment variable {key} has invalid value `{value}`")
            }
            Self::EmptyManifest => write!(f, "manifest location must not be empty"),
            Self::InvalidBaseUrl(value) => {
                write!(f, "base_url must start with http:// or https://, got `{value}`")
            }
            Self::InvalidMailbox(value) => write!(f, "mailbox is not an address: `{value}`"),
            Self::InvalidRelayEndpoint(value) => {
                write!(f, "relay_endpoint must be an http(s) URL, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Contact form dispatch settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    /// POST to `relay_endpoint` instead of opening a `mailto:` link.
    pub use_relay: bool,
    pub relay_endpoint: String,
    /// Destination address for `mailto:` links.
    pub mailbox: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            use_relay: false,
            relay_endpoint: DEFAULT_RELAY_ENDPOINT.to_string(),
            mailbox: DEFAULT_MAILBOX.to_string(),
        }
    }
}

/// Whole-site settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Manifest path or `http(s)://` URL.
    pub manifest: String,
    /// Public origin used for canonical links and the sitemap.
    pub base_url: String,
    pub contact: ContactConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            manifest: DEFAULT_MANIFEST.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            contact: ContactConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Reads a JSON config file. Absent keys keep their defaults.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads defaults or `path`, applies process environment overrides and
    /// validates the result.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => {
                info!(
                    "event=config_load module=config status=ok path={}",
                    path.display()
                );
                Self::from_file(path)?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Applies `FOLIO_*` overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_MANIFEST) {
            self.manifest = value;
        }
        if let Some(value) = lookup(ENV_BASE_URL) {
            self.base_url = value;
        }
        if let Some(value) = lookup(ENV_USE_RELAY) {
            self.contact.use_relay = parse_flag(ENV_USE_RELAY, &value)?;
        }
        if let Some(value) = lookup(ENV_RELAY_ENDPOINT) {
            self.contact.relay_endpoint = value;
        }
        if let Some(value) = lookup(ENV_MAILBOX) {
            self.contact.mailbox = value;
        }
        Ok(())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.manifest.trim().is_empty() {
            return Err(ConfigError::EmptyManifest);
        }
        if !is_http_url(&self.base_url) {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }
        let mailbox = self.contact.mailbox.trim();
        if mailbox.is_empty() || !mailbox.contains('@') {
            return Err(ConfigError::InvalidMailbox(self.contact.mailbox.clone()));
        }
        if self.contact.use_relay && !is_http_url(&self.contact.relay_endpoint) {
            return Err(ConfigError::InvalidRelayEndpoint(
                self.contact.relay_endpoint.clone(),
            ));
        }
        if self.contact.use_relay && self.contact.relay_endpoint == DEFAULT_RELAY_ENDPOINT {
            warn!("event=config_check module=config status=warn relay_endpoint=placeholder");
        }
        Ok(())
    }
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

fn parse_flag(key: &'static str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            key,
            value: value.to_string(),
        }),
    }
}
