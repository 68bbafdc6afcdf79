//! Gateway configuration: a TOML file plus environment overrides.
//!
//! ```toml
//! [server]
//! bind = "0.0.0.0:5000"
//!
//! [cors]
//! origins = ["https://forms.example.com"]
//!
//! [invoice_ninja]
//! base_url = "https://invoicing.example.com/api/v1"
//!
//! [csrf]
//! ttl_secs = 3600
//! ```
//!
//! Secrets are usually supplied through the environment rather than the file.

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use invoice_ninja::NinjaConfig;
use invoice_schema::SchemaPaths;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Config file read when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "invoice-forms.toml";

pub const ENV_BIND: &str = "INVOICE_FORMS_BIND";
pub const ENV_TOKEN: &str = "INVOICE_NINJA_TOKEN";
pub const ENV_BASE_URL: &str = "INVOICE_NINJA_URL";
pub const ENV_CSRF_SECRET: &str = "INVOICE_FORMS_CSRF_SECRET";

const DEFAULT_BIND: &str = "127.0.0.1:5000";
const DEFAULT_CSRF_TTL_SECS: u64 = 3600;

/// Errors raised while loading or checking the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid bind address '{value}': {source}")]
    InvalidBind {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("invoicing API token is not set (use [invoice_ninja] token or {ENV_TOKEN})")]
    MissingToken,

    #[error("CSRF protection is enabled but no secret is set (use [csrf] secret or {ENV_CSRF_SECRET})")]
    MissingCsrfSecret,
}

/// `[server]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

/// `[cors]` section. An origin of `"*"` allows any origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub origins: Vec<String>,
    pub supports_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            origins: Vec::new(),
            supports_credentials: true,
        }
    }
}

/// `[csrf]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsrfConfig {
    pub enabled: bool,
    pub secret: String,
    pub ttl_secs: u64,
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            secret: String::new(),
            ttl_secs: DEFAULT_CSRF_TTL_SECS,
        }
    }
}

/// Complete gateway configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub invoice_ninja: NinjaConfig,
    pub csrf: CsrfConfig,
    pub schemas: SchemaPaths,
}

impl AppConfig {
    /// Reads the configuration file.
    ///
    /// A missing file yields the defaults. Unreadable or malformed files are
    /// errors.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(content) => {
                let config = Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?;
                tracing::info!("Loaded configuration from {:?}", path);
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("No config file found at {:?}, using defaults", path);
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Applies environment overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Applies overrides from `lookup`. Empty values are ignored.
    pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(bind) = get(ENV_BIND) {
            self.server.bind = bind;
        }
        if let Some(token) = get(ENV_TOKEN) {
            self.invoice_ninja.token = token;
        }
        if let Some(url) = get(ENV_BASE_URL) {
            self.invoice_ninja.base_url = url;
        }
        if let Some(secret) = get(ENV_CSRF_SECRET) {
            self.csrf.secret = secret;
        }
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server
            .bind
            .parse()
            .map_err(|source| ConfigError::InvalidBind {
                value: self.server.bind.clone(),
                source,
            })
    }

    /// Checks the settings `serve` cannot start without.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bind_addr()?;
        if self.invoice_ninja.token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }
        if self.csrf.enabled && self.csrf.secret.is_empty() {
            return Err(ConfigError::MissingCsrfSecret);
        }
        Ok(())
    }
}
