//! Server settings.
//!
//! Everything is read from the environment once at startup; repository
//! selection lives in [`crate::db::factory`].

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 3000;
/// Default bind address.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default directory served under `/images`.
pub const DEFAULT_IMAGES_DIR: &str = "images";
/// Default maximum request body size (100 KiB).
pub const DEFAULT_BODY_LIMIT: usize = 100 * 1024;

/// Configuration errors raised while reading server settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?} ({reason})")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub images_dir: PathBuf,
    pub body_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            images_dir: PathBuf::from(DEFAULT_IMAGES_DIR),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl ServerConfig {
    /// Read `HOST`, `PORT`, `IMAGES_DIR` and `BODY_LIMIT_BYTES`.
    ///
    /// Unset or empty variables fall back to the defaults; values that fail
    /// to parse are errors rather than silently defaulted.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            host: non_empty_var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT")?.unwrap_or(defaults.port),
            images_dir: non_empty_var("IMAGES_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.images_dir),
            body_limit: parse_var("BODY_LIMIT_BYTES")?.unwrap_or(defaults.body_limit),
        })
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidValue {
                name: "HOST",
                value: self.host.clone(),
                reason: e.to_string(),
            })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T>(name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match non_empty_var(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                name,
                value: raw.clone(),
                reason: e.to_string(),
            }),
    }
}
