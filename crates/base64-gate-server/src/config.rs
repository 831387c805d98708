// ABOUTME: Configuration loading and validation for the base64-gate server.
// ABOUTME: Reads environment variables once at startup into an immutable ServerConfig.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use base64_gate_core::DecodeMode;
use thiserror::Error;

pub const PORT_VAR: &str = "PORT";
pub const HOST_VAR: &str = "HOST";
pub const API_KEY_VAR: &str = "x_api_key";
pub const DECODE_MODE_VAR: &str = "DECODE_MODE";
pub const BODY_LIMIT_VAR: &str = "BODY_LIMIT_BYTES";
pub const PUBLIC_BASE_URL_VAR: &str = "PUBLIC_BASE_URL";

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BODY_LIMIT: usize = 100 * 1024;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT is not a valid port number: {0}")]
    InvalidPort(String),

    #[error("HOST is not a valid IP address: {0}")]
    InvalidHost(String),

    #[error("DECODE_MODE must be \"strict\" or \"lenient\", got: {0}")]
    InvalidDecodeMode(String),

    #[error("BODY_LIMIT_BYTES must be a positive integer, got: {0}")]
    InvalidBodyLimit(String),
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Shared secret for the `x_api_key` header. `None` locks protected routes.
    pub api_key: Option<String>,
    pub decode_mode: DecodeMode,
    pub body_limit: usize,
    pub public_base_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            api_key: None,
            decode_mode: DecodeMode::Strict,
            body_limit: DEFAULT_BODY_LIMIT,
            public_base_url: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with sensible defaults.
    ///
    /// Environment variables:
    /// - PORT: listen port (default: 3000)
    /// - HOST: bind IP address (default: 0.0.0.0)
    /// - x_api_key: shared secret for protected routes (no default)
    /// - DECODE_MODE: strict or lenient (default: strict)
    /// - BODY_LIMIT_BYTES: maximum request body size (default: 102400)
    /// - PUBLIC_BASE_URL: server URL advertised in /docs/openapi.json (default: http://localhost:PORT)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup(PORT_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => defaults.bind.port(),
        };

        let host = match lookup(HOST_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<IpAddr>()
                .map_err(|_| ConfigError::InvalidHost(raw))?,
            None => defaults.bind.ip(),
        };

        // An empty secret would let an empty header through, so treat it as unset.
        let api_key = lookup(API_KEY_VAR).filter(|k| !k.is_empty());

        let decode_mode = match lookup(DECODE_MODE_VAR) {
            Some(raw) => raw
                .parse::<DecodeMode>()
                .map_err(|_| ConfigError::InvalidDecodeMode(raw))?,
            None => defaults.decode_mode,
        };

        let body_limit = match lookup(BODY_LIMIT_VAR) {
            Some(raw) => {
                let parsed = raw.trim().parse::<usize>();
                match parsed {
                    Ok(limit) if limit > 0 => limit,
                    _ => return Err(ConfigError::InvalidBodyLimit(raw)),
                }
            }
            None => defaults.body_limit,
        };

        let public_base_url = lookup(PUBLIC_BASE_URL_VAR).filter(|u| !u.is_empty());

        Ok(Self {
            bind: SocketAddr::new(host, port),
            api_key,
            decode_mode,
            body_limit,
            public_base_url,
        })
    }

    /// The base URL advertised in the OpenAPI document.
    pub fn public_base_url(&self) -> String {
        self.public_base_url
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", self.bind.port()))
    }
}
