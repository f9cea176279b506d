//! Environment-driven configuration for the proxy and the terminal client.
//!
//! Values come from the process environment; binaries call
//! `dotenvy::dotenv()` first so a local `.env` file works too.

use std::net::SocketAddr;
use std::time::Duration;

use crate::clients::errors::{Error, Result};
use crate::clients::upstream::LASTFM_API_URL;

/// Last.fm API key, read by the proxy only.
pub const API_KEY_VAR: &str = "LASTFM_API_KEY";
/// Override for the Last.fm web service root.
pub const API_URL_VAR: &str = "LASTFM_API_URL";
/// Address the proxy listens on.
pub const BIND_ADDR_VAR: &str = "HTTP_API_ADDR";
/// Proxy endpoint the terminal client queries.
pub const PROXY_URL_VAR: &str = "LASTFM_PROXY_URL";
/// Per-request timeout in whole seconds.
pub const TIMEOUT_VAR: &str = "LASTFM_TIMEOUT_SECS";

/// Listen address when none is configured.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8888";
/// Endpoint matching [`DEFAULT_BIND_ADDR`].
pub const DEFAULT_PROXY_URL: &str = "http://127.0.0.1:8888/api";
/// Timeout when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for the `http_api` proxy.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// `None` keeps the server up but answers every request with a 500.
    pub api_key: Option<String>,
    /// Last.fm web service root.
    pub api_url: String,
    /// Listen address.
    pub bind_addr: SocketAddr,
    /// Timeout for upstream requests.
    pub timeout: Duration,
}

/// Settings for the terminal client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Full URL of the `/api` endpoint.
    pub proxy_url: String,
    /// Timeout for proxy requests.
    pub timeout: Duration,
}

/// Collects explicit overrides; anything unset falls back to the environment.
#[derive(Default)]
pub struct ConfigBuilder {
    api_key: Option<String>,
    api_url: Option<String>,
    bind_addr: Option<String>,
    proxy_url: Option<String>,
    timeout: Option<Duration>,
}

impl ConfigBuilder {
    /// Builder with nothing overridden.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    pub fn bind_addr(mut self, addr: impl Into<String>) -> Self {
        self.bind_addr = Some(addr.into());
        self
    }

    pub fn proxy_url(mut self, url: impl Into<String>) -> Self {
        self.proxy_url = Some(url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Resolve proxy settings. A blank API key counts as missing.
    pub fn build_proxy(self) -> Result<ProxyConfig> {
        let api_key = self
            .api_key
            .or_else(|| env_var(API_KEY_VAR))
            .filter(|k| !k.trim().is_empty());
        let api_url = self
            .api_url
            .or_else(|| env_var(API_URL_VAR))
            .unwrap_or_else(|| LASTFM_API_URL.to_string());
        let bind_addr = self
            .bind_addr
            .or_else(|| env_var(BIND_ADDR_VAR))
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr.parse().map_err(|e| {
            Error::ConfigurationError(format!("{BIND_ADDR_VAR}={bind_addr:?}: {e}"))
        })?;
        Ok(ProxyConfig {
            api_key,
            api_url,
            bind_addr,
            timeout: resolve_timeout(self.timeout)?,
        })
    }

    /// Resolve terminal client settings.
    pub fn build_client(self) -> Result<ClientConfig> {
        let proxy_url = self
            .proxy_url
            .or_else(|| env_var(PROXY_URL_VAR))
            .unwrap_or_else(|| DEFAULT_PROXY_URL.to_string());
        Ok(ClientConfig {
            proxy_url,
            timeout: resolve_timeout(self.timeout)?,
        })
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn resolve_timeout(explicit: Option<Duration>) -> Result<Duration> {
    if let Some(timeout) = explicit {
        return Ok(timeout);
    }
    match env_var(TIMEOUT_VAR) {
        Some(raw) => parse_timeout(&raw),
        None => Ok(DEFAULT_TIMEOUT),
    }
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(Error::ConfigurationError(format!(
            "{TIMEOUT_VAR} must be a positive number of seconds, got {raw:?}"
        ))),
    }
}
