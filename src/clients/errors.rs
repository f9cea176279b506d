use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong talking to the proxy or Last.fm.
#[derive(Error, Debug)]
pub enum Error {
    /// Action name outside the three supported lookups.
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// A parameter the action needs was blank or absent.
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// Network, TLS or timeout failure.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx answer; `body` holds the first 200 characters.
    #[error("Proxy responded with status {status}: {body}")]
    ProxyStatus { status: u16, body: String },

    /// Body that is not valid JSON.
    #[error("Invalid JSON body: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Bad or unreadable environment settings.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl Error {
    /// Short label used when a view region shows this failure.
    pub fn region_message(&self) -> String {
        match self {
            Error::ProxyStatus { status, .. } => format!("request failed with status {status}"),
            Error::Transport(e) if e.is_timeout() => "request timed out".to_string(),
            Error::Transport(_) => "network error".to_string(),
            Error::InvalidJson(_) => "malformed response".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<std::env::VarError> for Error {
    fn from(err: std::env::VarError) -> Self {
        Error::ConfigurationError(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::ConfigurationError(err.to_string())
    }
}
