use std::time::Duration;

use async_trait::async_trait;
use log::debug;

use crate::action::Action;
use crate::clients::errors::Result;

/// Default Last.fm web service root.
pub const LASTFM_API_URL: &str = "https://ws.audioscrobbler.com/2.0/";

/// Raw answer from the upstream API, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamReply {
    /// HTTP status code.
    pub status: u16,
    /// Body text, unparsed.
    pub body: String,
}

/// Parameters forwarded to Last.fm for one proxied call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamCall {
    /// Lookup being forwarded.
    pub action: Action,
    /// Artist name, possibly empty.
    pub artist: String,
    /// Album name; only sent for `album.getinfo`.
    pub album: String,
}

impl UpstreamCall {
    /// Query string pairs, without the API key.
    pub fn params(&self) -> Vec<(&'static str, &str)> {
        let mut params = vec![
            ("format", "json"),
            ("method", self.action.upstream_method()),
            ("artist", self.artist.as_str()),
        ];
        if self.action == Action::AlbumInfo {
            params.push(("album", self.album.as_str()));
        }
        params
    }
}

/// The service the proxy forwards to.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Forward one call with the given API key.
    async fn call(&self, api_key: &str, call: &UpstreamCall) -> Result<UpstreamReply>;
}

/// Last.fm over HTTPS.
pub struct LastFmUpstream {
    http: reqwest::Client,
    base_url: String,
}

impl LastFmUpstream {
    /// Client rooted at `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;
        Ok(LastFmUpstream {
            http,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl Upstream for LastFmUpstream {
    async fn call(&self, api_key: &str, call: &UpstreamCall) -> Result<UpstreamReply> {
        debug!("Calling {} for {:?}", call.action.upstream_method(), call.artist);
        let response = self
            .http
            .get(&self.base_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&[("api_key", api_key)])
            .query(&call.params())
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(UpstreamReply { status, body })
    }
}
