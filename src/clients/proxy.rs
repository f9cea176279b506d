use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use serde_json::Value;

use crate::action::ActionRequest;
use crate::clients::errors::{Error, Result};
use crate::explorer::MetadataSource;

/// Client for the `/api` proxy endpoint.
pub struct ProxyClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ProxyClient {
    /// Client for `endpoint` with a per-request timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;
        Ok(ProxyClient {
            http,
            endpoint: endpoint.into(),
        })
    }

    /// Run one action through the proxy. Any non-2xx status or a body that is
    /// not JSON counts as a failed fetch.
    pub async fn get(&self, request: &ActionRequest) -> Result<Value> {
        debug!(
            "GET {} action={} artist={:?} album={:?}",
            self.endpoint, request.action, request.artist, request.album
        );
        let response = self
            .http
            .get(&self.endpoint)
            .query(&request.query_pairs())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::ProxyStatus {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl MetadataSource for ProxyClient {
    async fn fetch(&self, request: &ActionRequest) -> Result<Value> {
        self.get(request).await
    }
}
