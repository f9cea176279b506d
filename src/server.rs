//! The `/api` proxy: injects the Last.fm API key and forwards one of the
//! whitelisted actions, passing the JSON answer through.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{HeaderName, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::any,
};
use log::{debug, error, info, warn};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::action::Action;
use crate::clients::entities::is_truthy;
use crate::clients::errors::Result;
use crate::clients::upstream::{LastFmUpstream, Upstream, UpstreamCall, UpstreamReply};
use crate::config::ProxyConfig;

/// Shared handler state.
#[derive(Clone)]
pub struct ProxyState {
    api_key: Option<Arc<str>>,
    upstream: Arc<dyn Upstream>,
}

impl ProxyState {
    /// State forwarding to `upstream`. A blank key is treated as missing.
    pub fn new(api_key: Option<String>, upstream: Arc<dyn Upstream>) -> Self {
        ProxyState {
            api_key: api_key.filter(|k| !k.is_empty()).map(Arc::from),
            upstream,
        }
    }
}

/// Query parameters of `/api`.
#[derive(Debug, Default, Deserialize)]
pub struct ApiParams {
    action: Option<String>,
    artist: Option<String>,
    album: Option<String>,
}

/// The `/api` route, any method.
pub fn router(state: ProxyState) -> Router {
    Router::new().route("/api", any(api)).with_state(state)
}

/// Bind and serve until Ctrl-C.
pub async fn serve(config: ProxyConfig) -> Result<()> {
    if config.api_key.is_none() {
        warn!("LASTFM_API_KEY is not set, every request will fail with 500");
    }
    let upstream = LastFmUpstream::new(config.api_url.clone(), config.timeout)?;
    let state = ProxyState::new(config.api_key, Arc::new(upstream));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Proxy listening on http://{}/api", config.bind_addr);
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Proxy stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
    }
}

async fn api(
    State(state): State<ProxyState>,
    method: Method,
    params: std::result::Result<Query<ApiParams>, QueryRejection>,
) -> Response {
    if method == Method::OPTIONS {
        return (StatusCode::NO_CONTENT, cors_headers()).into_response();
    }
    let Some(api_key) = state.api_key.as_deref() else {
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "API key missing");
    };
    if method != Method::GET {
        return error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed");
    }
    let Query(params) = match params {
        Ok(params) => params,
        Err(e) => {
            debug!("Rejecting query: {e}");
            return error_response(StatusCode::BAD_REQUEST, "Invalid query");
        }
    };

    let action = match Action::parse(params.action.as_deref().unwrap_or_default()) {
        Ok(action) => action,
        Err(e) => {
            debug!("Rejecting request: {e}");
            return error_response(StatusCode::BAD_REQUEST, "Unknown action");
        }
    };
    let call = UpstreamCall {
        action,
        artist: params.artist.unwrap_or_default(),
        album: params.album.unwrap_or_default(),
    };

    match state.upstream.call(api_key, &call).await {
        Ok(reply) => {
            let (status, body) = interpret(&reply);
            if !status.is_success() {
                warn!("Upstream {} failed with {status}", action.upstream_method());
            }
            json_response(status, body)
        }
        Err(e) => {
            error!("Upstream request for {action} failed: {e}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
        }
    }
}

/// Map an upstream answer to the status and body the proxy returns.
pub fn interpret(reply: &UpstreamReply) -> (StatusCode, String) {
    let upstream_status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::BAD_GATEWAY);
    let Ok(data) = serde_json::from_str::<Value>(&reply.body) else {
        return (upstream_status, error_body("Invalid json"));
    };

    let ok = upstream_status.is_success();
    // Last.fm sometimes reports failures with a 200 and an `error` code in the body
    if !ok || data.get("error").is_some_and(is_truthy) {
        let status = if ok {
            StatusCode::BAD_GATEWAY
        } else {
            upstream_status
        };
        return (status, json!({ "upstreamError": data }).to_string());
    }
    (StatusCode::OK, reply.body.clone())
}

fn cors_headers() -> [(HeaderName, &'static str); 3] {
    [
        (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        (header::ACCESS_CONTROL_ALLOW_METHODS, "GET, OPTIONS"),
        (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
    ]
}

fn error_body(message: &str) -> String {
    json!({ "error": message }).to_string()
}

fn error_response(status: StatusCode, message: &str) -> Response {
    json_response(status, error_body(message))
}

fn json_response(status: StatusCode, body: String) -> Response {
    (
        status,
        cors_headers(),
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}
