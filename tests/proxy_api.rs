use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use lastfm_explorer::action::Action;
use lastfm_explorer::clients::errors::{Error, Result};
use lastfm_explorer::clients::{Upstream, UpstreamCall, UpstreamReply};
use lastfm_explorer::server::{ProxyState, router};
use lastfm_explorer::view::{AlbumView, FixedClock, render};
use parking_lot::Mutex;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Records calls and answers with a canned reply.
struct CannedUpstream {
    reply: Option<UpstreamReply>,
    calls: Mutex<Vec<(String, UpstreamCall)>>,
}

impl CannedUpstream {
    fn new(status: u16, body: &str) -> Arc<Self> {
        Arc::new(CannedUpstream {
            reply: Some(UpstreamReply {
                status,
                body: body.to_string(),
            }),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn unreachable() -> Arc<Self> {
        Arc::new(CannedUpstream {
            reply: None,
            calls: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl Upstream for CannedUpstream {
    async fn call(&self, api_key: &str, call: &UpstreamCall) -> Result<UpstreamReply> {
        self.calls.lock().push((api_key.to_string(), call.clone()));
        self.reply
            .clone()
            .ok_or_else(|| Error::ConfigurationError("connection refused".into()))
    }
}

async fn send(
    upstream: Arc<CannedUpstream>,
    key: Option<&str>,
    method: &str,
    uri: &str,
) -> (StatusCode, axum::http::HeaderMap, String) {
    let app = router(ProxyState::new(key.map(str::to_string), upstream));
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

fn json_of(body: &str) -> Value {
    serde_json::from_str(body).unwrap()
}

#[tokio::test]
async fn preflight_returns_no_content() {
    let upstream = CannedUpstream::new(200, "{}");
    let (status, headers, body) = send(upstream.clone(), None, "OPTIONS", "/api").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert!(body.is_empty());
    assert!(upstream.calls.lock().is_empty());
}

#[tokio::test]
async fn missing_key_is_server_error() {
    let upstream = CannedUpstream::new(200, "{}");
    let (status, _, body) = send(upstream, None, "GET", "/api?action=artistinfo&artist=Cher").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_of(&body), json!({"error": "API key missing"}));
}

#[tokio::test]
async fn non_get_is_not_allowed() {
    let upstream = CannedUpstream::new(200, "{}");
    let (status, headers, _) = send(upstream, Some("key"), "POST", "/api?action=artistinfo").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
}

#[tokio::test]
async fn unknown_action_is_rejected_without_forwarding() {
    let upstream = CannedUpstream::new(200, "{}");
    let (status, _, body) = send(upstream.clone(), Some("key"), "GET", "/api?action=user.getinfo&artist=Cher").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_of(&body), json!({"error": "Unknown action"}));
    assert!(upstream.calls.lock().is_empty());

    let (status, _, _) = send(upstream.clone(), Some("key"), "GET", "/api?artist=Cher").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(upstream.calls.lock().is_empty());
}

#[tokio::test]
async fn malformed_query_is_json_with_cors() {
    let upstream = CannedUpstream::new(200, "{}");
    let (status, headers, body) = send(upstream.clone(), Some("key"), "GET", "/api?action=a&action=b").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    assert_eq!(json_of(&body), json!({"error": "Invalid query"}));
    assert!(upstream.calls.lock().is_empty());

    let (status, _, _) = send(upstream, None, "OPTIONS", "/api?action=a&action=b").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn success_is_passed_through_with_cors() {
    let payload = r#"{"artist":{"name":"Cher","bio":{"content":"Singer."}}}"#;
    let upstream = CannedUpstream::new(200, payload);
    let (status, headers, body) = send(upstream.clone(), Some("secret"), "GET", "/api?action=artistInfo&artist=Cher").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, payload);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");

    let calls = upstream.calls.lock();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "secret");
    assert_eq!(calls[0].1.action, Action::ArtistInfo);
    assert_eq!(calls[0].1.artist, "Cher");
}

#[tokio::test]
async fn album_parameters_are_forwarded() {
    let upstream = CannedUpstream::new(200, r#"{"album":{}}"#);
    let (status, _, _) = send(upstream.clone(), Some("k"), "GET", "/api?action=albuminfo&artist=Cher&album=Believe%20Deluxe").await;
    assert_eq!(status, StatusCode::OK);
    let calls = upstream.calls.lock();
    assert_eq!(calls[0].1.action, Action::AlbumInfo);
    assert_eq!(calls[0].1.album, "Believe Deluxe");
}

#[tokio::test]
async fn upstream_error_field_is_bad_gateway() {
    let upstream = CannedUpstream::new(200, r#"{"error":6,"message":"Artist not found"}"#);
    let (status, _, body) = send(upstream, Some("k"), "GET", "/api?action=artistinfo&artist=Nobody").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json_of(&body)["upstreamError"]["error"], json!(6));
}

#[tokio::test]
async fn invalid_upstream_json_keeps_status() {
    let upstream = CannedUpstream::new(500, "Internal Server Error");
    let (status, _, body) = send(upstream, Some("k"), "GET", "/api?action=artistalbums&artist=Cher").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_of(&body), json!({"error": "Invalid json"}));
}

#[tokio::test]
async fn unreachable_upstream_is_server_error() {
    let (status, _, body) = send(CannedUpstream::unreachable(), Some("k"), "GET", "/api?action=artistinfo&artist=Cher").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_of(&body), json!({"error": "Server error"}));
}

#[tokio::test]
async fn proxied_album_renders_tracklist() {
    let payload = json!({"album": {
        "artist": "Cher",
        "name": "Believe",
        "tracks": {"track": [
            {"name": "Believe", "duration": 125, "@attr": {"rank": 1}},
            {"name": "The Power", "duration": null, "@attr": {"rank": 2}}
        ]}
    }})
    .to_string();
    let upstream = CannedUpstream::new(200, &payload);
    let (status, _, body) = send(upstream, Some("k"), "GET", "/api?action=albuminfo&artist=Cher&album=Believe").await;
    assert_eq!(status, StatusCode::OK);

    let view = AlbumView::from_payload(&json_of(&body), &FixedClock(2026));
    let table = render::tracklist(&view);
    let lines: Vec<&str> = table.lines().collect();
    assert!(lines[1].ends_with("2:05"));
    assert!(lines[2].ends_with("N/A"));
    assert!(lines[3].starts_with("Total runtime") && lines[3].ends_with("2:05"));
}
