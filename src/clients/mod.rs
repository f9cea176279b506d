/// Typed views over Last.fm payloads
pub mod entities;
/// Error types and result aliases
pub mod errors;
/// Client for the `/api` proxy endpoint
pub mod proxy;
/// Last.fm web service access used by the proxy
pub mod upstream;

pub use proxy::ProxyClient;
pub use upstream::{LastFmUpstream, Upstream, UpstreamCall, UpstreamReply};
