//! Lastfm-explorer - Browse Last.fm artists and albums through a key-injecting proxy
//!
//! The library turns the loosely shaped JSON Last.fm returns into sanitized,
//! display-ready view models, and provides both the proxy that holds the API
//! key and the client that talks to it.

/// Logical proxy actions
pub mod action;
/// Client modules for the proxy and the Last.fm web service
pub mod clients;
/// Environment configuration
pub mod config;
/// Artist and album panels with independent loading
pub mod explorer;
/// Generation-checked display regions
pub mod regions;
/// The `/api` proxy server
pub mod server;
/// Payload normalization and rendering
pub mod view;
