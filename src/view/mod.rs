//! Turns raw Last.fm payloads into display-ready values.
//!
//! Nothing in here fails: malformed or partial payloads degrade to empty text,
//! empty lists and the [`NOT_AVAILABLE`] sentinel.

/// Biography sanitization and text extraction
pub mod bio;
/// Track length formatting
pub mod duration;
/// Artist and album view models
pub mod model;
/// Plain-text rendering of view regions
pub mod render;
/// Release year heuristics
pub mod year;

/// Display string for unknown or invalid values.
pub const NOT_AVAILABLE: &str = "N/A";

pub use bio::{Biography, format_biography, harden_links};
pub use duration::{format_duration, total_duration};
pub use model::{AlbumView, ArtistView, TrackRow};
pub use year::{Clock, FixedClock, ReleaseYear, SystemClock, year_from_tags};
