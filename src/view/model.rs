use serde_json::Value;

use crate::clients::entities::{AlbumInfo, AlbumSummary, ArtistInfo};
use crate::view::bio::{self, Link};
use crate::view::duration::{format_duration, total_duration};
use crate::view::year::{Clock, ReleaseYear, release_year};
use crate::view::NOT_AVAILABLE;

/// Display-ready content of the artist panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistView {
    /// Artist name.
    pub name: String,
    /// Biography text with markup removed.
    pub bio_text: String,
    /// Sanitized bio elements with hardened anchors; safe to embed as HTML.
    pub bio_markup: String,
    /// Anchors found in `bio_markup`.
    pub bio_links: Vec<Link>,
    /// Album names in upstream ranking order.
    pub albums: Vec<String>,
}

impl ArtistView {
    /// Build from the `artist.getinfo` and `artist.gettopalbums` payloads.
    pub fn from_payloads(artist: &Value, top_albums: &Value) -> Self {
        let info = ArtistInfo::from_payload(artist);
        let biography = bio::format_biography(&info.biography);
        let bio_markup = bio::harden_links(&biography.markup);
        ArtistView {
            name: info.name,
            bio_text: biography.plain_text,
            bio_links: bio::links(&bio_markup),
            bio_markup,
            albums: AlbumSummary::list_from_payload(top_albums)
                .into_iter()
                .map(|a| a.name)
                .collect(),
        }
    }
}

/// One tracklist row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRow {
    /// `@attr.rank`, or `N/A`.
    pub rank: String,
    /// Track title.
    pub title: String,
    /// Formatted length.
    pub duration: String,
}

/// Display-ready content of the album panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumView {
    /// Artist credited on the album.
    pub artist: String,
    /// Album title.
    pub name: String,
    /// Extra-large cover URL, when present.
    pub cover: Option<String>,
    /// Year guessed from tags.
    pub release: ReleaseYear,
    /// Rows in upstream order.
    pub tracks: Vec<TrackRow>,
    /// Formatted sum of all track lengths.
    pub total_runtime: String,
}

impl AlbumView {
    /// Build from an `album.getinfo` payload.
    pub fn from_payload(payload: &Value, clock: &dyn Clock) -> Self {
        let album = AlbumInfo::from_payload(payload);
        let total = total_duration(&album.tracks);
        let tracks = album
            .tracks
            .iter()
            .map(|track| TrackRow {
                rank: track.rank.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                title: track.name.clone(),
                duration: format_duration(track.duration),
            })
            .collect();
        AlbumView {
            release: release_year(&album.tags, clock),
            artist: album.artist,
            name: album.name,
            cover: album.cover,
            tracks,
            total_runtime: format_duration(Some(total)),
        }
    }
}
