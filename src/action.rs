//! Logical proxy actions and their mapping onto Last.fm API methods.

use std::fmt;

use crate::clients::errors::{Error, Result};

/// One of the three read-only lookups the proxy is willing to forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// `artist.getinfo`
    ArtistInfo,
    /// `artist.gettopalbums`
    ArtistAlbums,
    /// `album.getinfo`
    AlbumInfo,
}

impl Action {
    /// Parse an action name, ignoring ASCII case. Anything else is an unknown action.
    pub fn parse(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "artistinfo" => Ok(Action::ArtistInfo),
            "artistalbums" => Ok(Action::ArtistAlbums),
            "albuminfo" => Ok(Action::AlbumInfo),
            _ => Err(Error::UnknownAction(name.to_string())),
        }
    }

    /// Name used in the `action` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            Action::ArtistInfo => "artistInfo",
            Action::ArtistAlbums => "artistAlbums",
            Action::AlbumInfo => "albumInfo",
        }
    }

    /// Last.fm method this action forwards to.
    pub fn upstream_method(self) -> &'static str {
        match self {
            Action::ArtistInfo => "artist.getinfo",
            Action::ArtistAlbums => "artist.gettopalbums",
            Action::AlbumInfo => "album.getinfo",
        }
    }

    /// Query parameters that must be non-blank.
    pub fn required_params(self) -> &'static [&'static str] {
        match self {
            Action::ArtistInfo | Action::ArtistAlbums => &["artist"],
            Action::AlbumInfo => &["artist", "album"],
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated request for one action, ready to be sent to the proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    /// Lookup to run.
    pub action: Action,
    /// Trimmed artist name, never empty.
    pub artist: String,
    /// Trimmed album name, set only for album lookups.
    pub album: Option<String>,
}

impl ActionRequest {
    /// `artistInfo` for one artist.
    pub fn artist_info(artist: &str) -> Result<Self> {
        Self::new(Action::ArtistInfo, artist, None)
    }

    /// `artistAlbums` for one artist.
    pub fn artist_albums(artist: &str) -> Result<Self> {
        Self::new(Action::ArtistAlbums, artist, None)
    }

    /// `albumInfo` for one album.
    pub fn album_info(artist: &str, album: &str) -> Result<Self> {
        Self::new(Action::AlbumInfo, artist, Some(album))
    }

    /// Build a request, trimming parameters and rejecting the ones the action needs but lacks.
    pub fn new(action: Action, artist: &str, album: Option<&str>) -> Result<Self> {
        let artist = artist.trim();
        if artist.is_empty() {
            return Err(Error::MissingParameter("artist"));
        }
        let album = album.map(str::trim).filter(|a| !a.is_empty());
        if action.required_params().contains(&"album") && album.is_none() {
            return Err(Error::MissingParameter("album"));
        }
        Ok(ActionRequest {
            action,
            artist: artist.to_string(),
            // Only album.getinfo takes an album parameter
            album: match action {
                Action::AlbumInfo => album.map(str::to_string),
                _ => None,
            },
        })
    }

    /// Query pairs in the order the proxy expects them.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![("action", self.action.as_str()), ("artist", self.artist.as_str())];
        if let Some(album) = &self.album {
            pairs.push(("album", album.as_str()));
        }
        pairs
    }
}
