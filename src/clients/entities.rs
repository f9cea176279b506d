//! Typed views over Last.fm JSON payloads.
//!
//! Last.fm answers with loosely shaped JSON: a list of one element is often sent
//! as a bare object, numbers arrive as strings, and whole sub-objects may be
//! missing. Every constructor here checks each field and never fails; absent
//! data becomes an empty string, an empty list or `None`.

use serde_json::Value;

/// Index into `album.image` of the `extralarge` variant.
pub const COVER_IMAGE_INDEX: usize = 3;

/// Apply the one-or-many rule: arrays pass through (shallow), `null` or absence
/// becomes empty, any other value becomes a one-element list.
pub fn normalize_list(raw: Option<&Value>) -> Vec<&Value> {
    match raw {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().collect(),
        Some(single) => vec![single],
    }
}

/// Normalize the `tracks.track` field of an album into tracks, keeping upstream order.
pub fn normalize_tracks(raw: Option<&Value>) -> Vec<Track> {
    normalize_list(raw).into_iter().map(Track::from_value).collect()
}

/// JavaScript truthiness, which Last.fm clients traditionally rely on.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Coerce a scalar to text; `null` and absence become the empty string.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        Some(other) => other.to_string(),
    }
}

/// Coerce a value to a number. Values that are not numeric become `NaN`.
pub(crate) fn number(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .unwrap_or(f64::NAN)
            }
        }
        Some(Value::Bool(b)) => f64::from(u8::from(*b)),
        Some(Value::Null) => 0.0,
        _ => f64::NAN,
    }
}

fn field<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |v, key| v.get(key))
}

/// Basic artist information from `artist.getinfo`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArtistInfo {
    /// Artist name as Last.fm spells it.
    pub name: String,
    /// Raw HTML-bearing biography. Untrusted until sanitized.
    pub biography: String,
}

impl ArtistInfo {
    /// Read from the full `artist.getinfo` payload (`{"artist": {...}}`).
    pub fn from_payload(payload: &Value) -> Self {
        let artist = payload.get("artist").unwrap_or(&Value::Null);
        ArtistInfo {
            name: text(artist.get("name")),
            biography: text(field(artist, &["bio", "content"])),
        }
    }
}

/// One entry of an artist's top albums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumSummary {
    /// Album title.
    pub name: String,
}

impl AlbumSummary {
    /// Read the ranked album list from an `artist.gettopalbums` payload.
    pub fn list_from_payload(payload: &Value) -> Vec<Self> {
        normalize_list(field(payload, &["topalbums", "album"]))
            .into_iter()
            .map(|album| AlbumSummary {
                name: text(album.get("name")),
            })
            .collect()
    }
}

/// A free-text tag attached to an album.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Tag text, as entered by users.
    pub name: String,
}

impl Tag {
    /// Normalize the `tags.tag` field. Unlike tracks, any falsy value
    /// (`false`, `0`, `""`, `null`) yields no tags.
    pub fn list_from_value(raw: Option<&Value>) -> Vec<Self> {
        let tags: Vec<&Value> = match raw {
            Some(Value::Array(items)) => items.iter().collect(),
            Some(single) if is_truthy(single) => vec![single],
            _ => Vec::new(),
        };
        tags.into_iter()
            .map(|tag| Tag {
                name: text(tag.get("name")),
            })
            .collect()
    }
}

/// A single album track.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Track title.
    pub name: String,
    /// Length in seconds. `None` only when upstream sent an explicit `null`;
    /// absent or non-numeric values are kept as `NaN` and display as zero.
    pub duration: Option<f64>,
    /// 1-based rank from `@attr.rank`. Not necessarily the position in the list.
    pub rank: Option<String>,
}

impl Track {
    /// Read one entry of `tracks.track`.
    pub fn from_value(value: &Value) -> Self {
        let duration = match value.get("duration") {
            Some(Value::Null) => None,
            None => Some(f64::NAN),
            raw => Some(number(raw)),
        };
        let rank = Some(text(field(value, &["@attr", "rank"]))).filter(|r| !r.is_empty());
        Track {
            name: text(value.get("name")),
            duration,
            rank,
        }
    }
}

/// Album details from `album.getinfo`.
#[derive(Debug, Clone, PartialEq)]
pub struct AlbumInfo {
    /// Artist credited on the album.
    pub artist: String,
    /// Album title.
    pub name: String,
    /// Extra-large cover URL; `None` when missing or blank.
    pub cover: Option<String>,
    /// Free-text tags in upstream order.
    pub tags: Vec<Tag>,
    /// Tracks in upstream order.
    pub tracks: Vec<Track>,
}

impl AlbumInfo {
    /// Read from the full `album.getinfo` payload (`{"album": {...}}`).
    pub fn from_payload(payload: &Value) -> Self {
        let album = payload.get("album").unwrap_or(&Value::Null);
        let cover = album
            .get("image")
            .and_then(|images| images.get(COVER_IMAGE_INDEX))
            .map(|image| text(image.get("#text")))
            .filter(|url| !url.trim().is_empty());
        AlbumInfo {
            artist: text(album.get("artist")),
            name: text(album.get("name")),
            cover,
            tags: Tag::list_from_value(field(album, &["tags", "tag"])),
            tracks: normalize_tracks(field(album, &["tracks", "track"])),
        }
    }
}
