//! Release year lookup.
//!
//! Last.fm has no structured release date, so the year is guessed from the
//! album's free-text tags: the first tag that is exactly four digits and falls
//! between 1900 and next year wins. This is a best-effort approximation; a tag
//! like "1984" on a 2003 album will be reported as 1984.

use std::fmt;

use chrono::Datelike;
use serde_json::Value;

use crate::clients::entities::Tag;
use crate::view::NOT_AVAILABLE;

/// Earliest year accepted as a release year.
pub const MIN_RELEASE_YEAR: i32 = 1900;

/// Source of the current calendar year.
pub trait Clock: Send + Sync {
    /// Current calendar year.
    fn current_year(&self) -> i32;
}

/// Reads the local calendar year from the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_year(&self) -> i32 {
        chrono::Local::now().year()
    }
}

/// Always reports the same year.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i32);

impl Clock for FixedClock {
    fn current_year(&self) -> i32 {
        self.0
    }
}

/// A release year, or unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseYear {
    /// A plausible four-digit year.
    Year(i32),
    /// No tag looked like a year.
    Unknown,
}

impl fmt::Display for ReleaseYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseYear::Year(year) => write!(f, "{year}"),
            ReleaseYear::Unknown => f.write_str(NOT_AVAILABLE),
        }
    }
}

/// Find the release year in a raw `tags.tag` value (list, single tag or absent).
pub fn year_from_tags(raw: Option<&Value>, clock: &dyn Clock) -> ReleaseYear {
    release_year(&Tag::list_from_value(raw), clock)
}

/// First tag, in order, that parses as a plausible release year.
pub fn release_year(tags: &[Tag], clock: &dyn Clock) -> ReleaseYear {
    let max_year = clock.current_year() + 1;
    tags.iter()
        .find_map(|tag| parse_year(&tag.name, max_year))
        .map_or(ReleaseYear::Unknown, ReleaseYear::Year)
}

fn parse_year(name: &str, max_year: i32) -> Option<i32> {
    let name = name.trim();
    if name.len() != 4 || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = name.parse().ok()?;
    (MIN_RELEASE_YEAR..=max_year).contains(&year).then_some(year)
}
