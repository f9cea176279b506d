use crate::clients::entities::Track;
use crate::view::NOT_AVAILABLE;

/// Format a length in seconds as `M:SS`, or `H:MM:SS` from one hour up.
///
/// `None` (an explicit upstream `null`) renders as `N/A`. `NaN`, infinities and
/// negative values are floored to zero, fractional seconds are truncated.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_duration(seconds: Option<f64>) -> String {
    let Some(seconds) = seconds else {
        return NOT_AVAILABLE.to_string();
    };
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let hours = total / 3600;
    let mins = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{hours}:{mins:02}:{secs:02}")
    } else {
        format!("{mins}:{secs:02}")
    }
}

/// Sum of all track lengths. Missing, `null` and non-numeric durations count as zero.
pub fn total_duration(tracks: &[Track]) -> f64 {
    tracks
        .iter()
        .filter_map(|t| t.duration)
        .filter(|d| !d.is_nan())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(duration: Option<f64>) -> Track {
        Track {
            name: "t".into(),
            duration,
            rank: None,
        }
    }

    #[test]
    fn null_is_not_available() {
        assert_eq!(format_duration(None), "N/A");
    }

    #[test]
    fn negative_and_nan_floor_at_zero() {
        assert_eq!(format_duration(Some(-5.0)), "0:00");
        assert_eq!(format_duration(Some(f64::NAN)), "0:00");
        assert_eq!(format_duration(Some(f64::INFINITY)), "0:00");
    }

    #[test]
    fn minutes_and_seconds() {
        assert_eq!(format_duration(Some(0.0)), "0:00");
        assert_eq!(format_duration(Some(61.0)), "1:01");
        assert_eq!(format_duration(Some(125.9)), "2:05");
        assert_eq!(format_duration(Some(3599.0)), "59:59");
    }

    #[test]
    fn hours_pad_minutes() {
        assert_eq!(format_duration(Some(3600.0)), "1:00:00");
        assert_eq!(format_duration(Some(3661.0)), "1:01:01");
        assert_eq!(format_duration(Some(36_000.0)), "10:00:00");
    }

    #[test]
    fn total_treats_null_and_junk_as_zero() {
        let tracks = [track(Some(125.0)), track(None), track(Some(f64::NAN)), track(Some(60.0))];
        assert_eq!(total_duration(&tracks), 185.0);
        assert_eq!(format_duration(Some(total_duration(&tracks))), "3:05");
    }

    #[test]
    fn total_of_nothing_is_zero() {
        assert_eq!(total_duration(&[]), 0.0);
    }
}
