//! Display helpers shared by the activity and summary views.

use chrono::{DateTime, Local, Utc};

/// Format a second count as `HH:MM:SS`. Hours are not wrapped.
pub fn format_elapsed(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds / 60) % 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Format a timestamp as a 12-hour wall clock time in the local zone,
/// e.g. `07:05 PM`.
pub fn format_clock_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_elapsed_pads_fields() {
        assert_eq!(format_elapsed(0), "00:00:00");
        assert_eq!(format_elapsed(100), "00:01:40");
        assert_eq!(format_elapsed(3661), "01:01:01");
    }

    #[test]
    fn format_elapsed_keeps_long_hours() {
        assert_eq!(format_elapsed(100 * 3600), "100:00:00");
    }

    #[test]
    fn format_clock_time_is_twelve_hour() {
        let s = format_clock_time(Utc::now());
        assert_eq!(s.len(), 8);
        assert!(s.ends_with("AM") || s.ends_with("PM"));
    }
}
