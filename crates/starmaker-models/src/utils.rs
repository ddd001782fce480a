//! Small helpers shared by the clients.

use chrono::Utc;

/// Integer division rounding up. Returns 0 when `divisor` is 0.
pub fn ceil_div(value: u32, divisor: u32) -> u32 {
    if divisor == 0 {
        return 0;
    }
    value.div_ceil(divisor)
}

/// Count whitespace-separated words.
pub fn word_count(text: &str) -> u32 {
    text.split_whitespace().count() as u32
}

/// Current Unix time in milliseconds.
///
/// Used for the opaque, timestamp-derived ids of simulated resources.
pub fn unix_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Treat missing, empty and whitespace-only values as absent.
///
/// Used when reading credentials: a blank key means simulation mode.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Format a duration in seconds as `m:ss`.
pub fn format_duration(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceil_div() {
        assert_eq!(ceil_div(0, 60), 0);
        assert_eq!(ceil_div(1, 60), 1);
        assert_eq!(ceil_div(60, 60), 1);
        assert_eq!(ceil_div(61, 60), 2);
        assert_eq!(ceil_div(10, 0), 0);
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
        assert_eq!(word_count("one two\nthree\tfour"), 4);
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some("".into())), None);
        assert_eq!(non_blank(Some("  ".into())), None);
        assert_eq!(non_blank(Some(" sk-123 ".into())), Some("sk-123".to_string()));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(5), "0:05");
        assert_eq!(format_duration(65), "1:05");
        assert_eq!(format_duration(600), "10:00");
    }
}
