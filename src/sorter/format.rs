use chrono::{DateTime, Local, TimeZone};
use std::fmt;

const SIZE_UNITS: [&str; 6] = ["Bytes", "KB", "MB", "GB", "TB", "PB"];
const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Human-readable size using 1024-based units, e.g. `1.5 KB`
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let formatted = format!("{:.2}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, SIZE_UNITS[unit])
}

/// Relative description of `timestamp` (ms since epoch) as seen from now
pub fn format_date_relative(timestamp: i64) -> String {
    format_date_relative_at(timestamp, &Local::now())
}

/// Relative description of `timestamp` as seen from `now`
pub fn format_date_relative_at<Tz: TimeZone>(timestamp: i64, now: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    let elapsed = now.timestamp_millis() - timestamp;

    if elapsed >= 0 {
        match elapsed / MILLIS_PER_DAY {
            0 => return "Today".to_string(),
            1 => return "Yesterday".to_string(),
            days @ 2..=6 => return format!("{} days ago", days),
            _ => {}
        }
    }

    match now.timezone().timestamp_millis_opt(timestamp).single() {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => "Unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 Bytes");
        assert_eq!(format_size(512), "512 Bytes");
        assert_eq!(format_size(1024), "1 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1024 * 1024), "1 MB");
        assert_eq!(format_size(5 * 1024 * 1024 * 1024), "5 GB");
        assert_eq!(format_size(1_234_567), "1.18 MB");
    }

    #[test]
    fn test_format_size_caps_at_petabytes() {
        let bytes = 2048u64 * 1024 * 1024 * 1024 * 1024 * 1024;
        assert_eq!(format_size(bytes), "2048 PB");
    }

    #[test]
    fn test_format_date_relative_buckets() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();
        let ts = |d: DateTime<Utc>| d.timestamp_millis();

        assert_eq!(format_date_relative_at(ts(now), &now), "Today");
        assert_eq!(
            format_date_relative_at(ts(now - chrono::Duration::hours(30)), &now),
            "Yesterday"
        );
        assert_eq!(
            format_date_relative_at(ts(now - chrono::Duration::days(4)), &now),
            "4 days ago"
        );
        assert_eq!(
            format_date_relative_at(ts(now - chrono::Duration::days(30)), &now),
            "2026-02-08"
        );
    }

    #[test]
    fn test_format_date_relative_future() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();
        let future = Utc.with_ymd_and_hms(2026, 4, 1, 0, 0, 0).unwrap();

        assert_eq!(
            format_date_relative_at(future.timestamp_millis(), &now),
            "2026-04-01"
        );
    }
}
