use crate::error::{feed_error, ImportResult};
use chrono::{Duration, NaiveDateTime};

/// Format used when persisting timestamps to the record store
pub const STORE_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Normalized times for one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventTimes {
    pub start_local: NaiveDateTime,
    pub end_local: NaiveDateTime,
    pub start_utc: NaiveDateTime,
    pub end_utc: NaiveDateTime,
}

impl EventTimes {
    /// Compute local and UTC times from the feed's datetime and offset strings
    pub fn from_feed(
        start: Option<&str>,
        start_offset: Option<&str>,
        end: Option<&str>,
        end_offset: Option<&str>,
    ) -> ImportResult<Self> {
        let start_local = parse_feed_datetime(
            start.ok_or_else(|| feed_error("Event has no start datetime"))?,
        )?;
        let end_local =
            parse_feed_datetime(end.ok_or_else(|| feed_error("Event has no end datetime"))?)?;

        let start_offset = offset_seconds(
            start_offset.ok_or_else(|| feed_error("Event has no start timezone offset"))?,
        )?;
        let end_offset = offset_seconds(
            end_offset.ok_or_else(|| feed_error("Event has no end timezone offset"))?,
        )?;

        Ok(Self {
            start_local,
            end_local,
            start_utc: start_local - Duration::seconds(start_offset),
            end_utc: end_local - Duration::seconds(end_offset),
        })
    }
}

/// Parse the feed's naive local datetime, e.g. "2024-05-01T10:00:00"
pub fn parse_feed_datetime(value: &str) -> ImportResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .map_err(|e| feed_error(&format!("Failed to parse datetime {:?}: {}", value, e)))
}

/// Convert a feed offset in hundredths of hours (e.g. "-0500") to seconds.
/// One hundredth of an hour is 36 seconds.
pub fn offset_seconds(value: &str) -> ImportResult<i64> {
    let hundredths = value
        .trim()
        .parse::<i64>()
        .map_err(|e| feed_error(&format!("Failed to parse offset {:?}: {}", value, e)))?;
    Ok(hundredths * 36)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_seconds() {
        assert_eq!(offset_seconds("-0500").unwrap(), -18_000);
        assert_eq!(offset_seconds("+0530").unwrap(), 19_080);
        assert_eq!(offset_seconds("0000").unwrap(), 0);
        assert!(offset_seconds("EST").is_err());
    }

    #[test]
    fn test_parse_feed_datetime() {
        let dt = parse_feed_datetime("2024-05-01T10:00:00").unwrap();
        assert_eq!(dt.format(STORE_DATETIME_FORMAT).to_string(), "2024-05-01 10:00:00");
        assert!(parse_feed_datetime("2024-05-01").is_err());
    }

    #[test]
    fn test_utc_conversion() {
        let times = EventTimes::from_feed(
            Some("2024-05-01T10:00:00"),
            Some("-0500"),
            Some("2024-05-01T12:00:00"),
            Some("-0500"),
        )
        .unwrap();
        assert_eq!(
            times.start_utc.format(STORE_DATETIME_FORMAT).to_string(),
            "2024-05-01 15:00:00"
        );
        assert_eq!(
            times.end_utc.format(STORE_DATETIME_FORMAT).to_string(),
            "2024-05-01 17:00:00"
        );
    }

    #[test]
    fn test_missing_start_is_an_error() {
        let result = EventTimes::from_feed(None, Some("-0500"), Some("2024-05-01T12:00:00"), Some("-0500"));
        assert!(result.is_err());
    }
}
