//! `dd.mm.yyyy` date strings and the epoch-second timestamps stored in the database.
//!
//! Calendar days are read as UTC days.

use crate::error::{FakturaError, Result};
use chrono::{NaiveDate, TimeZone, Utc};

pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Seconds from 00:00:00 to 23:59:59 of the same day.
pub const END_OF_DAY_OFFSET: i64 = 23 * 3600 + 59 * 60 + 59;

pub const SECONDS_PER_DAY: i64 = 86_400;

/// Start of the given day as an epoch timestamp
pub fn parse_date(input: &str) -> Result<i64> {
    let date = NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|source| {
        FakturaError::InvalidDate {
            input: input.to_string(),
            source,
        }
    })?;
    let midnight = date.and_time(chrono::NaiveTime::MIN);
    Ok(Utc.from_utc_datetime(&midnight).timestamp())
}

/// 23:59:59 of the given day as an epoch timestamp
pub fn parse_date_end_of_day(input: &str) -> Result<i64> {
    Ok(parse_date(input)? + END_OF_DAY_OFFSET)
}

pub fn format_date(timestamp: i64) -> Result<String> {
    let datetime = Utc
        .timestamp_opt(timestamp, 0)
        .single()
        .ok_or(FakturaError::TimestampOutOfRange(timestamp))?;
    Ok(datetime.format(DATE_FORMAT).to_string())
}

pub fn now() -> i64 {
    Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_date_string() {
        let ts = parse_date("01.01.1990").unwrap();
        assert_eq!(ts, 631_152_000);
        assert_eq!(format_date(ts).unwrap(), "01.01.1990");
    }

    #[test]
    fn end_of_day_is_last_second_of_day() {
        let start = parse_date("01.06.2024").unwrap();
        let end = parse_date_end_of_day("01.06.2024").unwrap();
        assert_eq!(end - start, SECONDS_PER_DAY - 1);
        assert_eq!(format_date(end).unwrap(), "01.06.2024");
        assert_eq!(format_date(end + 1).unwrap(), "02.06.2024");
    }

    #[test]
    fn rejects_malformed_dates() {
        let err = parse_date("2024-06-01").unwrap_err();
        assert!(matches!(err, FakturaError::InvalidDate { ref input, .. } if input == "2024-06-01"));
        assert!(parse_date("31.02.2024").is_err());
    }
}
