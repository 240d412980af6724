//! Day-granularity date helpers.
//!
//! Entries are identified by calendar day only, so every date coming from a
//! user is normalized to midnight UTC of that day.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::{FlexError, ResultFlex};

/// Layout used for every human-facing date.
pub const SHORT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` string into midnight UTC of that day.
pub fn parse_day(value: &str) -> ResultFlex<DateTime<FixedOffset>> {
    let day = NaiveDate::parse_from_str(value.trim(), SHORT_DATE_FORMAT)
        .map_err(|err| FlexError::InvalidDate(format!("{value}: {err}")))?;
    Ok(start_of_day(day))
}

/// Midnight UTC of the current local calendar day.
#[must_use]
pub fn today() -> DateTime<FixedOffset> {
    start_of_day(Local::now().date_naive())
}

#[must_use]
pub fn format_day(date: &DateTime<FixedOffset>) -> String {
    date.format(SHORT_DATE_FORMAT).to_string()
}

fn start_of_day(day: NaiveDate) -> DateTime<FixedOffset> {
    Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN))
        .fixed_offset()
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn parse_day_yields_midnight_utc() {
        let date = parse_day("2021-12-03").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2021, 12, 3));
        assert_eq!(date.hour(), 0);
        assert_eq!(date.offset().local_minus_utc(), 0);
        assert_eq!(format_day(&date), "2021-12-03");
    }

    #[test]
    fn parse_day_rejects_garbage() {
        assert!(matches!(
            parse_day("03.12.2021"),
            Err(FlexError::InvalidDate(_))
        ));
        assert!(parse_day("2021-13-01").is_err());
    }

    #[test]
    fn today_is_day_aligned() {
        let date = today();
        assert_eq!(date.num_seconds_from_midnight(), 0);
    }
}
