/// Mint date formatting for the detail dialog
///
/// Produces strings like `1/1/23 at 12:00 AM` in the local timezone.
use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};

/// Shown when the timestamp cannot be parsed
pub const INVALID_DATE: &str = "Invalid Date";

/// Format an indexer timestamp as `M/D/YY at H:MM AM|PM`.
///
/// Timestamps carrying an offset are converted to local time, as are bare
/// dates, which count as midnight UTC. Other timestamps without an offset
/// are read as local wall-clock time.
pub fn format_date(input: &str) -> String {
    match parse_local(input) {
        Some(dt) => format_datetime(&dt),
        None => INVALID_DATE.to_string(),
    }
}

/// Format any zoned datetime in its own timezone
pub fn format_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> String {
    let hour = dt.hour();
    format!(
        "{}/{}/{:02} at {}:{:02} {}",
        dt.month(),
        dt.day(),
        dt.year().rem_euclid(100),
        hour_12(hour),
        dt.minute(),
        meridiem(hour)
    )
}

fn parse_local(input: &str) -> Option<DateTime<Local>> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Local));
    }

    // A bare date is midnight UTC, not local midnight
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0)?;
        return Some(Utc.from_utc_datetime(&midnight).with_timezone(&Local));
    }

    const NAIVE_FORMATS: [&str; 3] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
    ];
    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())?;

    // Wall-clock times skipped by a DST jump have no local mapping
    Local.from_local_datetime(&naive).earliest()
}

fn hour_12(hour: u32) -> u32 {
    match hour {
        0 => 12,
        13.. => hour - 12,
        _ => hour,
    }
}

fn meridiem(hour: u32) -> &'static str {
    if hour < 12 {
        "AM"
    } else {
        "PM"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn utc(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn test_midnight_is_twelve_am() {
        assert_eq!(format_datetime(&utc("2023-01-01T00:00:00+00:00")), "1/1/23 at 12:00 AM");
    }

    #[test]
    fn test_afternoon_hours() {
        assert_eq!(format_datetime(&utc("2023-07-04T13:05:00+00:00")), "7/4/23 at 1:05 PM");
        assert_eq!(format_datetime(&utc("2023-07-04T23:59:00+00:00")), "7/4/23 at 11:59 PM");
    }

    #[test]
    fn test_noon_stays_twelve_pm() {
        assert_eq!(format_datetime(&utc("2021-12-31T12:30:00+00:00")), "12/31/21 at 12:30 PM");
    }

    #[test]
    fn test_morning_keeps_hour() {
        assert_eq!(format_datetime(&utc("2009-03-09T09:07:00+00:00")), "3/9/09 at 9:07 AM");
    }

    #[test]
    fn test_naive_input_reads_as_local_wall_clock() {
        // No offset: the wall-clock fields survive regardless of the runner's timezone
        assert_eq!(format_date("2023-01-01T00:00:00"), "1/1/23 at 12:00 AM");
        assert_eq!(format_date("2023-01-01T13:45:00"), "1/1/23 at 1:45 PM");
    }

    #[test]
    fn test_offset_input_converts_to_local() {
        let expected = format_datetime(&utc("2023-05-05T18:20:00+00:00").with_timezone(&Local));
        assert_eq!(format_date("2023-05-05T18:20:00+00:00"), expected);
    }

    #[test]
    fn test_bare_date_is_utc_midnight() {
        let expected = format_datetime(&utc("2023-01-01T00:00:00+00:00").with_timezone(&Local));
        assert_eq!(format_date("2023-01-01"), expected);
    }

    #[test]
    fn test_garbage_is_invalid() {
        assert_eq!(format_date("not a date"), INVALID_DATE);
        assert_eq!(format_date(""), INVALID_DATE);
    }
}
