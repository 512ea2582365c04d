use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::error::TelemetryError;

/// Absolute UTC instant. Feed epochs are turned into one by [`parse_epoch`].
pub type Timestamp = DateTime<Utc>;

/// Parses a feed epoch of the form `YYYY-DDDTHH:MM:SS.sssZ`.
///
/// Day-of-year is 1-indexed. Hours, minutes and seconds are applied as plain
/// offsets from midnight, so leap seconds are not represented.
pub fn parse_epoch(epoch: &str) -> Result<Timestamp, TelemetryError> {
    let err = |reason: &str| TelemetryError::format(epoch, reason);

    let body = epoch
        .strip_suffix('Z')
        .ok_or_else(|| err("missing trailing 'Z'"))?;
    let (year, rest) = split_exact(body, '-').ok_or_else(|| err("expected YYYY-DDD"))?;
    let (day_of_year, time) = split_exact(rest, 'T').ok_or_else(|| err("expected DDDTHH:MM:SS"))?;

    let fields: Vec<&str> = time.split(':').collect();
    let [hour, minute, second] = fields.as_slice() else {
        return Err(err("expected HH:MM:SS"));
    };

    let year = parse_unsigned(year).ok_or_else(|| err("year is not a number"))?;
    let day_of_year = parse_unsigned(day_of_year).ok_or_else(|| err("day of year is not a number"))?;
    let hour = parse_unsigned(hour).ok_or_else(|| err("hour is not a number"))?;
    let minute = parse_unsigned(minute).ok_or_else(|| err("minute is not a number"))?;
    let second = parse_seconds(second).ok_or_else(|| err("second is not a number"))?;

    if day_of_year < 1 {
        return Err(err("day of year starts at 1"));
    }

    let year = i32::try_from(year).map_err(|_| err("year out of range"))?;
    let start_of_year = NaiveDate::from_yo_opt(year, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| err("year out of range"))?
        .and_utc();

    let offset = Duration::try_days(day_of_year - 1)
        .zip(Duration::try_hours(hour))
        .zip(Duration::try_minutes(minute))
        .zip(seconds_to_duration(second))
        .and_then(|(((d, h), m), s)| d.checked_add(&h)?.checked_add(&m)?.checked_add(&s))
        .ok_or_else(|| err("offset out of range"))?;

    start_of_year
        .checked_add_signed(offset)
        .ok_or_else(|| err("offset out of range"))
}

/// Splits on the single occurrence of `sep`; fails when it is absent or repeated.
fn split_exact(s: &str, sep: char) -> Option<(&str, &str)> {
    s.split_once(sep).filter(|(_, rest)| !rest.contains(sep))
}

fn parse_unsigned(field: &str) -> Option<i64> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

fn parse_seconds(field: &str) -> Option<f64> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return None;
    }
    field.parse::<f64>().ok().filter(|s| s.is_finite())
}

/// `None` when the nanosecond count does not fit in an `i64`.
fn seconds_to_duration(second: f64) -> Option<Duration> {
    let nanos = (second * 1e9).round();
    (nanos < i64::MAX as f64).then(|| Duration::nanoseconds(nanos as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_mid_february() {
        let parsed = parse_epoch("2024-047T12:00:00.000Z").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 2, 16, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_day_one_is_january_first() {
        let parsed = parse_epoch("2023-001T00:00:00.000Z").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_leap_year_day_numbering() {
        assert_eq!(
            parse_epoch("2024-060T00:00:00.000Z").unwrap(),
            Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap()
        );
        assert_eq!(
            parse_epoch("2023-060T00:00:00.000Z").unwrap(),
            Utc.with_ymd_and_hms(2023, 3, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            parse_epoch("2024-366T23:59:59.000Z").unwrap(),
            Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap()
        );
    }

    #[test]
    fn test_fractional_seconds_are_kept() {
        let parsed = parse_epoch("2024-067T08:28:04.250Z").unwrap();
        let whole = Utc.with_ymd_and_hms(2024, 3, 7, 8, 28, 4).unwrap();
        assert_eq!(parsed - whole, Duration::milliseconds(250));
    }

    #[test]
    fn test_seconds_past_sixty_carry_over() {
        assert_eq!(
            parse_epoch("2024-067T08:28:90.000Z").unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 7, 8, 29, 30).unwrap()
        );
    }

    #[test]
    fn test_parse_is_repeatable() {
        let epoch = "2024-067T08:28:00.000Z";
        assert_eq!(parse_epoch(epoch).unwrap(), parse_epoch(epoch).unwrap());
    }

    #[test]
    fn test_rejects_malformed_epochs() {
        let bad = [
            "",
            "2024-067T08:28:00.000",
            "2024-067 08:28:00.000Z",
            "2024-03-07T08:28:00.000Z",
            "2024-067T08:28Z",
            "2024-067T08:28:00:00Z",
            "2024-abcT08:28:00.000Z",
            "2024-067T08:xx:00.000Z",
            "2024-067T08:28:-1.0Z",
            "2024-000T08:28:00.000Z",
            "2024-067T08:28:99999999999999999999999.0Z",
            "2024-067T08:28:9300000000.0Z",
        ];
        for epoch in bad {
            assert!(
                matches!(parse_epoch(epoch), Err(TelemetryError::Format { .. })),
                "{epoch:?} should be rejected"
            );
        }
    }
}
