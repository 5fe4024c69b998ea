use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Timelike};

pub const INVALID_DATE: &str = "Invalid Date";

/// Offset-free date-time layouts accepted besides RFC 3339.
const NAIVE_LAYOUTS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Render an ISO-8601 timestamp as en-US `h:mm:ss AM` in the viewer's zone.
pub fn format_time_of_day(timestamp: &str) -> String {
    format_time_of_day_in(timestamp, &Local)
}

/// Same as [`format_time_of_day`], rendered in `tz`.
///
/// - `Z` / `±HH:MM` timestamps are converted into `tz`
/// - a bare date-time is wall time in `tz`
/// - a bare date is midnight UTC
///
/// Anything else yields `Invalid Date`.
pub fn format_time_of_day_in<Tz: TimeZone>(timestamp: &str, tz: &Tz) -> String {
    match parse_in(timestamp.trim(), tz) {
        Some(moment) => {
            let (pm, hour) = moment.hour12();
            let meridiem = if pm { "PM" } else { "AM" };
            format!("{}:{:02}:{:02} {}", hour, moment.minute(), moment.second(), meridiem)
        }
        None => INVALID_DATE.to_string(),
    }
}

fn parse_in<Tz: TimeZone>(timestamp: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    if let Ok(moment) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(moment.with_timezone(tz));
    }
    if let Some(naive) = NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(timestamp, layout).ok())
    {
        return tz.from_local_datetime(&naive).earliest();
    }
    let midnight = NaiveDate::parse_from_str(timestamp, "%Y-%m-%d").ok()?.and_hms_opt(0, 0, 0)?;
    Some(tz.from_utc_datetime(&midnight))
}

#[cfg(test)]
mod tests {
    use super::format_time_of_day_in;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn twelve_hour_clock_edges() {
        assert_eq!(format_time_of_day_in("2024-05-01T00:00:00", &Utc), "12:00:00 AM");
        assert_eq!(format_time_of_day_in("2024-05-01T12:30:05", &Utc), "12:30:05 PM");
        assert_eq!(format_time_of_day_in("2024-05-01T23:59:59", &Utc), "11:59:59 PM");
    }

    #[test]
    fn offsets_are_applied() {
        assert_eq!(format_time_of_day_in("2024-05-01T14:30:00Z", &Utc), "2:30:00 PM");
        assert_eq!(format_time_of_day_in("2024-05-01T14:30:00+05:00", &Utc), "9:30:00 AM");

        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(format_time_of_day_in("2024-05-01T14:30:00Z", &tokyo), "11:30:00 PM");
    }

    #[test]
    fn bare_values_are_local_wall_time_or_utc_midnight() {
        let minus_three = FixedOffset::west_opt(3 * 3600).unwrap();
        assert_eq!(format_time_of_day_in("2024-05-01T14:05:09.123456", &minus_three), "2:05:09 PM");
        assert_eq!(format_time_of_day_in("2024-05-01", &minus_three), "9:00:00 PM");
    }

    #[test]
    fn garbage_is_invalid_date() {
        assert_eq!(format_time_of_day_in("not a time", &Utc), "Invalid Date");
        assert_eq!(format_time_of_day_in("2024-13-01T10:00:00", &Utc), "Invalid Date");
        assert_eq!(format_time_of_day_in("2024-05-01T25:00:00", &Utc), "Invalid Date");
    }
}
