use gold_dashboard_wasm::domain::formatting::{
    format_currency, format_number, format_percentage, format_signed_currency, to_fixed,
};
use chrono::{FixedOffset, Utc};
use gold_dashboard_wasm::time_utils::{format_time_of_day, format_time_of_day_in};
use quickcheck_macros::quickcheck;

#[test]
fn currency_groups_and_pads() {
    assert_eq!(format_currency(1234.5), "$1,234.50");
    assert_eq!(format_currency(0.0), "$0.00");
    assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
    assert_eq!(format_currency(-42.125), "-$42.13");
}

#[test]
fn signed_currency_marks_gains() {
    assert_eq!(format_signed_currency(12.5), "+$12.50");
    assert_eq!(format_signed_currency(0.0), "+$0.00");
    assert_eq!(format_signed_currency(-3.2), "-$3.20");
}

#[test]
fn percentage_has_two_decimals() {
    assert_eq!(format_percentage(12.3), "12.30%");
    assert_eq!(format_percentage(-0.5), "-0.50%");
}

#[test]
fn number_rounds_half_away_from_zero() {
    assert_eq!(format_number(1.005, 2), "1.01");
    assert_eq!(format_number(2.5, 0), "3");
    assert_eq!(format_number(12345.678, 1), "12,345.7");
}

#[test]
fn fixed_has_no_grouping() {
    assert_eq!(to_fixed(1234.5, 2), "1234.50");
    assert_eq!(to_fixed(1799.0, 0), "1799");
}

#[test]
fn fixed_tick_labels_round_like_stored_floats() {
    assert_eq!(to_fixed(1.005, 2), "1.00");
    assert_eq!(to_fixed(1799.125, 2), "1799.13");
    assert_eq!(to_fixed(1799.5, 0), "1800");
}

#[test]
fn time_of_day_labels() {
    assert_eq!(format_time_of_day("2024-01-15T14:30:00"), "2:30:00 PM");
    assert_eq!(format_time_of_day_in("2024-01-15T00:05:09.123Z", &Utc), "12:05:09 AM");
    assert_eq!(format_time_of_day_in("2024-01-15T12:00:00+02:00", &Utc), "10:00:00 AM");
    assert_eq!(format_time_of_day("not a date"), "Invalid Date");
}

#[test]
fn zoned_timestamps_convert_to_the_viewer_zone() {
    let new_york = FixedOffset::west_opt(5 * 3600).unwrap();
    assert_eq!(format_time_of_day_in("2024-01-15T14:30:00Z", &new_york), "9:30:00 AM");
    assert_eq!(format_time_of_day_in("2024-01-15T14:30:00+05:00", &new_york), "4:30:00 AM");
    assert_eq!(format_time_of_day_in("2024-01-15T14:30:00", &new_york), "2:30:00 PM");
}

#[quickcheck]
fn currency_always_has_two_decimals(cents: i32) -> bool {
    let value = f64::from(cents) / 100.0;
    let text = format_currency(value);
    let digits = text.rsplit('.').next().map(str::len);
    text.contains('$') && digits == Some(2)
}

#[quickcheck]
fn grouping_strips_back_to_fixed(value: u32) -> bool {
    let value = f64::from(value);
    format_number(value, 0).replace(',', "") == to_fixed(value, 0)
}
