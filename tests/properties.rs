//! Property-based tests for the "for all inputs" invariants: round-trip, idempotent
//! builder, optional soundness, position contract, and the reduced-value window.

use chronofmt::fmt::{self, Builder, Field, ParsePosition, ResolverStyle, SignStyle};
use chronofmt::{gregorian, Date, Time};
use quickcheck_macros::quickcheck;

fn clamp_date(year: i16, month_seed: u8, day_seed: u8) -> Date {
    let year = year.clamp(1, 9999);
    let month = (month_seed % 12) + 1;
    let max_day = gregorian::days_in_month(year, month);
    let day = (day_seed % max_day) + 1;
    Date::new(year, month, day).expect("clamped components are always valid")
}

#[quickcheck]
fn round_trip_iso_local_date(year: i16, month_seed: u8, day_seed: u8) -> bool {
    let date = clamp_date(year, month_seed, day_seed);
    let temporal = date.at(Time::MIDNIGHT);
    let text = fmt::ISO_LOCAL_DATE.format(&temporal).unwrap();
    let resolved = fmt::ISO_LOCAL_DATE.parse(&text).unwrap();
    resolved.date == Some(date)
}

#[quickcheck]
fn round_trip_through_pattern(year: i16, month_seed: u8, day_seed: u8, hour: u8, minute: u8, second: u8) -> bool {
    let date = clamp_date(year, month_seed, day_seed);
    let time = Time::new(hour % 24, minute % 60, second % 60).unwrap();
    let temporal = date.at(time);
    let formatter = chronofmt::pattern!("uuuu-MM-dd'T'HH:mm:ss");

    let text = formatter.format(&temporal).unwrap();
    let resolved = formatter.parse(&text).unwrap();
    resolved.date == Some(date) && resolved.time == Some(time)
}

fn build_month_day(builder: &mut Builder, day_width: u8) {
    builder
        .append_value_range(Field::MonthOfYear, 1, 2, SignStyle::Normal)
        .unwrap()
        .append_literal("-")
        .append_value(Field::DayOfMonth, day_width)
        .unwrap();
}

#[quickcheck]
fn idempotent_builder_to_pattern_string(width_seed: u8) -> bool {
    let day_width = (width_seed % 4) + 1;

    let mut a = Builder::new();
    build_month_day(&mut a, day_width);
    let a = a.to_formatter(ResolverStyle::Smart).unwrap();

    let mut b = Builder::new();
    build_month_day(&mut b, day_width);
    let b = b.to_formatter(ResolverStyle::Smart).unwrap();

    a.to_pattern_string() == b.to_pattern_string()
}

#[quickcheck]
fn optional_soundness(month_seed: u8, day_seed: u8) -> bool {
    let month = (month_seed % 12) + 1;
    let day = (day_seed % 28) + 1;
    let prefix = format!("{month:02}");
    let full = format!("{prefix}-{day:02}");

    let mut a_builder = Builder::new();
    a_builder.append_value(Field::MonthOfYear, 2).unwrap();
    let a = a_builder.to_formatter(ResolverStyle::Smart).unwrap();

    let mut ab_builder = Builder::new();
    ab_builder
        .append_value(Field::MonthOfYear, 2)
        .unwrap()
        .append_literal("-")
        .append_value(Field::DayOfMonth, 2)
        .unwrap();
    let ab = ab_builder.to_formatter(ResolverStyle::Smart).unwrap();

    let mut optional_builder = Builder::new();
    optional_builder
        .append_value(Field::MonthOfYear, 2)
        .unwrap()
        .optional_start()
        .append_literal("-")
        .append_value(Field::DayOfMonth, 2)
        .unwrap()
        .optional_end()
        .unwrap();
    let a_optional_b = optional_builder.to_formatter(ResolverStyle::Smart).unwrap();

    let ab_parses_full = ab.parse(&full).is_ok();
    let a_parses_prefix = a.parse(&prefix).is_ok();
    let optional_parses_full = a_optional_b.parse(&full).is_ok();
    let optional_parses_prefix = a_optional_b.parse(&prefix).is_ok();

    ab_parses_full == optional_parses_full && a_parses_prefix == optional_parses_prefix
}

#[quickcheck]
fn position_contract_on_success(month_seed: u8) -> bool {
    let month = (month_seed % 12) + 1;
    let text = format!("{month:02}");

    let mut builder = Builder::new();
    builder.append_value(Field::MonthOfYear, 2).unwrap();
    let formatter = builder.to_formatter(ResolverStyle::Smart).unwrap();

    let mut pos = ParsePosition::new(0);
    formatter.parse_unresolved(&text, &mut pos).unwrap();
    pos.index() == text.len() && pos.error_index() == -1
}

#[quickcheck]
fn position_contract_on_failure(garbage: char) -> bool {
    if garbage.is_ascii_digit() {
        return true;
    }
    let mut text = String::new();
    text.push(garbage);

    let mut builder = Builder::new();
    builder.append_value(Field::MonthOfYear, 2).unwrap();
    let formatter = builder.to_formatter(ResolverStyle::Smart).unwrap();

    let mut pos = ParsePosition::new(0);
    let err = formatter.parse_unresolved(&text, &mut pos);
    err.is_err() && pos.index() == 0 && pos.error_index() >= 0
}

#[quickcheck]
fn reduced_value_window(base: i16, width_seed: u8, digits_seed: u16) -> bool {
    let width = (width_seed % 4) + 1; // keep widths small so 10^width fits comfortably
    let base = i64::from(base.clamp(-10_000, 10_000)); // keeps base+10^width within i16::MAX
    let modulus = 10i64.pow(u32::from(width));
    let digits = (i64::from(digits_seed)).rem_euclid(modulus);
    let text = format!("{digits:0width$}", width = width as usize);

    let mut builder = Builder::new();
    builder.append_value_reduced(Field::Year, width, width, base).unwrap();
    let formatter = builder.to_formatter(ResolverStyle::Smart).unwrap();

    let resolved = formatter.parse(&text).unwrap();
    let year = i64::from(resolved.date.unwrap().year());
    year >= base && year < base + modulus
}
