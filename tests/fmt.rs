use chronofmt::fmt::{self, Builder, Field, ParsePosition, ResolverStyle, SignStyle};
use chronofmt::{Date, Time};

#[test]
fn iso_local_date_formats_and_parses() {
    let dt = Date::new(2012, 6, 30).unwrap().at(Time::MIDNIGHT);
    assert_eq!(fmt::ISO_LOCAL_DATE.format(&dt).unwrap(), "2012-06-30");

    let resolved = fmt::ISO_LOCAL_DATE.parse("2012-06-30").unwrap();
    assert_eq!(resolved.date, Some(Date::new(2012, 6, 30).unwrap()));
}

#[test]
fn adjacent_value_parsing_absorbs_leading_zero() {
    let mut builder = Builder::new();
    builder
        .append_value_range(Field::MonthOfYear, 1, 2, SignStyle::Normal)
        .unwrap()
        .append_value(Field::DayOfMonth, 2)
        .unwrap();
    let formatter = builder.to_formatter(ResolverStyle::Smart).unwrap();

    let mut pos = ParsePosition::new(0);
    let resolved = formatter.parse_unresolved("123", &mut pos).unwrap();
    assert_eq!(resolved.date, None); // parse_unresolved does not resolve
    assert_eq!(pos.index(), 3);

    let resolved = formatter.parse("123").unwrap();
    assert_eq!(resolved.date.unwrap().month(), 1);
    assert_eq!(resolved.date.unwrap().day(), 23);

    let resolved = formatter.parse("0123").unwrap();
    assert_eq!(resolved.date.unwrap().month(), 1);
    assert_eq!(resolved.date.unwrap().day(), 23);
}

#[test]
fn subsequent_width_stops_at_trailing_literal() {
    // Value(Month,1,2) Value(Day,2) Literal('4'): the adjacent-value scan is
    // bounded by maxWidth(2) + fixedWidth(2) = 4 digits, so it never reaches
    // into the trailing literal even though "01234" alone is all digits.
    let mut builder = Builder::new();
    builder
        .append_value_range(Field::MonthOfYear, 1, 2, SignStyle::Normal)
        .unwrap()
        .append_value(Field::DayOfMonth, 2)
        .unwrap()
        .append_literal("4");
    let formatter = builder.to_formatter(ResolverStyle::Smart).unwrap();

    let resolved = formatter.parse("01234").unwrap();
    assert_eq!(resolved.date.unwrap().month(), 1);
    assert_eq!(resolved.date.unwrap().day(), 23);
}

#[test]
fn exceeds_pad_year_with_fixed_month_day() {
    let mut builder = Builder::new();
    builder
        .append_value_range(Field::Year, 4, 10, SignStyle::ExceedsPad)
        .unwrap()
        .append_value(Field::MonthOfYear, 2)
        .unwrap()
        .append_value(Field::DayOfMonth, 2)
        .unwrap();
    let formatter = builder.to_formatter(ResolverStyle::Smart).unwrap();

    let resolved = formatter.parse("20090630").unwrap();
    let date = resolved.date.unwrap();
    assert_eq!(date.year(), 2009);
    assert_eq!(date.month(), 6);
    assert_eq!(date.day(), 30);
}

#[test]
fn reduced_value_window() {
    let mut builder = Builder::new();
    builder.append_value_reduced(Field::Year, 2, 2, 2000).unwrap();
    let formatter = builder.to_formatter(ResolverStyle::Smart).unwrap();

    assert_eq!(formatter.parse("12").unwrap().date.unwrap().year(), 2012);
    assert_eq!(formatter.parse("99").unwrap().date.unwrap().year(), 2099);

    let mut builder = Builder::new();
    builder.append_value_reduced(Field::Year, 2, 2, 1950).unwrap();
    let formatter = builder.to_formatter(ResolverStyle::Smart).unwrap();
    assert_eq!(formatter.parse("12").unwrap().date.unwrap().year(), 2012);
    assert_eq!(formatter.parse("49").unwrap().date.unwrap().year(), 2049);
    assert_eq!(formatter.parse("50").unwrap().date.unwrap().year(), 1950);
}

#[test]
fn optional_groups_parse_progressively_shorter_inputs() {
    let formatter = chronofmt::pattern!("uuuu[-MM[-dd]]");

    assert_eq!(
        formatter.to_pattern_string(),
        "Value(Year,4,15,ExceedsPad)['-'Value(MonthOfYear,2)['-'Value(DayOfMonth,2)]]"
    );

    let d = formatter.parse("2012").unwrap().date.unwrap();
    assert_eq!((d.year(), d.month(), d.day()), (2012, 1, 1));

    let d = formatter.parse("2012-06").unwrap().date.unwrap();
    assert_eq!((d.year(), d.month(), d.day()), (2012, 6, 1));

    let d = formatter.parse("2012-06-30").unwrap().date.unwrap();
    assert_eq!((d.year(), d.month(), d.day()), (2012, 6, 30));
}

#[test]
fn optional_group_failure_does_not_surface() {
    let mut builder = Builder::new();
    builder
        .append_literal("A")
        .optional_start()
        .append_literal("B")
        .optional_end()
        .unwrap();
    let formatter = builder.to_formatter(ResolverStyle::Smart).unwrap();

    let mut pos = ParsePosition::new(0);
    formatter.parse_unresolved("A", &mut pos).unwrap();
    assert_eq!(pos.index(), 1);
    assert_eq!(pos.error_index(), -1);

    let mut pos = ParsePosition::new(0);
    formatter.parse_unresolved("AB", &mut pos).unwrap();
    assert_eq!(pos.index(), 2);
}

#[test]
fn parse_unresolved_resumes_from_caller_supplied_position() {
    let mut builder = Builder::new();
    builder
        .append_value(Field::MonthOfYear, 2)
        .unwrap()
        .append_value(Field::DayOfMonth, 2)
        .unwrap();
    let formatter = builder.to_formatter(ResolverStyle::Smart).unwrap();

    // starting at index 5 (past "2012-") matches "06" then "23", ignoring the prefix
    let mut pos = ParsePosition::new(5);
    let resolved = formatter.parse_unresolved("2012-0623", &mut pos).unwrap();
    assert_eq!(resolved.offset, None);
    assert_eq!(pos.index(), 9);

    // an error leaves the starting index untouched but records where it failed
    let mut pos = ParsePosition::new(5);
    formatter.parse_unresolved("2012-06A3", &mut pos).unwrap_err();
    assert_eq!(pos.index(), 5);
    assert_eq!(pos.error_index(), 7);
}

#[test]
fn round_trip_through_format_and_parse() {
    let dt = Date::new(2022, 1, 23).unwrap().at(Time::new(18, 20, 30).unwrap());
    let formatter = chronofmt::pattern!("uuuu-MM-dd'T'HH:mm:ss");

    let text = formatter.format(&dt).unwrap();
    assert_eq!(text, "2022-01-23T18:20:30");

    let resolved = formatter.parse(&text).unwrap();
    assert_eq!(resolved.date.unwrap(), dt.date());
    assert_eq!(resolved.time.unwrap(), dt.time());
}

#[test]
fn unparsed_trailing_text_is_an_error() {
    let formatter = chronofmt::pattern!("uuuu-MM-dd");
    let err = formatter.parse("2012-06-30 extra").unwrap_err();
    assert_eq!(err.index(), 10);
}

#[test]
fn strict_resolver_rejects_invalid_month() {
    let formatter = chronofmt::pattern!("uuuu-MM-dd").with_resolver_style(ResolverStyle::Strict);
    assert!(formatter.parse("2012-13-01").is_err());
}

#[test]
fn lenient_hour_24_surfaces_excess_day() {
    let mut builder = Builder::new();
    builder
        .append_value(Field::ClockHourOfDay, 2)
        .unwrap()
        .append_literal(":")
        .append_value(Field::MinuteOfHour, 2)
        .unwrap();
    let formatter = builder
        .to_formatter(ResolverStyle::Smart)
        .unwrap()
        .with_resolver_style(ResolverStyle::Lenient);

    let resolved = formatter.parse("24:00").unwrap();
    assert_eq!(resolved.time.unwrap(), Time::MIDNIGHT);
    assert_eq!(resolved.excess_days, Some(1));
}

#[test]
fn lenient_leap_second_normalizes_to_59() {
    let formatter = chronofmt::pattern!("HH:mm:ss").with_resolver_style(ResolverStyle::Lenient);
    let resolved = formatter.parse("23:59:60").unwrap();
    assert_eq!(resolved.time.unwrap().second(), 59);
    assert!(resolved.leap_second_seen);
}

#[test]
fn offset_id_prints_z_for_zero_and_numeric_otherwise() {
    use chronofmt::{Utc, UtcOffset};

    let mut builder = Builder::new();
    builder.append_offset_id();
    let formatter = builder.to_formatter(ResolverStyle::Smart).unwrap();

    let dt = Date::new(2022, 1, 23).unwrap().at(Time::MIDNIGHT).with_timezone(Utc);
    assert_eq!(formatter.format(&dt).unwrap(), "Z");

    let offset = UtcOffset::from_hms(1, 0, 0).unwrap();
    let dt = Date::new(2022, 1, 23).unwrap().at(Time::MIDNIGHT).with_timezone(offset);
    assert_eq!(formatter.format(&dt).unwrap(), "+01:00");
}

#[test]
fn builder_misuse_is_rejected() {
    let mut builder = Builder::new();
    assert!(builder.append_value(Field::MonthOfYear, 0).is_err());
    assert!(builder.append_value_range(Field::Year, 5, 2, SignStyle::Normal).is_err());
    assert!(builder.append_value_range(Field::Year, 1, 16, SignStyle::Normal).is_err());

    let mut builder = Builder::new();
    assert_eq!(
        builder.optional_end().unwrap_err(),
        fmt::BuilderError::UnmatchedOptionalEnd
    );

    // an unmatched optional_start is not an error: to_formatter auto-closes it,
    // as if a trailing optional_end() had been called.
    let mut builder = Builder::new();
    builder.optional_start();
    assert!(builder.to_formatter(ResolverStyle::Smart).is_ok());
}

#[test]
fn pattern_errors_are_reported() {
    assert!(fmt::Formatter::from_pattern("'unterminated").is_err());
    assert!(fmt::Formatter::from_pattern("MMMMMM").is_err());
    assert!(fmt::Formatter::from_pattern("]").is_err());
}

#[test]
fn unclosed_optional_bracket_is_auto_closed() {
    // "[uuuu" compiles successfully; the trailing optional group is implicitly
    // closed at to_formatter(), matching "2012" with the bracketed year optional.
    let formatter = fmt::Formatter::from_pattern("[uuuu]").unwrap();
    assert!(formatter.parse("2012").is_ok());

    let formatter = fmt::Formatter::from_pattern("[uuuu").unwrap();
    assert!(formatter.parse("2012").is_ok());
    assert!(formatter.parse("").is_ok());
}
