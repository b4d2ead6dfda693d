use chronofmt::fmt::{Builder, Field, ResolverStyle, SignStyle};
use chronofmt::{Date, Time};

// Shows both ways to build a formatter: a hand-assembled tree, and a compiled
// letter pattern, printing the same date-time both ways.

fn main() {
    let dt = Date::new(2022, 1, 23).unwrap().at(Time::new(18, 20, 30).unwrap());

    let mut builder = Builder::new();
    builder
        .append_value_range(Field::Year, 4, 4, SignStyle::ExceedsPad)
        .unwrap()
        .append_literal("-")
        .append_value(Field::MonthOfYear, 2)
        .unwrap()
        .append_literal("-")
        .append_value(Field::DayOfMonth, 2)
        .unwrap()
        .append_literal("T")
        .append_value(Field::HourOfDay, 2)
        .unwrap()
        .append_literal(":")
        .append_value(Field::MinuteOfHour, 2)
        .unwrap()
        .append_literal(":")
        .append_value(Field::SecondOfMinute, 2)
        .unwrap();
    let hand_built = builder.to_formatter(ResolverStyle::Smart).unwrap();
    println!("{}", hand_built.format(&dt).unwrap());

    let compiled = chronofmt::pattern!("uuuu-MM-dd'T'HH:mm:ss");
    println!("{}", compiled.format(&dt).unwrap());

    println!("{}", chronofmt::fmt::ISO_OFFSET_DATE_TIME.format(&dt).unwrap());
}
