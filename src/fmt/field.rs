//! The closed set of temporal fields the engine knows how to print and parse.

/// A named temporal field with an integer value range and a printing-width flag.
///
/// Unlike a full chronology, this registry only records what the formatting engine
/// itself needs: the range used for bounds checks and fraction scaling, and whether
/// the field is always printed at a fixed width (which matters for
/// [subsequent-width parsing](super::node)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Field {
    /// The proleptic year, e.g. `2012` or `-5`.
    Year,
    /// The year-of-era. This engine has no notion of era/BC-AD splits, so this
    /// is presently an alias of [`Field::Year`] sourced the same way.
    YearOfEra,
    /// Month of the year, `1..=12`.
    MonthOfYear,
    /// Quarter of the year, `1..=4`.
    QuarterOfYear,
    /// Day of the month, `1..=31`.
    DayOfMonth,
    /// Day of the year, `1..=366`.
    DayOfYear,
    /// Aligned day-of-week within the month, `1..=7`.
    AlignedDayOfWeekInMonth,
    /// Hour of the day, `0..=23`.
    HourOfDay,
    /// Clock hour of the day, `1..=24`.
    ClockHourOfDay,
    /// Hour of the am-pm period, `0..=11`.
    HourOfAmPm,
    /// Clock hour of the am-pm period, `1..=12`.
    ClockHourOfAmPm,
    /// Minute of the hour, `0..=59`.
    MinuteOfHour,
    /// Second of the minute, `0..=60` (60 only ever occurs as a leap second).
    SecondOfMinute,
    /// Nanosecond of the second, `0..=999_999_999`.
    NanoOfSecond,
    /// Millisecond of the day, `0..=86_399_999`.
    MilliOfDay,
    /// Nanosecond of the day, `0..=86_399_999_999_999`.
    NanoOfDay,
    /// The offset from UTC, in seconds. Used internally by [`Node::Offset`](super::node::Node::Offset).
    OffsetSeconds,
}

impl Field {
    /// Returns the inclusive `[min, max]` range of values this field may hold.
    #[must_use]
    pub const fn range(&self) -> (i64, i64) {
        match self {
            Field::Year | Field::YearOfEra => (i16::MIN as i64, i16::MAX as i64),
            Field::MonthOfYear => (1, 12),
            Field::QuarterOfYear => (1, 4),
            Field::DayOfMonth => (1, 31),
            Field::DayOfYear => (1, 366),
            Field::AlignedDayOfWeekInMonth => (1, 7),
            Field::HourOfDay => (0, 23),
            Field::ClockHourOfDay => (1, 24),
            Field::HourOfAmPm => (0, 11),
            Field::ClockHourOfAmPm => (1, 12),
            Field::MinuteOfHour => (0, 59),
            Field::SecondOfMinute => (0, 60),
            Field::NanoOfSecond => (0, 999_999_999),
            Field::MilliOfDay => (0, 86_399_999),
            Field::NanoOfDay => (0, 86_399_999_999_999),
            Field::OffsetSeconds => (-86400, 86400),
        }
    }

    /// Returns `true` if this field is always printed at a fixed width, i.e. its
    /// range cannot require more digits in one instance than another at the same
    /// declared width. This is what makes a field eligible to sit inside
    /// [`Node::Fraction`](super::node::Node::Fraction).
    #[must_use]
    pub const fn has_fixed_range(&self) -> bool {
        matches!(
            self,
            Field::NanoOfSecond | Field::MilliOfDay | Field::NanoOfDay | Field::SecondOfMinute | Field::MinuteOfHour
        )
    }

    /// A short, stable, human-readable name used in error messages and `toString`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Field::Year => "Year",
            Field::YearOfEra => "YearOfEra",
            Field::MonthOfYear => "MonthOfYear",
            Field::QuarterOfYear => "QuarterOfYear",
            Field::DayOfMonth => "DayOfMonth",
            Field::DayOfYear => "DayOfYear",
            Field::AlignedDayOfWeekInMonth => "AlignedDayOfWeekInMonth",
            Field::HourOfDay => "HourOfDay",
            Field::ClockHourOfDay => "ClockHourOfDay",
            Field::HourOfAmPm => "HourOfAmPm",
            Field::ClockHourOfAmPm => "ClockHourOfAmPm",
            Field::MinuteOfHour => "MinuteOfHour",
            Field::SecondOfMinute => "SecondOfMinute",
            Field::NanoOfSecond => "NanoOfSecond",
            Field::MilliOfDay => "MilliOfDay",
            Field::NanoOfDay => "NanoOfDay",
            Field::OffsetSeconds => "OffsetSeconds",
        }
    }
}

impl core::fmt::Display for Field {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
