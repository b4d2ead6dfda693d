use crate::{
    gregorian::{
        date_from_epoch_days, date_to_epoch_days, date_to_ordinal, days_in_month, find_iso_week_start_epoch,
        is_leap_year, iso_week_start_epoch_from_year, iso_weeks_in_year, weekday_from_days,
    },
    utils::ensure_in_range_opt,
    DateTime, Time, Utc,
};

/// An enum representing the different weekdays.
///
/// Due to different orderings of weekdays, this type does not implement `PartialOrd` or `Ord`. Some
/// cultures place either Friday, Saturday, Sunday, or Monday as the first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Weekday {
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
    Sunday = 7,
}

impl Weekday {
    /// Returns the day of the week number starting from Monday. This is also known as the ISO weekday.
    #[inline]
    #[must_use]
    pub const fn number_from_monday(self) -> u8 {
        self as u8
    }

    /// Returns the day of the week number starting from Sunday.
    #[inline]
    #[must_use]
    pub const fn number_from_sunday(self) -> u8 {
        match self {
            Self::Monday => 2,
            Self::Tuesday => 3,
            Self::Wednesday => 4,
            Self::Thursday => 5,
            Self::Friday => 6,
            Self::Saturday => 7,
            Self::Sunday => 1,
        }
    }

    pub(crate) const fn from_number_from_monday(n: u8) -> Self {
        match n {
            1 => Self::Monday,
            2 => Self::Tuesday,
            3 => Self::Wednesday,
            4 => Self::Thursday,
            5 => Self::Friday,
            6 => Self::Saturday,
            _ => Self::Sunday,
        }
    }
}

/// A date in the [ISO 8601 week date system].
///
/// The ISO week date system is a commonly used variant of the Gregorian calendar, mainly
/// in financial systems and other forms of businesses that revolve around fiscal
/// years.
///
/// The ISO year is made up of either 52 or 53 weeks, where a week always starts on
/// Monday and always ends on Sunday even if the boundary would not make sense
/// in a traditional Gregorian calendar. The first week of an ISO year begins on
/// the Monday following the first Thursday, with the year being the same year
/// as that Thursday.
///
/// [ISO 8601 week date system]: https://en.wikipedia.org/wiki/ISO_week_date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IsoWeekDate {
    year: i16,
    week: u8,
    weekday: Weekday,
}

impl IsoWeekDate {
    /// Creates a new [`IsoWeekDate`] from the given year, week, and weekday.
    ///
    /// If the week is out of bounds for the given year (53 or higher) then
    /// [`None`] is returned.
    #[inline]
    pub const fn new(year: i16, week: u8, weekday: Weekday) -> Option<Self> {
        ensure_in_range_opt!(week, 1 => iso_weeks_in_year(year));
        Some(Self { year, week, weekday })
    }

    /// Returns the ISO year.
    ///
    /// Note that the ISO year might be different from the Gregorian year.
    #[inline]
    #[must_use]
    pub const fn year(&self) -> i16 {
        self.year
    }

    /// Returns the ISO week.
    ///
    /// This value will always be within `1..=53`.
    #[inline]
    #[must_use]
    pub const fn week(&self) -> u8 {
        self.week
    }

    /// Returns the ISO weekday.
    #[inline]
    #[must_use]
    pub const fn weekday(&self) -> Weekday {
        self.weekday
    }
}

impl PartialOrd for IsoWeekDate {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IsoWeekDate {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        match self.year.cmp(&other.year) {
            core::cmp::Ordering::Equal => {}
            ord => return ord,
        }
        match self.week.cmp(&other.week) {
            core::cmp::Ordering::Equal => {}
            ord => return ord,
        }
        self.weekday
            .number_from_monday()
            .cmp(&other.weekday.number_from_monday())
    }
}

/// A concrete date in the proleptic Gregorian calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    pub(crate) year: i16,
    pub(crate) month: u8,
    pub(crate) day: u8,
}

impl Date {
    /// A [`Date`] at the unix epoch (January 1st, 1970).
    pub const UNIX_EPOCH: Self = Self {
        year: 1970,
        month: 1,
        day: 1,
    };

    /// The minimum valid date.
    pub const MIN: Self = Self {
        year: i16::MIN,
        month: 1,
        day: 1,
    };

    /// The maximum valid date.
    pub const MAX: Self = Self {
        year: i16::MAX,
        month: 12,
        day: 31,
    };

    /// Creates a new [`Date`] from a given year, month, and day.
    ///
    /// The month must be between `1..=12` and the day must be between `1..=31`.
    /// Note that the day has to be valid for the specified month, i.e. February
    /// must be either 28 or 29 days depending on the year.
    ///
    /// # Examples
    ///
    /// ```
    /// # use eos::Date;
    /// # fn test() -> Option<()> {
    /// let date = Date::new(2003, 4, 19)?;
    /// assert_eq!(date.year(), 2003);
    /// assert_eq!(date.month(), 4);
    /// assert_eq!(date.day(), 19);
    /// # Some(())
    /// # }
    /// # test();
    /// ```
    #[inline]
    pub fn new(year: i16, month: u8, day: u8) -> Option<Self> {
        ensure_in_range_opt!(month, 1 => 12);
        ensure_in_range_opt!(day, 1 => days_in_month(year, month));
        Some(Self { year, month, day })
    }

    /// Combines this [`Date`] with a [`Time`] to create a [`DateTime`] in [`Utc`].
    #[inline]
    #[must_use]
    pub fn at(&self, time: Time) -> DateTime<Utc> {
        DateTime::new(*self, time, crate::UtcOffset::UTC, Utc)
    }

    /// Shifts this date by a number of whole days, which may be negative.
    pub(crate) const fn add_days(&self, days: i32) -> Self {
        let epoch = self.days_since_epoch() + days;
        let (year, month, day) = date_from_epoch_days(epoch);
        Self { year, month, day }
    }

    /// Returns the year.
    ///
    /// Note that year 0 is equivalent to 1 BC (or BCE) and year 1 is equivalent
    /// to 1 AD (or CE).
    #[inline]
    #[must_use]
    pub const fn year(&self) -> i16 {
        self.year
    }

    /// Returns the month.
    ///
    /// This value will always be within `1..=12`.
    #[inline]
    #[must_use]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Returns the day.
    ///
    /// This value will always be within `1..=31`.
    #[inline]
    #[must_use]
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Returns the ISO ordinal date.
    ///
    /// January 1st is 1 and December 31st is either 365 or 366 depending on leap year.
    #[inline]
    #[must_use]
    pub const fn ordinal(&self) -> u16 {
        date_to_ordinal(self.year, self.month, self.day)
    }

    /// Returns the number of days since the UNIX Epoch (1970-01-01).
    #[inline]
    #[must_use]
    pub const fn days_since_epoch(&self) -> i32 {
        date_to_epoch_days(self.year, self.month, self.day)
    }

    /// Returns the weekday.
    ///
    /// # Examples
    ///
    /// ```
    /// # use eos::{Date, Weekday};
    /// assert_eq!(Date::new(2021, 12, 25).unwrap().weekday(), Weekday::Saturday);
    /// assert_eq!(Date::new(2012, 2, 29).unwrap().weekday(), Weekday::Wednesday);
    /// ```
    #[inline]
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        let days = self.days_since_epoch();
        let d = (days + 4).rem_euclid(7) as u8;
        match d {
            0 => Weekday::Sunday,
            1 => Weekday::Monday,
            2 => Weekday::Tuesday,
            3 => Weekday::Wednesday,
            4 => Weekday::Thursday,
            5 => Weekday::Friday,
            6 => Weekday::Saturday,
            _ => unreachable!(),
        }
    }

    /// Returns a new [`Date`] that points to the given year.
    ///
    /// If the year causes the day to go out of bounds, then [`None`]
    /// is returned. For example, switching from a leap year to a non-leap
    /// year on February 29th.
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn with_year(mut self, year: i16) -> Option<Self> {
        ensure_in_range_opt!(self.day, days_in_month(year, self.month));
        self.year = year;
        Some(self)
    }

    /// Returns a new [`Date`] that points to the given month.
    ///
    /// If the month is out of bounds (`1..=12`) or if the month
    /// does not have as many days as is currently specified then
    /// [`None`] is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// # use eos::Date;
    /// assert!(Date::new(2012, 3, 30).unwrap().with_month(2).is_none());
    /// assert!(Date::new(2014, 12, 31).unwrap().with_month(1).is_some());
    /// assert!(Date::new(2019, 4, 28).unwrap().with_month(2).is_some());
    /// ```
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn with_month(mut self, month: u8) -> Option<Self> {
        ensure_in_range_opt!(month, 1 => 12);
        ensure_in_range_opt!(self.day, days_in_month(self.year, month));
        self.month = month;
        Some(self)
    }

    /// Returns a new [`Date`] that points to the given day.
    ///
    /// If the day is out of bounds (`1..=31`) then [`None`] is returned.
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn with_day(mut self, day: u8) -> Option<Self> {
        ensure_in_range_opt!(day, 1 => days_in_month(self.year, self.month));
        self.day = day;
        Some(self)
    }

    /// Creates a date from the given year and ordinal date.
    ///
    /// If the ordinal is out of bounds (`1..=366`) then [`None`] is returned.
    /// Note that 366 is also invalid if the year is not a leap year.
    ///
    /// # Examples
    ///
    /// ```
    /// # use eos::Date;
    /// assert_eq!(Date::from_ordinal(1992, 62), Some(Date::new(1992, 3, 2).unwrap())); // leap year
    /// assert_eq!(Date::from_ordinal(2013, 366), None); // not a leap year
    /// assert_eq!(Date::from_ordinal(2012, 366), Some(Date::new(2012, 12, 31).unwrap()));
    /// ```
    pub fn from_ordinal(year: i16, ordinal: u16) -> Option<Self> {
        ensure_in_range_opt!(ordinal, 1 => 366);
        if ordinal == 366 && !is_leap_year(year) {
            return None;
        }

        let epoch = date_to_epoch_days(year, 1, 1) - 1 + ordinal as i32;
        let (year, month, day) = date_from_epoch_days(epoch);
        Some(Self { year, month, day })
    }

    /// Returns the ISO week date for this date.
    ///
    /// See [`IsoWeekDate`] for more information.
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn iso_week(&self) -> IsoWeekDate {
        let epoch = self.days_since_epoch();
        let start_epoch = find_iso_week_start_epoch(self.year, epoch);
        let weekday = weekday_from_days(epoch);
        let week = (epoch - start_epoch) / 7 + 1; // range: [1, 53]
        let (year, _, _) = date_from_epoch_days(start_epoch + 3); // Thursday - Monday = 3

        let weekday = match weekday {
            0 => Weekday::Sunday,
            1 => Weekday::Monday,
            2 => Weekday::Tuesday,
            3 => Weekday::Wednesday,
            4 => Weekday::Thursday,
            5 => Weekday::Friday,
            6 => Weekday::Saturday,
            _ => unreachable!(),
        };

        IsoWeekDate {
            year,
            week: week as _,
            weekday,
        }
    }
}

impl From<IsoWeekDate> for Date {
    fn from(iso: IsoWeekDate) -> Self {
        let epoch = iso_week_start_epoch_from_year(iso.year)
            + (iso.week as i32 - 1) * 7
            + (iso.weekday.number_from_monday() as i32 - 1);
        let (year, month, day) = date_from_epoch_days(epoch);
        Self { year, month, day }
    }
}

impl core::fmt::Display for Date {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.year >= 0 && self.year <= 9999 {
            write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
        } else {
            write!(f, "{:+05}-{:02}-{:02}", self.year, self.month, self.day)
        }
    }
}

impl core::fmt::Display for IsoWeekDate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{:04}-W{:02}-{}",
            self.year,
            self.week,
            self.weekday.number_from_monday()
        )
    }
}

#[cfg(any(feature = "formatting", feature = "parsing"))]
impl crate::fmt::TemporalAccessor for Date {
    fn is_supported(&self, field: crate::fmt::Field) -> bool {
        use crate::fmt::Field;
        matches!(field, Field::Year | Field::YearOfEra | Field::MonthOfYear | Field::DayOfMonth | Field::DayOfYear)
    }

    fn get(&self, field: crate::fmt::Field) -> i64 {
        use crate::fmt::Field;
        match field {
            Field::Year | Field::YearOfEra => self.year() as i64,
            Field::MonthOfYear => self.month() as i64,
            Field::DayOfMonth => self.day() as i64,
            Field::DayOfYear => self.ordinal() as i64,
            other => panic!("Date does not support {other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_week() {
        assert_eq!(
            Date::new(2008, 12, 29).unwrap().iso_week(),
            IsoWeekDate {
                year: 2009,
                week: 1,
                weekday: Weekday::Monday
            }
        );
        assert_eq!(
            Date::from(IsoWeekDate {
                year: 2009,
                week: 1,
                weekday: Weekday::Monday
            }),
            Date::new(2008, 12, 29).unwrap()
        );
    }
}
