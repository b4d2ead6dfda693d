use crate::{timezone::Utc, Date, Error, Time, TimeZone, UtcOffset, Weekday};

use core::ops::{Add, Sub};
use core::time::Duration;

#[cfg(feature = "std")]
use std::time::SystemTime;

/// An ISO 8601 combined date, time, and UTC offset, tagged with a [`TimeZone`].
///
/// [`DateTime`] flattens the accessors of [`Date`] and [`Time`] as inherent methods,
/// so things like [`second`] or [`month`] work directly on the combined type.
///
/// [`second`]: DateTime::second
/// [`month`]: DateTime::month
#[derive(Debug, Clone, Copy, Hash)]
pub struct DateTime<Tz = Utc>
where
    Tz: TimeZone,
{
    pub(crate) date: Date,
    pub(crate) time: Time,
    pub(crate) offset: UtcOffset,
    pub(crate) timezone: Tz,
}

impl DateTime<Utc> {
    /// Represents a [`DateTime`] at the unix epoch (January 1st, 1970 00:00:00 UTC).
    pub const UNIX_EPOCH: Self = Self {
        date: Date::UNIX_EPOCH,
        time: Time::MIDNIGHT,
        offset: UtcOffset::UTC,
        timezone: Utc,
    };

    /// Returns the current date and time in UTC.
    #[inline]
    #[cfg(feature = "std")]
    #[must_use]
    pub fn utc_now() -> Self {
        SystemTime::now().into()
    }

    /// Creates a [`DateTime`] from the given year and ordinal date. The time is set to
    /// midnight UTC.
    ///
    /// If the ordinal is out of bounds (`1..=366`) then [`None`] is returned.
    /// Note that 366 is also invalid if the year is not a leap year.
    pub fn from_ordinal(year: i16, ordinal: u16) -> Option<Self> {
        let date = Date::from_ordinal(year, ordinal)?;
        Some(Self {
            date,
            time: Time::MIDNIGHT,
            offset: UtcOffset::UTC,
            timezone: Utc,
        })
    }
}

impl<Tz> DateTime<Tz>
where
    Tz: TimeZone,
{
    /// Creates a new [`DateTime`] from its constituent parts.
    ///
    /// No attempt is made to reconcile `offset` with what `timezone` would compute for
    /// `date`/`time` -- callers that already know the offset (e.g. after parsing one from
    /// text) should use this directly. To derive the offset from the timezone instead, use
    /// [`DateTime::in_timezone`].
    #[inline]
    #[must_use]
    pub fn new(date: Date, time: Time, offset: UtcOffset, timezone: Tz) -> Self {
        Self {
            date,
            time,
            offset,
            timezone,
        }
    }

    /// Returns the date component.
    #[inline]
    #[must_use]
    pub fn date(&self) -> Date {
        self.date
    }

    /// Returns the time component.
    #[inline]
    #[must_use]
    pub fn time(&self) -> Time {
        self.time
    }

    /// Returns the UTC offset in effect for this date and time.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> UtcOffset {
        self.offset
    }

    /// Returns a reference to the associated timezone.
    #[inline]
    #[must_use]
    pub fn timezone(&self) -> &Tz {
        &self.timezone
    }

    /// Converts this [`DateTime`] into another timezone, keeping the same instant in time
    /// and recomputing the local date, time, and offset to match.
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn with_timezone<OtherTz>(self, timezone: OtherTz) -> DateTime<OtherTz>
    where
        OtherTz: TimeZone,
    {
        let new_offset = timezone.offset(&self.date, &self.time);
        let delta = new_offset.total_seconds() - self.offset.total_seconds();
        let (days, time) = Time::adjust_from_nanos(self.time.total_nanos() as i64 + delta as i64 * 1_000_000_000);
        DateTime {
            date: self.date.add_days(days),
            time,
            offset: new_offset,
            timezone,
        }
    }

    /// Unwraps this datetime into its separate [`Date`] and [`Time`] components, discarding
    /// the offset and timezone.
    #[must_use]
    pub fn into_inner(self) -> (Date, Time) {
        (self.date, self.time)
    }

    /// Returns the year.
    #[inline]
    #[must_use]
    pub fn year(&self) -> i16 {
        self.date.year()
    }

    /// Returns the month.
    #[inline]
    #[must_use]
    pub fn month(&self) -> u8 {
        self.date.month()
    }

    /// Returns the day.
    #[inline]
    #[must_use]
    pub fn day(&self) -> u8 {
        self.date.day()
    }

    /// Returns the ISO ordinal date.
    #[inline]
    #[must_use]
    pub fn ordinal(&self) -> u16 {
        self.date.ordinal()
    }

    /// Returns the weekday.
    #[inline]
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    /// Returns the hour.
    #[inline]
    #[must_use]
    pub fn hour(&self) -> u8 {
        self.time.hour()
    }

    /// Returns the minute.
    #[inline]
    #[must_use]
    pub fn minute(&self) -> u8 {
        self.time.minute()
    }

    /// Returns the second.
    #[inline]
    #[must_use]
    pub fn second(&self) -> u8 {
        self.time.second()
    }

    /// Returns the nanosecond.
    #[inline]
    #[must_use]
    pub fn nanosecond(&self) -> u32 {
        self.time.nanosecond()
    }
}

impl<Tz> Add<Duration> for DateTime<Tz>
where
    Tz: TimeZone,
{
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        let (days, time) = self.time.add_with_duration(rhs);
        Self {
            date: self.date.add_days(days),
            time,
            offset: self.offset,
            timezone: self.timezone,
        }
    }
}

impl<Tz> Sub<Duration> for DateTime<Tz>
where
    Tz: TimeZone,
{
    type Output = Self;

    fn sub(self, rhs: Duration) -> Self::Output {
        let nanos = self.time.total_nanos() as i64 - rhs.as_nanos() as i64;
        let (days, time) = Time::adjust_from_nanos(nanos);
        Self {
            date: self.date.add_days(days),
            time,
            offset: self.offset,
            timezone: self.timezone,
        }
    }
}

#[cfg(feature = "std")]
impl From<SystemTime> for DateTime<Utc> {
    fn from(time: SystemTime) -> Self {
        match time.duration_since(SystemTime::UNIX_EPOCH) {
            Ok(duration) => Self::UNIX_EPOCH + duration,
            Err(e) => Self::UNIX_EPOCH - e.duration(),
        }
    }
}

impl<Tz, OtherTz> PartialEq<DateTime<OtherTz>> for DateTime<Tz>
where
    Tz: TimeZone,
    OtherTz: TimeZone,
{
    fn eq(&self, other: &DateTime<OtherTz>) -> bool {
        self.date.eq(&other.date) && self.time.eq(&other.time) && self.offset.total_seconds() == other.offset.total_seconds()
    }
}

impl<Tz> Eq for DateTime<Tz> where Tz: TimeZone {}

impl<Tz, OtherTz> PartialOrd<DateTime<OtherTz>> for DateTime<Tz>
where
    Tz: TimeZone,
    OtherTz: TimeZone,
{
    fn partial_cmp(&self, other: &DateTime<OtherTz>) -> Option<core::cmp::Ordering> {
        match self.date.partial_cmp(&other.date) {
            Some(core::cmp::Ordering::Equal) => {}
            ord => return ord,
        }
        self.time.partial_cmp(&other.time)
    }
}

impl<Tz> Ord for DateTime<Tz>
where
    Tz: TimeZone,
{
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        match self.date.cmp(&other.date) {
            core::cmp::Ordering::Equal => {}
            ord => return ord,
        }
        self.time.cmp(&other.time)
    }
}

impl<Tz> core::fmt::Display for DateTime<Tz>
where
    Tz: TimeZone,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}T{}{}", self.date, self.time, self.offset)
    }
}

#[cfg(any(feature = "formatting", feature = "parsing"))]
use crate::fmt::TemporalAccessor as _;

#[cfg(any(feature = "formatting", feature = "parsing"))]
impl<Tz> crate::fmt::TemporalAccessor for DateTime<Tz>
where
    Tz: TimeZone,
{
    fn is_supported(&self, field: crate::fmt::Field) -> bool {
        use crate::fmt::Field;
        self.date.is_supported(field) || self.time.is_supported(field) || matches!(field, Field::OffsetSeconds)
    }

    fn get(&self, field: crate::fmt::Field) -> i64 {
        use crate::fmt::Field;
        if matches!(field, Field::OffsetSeconds) {
            return self.offset.total_seconds() as i64;
        }
        if self.date.is_supported(field) {
            self.date.get(field)
        } else {
            self.time.get(field)
        }
    }

    fn offset_seconds(&self) -> Option<i32> {
        Some(self.offset.total_seconds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        let a = Date::new(2021, 1, 1).unwrap().at(Time::MIDNIGHT);
        let b = Date::new(2021, 1, 2).unwrap().at(Time::MIDNIGHT);
        assert!(a < b);
    }

    #[test]
    fn test_display() {
        let dt = Date::new(2021, 1, 1).unwrap().at(Time::new(12, 30, 0).unwrap());
        assert_eq!(dt.to_string(), "2021-01-01T12:30:00Z");
    }
}
