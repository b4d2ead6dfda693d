use crate::utils::ensure_in_range_opt;

use core::time::Duration;

const NANOS_PER_SEC: u64 = 1_000_000_000;
const NANOS_PER_MIN: u64 = NANOS_PER_SEC * 60;
const NANOS_PER_HOUR: u64 = NANOS_PER_MIN * 60;

const MAXIMUM_SECONDS_FROM_DURATION: u64 = i32::MAX as u64 * 24 * 60 * 60;

/// A time of day, independent of any calendar date or time zone.
///
/// The maximum supported precision is nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time {
    pub(crate) hour: u8,
    pub(crate) minute: u8,
    pub(crate) second: u8,
    pub(crate) nanosecond: u32,
}

impl Time {
    /// The minimum valid time.
    pub const MIN: Self = Self {
        hour: 0,
        minute: 0,
        second: 0,
        nanosecond: 0,
    };

    /// The time at midnight.
    pub const MIDNIGHT: Self = Self::MIN;

    /// The maximum valid time.
    ///
    /// This does not include leap seconds.
    pub const MAX: Self = Self {
        hour: 23,
        minute: 59,
        second: 59,
        nanosecond: 999_999_999,
    };

    /// Creates a new [`Time`] from the specified hour, minute, and second.
    ///
    /// The `hour` value must be between `0..24` and the `minute` and `second` values must
    /// be between `0..60`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use eos::Time;
    /// # fn test() -> Option<()> {
    /// let time = Time::new(23, 10, 0)?;
    ///
    /// assert_eq!(time.hour(), 23);
    /// assert_eq!(time.minute(), 10);
    /// assert_eq!(time.second(), 0);
    /// assert!(Time::new(10, 0, 0).is_some());
    /// assert!(Time::new(24, 0, 0).is_none());
    /// assert!(Time::new(23, 60, 0).is_none());
    /// assert!(Time::new(23, 59, 60).is_none());
    /// # Some(())
    /// # }
    /// # test();
    /// ```
    #[inline]
    pub const fn new(hour: u8, minute: u8, second: u8) -> Option<Self> {
        ensure_in_range_opt!(hour, 23);
        ensure_in_range_opt!(minute, 59);
        ensure_in_range_opt!(second, 59);
        Some(Self {
            nanosecond: 0,
            hour,
            minute,
            second,
        })
    }

    /// Creates a [`Time`] representing the leap second `23:59:60`.
    ///
    /// Leap seconds are not stored natively -- this returns `23:59:59` with the
    /// caller expected to treat it as the leap instant. [`crate::fmt`]'s parser
    /// surfaces this distinction as a separate flag rather than baking it into
    /// the type.
    #[inline]
    #[must_use]
    pub const fn leap_second_floor() -> Self {
        Self {
            hour: 23,
            minute: 59,
            second: 59,
            nanosecond: 0,
        }
    }

    #[inline]
    pub(crate) fn total_seconds(&self) -> i32 {
        self.hour as i32 * 3600 + self.minute as i32 * 60 + self.second as i32
    }

    /// Total number of nanoseconds represented by this time.
    pub(crate) fn total_nanos(&self) -> u64 {
        self.hour as u64 * NANOS_PER_HOUR
            + self.minute as u64 * NANOS_PER_MIN
            + self.second as u64 * NANOS_PER_SEC
            + self.nanosecond as u64
    }

    /// Converts nanoseconds into a time representation and returns the left-over days.
    pub(crate) fn adjust_from_nanos(nanos: i64) -> (i32, Self) {
        let (hour, nanos) = (nanos.div_euclid(NANOS_PER_HOUR as i64), nanos.rem_euclid(NANOS_PER_HOUR as i64));
        let (minute, nanos) = (nanos.div_euclid(NANOS_PER_MIN as i64), nanos.rem_euclid(NANOS_PER_MIN as i64));
        let (second, nanos) = (nanos.div_euclid(NANOS_PER_SEC as i64), nanos.rem_euclid(NANOS_PER_SEC as i64));
        let (days, hour) = (hour.div_euclid(24), hour.rem_euclid(24));

        (
            days as i32,
            Self {
                hour: hour as u8,
                minute: minute as u8,
                second: second as u8,
                nanosecond: nanos as u32,
            },
        )
    }

    /// Adds the time with the given duration and returns the number of days that have passed.
    pub(crate) fn add_with_duration(self, duration: Duration) -> (i32, Self) {
        if duration.as_secs() > MAXIMUM_SECONDS_FROM_DURATION {
            (i32::MAX, self)
        } else {
            let diff = self.total_nanos() as i64 + duration.as_nanos() as i64;
            Self::adjust_from_nanos(diff)
        }
    }

    // The "common" functions begin here.

    /// Returns the hour.
    ///
    /// This value will always be within `0..24`.
    #[inline]
    #[must_use]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    /// Returns the minute within the hour.
    ///
    /// This value will always be within `0..60`.
    #[inline]
    #[must_use]
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// Returns the second within the minute.
    ///
    /// This value will always be within `0..60`.
    #[inline]
    #[must_use]
    pub const fn second(&self) -> u8 {
        self.second
    }

    /// Returns the millisecond within the second.
    #[inline]
    #[must_use]
    pub const fn millisecond(&self) -> u16 {
        (self.nanosecond / 1_000_000) as u16
    }

    /// Returns the microsecond within the second.
    #[inline]
    #[must_use]
    pub const fn microsecond(&self) -> u32 {
        self.nanosecond / 1_000
    }

    /// Returns the nanosecond within the second.
    #[inline]
    #[must_use]
    pub const fn nanosecond(&self) -> u32 {
        self.nanosecond
    }

    /// Returns a new [`Time`] that points to the given hour.
    /// If the hour is out of bounds (`0..24`) then [`None`] is returned.
    #[inline]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn with_hour(mut self, hour: u8) -> Option<Self> {
        ensure_in_range_opt!(hour, 23);
        self.hour = hour;
        Some(self)
    }

    /// Returns a new [`Time`] that points to the given minute.
    /// If the minute is out of bounds (`0..60`) then [`None`] is returned.
    #[inline]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn with_minute(mut self, minute: u8) -> Option<Self> {
        ensure_in_range_opt!(minute, 59);
        self.minute = minute;
        Some(self)
    }

    /// Returns a new [`Time`] that points to the given second.
    /// If the second is out of bounds (`0..60`) then [`None`] is returned.
    #[inline]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn with_second(mut self, second: u8) -> Option<Self> {
        ensure_in_range_opt!(second, 59);
        self.second = second;
        Some(self)
    }

    /// Returns a new [`Time`] that points to the given nanosecond.
    /// If the nanosecond is out of bounds (`0..2_000_000_000`) then [`None`] is returned.
    #[inline]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn with_nanosecond(mut self, nanosecond: u32) -> Option<Self> {
        ensure_in_range_opt!(nanosecond, 1_999_999_999);
        self.nanosecond = nanosecond;
        Some(self)
    }
}

#[cfg(any(feature = "formatting", feature = "parsing"))]
impl crate::fmt::TemporalAccessor for Time {
    fn is_supported(&self, field: crate::fmt::Field) -> bool {
        use crate::fmt::Field;
        matches!(
            field,
            Field::HourOfDay
                | Field::ClockHourOfDay
                | Field::HourOfAmPm
                | Field::ClockHourOfAmPm
                | Field::MinuteOfHour
                | Field::SecondOfMinute
                | Field::NanoOfSecond
        )
    }

    fn get(&self, field: crate::fmt::Field) -> i64 {
        use crate::fmt::Field;
        match field {
            Field::HourOfDay => self.hour() as i64,
            Field::ClockHourOfDay => {
                if self.hour() == 0 {
                    24
                } else {
                    self.hour() as i64
                }
            }
            Field::HourOfAmPm => (self.hour() % 12) as i64,
            Field::ClockHourOfAmPm => {
                let h = self.hour() % 12;
                if h == 0 {
                    12
                } else {
                    h as i64
                }
            }
            Field::MinuteOfHour => self.minute() as i64,
            Field::SecondOfMinute => self.second() as i64,
            Field::NanoOfSecond => self.nanosecond() as i64,
            other => panic!("Time does not support {other}"),
        }
    }
}

impl core::fmt::Display for Time {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.nanosecond != 0 {
            write!(
                f,
                "{:02}:{:02}:{:02}.{:09}",
                self.hour, self.minute, self.second, self.nanosecond
            )
        } else {
            write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
        }
    }
}
