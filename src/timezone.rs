use crate::{utils::ensure_in_range, Date, Error, Time};

/// Represents an offset from UTC.
///
/// This struct can only store values up to ±24:00:00.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcOffset {
    pub(crate) hours: i8,
    pub(crate) minutes: i8,
    pub(crate) seconds: i8,
}

impl Default for UtcOffset {
    fn default() -> Self {
        Self::UTC
    }
}

impl UtcOffset {
    /// Returns the smallest possible [`UtcOffset`].
    pub const MIN: Self = Self {
        hours: -24,
        minutes: 0,
        seconds: 0,
    };

    /// Returns the largest possible [`UtcOffset`].
    pub const MAX: Self = Self {
        hours: 24,
        minutes: 0,
        seconds: 0,
    };

    /// Returns the [`UtcOffset`] representing UTC.
    pub const UTC: Self = Self {
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Creates a new [`UtcOffset`] from the given number of hours, minutes, and seconds.
    ///
    /// The sign of all three components should match. If they do not, all components will
    /// have their signs flipped to match the `hour` sign.
    ///
    /// The values must be within the range of ±24:00:00.
    ///
    /// # Examples
    ///
    /// ```
    /// # use eos::UtcOffset;
    /// assert!(UtcOffset::from_hms(24, 1, 0).is_err()); // invalid range
    /// assert!(UtcOffset::from_hms(24, 0, 0).is_ok());
    /// assert_eq!(UtcOffset::from_hms(23, 56, 59)?.into_hms(), (23, 56, 59));
    /// assert_eq!(UtcOffset::from_hms(0, 30, 0)?.into_hms(), (0, 30, 0));
    /// assert_eq!(UtcOffset::from_hms(0, -30, 30)?.into_hms(), (0, -30, -30));
    /// # Ok::<_, eos::Error>(())
    /// ```
    pub const fn from_hms(hours: i8, mut minutes: i8, mut seconds: i8) -> Result<Self, Error> {
        ensure_in_range!(hours, -24 => 24);
        ensure_in_range!(minutes, -59 => 59);
        ensure_in_range!(seconds, -59 => 59);

        // This is surprisingly well optimised
        if hours.is_negative() {
            if minutes.is_positive() {
                minutes = -minutes;
            }
            if seconds.is_positive() {
                seconds = -seconds;
            }
        } else if hours.is_positive() {
            if minutes.is_negative() {
                minutes = -minutes;
            }
            if seconds.is_negative() {
                seconds = -seconds;
            }
        } else {
            // Special case for 0 hours, it takes the sign of minutes
            // -30:30 => -30:-30
            // 30:-30 => 30:30
            if seconds.is_positive() != minutes.is_positive() {
                seconds = -seconds;
            }
        }

        let seconds = hours as i32 * 3600 + minutes as i32 * 60 + seconds as i32;
        Self::from_seconds(seconds)
    }

    /// Creates a new [`UtcOffset`] from a total number of seconds.
    /// The value must be between `-86400..=86400`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use eos::UtcOffset;
    /// assert_eq!(UtcOffset::from_seconds(23400)?.into_hms(), (6, 30, 0));
    /// assert_eq!(UtcOffset::from_seconds(23400)?.total_seconds(), 23400);
    /// # Ok::<_, eos::Error>(())
    /// ```
    pub const fn from_seconds(seconds: i32) -> Result<Self, Error> {
        ensure_in_range!(seconds, -86400 => 86400);
        Ok(Self::from_seconds_unchecked(seconds))
    }

    pub(crate) const fn from_seconds_unchecked(seconds: i32) -> Self {
        let hours = seconds / 3600;
        let seconds = seconds % 3600;
        let minutes = seconds / 60;
        let seconds = seconds % 60;
        Self {
            hours: hours as i8,
            minutes: minutes as i8,
            seconds: seconds as i8,
        }
    }

    /// Get the utc offset's hours.
    pub const fn hours(&self) -> i8 {
        self.hours
    }

    /// Get the utc offset's minutes.
    pub const fn minutes(&self) -> i8 {
        self.minutes
    }

    /// Get the utc offset's seconds.
    pub const fn seconds(&self) -> i8 {
        self.seconds
    }

    /// Returns the total number of seconds this offset represents.
    ///
    /// # Example
    ///
    /// ```
    /// # use eos::UtcOffset;
    /// assert_eq!(UtcOffset::from_hms(6, 30, 0)?.total_seconds(), 23400);
    /// # Ok::<_, eos::Error>(())
    /// ```
    #[inline]
    pub const fn total_seconds(&self) -> i32 {
        self.hours as i32 * 3600 + self.minutes as i32 * 60 + self.seconds as i32
    }

    /// Unwraps this offset into their individual `(hours, minutes, seconds)` components.
    #[inline]
    pub const fn into_hms(self) -> (i8, i8, i8) {
        (self.hours, self.minutes, self.seconds)
    }

    /// Returns `true` if this offset is UTC.
    #[inline]
    pub const fn is_utc(&self) -> bool {
        self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }

    /// Returns `true` if this offset is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.hours < 0 || self.minutes < 0 || self.seconds < 0
    }

    /// Subtracts two offsets, returning [`Error`] if the result would be out of bounds.
    #[inline]
    pub const fn checked_sub(self, other: Self) -> Result<Self, Error> {
        let seconds = self.total_seconds() - other.total_seconds();
        Self::from_seconds(seconds)
    }

    /// Adds two offsets, returning [`Error`] if the result would be out of bounds.
    #[inline]
    pub const fn checked_add(self, other: Self) -> Result<Self, Error> {
        let seconds = self.total_seconds() + other.total_seconds();
        Self::from_seconds(seconds)
    }

    /// Subtracts two offsets, saturating at the bounds if out of bounds.
    #[inline]
    pub const fn saturating_sub(self, other: Self) -> Self {
        let seconds = self.total_seconds() - other.total_seconds();
        if seconds <= -86400 {
            Self::MIN
        } else if seconds >= 86400 {
            Self::MAX
        } else {
            Self::from_seconds_unchecked(seconds)
        }
    }

    /// Adds two offsets, saturating at the bounds if out of bounds.
    #[inline]
    pub const fn saturating_add(self, other: Self) -> Self {
        let seconds = self.total_seconds() + other.total_seconds();
        if seconds <= -86400 {
            Self::MIN
        } else if seconds >= 86400 {
            Self::MAX
        } else {
            Self::from_seconds_unchecked(seconds)
        }
    }
}

impl core::fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_utc() {
            return f.write_str("Z");
        }
        let (m, s) = (self.minutes.abs(), self.seconds.abs());
        if s > 0 {
            write!(f, "{:+03}:{:02}:{:02}", self.hours, m, s)
        } else {
            write!(f, "{:+03}:{:02}", self.hours, m)
        }
    }
}

impl core::ops::Neg for UtcOffset {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            hours: -self.hours,
            minutes: -self.minutes,
            seconds: -self.seconds,
        }
    }
}

impl core::ops::Add for UtcOffset {
    type Output = Self;

    /// Adds two offsets together.
    ///
    /// # Panics
    ///
    /// If the offset ended up out of bounds.
    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(rhs).expect("out of bounds when adding offsets")
    }
}

impl core::ops::Sub for UtcOffset {
    type Output = Self;

    /// Subtracts two offsets together.
    ///
    /// # Panics
    ///
    /// If the offset ended up out of bounds.
    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_sub(rhs).expect("out of bounds when subtracting offsets")
    }
}

/// A trait implemented by types that can provide the offset from UTC for a given local
/// date and time.
///
/// This is intentionally narrow: it answers "what offset applies here" and nothing else.
/// Anything resembling a tz database, DST transition table, or ambiguous/missing local
/// time resolution lives outside of this crate's scope.
pub trait TimeZone: Clone {
    /// Returns the offset from UTC that applies at the given local date and time.
    fn offset(&self, date: &Date, time: &Time) -> UtcOffset;
}

impl TimeZone for UtcOffset {
    fn offset(&self, _date: &Date, _time: &Time) -> UtcOffset {
        *self
    }
}

/// Represents the UTC timezone.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Utc;

impl TimeZone for Utc {
    fn offset(&self, _date: &Date, _time: &Time) -> UtcOffset {
        UtcOffset::UTC
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_ranges() {
        assert!(UtcOffset::from_hms(-32, 0, 0).is_err());
        assert!(UtcOffset::from_hms(24, 0, 0).is_ok());
        assert!(UtcOffset::from_hms(23, 60, 0).is_err());
        assert!(UtcOffset::from_hms(-23, -60, 0).is_err());
        assert!(UtcOffset::from_hms(-23, -60, -60).is_err());
        assert!(UtcOffset::from_hms(24, -60, -60).is_err());

        assert!(UtcOffset::from_hms(-5, 30, 0).is_ok());

        assert!(UtcOffset::from_seconds(-86400).is_ok());
        assert!(UtcOffset::from_seconds(86400).is_ok());
        assert!(UtcOffset::from_seconds(3600).is_ok());
        assert!(UtcOffset::from_seconds(-3600).is_ok());
    }

    #[test]
    fn test_display() {
        assert_eq!(UtcOffset::UTC.to_string(), "Z");
        assert_eq!(UtcOffset::from_hms(5, 30, 0).unwrap().to_string(), "+05:30");
        assert_eq!(UtcOffset::from_hms(-5, 0, 0).unwrap().to_string(), "-05:00");
    }
}
