//! Turns a parsed [`BindingSet`] into concrete calendar values.
//!
//! This is the one piece of the engine that is not chronology-agnostic: it knows
//! about the proleptic Gregorian calendar that [`crate::Date`] and [`crate::Time`]
//! implement. A caller using a different calendar system can supply their own
//! [`Chronology`] implementation instead of [`Gregorian`].

use alloc::string::String;

use crate::{Date, Time, UtcOffset};

use super::context::BindingSet;
use super::field::Field;

/// Controls how conflicting or incomplete field combinations are handled when
/// resolving a [`BindingSet`] into calendar values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolverStyle {
    /// Reject any field combination that isn't an exact, unambiguous match.
    Strict,
    /// Apply reasonable defaults (e.g. missing year defaults to 1970), the default.
    Smart,
    /// Accept out-of-range components by normalizing them (e.g. hour 24 rolls over
    /// into the excess-days side channel).
    Lenient,
}

impl Default for ResolverStyle {
    fn default() -> Self {
        ResolverStyle::Smart
    }
}

/// Everything a successful resolve can produce. Any field may be absent if the
/// binding set didn't carry enough information to fill it in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolved {
    pub date: Option<Date>,
    pub time: Option<Time>,
    pub offset: Option<UtcOffset>,
    pub zone_id: Option<String>,
    pub excess_days: Option<i32>,
    /// `true` if a `SecondOfMinute` binding of `60` was normalized down to `59`.
    pub leap_second_seen: bool,
}

/// Errors produced while resolving a [`BindingSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveError {
    /// The bound fields don't form a valid date or time (e.g. day 31 in April).
    InvalidComponents,
    /// Two bound fields conflict in a way the chronology can't reconcile.
    Conflicting(Field),
}

impl core::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ResolveError::InvalidComponents => f.write_str("bound fields do not form a valid date or time"),
            ResolveError::Conflicting(field) => write!(f, "conflicting bindings for {field}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ResolveError {}

/// A calendar system able to turn year/month/day-shaped bindings into a [`Date`].
///
/// This is the seam a caller would implement to resolve against a calendar other
/// than the proleptic Gregorian one this crate ships by default.
pub trait Chronology {
    /// Resolves the date-shaped fields in `bindings`, or returns `Ok(None)` if there
    /// aren't enough of them present to determine a date.
    fn resolve_date(&self, bindings: &BindingSet, style: ResolverStyle) -> Result<Option<Date>, ResolveError>;
}

/// The proleptic Gregorian calendar, with the same field-combination priority as a
/// conventional date-time builder: ordinal-day beats ISO-week beats plain
/// year/month/day.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gregorian;

impl Chronology for Gregorian {
    fn resolve_date(&self, bindings: &BindingSet, style: ResolverStyle) -> Result<Option<Date>, ResolveError> {
        let year = bindings.get(Field::Year).or_else(|| bindings.get(Field::YearOfEra));

        if let (Some(ordinal), Some(year)) = (bindings.get(Field::DayOfYear), year) {
            return Date::from_ordinal(year as i16, ordinal as u16)
                .map(Some)
                .ok_or(ResolveError::InvalidComponents);
        }

        let month = bindings.get(Field::MonthOfYear);
        let day = bindings.get(Field::DayOfMonth);

        match style {
            ResolverStyle::Strict => {
                let (year, month, day) = match (year, month, day) {
                    (Some(y), Some(m), Some(d)) => (y, m, d),
                    _ if year.is_none() && month.is_none() && day.is_none() => return Ok(None),
                    _ => return Err(ResolveError::InvalidComponents),
                };
                Date::new(year as i16, month as u8, day as u8)
                    .map(Some)
                    .ok_or(ResolveError::InvalidComponents)
            }
            ResolverStyle::Smart | ResolverStyle::Lenient => {
                if year.is_none() && month.is_none() && day.is_none() {
                    return Ok(None);
                }
                let year = year.unwrap_or(1970) as i16;
                let month = month.unwrap_or(1) as u8;
                let day = day.unwrap_or(1) as u8;
                Date::new(year, month, day).map(Some).ok_or(ResolveError::InvalidComponents)
            }
        }
    }
}

/// Resolves the time-of-day fields in `bindings`, converting am/pm-relative hours and
/// folding a seen leap second into the excess-days-adjacent second 59 + 1s of nanos,
/// matching the convention java.time and this crate's own builder use.
pub fn resolve_time(bindings: &mut BindingSet, style: ResolverStyle) -> Result<Option<Time>, ResolveError> {
    let hour_of_day = bindings.get(Field::HourOfDay);
    let clock_hour = bindings.get(Field::ClockHourOfDay);
    let hour_of_am_pm = bindings.get(Field::HourOfAmPm);
    let clock_hour_am_pm = bindings.get(Field::ClockHourOfAmPm);

    let hour = match (hour_of_day, clock_hour, hour_of_am_pm, clock_hour_am_pm) {
        (Some(h), None, None, None) => {
            if h == 24 {
                bindings.add_excess_days(1);
                0
            } else {
                h
            }
        }
        (None, Some(h), None, None) => {
            if h == 24 {
                bindings.add_excess_days(1);
                0
            } else {
                h
            }
        }
        (None, None, Some(h), None) => h,
        (None, None, None, Some(h)) => {
            if h == 12 {
                0
            } else {
                h
            }
        }
        (None, None, None, None) => {
            if bindings.get(Field::MinuteOfHour).is_none() && bindings.get(Field::SecondOfMinute).is_none() {
                return Ok(None);
            }
            0
        }
        _ => return Err(ResolveError::Conflicting(Field::HourOfDay)),
    };

    let minute = bindings.get(Field::MinuteOfHour).unwrap_or(0);
    let mut second = bindings.get(Field::SecondOfMinute).unwrap_or(0);
    let mut extra_nanos = 0i64;
    if second == 60 {
        if matches!(style, ResolverStyle::Strict) {
            return Err(ResolveError::InvalidComponents);
        }
        bindings.mark_leap_second();
        second = 59;
        extra_nanos = 1_000_000_000;
    }
    let nanosecond = bindings.get(Field::NanoOfSecond).unwrap_or(0) + extra_nanos;

    Time::new(hour as u8, minute as u8, second as u8)
        .and_then(|t| t.with_nanosecond(nanosecond as u32))
        .map(Some)
        .ok_or(ResolveError::InvalidComponents)
}

/// Resolves the offset-seconds binding into a [`UtcOffset`], if present.
pub fn resolve_offset(bindings: &BindingSet) -> Option<UtcOffset> {
    bindings
        .get(Field::OffsetSeconds)
        .and_then(|secs| UtcOffset::from_seconds(secs as i32).ok())
}

/// Resolves a full [`BindingSet`] against a [`Chronology`] and [`ResolverStyle`].
pub fn resolve(bindings: &mut BindingSet, style: ResolverStyle, chronology: &dyn Chronology) -> Result<Resolved, ResolveError> {
    let date = chronology.resolve_date(&*bindings, style)?;
    let time = resolve_time(bindings, style)?;
    let offset = resolve_offset(bindings);
    Ok(Resolved {
        date,
        time,
        offset,
        zone_id: bindings.zone_id().map(alloc::string::ToString::to_string),
        excess_days: bindings.excess_days(),
        leap_second_seen: bindings.leap_second_seen(),
    })
}
