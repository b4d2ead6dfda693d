#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(any(feature = "formatting", feature = "parsing"))]
pub mod fmt;

pub mod gregorian;

mod date;
mod datetime;
mod error;
mod time;
mod timezone;
mod utils;

pub use date::{Date, IsoWeekDate, Weekday};
pub use datetime::DateTime;
pub use error::Error;
pub use time::Time;
pub use timezone::{TimeZone, Utc, UtcOffset};

#[cfg(feature = "macros")]
pub use pattern_check_macro::pattern;
