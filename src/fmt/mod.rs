//! A builder-based date-time formatting and parsing engine, in the spirit of
//! java.time's `DateTimeFormatterBuilder`.
//!
//! Assemble a [`Builder`] by hand, or compile a letter-pattern string (either at
//! runtime via [`Formatter::from_pattern`] or at compile time via the `pattern!`
//! macro re-exported from `pattern-check-macro`), then seal it with
//! [`Builder::to_formatter`] to get something that can [`Formatter::format`] and
//! [`Formatter::parse`].

#![cfg(any(feature = "formatting", feature = "parsing"))]

pub mod field;

mod builder;
mod context;
mod formatter;
mod node;
mod pattern;
mod resolver;

#[cfg(feature = "well_known")]
mod well_known;

pub use builder::{Builder, BuilderError};
pub use context::{BindingSet, ParsePosition, TemporalAccessor};
pub use field::Field;
pub use formatter::{Formatter, ParseError};
pub use node::{FormatError, Node, OffsetPattern, SignStyle};
pub use pattern::PatternError;
pub use resolver::{Chronology, Gregorian, ResolveError, Resolved, ResolverStyle};

#[cfg(feature = "well_known")]
pub use well_known::{
    BASIC_ISO_DATE, ISO_INSTANT, ISO_LOCAL_DATE, ISO_LOCAL_DATE_TIME, ISO_LOCAL_TIME, ISO_OFFSET_DATE_TIME,
};
