//! Ready-made formatters for the common ISO-8601 profiles, built once on first use.
//!
//! A lazy-init per constant is the simplest safe design here: each [`Formatter`] is a
//! few heap-allocated nodes, cheap to build and safe to share once built, so there is
//! no reason to hand-roll a `OnceLock` per item when [`once_cell::sync::Lazy`] already
//! does exactly this.

use once_cell::sync::Lazy;

use super::formatter::Formatter;

fn build(pattern: &str) -> Formatter {
    Formatter::from_pattern(pattern).expect("well-known pattern is valid by construction")
}

/// `uuuu-MM-dd`, e.g. `2012-08-21`.
pub static ISO_LOCAL_DATE: Lazy<Formatter> = Lazy::new(|| build("uuuu-MM-dd"));

/// `HH:mm:ss[.SSSSSSSSS]`, e.g. `14:30:05` or `14:30:05.123456789`.
pub static ISO_LOCAL_TIME: Lazy<Formatter> = Lazy::new(|| build("HH:mm:ss[.SSSSSSSSS]"));

/// `uuuu-MM-dd'T'HH:mm:ss[.SSSSSSSSS]`.
pub static ISO_LOCAL_DATE_TIME: Lazy<Formatter> = Lazy::new(|| build("uuuu-MM-dd'T'HH:mm:ss[.SSSSSSSSS]"));

/// `uuuu-MM-dd'T'HH:mm:ss[.SSSSSSSSS]XXXXX`, e.g. `2012-08-21T14:30:05+01:00`.
pub static ISO_OFFSET_DATE_TIME: Lazy<Formatter> = Lazy::new(|| build("uuuu-MM-dd'T'HH:mm:ss[.SSSSSSSSS]XXXXX"));

/// A full instant rendered in UTC, e.g. `2012-08-21T14:30:05.123456789Z`.
pub static ISO_INSTANT: Lazy<Formatter> = Lazy::new(|| {
    let mut builder = super::builder::Builder::new();
    builder.append_instant();
    builder
        .to_formatter(super::resolver::ResolverStyle::Smart)
        .expect("a lone Instant node always seals into a formatter")
});

/// `uuuuMMdd`, e.g. `20120821`.
pub static BASIC_ISO_DATE: Lazy<Formatter> = Lazy::new(|| build("uuuuMMdd"));
