//! The formatter façade: a sealed node tree plus a default resolver style, exposing
//! `format`/`parse`/`parse_unresolved` and a `Display`-style pretty-printer.

use alloc::string::String;

use super::builder::Builder;
use super::context::{ParseContext, ParsePosition, PrintContext, TemporalAccessor};
use super::node::{FormatError, Node};
use super::pattern::{self, PatternError};
use super::resolver::{self, Chronology, Gregorian, Resolved, ResolverStyle};

const MAX_ABBREVIATION_LEN: usize = 64;

/// Truncates `text` to at most [`MAX_ABBREVIATION_LEN`] characters, landing on a char
/// boundary. Every error message in this module that embeds user input goes through
/// this single helper, precisely to avoid a one-off `&text[..64]` byte-slice panic on
/// non-ASCII input.
fn abbreviate(text: &str) -> String {
    match text.char_indices().nth(MAX_ABBREVIATION_LEN) {
        Some((boundary, _)) => alloc::format!("{}...", &text[..boundary]),
        None => text.into(),
    }
}

/// Raised when [`Formatter::parse`] or [`Formatter::parse_unresolved`] cannot match
/// the input against the formatter's node tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    message: String,
    index: usize,
}

impl ParseError {
    fn new(text: &str, index: usize, reason: &str) -> Self {
        Self {
            message: alloc::format!("{reason} (at index {index} in \"{}\")", abbreviate(text)),
            index,
        }
    }

    /// The byte index in the original input at which parsing failed.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

/// A sealed printer/parser tree, ready to format or parse temporals.
#[derive(Debug, Clone)]
pub struct Formatter {
    root: Node,
    resolver_style: ResolverStyle,
}

impl Formatter {
    pub(super) fn from_root(root: Node, resolver_style: ResolverStyle) -> Self {
        Self { root, resolver_style }
    }

    /// Compiles a letter-pattern string directly into a [`Formatter`] with
    /// [`ResolverStyle::Smart`].
    pub fn from_pattern(text: &str) -> Result<Self, PatternError> {
        let mut builder = Builder::new();
        pattern::compile_into(text, &mut builder)?;
        builder
            .to_formatter(ResolverStyle::Smart)
            .map_err(PatternError::from)
    }

    /// Returns a formatter identical to this one but with a different default
    /// resolver style.
    #[must_use]
    pub fn with_resolver_style(mut self, style: ResolverStyle) -> Self {
        self.resolver_style = style;
        self
    }

    /// Prints `temporal` into a freshly allocated `String`.
    pub fn format(&self, temporal: &dyn TemporalAccessor) -> Result<String, FormatError> {
        let mut ctx = PrintContext::new(temporal);
        self.root.print(&mut ctx)?;
        Ok(ctx.buffer)
    }

    /// Parses `text` against this formatter's node tree, starting at `position`'s
    /// current index, without resolving the bindings into calendar values; callers
    /// that want the raw field/zone/excess-day data (e.g. to feed a different
    /// chronology), or that want to resume parsing partway through a string, should
    /// use this instead of [`Self::parse`]. On success `position`'s index is advanced
    /// past the match; on failure its error index is set and the position's own
    /// index is left untouched.
    pub fn parse_unresolved(&self, text: &str, position: &mut ParsePosition) -> Result<Resolved, ParseError> {
        let mut ctx = ParseContext::new();
        let start = position.index();
        match self.root.parse(&mut ctx, text, start) {
            Ok(end) => {
                position.set_index(end);
                Ok(Resolved {
                    date: None,
                    time: None,
                    offset: resolver::resolve_offset(&ctx.bindings),
                    zone_id: ctx.bindings.zone_id().map(alloc::string::ToString::to_string),
                    excess_days: ctx.bindings.excess_days(),
                    leap_second_seen: ctx.bindings.leap_second_seen(),
                })
            }
            Err(err_index) => {
                position.set_error_index(err_index);
                Err(ParseError::new(text, err_index, "input did not match the expected pattern"))
            }
        }
    }

    /// Parses `text` and resolves the bindings into calendar values using the
    /// default Gregorian chronology and this formatter's resolver style.
    pub fn parse(&self, text: &str) -> Result<Resolved, ParseError> {
        self.parse_with(text, &Gregorian)
    }

    /// Parses `text` and resolves the bindings against a caller-supplied
    /// [`Chronology`].
    pub fn parse_with(&self, text: &str, chronology: &dyn Chronology) -> Result<Resolved, ParseError> {
        let mut ctx = ParseContext::new();
        match self.root.parse(&mut ctx, text, 0) {
            Ok(end) => {
                if end != text.len() {
                    return Err(ParseError::new(text, end, "trailing characters after a full match"));
                }
                resolver::resolve(&mut ctx.bindings, self.resolver_style, chronology)
                    .map_err(|err| ParseError::new(text, end, &alloc::format!("{err}")))
            }
            Err(err_index) => Err(ParseError::new(text, err_index, "input did not match the expected pattern")),
        }
    }

    /// Renders this formatter's node tree back into its letter-pattern-like `toString`
    /// form, per the builder's own pretty-printer.
    #[must_use]
    pub fn to_pattern_string(&self) -> String {
        let mut out = String::new();
        self.root.to_pattern_string(&mut out);
        out
    }
}

impl core::fmt::Display for Formatter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.to_pattern_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abbreviate_passes_short_text_through_unchanged() {
        assert_eq!(abbreviate("2012-06-30"), "2012-06-30");
    }

    #[test]
    fn abbreviate_truncates_long_text_with_an_ellipsis() {
        let text: String = core::iter::repeat('x').take(100).collect();
        let short = abbreviate(&text);
        assert_eq!(short.chars().count(), MAX_ABBREVIATION_LEN + 3);
        assert!(short.ends_with("..."));
    }

    #[test]
    fn parse_with_rejects_trailing_characters() {
        let formatter = Formatter::from_pattern("uuuu-MM-dd").unwrap();
        let err = formatter.parse("2012-06-30 extra").unwrap_err();
        assert_eq!(err.index(), 10);
    }

    #[test]
    fn with_resolver_style_affects_subsequent_parses() {
        let formatter = Formatter::from_pattern("uuuu-MM").unwrap();
        // Smart (the default) fills in a missing day; Strict has no day field at all
        // here so it resolves the same way -- the difference shows up once a day is
        // present but a sibling field is missing, e.g. year defaulting to 1970.
        let smart = formatter.parse("2012-06").unwrap();
        assert_eq!(smart.date.unwrap().day(), 1);

        let strict = formatter.clone().with_resolver_style(ResolverStyle::Strict);
        assert!(strict.parse("2012-06").is_err());
    }
}
