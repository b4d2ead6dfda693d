//! The fluent node-tree assembler. Mirrors a `DateTimeFormatterBuilder`-style API:
//! each `append_*` call pushes one more leaf onto the tree under construction, and
//! [`Builder::to_formatter`] seals it into a [`Formatter`](super::formatter::Formatter).

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use super::field::Field;
use super::node::{Node, OffsetPattern, SignStyle};
use super::pattern::{self, PatternError};
use super::resolver::ResolverStyle;
use super::Formatter;

/// Errors that can occur while assembling a node tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuilderError {
    /// `optional_end` was called without a matching `optional_start`.
    UnmatchedOptionalEnd,
    /// A `min_width`/`max_width` pair was inconsistent (zero, or `min > max`).
    InvalidWidth { min_width: u8, max_width: u8 },
    /// `append_fraction` was called on a field without a fixed value range.
    FractionFieldNotFixedWidth(Field),
    /// `append_pattern` failed to compile the given pattern string.
    Pattern(PatternError),
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BuilderError::UnmatchedOptionalEnd => f.write_str("optional_end() with no matching optional_start()"),
            BuilderError::InvalidWidth { min_width, max_width } => {
                write!(f, "invalid width range [{min_width}, {max_width}]")
            }
            BuilderError::FractionFieldNotFixedWidth(field) => {
                write!(f, "field {field} does not have a fixed range and cannot be used in append_fraction")
            }
            BuilderError::Pattern(err) => write!(f, "{err}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BuilderError {}

impl From<PatternError> for BuilderError {
    fn from(err: PatternError) -> Self {
        BuilderError::Pattern(err)
    }
}

/// Assembles a printer/parser node tree one call at a time.
#[derive(Debug)]
pub struct Builder {
    stack: Vec<Vec<Node>>,
    pending_variable: Option<usize>,
    pad: Option<(u8, char)>,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stack: vec![Vec::new()],
            pending_variable: None,
            pad: None,
        }
    }

    fn active(&mut self) -> &mut Vec<Node> {
        self.stack.last_mut().expect("builder stack is never empty")
    }

    fn close_pending_group(&mut self) {
        self.pending_variable = None;
    }

    /// Appends a leaf node, applying any pending `pad_next` wrap and updating the
    /// subsequent-width tracking per §4.4.
    fn push_leaf(&mut self, node: Node, fixed_width: Option<u8>, starts_variable_group: bool) {
        let node = if let Some((width, pad_char)) = self.pad.take() {
            Node::Pad {
                inner: Box::new(node),
                width,
                pad_char,
            }
        } else {
            node
        };

        if let Some(extra) = fixed_width {
            if let Some(idx) = self.pending_variable {
                add_adjacent_width(&mut self.active()[idx], extra);
                self.active().push(node);
                return;
            }
        }

        let index = self.active().len();
        self.active().push(node);
        self.pending_variable = if starts_variable_group { Some(index) } else { None };
    }

    /// Appends a literal string, printed and matched verbatim.
    pub fn append_literal(&mut self, literal: impl Into<String>) -> &mut Self {
        self.push_leaf(Node::Literal(literal.into()), None, false);
        self
    }

    /// Appends a fixed-width, non-negative numeric field (the common case -- e.g.
    /// two-digit month-of-year).
    pub fn append_value(&mut self, field: Field, width: u8) -> Result<&mut Self, BuilderError> {
        if width == 0 || width > 15 {
            return Err(BuilderError::InvalidWidth { min_width: width, max_width: width });
        }
        let fixed_width = if self.pending_variable.is_some() { Some(width) } else { None };
        self.push_leaf(
            Node::Value {
                field,
                min_width: width,
                max_width: width,
                sign_style: SignStyle::NotNegative,
                adjacent_fixed_width: 0,
            },
            fixed_width,
            false,
        );
        self
    }

    /// Appends a variable-width numeric field with an explicit sign style.
    pub fn append_value_range(
        &mut self,
        field: Field,
        min_width: u8,
        max_width: u8,
        sign_style: SignStyle,
    ) -> Result<&mut Self, BuilderError> {
        if min_width == 0 || min_width > max_width || max_width > 15 {
            return Err(BuilderError::InvalidWidth { min_width, max_width });
        }
        let is_fixed = min_width == max_width;
        let fixed_width = if is_fixed && self.pending_variable.is_some() { Some(max_width) } else { None };
        self.push_leaf(
            Node::Value {
                field,
                min_width,
                max_width,
                sign_style,
                adjacent_fixed_width: 0,
            },
            fixed_width,
            !is_fixed,
        );
        self
    }

    /// Appends a fixed-width field printed and parsed modulo a base cycle. `max_width`
    /// bounds how many digits lenient parsing may consume; it must satisfy
    /// `width <= max_width <= 10`.
    pub fn append_value_reduced(
        &mut self,
        field: Field,
        width: u8,
        max_width: u8,
        base_value: i64,
    ) -> Result<&mut Self, BuilderError> {
        if width == 0 || width > max_width || max_width > 10 {
            return Err(BuilderError::InvalidWidth { min_width: width, max_width });
        }
        let fixed_width = if self.pending_variable.is_some() { Some(width) } else { None };
        self.push_leaf(
            Node::ReducedValue {
                field,
                width,
                max_width,
                base_value,
            },
            fixed_width,
            false,
        );
        Ok(self)
    }

    /// Appends a fractional field, e.g. `.123456789` for nano-of-second.
    pub fn append_fraction(
        &mut self,
        field: Field,
        min_width: u8,
        max_width: u8,
        decimal_point: bool,
    ) -> Result<&mut Self, BuilderError> {
        if !field.has_fixed_range() {
            return Err(BuilderError::FractionFieldNotFixedWidth(field));
        }
        if min_width > max_width {
            return Err(BuilderError::InvalidWidth { min_width, max_width });
        }
        self.close_pending_group();
        self.push_leaf(
            Node::Fraction {
                field,
                min_width,
                max_width,
                decimal_point,
            },
            None,
            false,
        );
        Ok(self)
    }

    /// Appends a UTC offset using a named pattern, with `no_offset_text` printed for
    /// a zero offset (commonly `"Z"`).
    pub fn append_offset(&mut self, pattern: OffsetPattern, no_offset_text: impl Into<String>) -> &mut Self {
        self.close_pending_group();
        self.push_leaf(
            Node::Offset {
                pattern,
                no_offset_text: no_offset_text.into(),
            },
            None,
            false,
        );
        self
    }

    /// Shorthand for the common `+HH:MM:ss` / `Z` offset id form.
    pub fn append_offset_id(&mut self) -> &mut Self {
        self.append_offset(OffsetPattern::HoursColonMinutesOptionalSeconds, "Z")
    }

    /// Appends a textual zone identifier.
    pub fn append_zone_id(&mut self) -> &mut Self {
        self.close_pending_group();
        self.push_leaf(Node::ZoneId, None, false);
        self
    }

    /// Appends a full instant, rendered as an ISO-8601 UTC date-time with `Z`.
    pub fn append_instant(&mut self) -> &mut Self {
        self.close_pending_group();
        self.push_leaf(Node::Instant, None, false);
        self
    }

    /// Marks the next leaf node as left-padded to at least `width` characters with
    /// `pad_char`.
    pub fn pad_next(&mut self, width: u8, pad_char: char) -> &mut Self {
        self.pad = Some((width, pad_char));
        self
    }

    /// Opens a speculative, rollback-on-failure branch. Must be matched by a later
    /// `optional_end`.
    pub fn optional_start(&mut self) -> &mut Self {
        self.close_pending_group();
        self.stack.push(Vec::new());
        self
    }

    /// Closes the innermost open `optional_start` branch.
    pub fn optional_end(&mut self) -> Result<&mut Self, BuilderError> {
        if self.stack.len() <= 1 {
            return Err(BuilderError::UnmatchedOptionalEnd);
        }
        self.close_pending_group();
        let inner = self.stack.pop().expect("checked len above");
        self.push_leaf(Node::Optional(Box::new(Node::Composite(inner))), None, false);
        Ok(self)
    }

    /// Sets the parser's case-sensitivity flag from this point forward.
    pub fn parse_case_sensitive(&mut self) -> &mut Self {
        self.push_leaf(Node::CaseSensitivity(true), None, false);
        self
    }

    /// See [`Self::parse_case_sensitive`].
    pub fn parse_case_insensitive(&mut self) -> &mut Self {
        self.push_leaf(Node::CaseSensitivity(false), None, false);
        self
    }

    /// Sets the parser's strictness flag from this point forward.
    pub fn parse_strict(&mut self) -> &mut Self {
        self.push_leaf(Node::Strict(true), None, false);
        self
    }

    /// See [`Self::parse_strict`].
    pub fn parse_lenient(&mut self) -> &mut Self {
        self.push_leaf(Node::Strict(false), None, false);
        self
    }

    /// Appends an already-built node tree verbatim (e.g. one produced by another
    /// `Builder`).
    pub fn append(&mut self, node: Node) -> &mut Self {
        self.close_pending_group();
        self.push_leaf(node, None, false);
        self
    }

    /// Compiles a letter-pattern string (see the pattern compiler) and appends its
    /// node tree.
    pub fn append_pattern(&mut self, text: &str) -> Result<&mut Self, BuilderError> {
        pattern::compile_into(text, self)?;
        Ok(self)
    }

    /// Seals the tree under construction into a [`Formatter`] with the given default
    /// resolver style. Any `optional_start` calls still open are closed implicitly,
    /// as if each had been matched by a trailing `optional_end()`.
    pub fn to_formatter(&mut self, resolver_style: ResolverStyle) -> Result<Formatter, BuilderError> {
        while self.stack.len() > 1 {
            self.close_pending_group();
            let inner = self.stack.pop().expect("checked len above");
            self.push_leaf(Node::Optional(Box::new(Node::Composite(inner))), None, false);
        }
        let root = Node::Composite(core::mem::take(&mut self.stack[0]));
        self.pending_variable = None;
        Ok(Formatter::from_root(root, resolver_style))
    }
}

fn add_adjacent_width(node: &mut Node, extra: u8) {
    match node {
        Node::Value { adjacent_fixed_width, .. } => *adjacent_fixed_width += extra,
        Node::Pad { inner, .. } => add_adjacent_width(inner, extra),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_value_rejects_out_of_range_widths() {
        let mut builder = Builder::new();
        assert!(builder.append_value(Field::MonthOfYear, 0).is_err());
        assert!(builder.append_value(Field::MonthOfYear, 16).is_err());
        assert!(builder.append_value(Field::MonthOfYear, 15).is_ok());
    }

    #[test]
    fn append_value_range_rejects_inverted_or_oversized_bounds() {
        let mut builder = Builder::new();
        assert_eq!(
            builder.append_value_range(Field::Year, 5, 2, SignStyle::Normal).unwrap_err(),
            BuilderError::InvalidWidth { min_width: 5, max_width: 2 }
        );
        assert_eq!(
            builder.append_value_range(Field::Year, 1, 16, SignStyle::Normal).unwrap_err(),
            BuilderError::InvalidWidth { min_width: 1, max_width: 16 }
        );
    }

    #[test]
    fn append_value_reduced_rejects_max_width_above_ten() {
        let mut builder = Builder::new();
        assert!(builder.append_value_reduced(Field::Year, 2, 11, 2000).is_err());
        assert!(builder.append_value_reduced(Field::Year, 3, 2, 2000).is_err());
    }

    #[test]
    fn adjacent_width_is_only_patched_onto_a_value_node() {
        let mut builder = Builder::new();
        builder
            .append_value_range(Field::MonthOfYear, 1, 2, SignStyle::Normal)
            .unwrap()
            .append_value(Field::DayOfMonth, 2)
            .unwrap();
        let formatter = builder.to_formatter(ResolverStyle::Smart).unwrap();
        assert_eq!(formatter.to_pattern_string(), "Value(MonthOfYear,1,2,Normal)Value(DayOfMonth,2)");
    }

    #[test]
    fn to_formatter_auto_closes_unmatched_optional_start() {
        let mut builder = Builder::new();
        builder.append_literal("A").optional_start().append_literal("B");
        let formatter = builder.to_formatter(ResolverStyle::Smart).unwrap();
        assert_eq!(formatter.to_pattern_string(), "'A'['B']");
        assert!(formatter.parse("A").is_ok());
        assert!(formatter.parse("AB").is_ok());
    }

    #[test]
    fn optional_end_without_start_is_rejected() {
        let mut builder = Builder::new();
        assert_eq!(builder.optional_end().unwrap_err(), BuilderError::UnmatchedOptionalEnd);
    }
}
