//! The printer/parser tree: a closed set of tagged node kinds and the tree-walking
//! interpreter that prints or parses each one.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use super::context::{ParseContext, PrintContext};
use super::field::Field;

/// Policy for printing (and, for variable-width fields, parsing) a [`Node::Value`]'s sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignStyle {
    /// The value must never be negative; printing a negative value is an error.
    Never,
    /// A `-` is printed iff the value is negative; nothing otherwise.
    Normal,
    /// A `+` or `-` is always printed.
    Always,
    /// A sign is printed only when the magnitude needs more digits than `min_width`.
    ExceedsPad,
    /// Like [`Never`](Self::Never), but reserved for internally-constructed fixed-width
    /// fields (e.g. the `[width, width]` form of `appendValue`).
    NotNegative,
}

/// The fixed repertoire of offset patterns from §4.2/§3 of the design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OffsetPattern {
    /// `+HH`
    Hours,
    /// `+HHMM`
    HoursMinutes,
    /// `+HH:MM`
    HoursColonMinutes,
    /// `+HHMMss` -- seconds omitted when zero.
    HoursMinutesOptionalSeconds,
    /// `+HH:MM:ss` -- seconds omitted when zero.
    HoursColonMinutesOptionalSeconds,
    /// `+HHMMSS` -- seconds always printed.
    HoursMinutesSeconds,
    /// `+HH:MM:SS` -- seconds always printed.
    HoursColonMinutesSeconds,
}

/// Errors that can occur while printing a node tree against a [`PrintContext`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The temporal being printed does not support the given field.
    UnsupportedField(Field),
    /// A field had a negative value but its sign style forbids negatives.
    NegativeNotAllowed(Field),
    /// A computed magnitude could not be represented (e.g. pathological overflow).
    Overflow,
    /// A zone-id node was printed, but no zone id text is available (there is no
    /// locale/zone database backing this engine; see the crate's non-goals).
    ZoneIdUnavailable,
}

impl core::fmt::Display for FormatError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FormatError::UnsupportedField(field) => write!(f, "unsupported field: {field}"),
            FormatError::NegativeNotAllowed(field) => write!(f, "field {field} must not be negative here"),
            FormatError::Overflow => f.write_str("value overflowed while formatting"),
            FormatError::ZoneIdUnavailable => f.write_str("no zone id text is available to print"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FormatError {}

/// A node in the printer/parser tree. See the module documentation for the shape of
/// each variant and [`crate::fmt`] for how a tree is assembled and walked.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A literal string, printed and matched verbatim (modulo case-sensitivity).
    Literal(String),
    /// A plain numeric field.
    Value {
        field: Field,
        min_width: u8,
        max_width: u8,
        sign_style: SignStyle,
        /// Non-zero when this node is the head of a subsequent-width group: the total
        /// width, in digits, of the fixed-width `Value` nodes immediately following it
        /// in the same composite. See §4.1/§4.4.
        adjacent_fixed_width: u8,
    },
    /// A fixed-width field, printed and parsed modulo a base cycle. See §4.4.
    ///
    /// `width` is the number of digits printed and the number required in strict
    /// parsing; `max_width` additionally bounds how many digits lenient parsing may
    /// consume when `max_width > width`.
    ReducedValue {
        field: Field,
        width: u8,
        max_width: u8,
        base_value: i64,
    },
    /// A fractional field, e.g. nano-of-second rendered as `.123456789`.
    Fraction {
        field: Field,
        min_width: u8,
        max_width: u8,
        decimal_point: bool,
    },
    /// Left-pads the rendered form of `inner` to at least `width` characters.
    Pad { inner: Box<Node>, width: u8, pad_char: char },
    /// An ordered sequence of nodes.
    Composite(Vec<Node>),
    /// A branch whose parse failure is recoverable; see §4.4.
    Optional(Box<Node>),
    /// A UTC offset, printed/parsed per a fixed repertoire of patterns.
    Offset { pattern: OffsetPattern, no_offset_text: String },
    /// A textual zone identifier (not a zone *name* -- no locale database involved).
    ZoneId,
    /// A full instant, rendered as an ISO-8601 UTC date-time with a trailing `Z`.
    Instant,
    /// Sets the parser's case-sensitivity flag from this point forward.
    CaseSensitivity(bool),
    /// Sets the parser's strictness flag from this point forward.
    Strict(bool),
}

/// Result of a parse attempt on one node: the new cursor position on success, or the
/// position at which the mismatch was detected on failure. This is the `Result<usize,
/// usize>` encoding the design notes call out as equivalent to the original `~pos`
/// bitwise-complement trick.
pub(super) type NodeParseResult = Result<usize, usize>;

fn magnitude_digit_count(mut magnitude: i64) -> u8 {
    if magnitude == 0 {
        return 1;
    }
    let mut count = 0u8;
    while magnitude > 0 {
        magnitude /= 10;
        count += 1;
    }
    count
}

fn scan_digits(text: &str, pos: usize, max_len: usize) -> usize {
    text.as_bytes()[pos..]
        .iter()
        .take(max_len)
        .take_while(|b| b.is_ascii_digit())
        .count()
}

fn eq_literal(text: &str, pos: usize, literal: &str, case_sensitive: bool) -> bool {
    let slice = match text.get(pos..pos + literal.len()) {
        Some(s) => s,
        None => return false,
    };
    if case_sensitive {
        slice == literal
    } else {
        slice.eq_ignore_ascii_case(literal)
    }
}

impl Node {
    /// Prints this node (and, for composites, its descendants) into `ctx`.
    pub(super) fn print(&self, ctx: &mut PrintContext<'_>) -> Result<(), FormatError> {
        match self {
            Node::Literal(s) => {
                ctx.buffer.push_str(s);
                Ok(())
            }
            Node::Value {
                field,
                min_width,
                sign_style,
                ..
            } => print_value(*field, *min_width, *sign_style, ctx),
            Node::ReducedValue {
                field, width, base_value, ..
            } => print_reduced(*field, *width, *base_value, ctx),
            Node::Fraction {
                field,
                min_width,
                max_width,
                decimal_point,
            } => print_fraction(*field, *min_width, *max_width, *decimal_point, ctx),
            Node::Pad { inner, width, pad_char } => {
                let start = ctx.buffer.len();
                inner.print(ctx)?;
                let rendered_len = ctx.buffer.len() - start;
                if rendered_len < *width as usize {
                    let pad = core::iter::repeat(*pad_char)
                        .take(*width as usize - rendered_len)
                        .collect::<String>();
                    ctx.buffer.insert_str(start, &pad);
                }
                Ok(())
            }
            Node::Composite(nodes) => {
                for node in nodes {
                    node.print(ctx)?;
                }
                Ok(())
            }
            Node::Optional(inner) => {
                if inner.required_fields_present(ctx) {
                    inner.print(ctx)?;
                }
                Ok(())
            }
            Node::Offset { pattern, no_offset_text } => print_offset(*pattern, no_offset_text, ctx),
            Node::ZoneId => Err(FormatError::ZoneIdUnavailable),
            Node::Instant => print_instant(ctx),
            Node::CaseSensitivity(_) | Node::Strict(_) => Ok(()),
        }
    }

    /// Returns `true` if every field this node (transitively) reads is supported by the
    /// accessor in `ctx`. Used by [`Node::Optional`] on print to decide whether to emit.
    fn required_fields_present(&self, ctx: &PrintContext<'_>) -> bool {
        match self {
            Node::Literal(_) | Node::CaseSensitivity(_) | Node::Strict(_) => true,
            Node::ZoneId => false,
            Node::Instant => true,
            Node::Value { field, .. } | Node::ReducedValue { field, .. } | Node::Fraction { field, .. } => {
                ctx.is_supported(*field)
            }
            Node::Pad { inner, .. } | Node::Optional(inner) => inner.required_fields_present(ctx),
            Node::Composite(nodes) => nodes.iter().all(|n| n.required_fields_present(ctx)),
            Node::Offset { .. } => ctx.offset_seconds().is_some(),
        }
    }

    /// Parses this node out of `text` starting at `pos`, mutating `ctx`'s bindings on
    /// success.
    pub(super) fn parse(&self, ctx: &mut ParseContext, text: &str, pos: usize) -> NodeParseResult {
        match self {
            Node::Literal(s) => {
                if eq_literal(text, pos, s, ctx.case_sensitive) {
                    Ok(pos + s.len())
                } else {
                    Err(pos)
                }
            }
            Node::Value {
                field,
                min_width,
                max_width,
                sign_style,
                adjacent_fixed_width,
            } => {
                if *adjacent_fixed_width > 0 {
                    parse_value_adjacent(*field, *min_width, *max_width, *sign_style, *adjacent_fixed_width, ctx, text, pos)
                } else {
                    parse_value(*field, *min_width, *max_width, *sign_style, ctx, text, pos)
                }
            }
            Node::ReducedValue {
                field,
                width,
                max_width,
                base_value,
            } => parse_reduced(*field, *width, *max_width, *base_value, ctx, text, pos),
            Node::Fraction {
                field,
                min_width,
                max_width,
                decimal_point,
            } => parse_fraction(*field, *min_width, *max_width, *decimal_point, ctx, text, pos),
            Node::Pad { inner, .. } => inner.parse(ctx, text, pos),
            Node::Composite(nodes) => {
                let mut cursor = pos;
                for node in nodes {
                    cursor = node.parse(ctx, text, cursor)?;
                }
                Ok(cursor)
            }
            Node::Optional(inner) => {
                let snapshot = ctx.snapshot();
                match inner.parse(ctx, text, pos) {
                    Ok(new_pos) => Ok(new_pos),
                    Err(_) => {
                        ctx.restore(snapshot);
                        Ok(pos)
                    }
                }
            }
            Node::Offset { pattern, no_offset_text } => parse_offset(*pattern, no_offset_text, ctx, text, pos),
            Node::ZoneId => parse_zone_id(ctx, text, pos),
            Node::Instant => parse_instant(ctx, text, pos),
            Node::CaseSensitivity(flag) => {
                ctx.case_sensitive = *flag;
                Ok(pos)
            }
            Node::Strict(flag) => {
                ctx.strict = *flag;
                Ok(pos)
            }
        }
    }

    /// Pretty-prints this node per §4.6.
    pub(super) fn to_pattern_string(&self, out: &mut String) {
        match self {
            Node::Literal(s) => {
                out.push('\'');
                for c in s.chars() {
                    out.push(c);
                    if c == '\'' {
                        out.push('\'');
                    }
                }
                out.push('\'');
            }
            Node::Value {
                field,
                min_width,
                max_width,
                sign_style,
                ..
            } => {
                if min_width == max_width && matches!(sign_style, SignStyle::NotNegative) {
                    out.push_str(&format!("Value({field},{min_width})"));
                } else {
                    out.push_str(&format!("Value({field},{min_width},{max_width},{sign_style:?})"));
                }
            }
            Node::ReducedValue {
                field,
                width,
                max_width,
                base_value,
            } => {
                out.push_str(&format!("ReducedValue({field},{width},{max_width},{base_value})"));
            }
            Node::Fraction { field, min_width, max_width, .. } => {
                out.push_str(&format!("Fraction({field},{min_width},{max_width})"));
            }
            Node::Pad { inner, width, pad_char } => {
                out.push_str("Pad(");
                inner.to_pattern_string(out);
                out.push_str(&format!(",{width},'{pad_char}')"));
            }
            Node::Composite(nodes) => {
                for node in nodes {
                    node.to_pattern_string(out);
                }
            }
            Node::Optional(inner) => {
                out.push('[');
                inner.to_pattern_string(out);
                out.push(']');
            }
            Node::Offset { pattern, no_offset_text } => {
                out.push_str(&format!("Offset({pattern:?},'{no_offset_text}')"));
            }
            Node::ZoneId => out.push_str("ZoneId()"),
            Node::Instant => out.push_str("Instant()"),
            Node::CaseSensitivity(flag) => out.push_str(&format!("ParseCaseSensitive({flag})")),
            Node::Strict(flag) => out.push_str(&format!("ParseStrict({flag})")),
        }
    }
}

fn print_value(field: Field, min_width: u8, sign_style: SignStyle, ctx: &mut PrintContext<'_>) -> Result<(), FormatError> {
    if !ctx.is_supported(field) {
        return Err(FormatError::UnsupportedField(field));
    }
    let value = ctx.get(field);
    let negative = value < 0;
    if negative && matches!(sign_style, SignStyle::Never | SignStyle::NotNegative) {
        return Err(FormatError::NegativeNotAllowed(field));
    }
    let magnitude = value.unsigned_abs();
    match sign_style {
        SignStyle::Normal => {
            if negative {
                ctx.buffer.push('-');
            }
        }
        SignStyle::Always => ctx.buffer.push(if negative { '-' } else { '+' }),
        SignStyle::ExceedsPad => {
            if negative {
                ctx.buffer.push('-');
            } else if magnitude_digit_count(magnitude as i64) > min_width {
                ctx.buffer.push('+');
            }
        }
        SignStyle::Never | SignStyle::NotNegative => {}
    }
    ctx.buffer.push_str(&format!("{:0width$}", magnitude, width = min_width as usize));
    Ok(())
}

fn parse_value(
    field: Field,
    min_width: u8,
    max_width: u8,
    sign_style: SignStyle,
    ctx: &mut ParseContext,
    text: &str,
    pos: usize,
) -> NodeParseResult {
    let mut cursor = pos;
    let mut negative = false;
    if let Some(&c) = text.as_bytes().get(cursor) {
        if c == b'-' && !matches!(sign_style, SignStyle::Never | SignStyle::NotNegative) {
            negative = true;
            cursor += 1;
        } else if c == b'+' && matches!(sign_style, SignStyle::Always | SignStyle::ExceedsPad) {
            cursor += 1;
        }
    }
    let digit_start = cursor;
    let len = scan_digits(text, cursor, max_width as usize);
    if len < min_width as usize {
        return Err(pos);
    }
    let digits = &text[digit_start..digit_start + len];
    let magnitude: i64 = digits.parse().map_err(|_| pos)?;
    let value = if negative { -magnitude } else { magnitude };
    ctx.bindings.bind(field, value).map_err(|_| pos)?;
    Ok(digit_start + len)
}

/// The subsequent-width / adjacent-value algorithm from §4.4.
fn parse_value_adjacent(
    field: Field,
    min_width: u8,
    max_width: u8,
    sign_style: SignStyle,
    trailing_fixed_width: u8,
    ctx: &mut ParseContext,
    text: &str,
    pos: usize,
) -> NodeParseResult {
    let mut cursor = pos;
    let mut negative = false;
    if let Some(&c) = text.as_bytes().get(cursor) {
        if c == b'-' && !matches!(sign_style, SignStyle::Never | SignStyle::NotNegative) {
            negative = true;
            cursor += 1;
        } else if c == b'+' && matches!(sign_style, SignStyle::Always | SignStyle::ExceedsPad) {
            cursor += 1;
        }
    }
    let digit_start = cursor;
    let f = trailing_fixed_width as usize;
    let total_available = max_width as usize + f;
    let run_len = scan_digits(text, cursor, total_available);
    if run_len < min_width as usize + f {
        return Err(pos);
    }
    let own_len = run_len - f;
    let digits = &text[digit_start..digit_start + own_len];
    let magnitude: i64 = if digits.is_empty() { 0 } else { digits.parse().map_err(|_| pos)? };
    let value = if negative { -magnitude } else { magnitude };
    ctx.bindings.bind(field, value).map_err(|_| pos)?;
    Ok(digit_start + own_len)
}

fn print_reduced(field: Field, width: u8, base_value: i64, ctx: &mut PrintContext<'_>) -> Result<(), FormatError> {
    if !ctx.is_supported(field) {
        return Err(FormatError::UnsupportedField(field));
    }
    let value = ctx.get(field);
    let modulus = 10i64.pow(width as u32);
    let reduced = (value - base_value).rem_euclid(modulus);
    ctx.buffer.push_str(&format!("{:0width$}", reduced, width = width as usize));
    Ok(())
}

fn parse_reduced(
    field: Field,
    width: u8,
    max_width: u8,
    base_value: i64,
    ctx: &mut ParseContext,
    text: &str,
    pos: usize,
) -> NodeParseResult {
    let scan_width = if ctx.strict { width } else { max_width };
    let len = scan_digits(text, pos, scan_width as usize);
    if len < width as usize {
        return Err(pos);
    }
    let digits = &text[pos..pos + len];
    let parsed: i64 = digits.parse().map_err(|_| pos)?;
    let modulus = 10i64.pow(len as u32);
    let cycle_start = base_value - base_value.rem_euclid(modulus);
    let mut value = cycle_start + parsed;
    if value < base_value {
        value += modulus;
    }
    ctx.bindings.bind(field, value).map_err(|_| pos)?;
    Ok(pos + len)
}

fn print_fraction(
    field: Field,
    min_width: u8,
    max_width: u8,
    decimal_point: bool,
    ctx: &mut PrintContext<'_>,
) -> Result<(), FormatError> {
    if !ctx.is_supported(field) {
        return Err(FormatError::UnsupportedField(field));
    }
    let value = ctx.get(field);
    let (lo, hi) = field.range();
    let range = (hi - lo + 1) as u128;
    let scaled = (value - lo) as u128 * 10u128.pow(max_width as u32) / range;
    let mut digits = format!("{:0width$}", scaled, width = max_width as usize);
    while digits.len() > min_width as usize && digits.ends_with('0') {
        digits.pop();
    }
    if decimal_point && !digits.is_empty() {
        ctx.buffer.push('.');
    }
    ctx.buffer.push_str(&digits);
    Ok(())
}

fn parse_fraction(
    field: Field,
    min_width: u8,
    max_width: u8,
    decimal_point: bool,
    ctx: &mut ParseContext,
    text: &str,
    pos: usize,
) -> NodeParseResult {
    let mut cursor = pos;
    if decimal_point {
        if let Some(b'.') = text.as_bytes().get(cursor) {
            cursor += 1;
        } else if min_width > 0 {
            return Err(pos);
        } else {
            return Ok(pos);
        }
    }
    let digit_start = cursor;
    let required_min = if ctx.strict { min_width } else { 0 };
    let len = scan_digits(text, cursor, max_width as usize);
    if len < required_min as usize {
        return Err(pos);
    }
    if len == 0 {
        return Ok(pos);
    }
    let digits = &text[digit_start..digit_start + len];
    let parsed: u128 = digits.parse().map_err(|_| pos)?;
    let (lo, hi) = field.range();
    let range = (hi - lo + 1) as u128;
    let value = lo + (parsed * range / 10u128.pow(len as u32)) as i64;
    ctx.bindings.bind(field, value).map_err(|_| pos)?;
    Ok(digit_start + len)
}

fn offset_hms(pattern: OffsetPattern, secs: i32) -> (char, u32, u32, u32, bool) {
    let sign = if secs < 0 { '-' } else { '+' };
    let secs_abs = secs.unsigned_abs();
    let hh = secs_abs / 3600;
    let mm = (secs_abs % 3600) / 60;
    let ss = secs_abs % 60;
    let always_seconds = matches!(
        pattern,
        OffsetPattern::HoursMinutesSeconds | OffsetPattern::HoursColonMinutesSeconds
    );
    (sign, hh, mm, ss, always_seconds)
}

fn print_offset(pattern: OffsetPattern, no_offset_text: &str, ctx: &mut PrintContext<'_>) -> Result<(), FormatError> {
    let secs = ctx.offset_seconds().ok_or(FormatError::UnsupportedField(Field::OffsetSeconds))?;
    if secs == 0 && !no_offset_text.is_empty() {
        ctx.buffer.push_str(no_offset_text);
        return Ok(());
    }
    let (sign, hh, mm, ss, always_seconds) = offset_hms(pattern, secs);
    match pattern {
        OffsetPattern::Hours => ctx.buffer.push_str(&format!("{sign}{hh:02}")),
        OffsetPattern::HoursMinutes => ctx.buffer.push_str(&format!("{sign}{hh:02}{mm:02}")),
        OffsetPattern::HoursColonMinutes => ctx.buffer.push_str(&format!("{sign}{hh:02}:{mm:02}")),
        OffsetPattern::HoursMinutesOptionalSeconds => {
            if ss != 0 || always_seconds {
                ctx.buffer.push_str(&format!("{sign}{hh:02}{mm:02}{ss:02}"));
            } else {
                ctx.buffer.push_str(&format!("{sign}{hh:02}{mm:02}"));
            }
        }
        OffsetPattern::HoursColonMinutesOptionalSeconds => {
            if ss != 0 || always_seconds {
                ctx.buffer.push_str(&format!("{sign}{hh:02}:{mm:02}:{ss:02}"));
            } else {
                ctx.buffer.push_str(&format!("{sign}{hh:02}:{mm:02}"));
            }
        }
        OffsetPattern::HoursMinutesSeconds => ctx.buffer.push_str(&format!("{sign}{hh:02}{mm:02}{ss:02}")),
        OffsetPattern::HoursColonMinutesSeconds => ctx.buffer.push_str(&format!("{sign}{hh:02}:{mm:02}:{ss:02}")),
    }
    Ok(())
}

fn parse_offset(pattern: OffsetPattern, no_offset_text: &str, ctx: &mut ParseContext, text: &str, pos: usize) -> NodeParseResult {
    if !no_offset_text.is_empty() && eq_literal(text, pos, no_offset_text, ctx.case_sensitive) {
        ctx.bindings.bind(Field::OffsetSeconds, 0).map_err(|_| pos)?;
        return Ok(pos + no_offset_text.len());
    }

    let mut cursor = pos;
    let negative = match text.as_bytes().get(cursor) {
        Some(b'+') => false,
        Some(b'-') => true,
        _ => return Err(pos),
    };
    cursor += 1;

    let take_two_digits = |text: &str, cursor: usize| -> Result<(u32, usize), usize> {
        let len = scan_digits(text, cursor, 2);
        if len != 2 {
            return Err(cursor);
        }
        let v: u32 = text[cursor..cursor + 2].parse().map_err(|_| cursor)?;
        Ok((v, cursor + 2))
    };
    let expect_colon = |text: &str, cursor: usize| -> Result<usize, usize> {
        if text.as_bytes().get(cursor) == Some(&b':') {
            Ok(cursor + 1)
        } else {
            Err(cursor)
        }
    };

    let (hh, next) = take_two_digits(text, cursor)?;
    cursor = next;
    let has_colon = matches!(
        pattern,
        OffsetPattern::HoursColonMinutes
            | OffsetPattern::HoursColonMinutesOptionalSeconds
            | OffsetPattern::HoursColonMinutesSeconds
    );

    let mm;
    let mut ss = 0u32;
    match pattern {
        OffsetPattern::Hours => {
            mm = 0;
        }
        _ => {
            if has_colon {
                cursor = expect_colon(text, cursor)?;
            }
            let (m, next) = take_two_digits(text, cursor)?;
            mm = m;
            cursor = next;

            let seconds_optional = matches!(
                pattern,
                OffsetPattern::HoursMinutesOptionalSeconds | OffsetPattern::HoursColonMinutesOptionalSeconds
            );
            let seconds_mandatory = matches!(
                pattern,
                OffsetPattern::HoursMinutesSeconds | OffsetPattern::HoursColonMinutesSeconds
            );
            if seconds_mandatory {
                if has_colon {
                    cursor = expect_colon(text, cursor)?;
                }
                let (s, next) = take_two_digits(text, cursor)?;
                ss = s;
                cursor = next;
            } else if seconds_optional {
                let attempt = (|| -> Result<(u32, usize), usize> {
                    let mut c = cursor;
                    if has_colon {
                        c = expect_colon(text, c)?;
                    }
                    take_two_digits(text, c)
                })();
                if let Ok((s, next)) = attempt {
                    ss = s;
                    cursor = next;
                }
            }
        }
    }

    let total = hh as i32 * 3600 + mm as i32 * 60 + ss as i32;
    let value = if negative { -total } else { total };
    ctx.bindings.bind(Field::OffsetSeconds, value as i64).map_err(|_| pos)?;
    Ok(cursor)
}

fn print_instant(ctx: &mut PrintContext<'_>) -> Result<(), FormatError> {
    for field in [
        Field::Year,
        Field::MonthOfYear,
        Field::DayOfMonth,
        Field::HourOfDay,
        Field::MinuteOfHour,
        Field::SecondOfMinute,
    ] {
        if !ctx.is_supported(field) {
            return Err(FormatError::UnsupportedField(field));
        }
    }
    let year = ctx.get(Field::Year);
    let nano = if ctx.is_supported(Field::NanoOfSecond) {
        ctx.get(Field::NanoOfSecond)
    } else {
        0
    };
    ctx.buffer.push_str(&format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
        year,
        ctx.get(Field::MonthOfYear),
        ctx.get(Field::DayOfMonth),
        ctx.get(Field::HourOfDay),
        ctx.get(Field::MinuteOfHour),
        ctx.get(Field::SecondOfMinute),
    ));
    if nano != 0 {
        ctx.buffer.push_str(&format!(".{nano:09}"));
    }
    ctx.buffer.push('Z');
    Ok(())
}

fn parse_instant(ctx: &mut ParseContext, text: &str, pos: usize) -> NodeParseResult {
    let mut cursor = pos;
    let (y, next) = {
        let len = scan_digits(text, cursor, 4);
        if len != 4 {
            return Err(pos);
        }
        (text[cursor..cursor + 4].parse::<i64>().map_err(|_| pos)?, cursor + 4)
    };
    cursor = next;
    macro_rules! lit {
        ($ch:expr) => {
            if text.as_bytes().get(cursor) != Some(&($ch as u8)) {
                return Err(cursor);
            }
            cursor += 1;
        };
    }
    macro_rules! two {
        () => {{
            let len = scan_digits(text, cursor, 2);
            if len != 2 {
                return Err(cursor);
            }
            let v: i64 = text[cursor..cursor + 2].parse().map_err(|_| cursor)?;
            cursor += 2;
            v
        }};
    }
    lit!('-');
    let month = two!();
    lit!('-');
    let day = two!();
    lit!('T');
    let hour = two!();
    lit!(':');
    let minute = two!();
    lit!(':');
    let second = two!();
    let mut nano = 0i64;
    if text.as_bytes().get(cursor) == Some(&b'.') {
        cursor += 1;
        let len = scan_digits(text, cursor, 9);
        if len == 0 {
            return Err(cursor);
        }
        let digits = &text[cursor..cursor + len];
        let parsed: i64 = digits.parse().map_err(|_| cursor)?;
        nano = parsed * 10i64.pow(9 - len as u32);
        cursor += len;
    }
    lit!('Z');

    ctx.bindings.bind(Field::Year, y).map_err(|_| pos)?;
    ctx.bindings.bind(Field::MonthOfYear, month).map_err(|_| pos)?;
    ctx.bindings.bind(Field::DayOfMonth, day).map_err(|_| pos)?;
    ctx.bindings.bind(Field::HourOfDay, hour).map_err(|_| pos)?;
    ctx.bindings.bind(Field::MinuteOfHour, minute).map_err(|_| pos)?;
    ctx.bindings.bind(Field::SecondOfMinute, second).map_err(|_| pos)?;
    ctx.bindings.bind(Field::NanoOfSecond, nano).map_err(|_| pos)?;
    ctx.bindings.bind(Field::OffsetSeconds, 0).map_err(|_| pos)?;
    Ok(cursor)
}

fn parse_zone_id(ctx: &mut ParseContext, text: &str, pos: usize) -> NodeParseResult {
    let len = text.as_bytes()[pos..]
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric() || matches!(b, b'/' | b'_' | b'+' | b'-'))
        .count();
    if len == 0 {
        return Err(pos);
    }
    ctx.bindings.set_zone_id(text[pos..pos + len].to_string());
    Ok(pos + len)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedAccessor {
        fields: Vec<(Field, i64)>,
        offset_seconds: Option<i32>,
    }

    impl FixedAccessor {
        fn new(fields: Vec<(Field, i64)>) -> Self {
            Self { fields, offset_seconds: None }
        }

        fn with_offset(mut self, secs: i32) -> Self {
            self.offset_seconds = Some(secs);
            self
        }
    }

    impl TemporalAccessor for FixedAccessor {
        fn is_supported(&self, field: Field) -> bool {
            self.fields.iter().any(|(f, _)| *f == field)
        }

        fn get(&self, field: Field) -> i64 {
            self.fields.iter().find(|(f, _)| *f == field).map(|(_, v)| *v).unwrap()
        }

        fn offset_seconds(&self) -> Option<i32> {
            self.offset_seconds
        }
    }

    #[test]
    fn scan_digits_stops_at_first_non_digit_or_max_len() {
        assert_eq!(scan_digits("123abc", 0, 10), 3);
        assert_eq!(scan_digits("123456", 0, 4), 4);
        assert_eq!(scan_digits("abc", 0, 10), 0);
    }

    #[test]
    fn value_node_prints_with_sign_style_normal() {
        let accessor = FixedAccessor::new(vec![(Field::MonthOfYear, -3)]);
        let mut ctx = PrintContext::new(&accessor);
        let err = print_value(Field::MonthOfYear, 2, SignStyle::Never, &mut ctx).unwrap_err();
        assert_eq!(err, FormatError::NegativeNotAllowed(Field::MonthOfYear));

        let mut ctx = PrintContext::new(&accessor);
        print_value(Field::MonthOfYear, 2, SignStyle::Normal, &mut ctx).unwrap();
        assert_eq!(ctx.buffer, "-03");
    }

    #[test]
    fn value_node_parse_rejects_too_few_digits() {
        let mut ctx = ParseContext::new();
        assert_eq!(parse_value(Field::MonthOfYear, 2, 2, SignStyle::Normal, &mut ctx, "6", 0), Err(0));
    }

    #[test]
    fn value_node_parse_round_trips_through_print() {
        let accessor = FixedAccessor::new(vec![(Field::DayOfMonth, 7)]);
        let mut print_ctx = PrintContext::new(&accessor);
        print_value(Field::DayOfMonth, 2, SignStyle::Normal, &mut print_ctx).unwrap();
        assert_eq!(print_ctx.buffer, "07");

        let mut parse_ctx = ParseContext::new();
        let end = parse_value(Field::DayOfMonth, 2, 2, SignStyle::Normal, &mut parse_ctx, &print_ctx.buffer, 0).unwrap();
        assert_eq!(end, 2);
        assert_eq!(parse_ctx.bindings.get(Field::DayOfMonth), Some(7));
    }

    #[test]
    fn reduced_value_parse_picks_the_cycle_closest_to_base() {
        let mut ctx = ParseContext::new();
        // base 2000, two-digit window covers [2000, 2099]; "55" resolves to 2055.
        let end = parse_reduced(Field::Year, 2, 2, 2000, &mut ctx, "55", 0).unwrap();
        assert_eq!(end, 2);
        assert_eq!(ctx.bindings.get(Field::Year), Some(2055));
    }

    #[test]
    fn reduced_value_print_wraps_into_the_base_cycle() {
        let accessor = FixedAccessor::new(vec![(Field::Year, 1969)]);
        let mut ctx = PrintContext::new(&accessor);
        print_reduced(Field::Year, 2, 2000, &mut ctx).unwrap();
        assert_eq!(ctx.buffer, "69");
    }

    #[test]
    fn pad_node_left_pads_its_inner_rendering() {
        let accessor = FixedAccessor::new(vec![(Field::DayOfMonth, 7)]);
        let mut ctx = PrintContext::new(&accessor);
        let inner = Node::Value {
            field: Field::DayOfMonth,
            min_width: 1,
            max_width: 2,
            sign_style: SignStyle::Normal,
            adjacent_fixed_width: 0,
        };
        let node = Node::Pad { inner: Box::new(inner), width: 4, pad_char: '*' };
        node.print(&mut ctx).unwrap();
        assert_eq!(ctx.buffer, "***7");
    }

    #[test]
    fn optional_node_is_skipped_on_print_when_its_field_is_unsupported() {
        let accessor = FixedAccessor::new(vec![]);
        let mut ctx = PrintContext::new(&accessor);
        let node = Node::Optional(Box::new(Node::Value {
            field: Field::DayOfMonth,
            min_width: 2,
            max_width: 2,
            sign_style: SignStyle::Normal,
            adjacent_fixed_width: 0,
        }));
        node.print(&mut ctx).unwrap();
        assert_eq!(ctx.buffer, "");
    }

    #[test]
    fn optional_node_rolls_back_bindings_on_a_failed_parse() {
        let node = Node::Composite(vec![
            Node::Optional(Box::new(Node::Composite(vec![
                Node::Value {
                    field: Field::MonthOfYear,
                    min_width: 2,
                    max_width: 2,
                    sign_style: SignStyle::Normal,
                    adjacent_fixed_width: 0,
                },
                Node::Literal("-".to_string()),
            ]))),
            Node::Value {
                field: Field::DayOfMonth,
                min_width: 2,
                max_width: 2,
                sign_style: SignStyle::Normal,
                adjacent_fixed_width: 0,
            },
        ]);
        let mut ctx = ParseContext::new();
        // "06" alone can't satisfy the optional branch (no trailing '-'), so it must
        // back out and leave MonthOfYear unbound, matching "06" against DayOfMonth.
        let end = node.parse(&mut ctx, "06", 0).unwrap();
        assert_eq!(end, 2);
        assert_eq!(ctx.bindings.get(Field::MonthOfYear), None);
        assert_eq!(ctx.bindings.get(Field::DayOfMonth), Some(6));
    }

    #[test]
    fn offset_node_round_trips_hours_colon_minutes() {
        let accessor = FixedAccessor::new(vec![]).with_offset(-9000);
        let mut ctx = PrintContext::new(&accessor);
        print_offset(OffsetPattern::HoursColonMinutes, "Z", &mut ctx).unwrap();
        assert_eq!(ctx.buffer, "-02:30");

        let mut parse_ctx = ParseContext::new();
        let end = parse_offset(OffsetPattern::HoursColonMinutes, "Z", &mut parse_ctx, &ctx.buffer, 0).unwrap();
        assert_eq!(end, ctx.buffer.len());
        assert_eq!(parse_ctx.bindings.get(Field::OffsetSeconds), Some(-9000));
    }
}
