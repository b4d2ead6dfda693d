//! Compiles a java.time-style letter-pattern string (`"uuuu-MM-dd'T'HH:mm:ssXXX"`)
//! into a node tree by driving a [`Builder`]. See the [`crate::fmt`] module docs for
//! the full pattern letter table.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;

use super::builder::{Builder, BuilderError};
use super::field::Field;
use super::node::{OffsetPattern, SignStyle};

/// Errors that can occur while compiling a pattern string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// A letter was used that isn't in the pattern letter table.
    UnknownLetter(char),
    /// A `'` literal was opened but never closed.
    UnclosedLiteral,
    /// A `]` appeared with no matching `[`.
    UnmatchedCloseBracket,
    /// A pattern letter was repeated more times than it supports.
    RepeatTooLong { letter: char, count: usize, max: u8 },
    /// The underlying builder rejected an otherwise well-formed pattern.
    Builder(Box<BuilderError>),
}

impl core::fmt::Display for PatternError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PatternError::UnknownLetter(c) => write!(f, "unknown pattern letter '{c}'"),
            PatternError::UnclosedLiteral => f.write_str("unclosed literal: missing terminating ' quote"),
            PatternError::UnmatchedCloseBracket => f.write_str("unmatched ']': no corresponding '['"),
            PatternError::RepeatTooLong { letter, count, max } => {
                write!(f, "pattern letter '{letter}' repeated {count} times exceeds the maximum of {max}")
            }
            PatternError::Builder(err) => write!(f, "{err}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PatternError {}

impl From<BuilderError> for PatternError {
    fn from(err: BuilderError) -> Self {
        PatternError::Builder(Box::new(err))
    }
}

fn max_repeat(letter: char) -> Option<u8> {
    match letter {
        'y' | 'u' => Some(15),
        'M' | 'L' => Some(2),
        'd' | 'H' | 'K' | 'k' | 'h' | 'm' | 's' | 'q' | 'F' => Some(2),
        'D' => Some(3),
        'S' => Some(9),
        'A' | 'n' | 'N' => Some(2),
        'V' => Some(2),
        'Z' => Some(5),
        'X' | 'x' => Some(5),
        'p' => Some(15),
        _ => None,
    }
}

/// Compiles `text` and appends the resulting nodes onto `builder`.
pub(super) fn compile_into(text: &str, builder: &mut Builder) -> Result<(), PatternError> {
    let chars: alloc::vec::Vec<char> = text.chars().collect();
    let mut i = 0usize;
    let mut bracket_depth: i32 = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '\'' => {
                let mut literal = String::new();
                i += 1;
                loop {
                    if i >= chars.len() {
                        return Err(PatternError::UnclosedLiteral);
                    }
                    if chars[i] == '\'' {
                        if chars.get(i + 1) == Some(&'\'') {
                            literal.push('\'');
                            i += 2;
                            continue;
                        }
                        i += 1;
                        break;
                    }
                    literal.push(chars[i]);
                    i += 1;
                }
                builder.append_literal(literal);
            }
            '[' => {
                bracket_depth += 1;
                builder.optional_start();
                i += 1;
            }
            ']' => {
                bracket_depth -= 1;
                if bracket_depth < 0 {
                    return Err(PatternError::UnmatchedCloseBracket);
                }
                builder.optional_end()?;
                i += 1;
            }
            _ if c.is_ascii_alphabetic() => {
                let start = i;
                while i < chars.len() && chars[i] == c {
                    i += 1;
                }
                let count = i - start;
                if let Some(max) = max_repeat(c) {
                    if count as u8 > max {
                        return Err(PatternError::RepeatTooLong { letter: c, count, max });
                    }
                } else {
                    return Err(PatternError::UnknownLetter(c));
                }
                compile_letter(builder, c, count as u8)?;
            }
            _ => {
                builder.append_literal(format!("{c}"));
                i += 1;
            }
        }
    }

    Ok(())
}

fn compile_letter(builder: &mut Builder, letter: char, count: u8) -> Result<(), PatternError> {
    match letter {
        'p' => {
            builder.pad_next(count, ' ');
            Ok(())
        }
        'u' => append_year(builder, Field::Year, count, true),
        'y' => append_year(builder, Field::YearOfEra, count, true),
        'M' | 'L' => append_narrow(builder, Field::MonthOfYear, count),
        'd' => append_narrow(builder, Field::DayOfMonth, count),
        'D' => append_wide(builder, Field::DayOfYear, count, 3),
        'H' => append_narrow(builder, Field::HourOfDay, count),
        'k' => append_narrow(builder, Field::ClockHourOfDay, count),
        'K' => append_narrow(builder, Field::HourOfAmPm, count),
        'h' => append_narrow(builder, Field::ClockHourOfAmPm, count),
        'm' => append_narrow(builder, Field::MinuteOfHour, count),
        's' => append_narrow(builder, Field::SecondOfMinute, count),
        'S' => {
            builder.append_fraction(Field::NanoOfSecond, count, count, false)?;
            Ok(())
        }
        'A' => append_wide(builder, Field::MilliOfDay, count, 8),
        'n' => append_wide(builder, Field::NanoOfSecond, count, 9),
        'N' => append_wide(builder, Field::NanoOfDay, count, 14),
        'F' => append_narrow(builder, Field::AlignedDayOfWeekInMonth, count),
        'q' => append_narrow(builder, Field::QuarterOfYear, count),
        'V' => {
            if count != 2 {
                return Err(PatternError::Builder(Box::new(BuilderError::InvalidWidth {
                    min_width: count,
                    max_width: count,
                })));
            }
            builder.append_zone_id();
            Ok(())
        }
        'Z' => {
            if count < 5 {
                builder.append_offset(OffsetPattern::HoursMinutes, "+0000");
            } else {
                builder.append_offset(OffsetPattern::HoursColonMinutesOptionalSeconds, "Z");
            }
            Ok(())
        }
        'X' | 'x' => {
            let no_offset_text = if letter == 'X' { "Z" } else { "" };
            let pattern = match count {
                1 => OffsetPattern::Hours,
                2 => OffsetPattern::HoursMinutes,
                3 => OffsetPattern::HoursColonMinutes,
                4 => OffsetPattern::HoursMinutesOptionalSeconds,
                _ => OffsetPattern::HoursColonMinutesOptionalSeconds,
            };
            builder.append_offset(pattern, no_offset_text);
            Ok(())
        }
        _ => Err(PatternError::UnknownLetter(letter)),
    }
}

/// `count == 1` prints/parses 1-2 variable digits; `count == 2` is a fixed two-digit field.
fn append_narrow(builder: &mut Builder, field: Field, count: u8) -> Result<(), PatternError> {
    if count == 1 {
        builder.append_value_range(field, 1, 2, SignStyle::Normal)?;
    } else {
        builder.append_value(field, count)?;
    }
    Ok(())
}

/// `count < max_digits` is a variable-width field with `count` as the minimum width;
/// `count == max_digits` is a fixed field at the field's natural maximum width.
fn append_wide(builder: &mut Builder, field: Field, count: u8, max_digits: u8) -> Result<(), PatternError> {
    if count < max_digits {
        builder.append_value_range(field, count, max_digits, SignStyle::Normal)?;
    } else {
        builder.append_value(field, max_digits)?;
    }
    Ok(())
}

fn append_year(builder: &mut Builder, field: Field, count: u8, allow_reduced: bool) -> Result<(), PatternError> {
    if allow_reduced && count == 2 {
        builder.append_value_reduced(field, 2, 2, 2000)?;
    } else if count < 4 {
        builder.append_value_range(field, count, 15, SignStyle::Normal)?;
    } else {
        builder.append_value_range(field, count, 15, SignStyle::ExceedsPad)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::resolver::ResolverStyle;

    #[test]
    fn letter_run_repeated_past_its_max_is_rejected() {
        let mut builder = Builder::new();
        let err = compile_into("MMMMMM", &mut builder).unwrap_err();
        assert_eq!(err, PatternError::RepeatTooLong { letter: 'M', count: 6, max: 2 });
    }

    #[test]
    fn unknown_letter_is_rejected() {
        let mut builder = Builder::new();
        assert_eq!(compile_into("j", &mut builder).unwrap_err(), PatternError::UnknownLetter('j'));
    }

    #[test]
    fn unclosed_quote_is_rejected() {
        let mut builder = Builder::new();
        assert_eq!(compile_into("'unterminated", &mut builder).unwrap_err(), PatternError::UnclosedLiteral);
    }

    #[test]
    fn unmatched_close_bracket_is_rejected() {
        let mut builder = Builder::new();
        assert_eq!(compile_into("]", &mut builder).unwrap_err(), PatternError::UnmatchedCloseBracket);
    }

    #[test]
    fn doubled_quote_escapes_a_literal_quote_inside_a_literal() {
        let mut builder = Builder::new();
        compile_into("'it''s'", &mut builder).unwrap();
        let formatter = builder.to_formatter(ResolverStyle::Smart).unwrap();
        let temporal = crate::Date::new(2020, 1, 1).unwrap().at(crate::Time::MIDNIGHT);
        assert_eq!(formatter.format(&temporal).unwrap(), "it's");
    }

    #[test]
    fn single_u_is_variable_width_while_double_is_reduced() {
        let mut single = Builder::new();
        compile_into("u", &mut single).unwrap();
        assert_eq!(single.to_formatter(ResolverStyle::Smart).unwrap().to_pattern_string(), "Value(Year,1,15,Normal)");

        let mut double = Builder::new();
        compile_into("uu", &mut double).unwrap();
        assert_eq!(
            double.to_formatter(ResolverStyle::Smart).unwrap().to_pattern_string(),
            "ReducedValue(Year,2,2,2000)"
        );
    }
}
