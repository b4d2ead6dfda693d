#![no_std]
extern crate alloc;

use alloc::{
    borrow::Cow,
    format,
    str::FromStr,
    string::{String, ToString},
};

use proc_macro::TokenStream;

fn emit_error(text: Cow<'static, str>) -> TokenStream {
    // Create a `compile_error!("s")` invocation
    let invoke = format!("compile_error!({:?})", text);
    TokenStream::from_str(invoke.as_str()).unwrap()
}

/// Returns the maximum repeat count supported for a given pattern letter, mirroring
/// the pattern compiler's own table so that bad patterns are rejected before the
/// formatter is even built.
fn max_repeat(letter: u8) -> Option<u8> {
    match letter {
        b'y' | b'u' => Some(15),
        b'M' | b'L' => Some(2),
        b'd' | b'H' | b'K' | b'k' | b'h' | b'm' | b's' | b'q' => Some(2),
        b'D' => Some(3),
        b'S' => Some(9),
        b'A' | b'n' | b'N' | b'F' => Some(2),
        b'V' => Some(2),
        b'Z' => Some(5),
        b'X' | b'x' => Some(5),
        b'p' => Some(15),
        _ => None,
    }
}

fn is_known_letter(letter: u8) -> bool {
    max_repeat(letter).is_some()
}

/// Validates a letter-pattern string at compile time: bracket/quote balance, known
/// pattern letters, and per-letter repeat-count ceilings. This does not build the
/// node tree itself -- that still happens at runtime in the pattern compiler -- it
/// only rules out the mistakes that would otherwise only surface as a panic deep
/// inside `append_pattern`.
fn validate(pattern: &str) -> Result<(), String> {
    let bytes = pattern.as_bytes();
    let mut i = 0;
    let mut depth: i32 = 0;
    let mut run_start: Option<usize> = None;

    macro_rules! close_run {
        () => {
            if let Some(start) = run_start.take() {
                let letter = bytes[start];
                let count = i - start;
                match max_repeat(letter) {
                    Some(max) if count as u8 <= max => {}
                    Some(max) => {
                        return Err(format!(
                            "pattern letter '{}' repeated {} times exceeds the maximum of {}",
                            letter as char, count, max
                        ))
                    }
                    None => return Err(format!("unknown pattern letter '{}'", letter as char)),
                }
            }
        };
    }

    while i < bytes.len() {
        let c = bytes[i];
        match c {
            b'\'' => {
                close_run!();
                i += 1;
                loop {
                    if i >= bytes.len() {
                        return Err("unclosed literal: missing terminating '\\'' quote".to_string());
                    }
                    if bytes[i] == b'\'' {
                        if bytes.get(i + 1) == Some(&b'\'') {
                            i += 2;
                            continue;
                        }
                        i += 1;
                        break;
                    }
                    i += 1;
                }
                continue;
            }
            b'[' => {
                close_run!();
                depth += 1;
                i += 1;
                continue;
            }
            b']' => {
                close_run!();
                depth -= 1;
                if depth < 0 {
                    return Err("unmatched ']': no corresponding '[' for this optionalEnd".to_string());
                }
                i += 1;
                continue;
            }
            _ if c.is_ascii_alphabetic() => {
                if !is_known_letter(c) {
                    close_run!();
                    return Err(format!("unknown pattern letter '{}'", c as char));
                }
                match run_start {
                    Some(start) if bytes[start] == c => {}
                    _ => {
                        close_run!();
                        run_start = Some(i);
                    }
                }
                i += 1;
                continue;
            }
            _ => {
                close_run!();
                i += 1;
                continue;
            }
        }
    }
    close_run!();

    Ok(())
}

/// Validates a letter-pattern string at compile time and, if it checks out, expands
/// to a call that compiles it into a formatter at runtime.
///
/// ```ignore
/// let f = pattern_check_macro::pattern!("uuuu-MM-dd");
/// ```
#[proc_macro]
pub fn pattern(input: TokenStream) -> TokenStream {
    let mut tokens = input.into_iter();
    let tree = match tokens.next() {
        Some(tree) => tree,
        None => return emit_error("missing string literal".into()),
    };

    if tokens.next().is_some() {
        return emit_error("too many arguments in macro call".into());
    }

    let lit = tree.to_string();
    let inner = match lit.as_bytes() {
        [b'"', .., b'"'] => &lit[1..lit.len() - 1],
        _ => return emit_error(format!("expected string literal, received `{}`", lit).into()),
    };

    match validate(inner) {
        Ok(()) => {
            let code = format!(
                "chronofmt::fmt::Formatter::from_pattern({:?}).expect(\"pattern! validated this at compile time\")",
                inner
            );
            TokenStream::from_str(&code).expect("generated code did not parse")
        }
        Err(err) => emit_error(err.into()),
    }
}
