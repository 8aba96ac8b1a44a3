//! Literal conversion. The scanner hands over raw token text; it is turned
//! into a value each time the literal is evaluated.

use doubi_ir::{LitKind, Literal};

use crate::errors::{invalid_literal, EvalError, EvalResult};
use crate::value::Value;

pub(super) fn convert(lit: &Literal) -> EvalResult {
    match lit.kind {
        LitKind::Int => parse_int(&lit.text).map(Value::int),
        LitKind::Float => parse_float(&lit.text).map(Value::float),
        LitKind::String => unquote(&lit.text, '"').map(Value::string),
        // A char literal is a one-character string.
        LitKind::Char => unquote(&lit.text, '\'').map(Value::string),
    }
}

/// Decimal, `0x`, `0o` or `0b`, with optional sign and `_` separators.
fn parse_int(text: &str) -> EvalResult<i64> {
    let cleaned: String = text.chars().filter(|&c| c != '_').collect();
    let (negative, unsigned) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.strip_prefix('+').unwrap_or(&cleaned)),
    };
    let (radix, digits) = split_radix(unsigned);
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return Err(invalid_literal(text, "missing digits"));
    }
    let magnitude =
        u64::from_str_radix(digits, radix).map_err(|e| invalid_literal(text, e.to_string()))?;
    let signed = if negative {
        -i128::from(magnitude)
    } else {
        i128::from(magnitude)
    };
    i64::try_from(signed).map_err(|_| invalid_literal(text, "out of range for a 64-bit integer"))
}

fn split_radix(digits: &str) -> (u32, &str) {
    let bytes = digits.as_bytes();
    if bytes.len() >= 2 && bytes[0] == b'0' {
        let radix = match bytes[1] {
            b'x' | b'X' => Some(16),
            b'o' | b'O' => Some(8),
            b'b' | b'B' => Some(2),
            _ => None,
        };
        if let Some(radix) = radix {
            return (radix, &digits[2..]);
        }
    }
    (10, digits)
}

fn parse_float(text: &str) -> EvalResult<f64> {
    let cleaned: String = text.chars().filter(|&c| c != '_').collect();
    cleaned
        .parse::<f64>()
        .map_err(|e| invalid_literal(text, e.to_string()))
}

/// Strip the surrounding `quote`s and resolve escape sequences.
fn unquote(text: &str, quote: char) -> EvalResult<String> {
    let inner = text
        .strip_prefix(quote)
        .and_then(|rest| rest.strip_suffix(quote))
        .ok_or_else(|| invalid_literal(text, format!("expected {quote}-quoted text")))?;

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escaped = match chars.next() {
            Some('n') => '\n',
            Some('t') => '\t',
            Some('r') => '\r',
            Some('0') => '\0',
            Some('\\') => '\\',
            Some('"') => '"',
            Some('\'') => '\'',
            Some(other) => return Err(bad_escape(text, &format!("\\{other}"))),
            None => return Err(bad_escape(text, "\\")),
        };
        out.push(escaped);
    }
    Ok(out)
}

#[cold]
fn bad_escape(text: &str, escape: &str) -> EvalError {
    invalid_literal(text, format!("unknown escape sequence `{escape}`"))
}
