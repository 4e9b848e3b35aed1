//! Float and integer sanitizers.
//!
//! Both strip every character that cannot appear in a numeric literal before
//! validating, so `"4657bx3d"` reads as `46573` rather than being rejected.

use std::sync::LazyLock;

use regex::Regex;

use super::{trim_input, SanitizationError, SanitizationErrorKind, Sanitizer};
use crate::{Tainted, Verified};

/// A float literal after separator normalization: at most one `.`, no `,`.
static FLOAT_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$")
        .expect("float literal pattern compiles")
});

fn is_float_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | ',' | 'e' | 'E')
}

/// Resolves decimal and thousands separators in a numeric string.
///
/// Whichever of `.` and `,` occurs last is the decimal separator. Every
/// other `.`, `,` and space is dropped and the separator becomes `.`.
/// A string with neither separator is returned unchanged.
///
/// ```
/// use filter_input::normalize_float;
///
/// assert_eq!(normalize_float("1,234.445"), "1234.445");
/// assert_eq!(normalize_float("1.234,56"), "1234.56");
/// assert_eq!(normalize_float("124,65"), "124.65");
/// assert_eq!(normalize_float("42"), "42");
/// ```
pub fn normalize_float(num: &str) -> String {
    let sep = match (num.rfind('.'), num.rfind(',')) {
        (Some(dot), Some(comma)) => dot.max(comma),
        (Some(pos), None) | (None, Some(pos)) => pos,
        (None, None) => return num.to_string(),
    };

    let drop_separators = |part: &str| -> String {
        part.chars()
            .filter(|c| !matches!(c, '.' | ',' | ' '))
            .collect()
    };

    // Both separators are single-byte, so sep + 1 is a char boundary.
    format!(
        "{}.{}",
        drop_separators(&num[..sep]),
        drop_separators(&num[sep + 1..])
    )
}

/// Parses a decimal, octal (`0` prefix) or hexadecimal (`0x` prefix) literal.
///
/// Only decimal literals may carry a sign. Returns `None` for malformed
/// literals and for values outside the `i64` range.
///
/// ```
/// use filter_input::parse_integer_literal;
///
/// assert_eq!(parse_integer_literal("-42"), Some(-42));
/// assert_eq!(parse_integer_literal("0755"), Some(493));
/// assert_eq!(parse_integer_literal("0x1A"), Some(26));
/// assert_eq!(parse_integer_literal("089"), None);
/// ```
pub fn parse_integer_literal(s: &str) -> Option<i64> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        return i64::from_str_radix(hex, 16).ok();
    }

    if s.len() > 1 && s.starts_with('0') {
        let octal = &s[1..];
        if !octal.bytes().all(|b| (b'0'..=b'7').contains(&b)) {
            return None;
        }
        return i64::from_str_radix(octal, 8).ok();
    }

    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    let well_formed = !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && (digits == "0" || !digits.starts_with('0'));
    if !well_formed {
        return None;
    }
    s.parse::<i64>().ok()
}

/// Validates a float after stripping and separator normalization.
///
/// # Examples
///
/// ```
/// use filter_input::{FloatSanitizer, Sanitizer, Tainted};
///
/// let verified = FloatSanitizer.sanitize(Tainted::new("\u{20ac} 1.234,56".to_string())).unwrap();
/// assert_eq!(*verified.as_ref(), 1234.56);
///
/// assert!(FloatSanitizer.sanitize(Tainted::new("n/a".to_string())).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatSanitizer;

impl Sanitizer for FloatSanitizer {
    type Output = f64;

    fn sanitize(&self, input: Tainted<String>) -> Result<Verified<f64>, SanitizationError> {
        let raw = input.into_inner();
        let stripped: String = raw.chars().filter(|c| is_float_char(*c)).collect();
        let stripped = trim_input(&stripped);

        if !stripped.bytes().any(|b| b.is_ascii_digit()) {
            return Err(SanitizationError::new(
                SanitizationErrorKind::Empty,
                "no digits left after stripping",
            ));
        }

        let normalized = normalize_float(stripped);
        if !FLOAT_LITERAL.is_match(&normalized) {
            return Err(SanitizationError::new(
                SanitizationErrorKind::MalformedInput,
                "not a float literal",
            ));
        }

        match normalized.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Verified::new_unchecked(value)),
            Ok(_) => Err(SanitizationError::new(
                SanitizationErrorKind::OutOfRange,
                "float literal overflows",
            )),
            Err(_) => Err(SanitizationError::new(
                SanitizationErrorKind::MalformedInput,
                "not a float literal",
            )),
        }
    }
}

/// Validates an integer after stripping everything but digits and signs.
///
/// A leading `0x`/`0X` keeps its hexadecimal digits so hex literals survive
/// stripping.
///
/// # Examples
///
/// ```
/// use filter_input::{IntegerSanitizer, Sanitizer, Tainted};
///
/// let verified = IntegerSanitizer.sanitize(Tainted::new("451gh3".to_string())).unwrap();
/// assert_eq!(*verified.as_ref(), 4513);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerSanitizer;

impl IntegerSanitizer {
    fn strip(raw: &str) -> String {
        let trimmed = trim_input(raw);
        if let Some(hex) = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        {
            let digits: String = hex.chars().filter(|c| c.is_ascii_hexdigit()).collect();
            return format!("0x{}", digits);
        }
        trimmed
            .chars()
            .filter(|c| c.is_ascii_digit() || matches!(c, '+' | '-'))
            .collect()
    }

    /// A well-formed decimal literal that `parse_integer_literal` still refused.
    fn looks_like_overflow(stripped: &str) -> bool {
        let digits = stripped.strip_prefix(['+', '-']).unwrap_or(stripped);
        !digits.is_empty() && !digits.starts_with('0') && digits.bytes().all(|b| b.is_ascii_digit())
    }
}

impl Sanitizer for IntegerSanitizer {
    type Output = i64;

    fn sanitize(&self, input: Tainted<String>) -> Result<Verified<i64>, SanitizationError> {
        let raw = input.into_inner();
        let stripped = Self::strip(&raw);

        if stripped.is_empty() {
            return Err(SanitizationError::new(
                SanitizationErrorKind::Empty,
                "no digits left after stripping",
            ));
        }

        match parse_integer_literal(&stripped) {
            Some(value) => Ok(Verified::new_unchecked(value)),
            None if Self::looks_like_overflow(&stripped) => Err(SanitizationError::new(
                SanitizationErrorKind::OutOfRange,
                "integer does not fit in 64 bits",
            )),
            None => Err(SanitizationError::new(
                SanitizationErrorKind::MalformedInput,
                "not an integer literal",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn float(input: &str) -> Result<f64, SanitizationErrorKind> {
        FloatSanitizer
            .sanitize(Tainted::new(input.to_string()))
            .map(Verified::into_inner)
            .map_err(|e| e.kind())
    }

    fn integer(input: &str) -> Result<i64, SanitizationErrorKind> {
        IntegerSanitizer
            .sanitize(Tainted::new(input.to_string()))
            .map(Verified::into_inner)
            .map_err(|e| e.kind())
    }

    #[test]
    fn normalize_picks_rightmost_separator() {
        assert_eq!(normalize_float("1,234.445"), "1234.445");
        assert_eq!(normalize_float("1.234.567,8"), "1234567.8");
        assert_eq!(normalize_float("1,234,567"), "1234.567");
    }

    #[test]
    fn normalize_leading_separator() {
        assert_eq!(normalize_float(".5"), ".5");
        assert_eq!(normalize_float(",5"), ".5");
    }

    #[test]
    fn float_thousands_then_decimal_point() {
        assert_eq!(float("1,234.445"), Ok(1234.445));
    }

    #[test]
    fn float_lone_comma_is_decimal() {
        assert_eq!(float("124,65"), Ok(124.65));
        assert_eq!(float("1.234,56"), Ok(1234.56));
    }

    #[test]
    fn float_without_separator_parses_as_is() {
        assert_eq!(float("42"), Ok(42.0));
        assert_eq!(float("-7"), Ok(-7.0));
    }

    #[test]
    fn float_scientific_notation() {
        assert_eq!(float("1.5e3"), Ok(1500.0));
        assert_eq!(float("2,5E-1"), Ok(0.25));
    }

    #[test]
    fn float_strips_units_and_currency() {
        assert_eq!(float("  $ 19.99 USD "), Ok(19.99));
    }

    #[test]
    fn float_zero_is_a_value() {
        assert_eq!(float("0"), Ok(0.0));
        assert_eq!(float("0,0"), Ok(0.0));
    }

    #[test]
    fn float_without_digits_is_rejected() {
        assert_eq!(float("abc"), Err(SanitizationErrorKind::Empty));
        assert_eq!(float(""), Err(SanitizationErrorKind::Empty));
        assert_eq!(float("..."), Err(SanitizationErrorKind::Empty));
    }

    #[test]
    fn float_malformed_after_stripping() {
        assert_eq!(float("12-34"), Err(SanitizationErrorKind::MalformedInput));
        assert_eq!(float("1e"), Err(SanitizationErrorKind::MalformedInput));
    }

    #[test]
    fn float_overflow_is_out_of_range() {
        assert_eq!(float("1e999"), Err(SanitizationErrorKind::OutOfRange));
    }

    #[test]
    fn integer_strips_letters() {
        assert_eq!(integer("4657bx3d"), Ok(46573));
        assert_eq!(integer("451gh3"), Ok(4513));
    }

    #[test]
    fn integer_hex_and_octal() {
        assert_eq!(integer("0x1A"), Ok(26));
        assert_eq!(integer("0Xff"), Ok(255));
        assert_eq!(integer("0755"), Ok(0o755));
    }

    #[test]
    fn integer_signed_decimal() {
        assert_eq!(integer("-15"), Ok(-15));
        assert_eq!(integer("+15"), Ok(15));
        assert_eq!(integer("0"), Ok(0));
    }

    #[test]
    fn integer_without_digits_is_rejected() {
        assert_eq!(integer("abc"), Err(SanitizationErrorKind::Empty));
        assert_eq!(integer("   "), Err(SanitizationErrorKind::Empty));
    }

    #[test]
    fn integer_malformed_literals() {
        assert_eq!(integer("089"), Err(SanitizationErrorKind::MalformedInput));
        assert_eq!(integer("12-3"), Err(SanitizationErrorKind::MalformedInput));
        assert_eq!(integer("-"), Err(SanitizationErrorKind::MalformedInput));
        assert_eq!(integer("0x"), Err(SanitizationErrorKind::MalformedInput));
    }

    #[test]
    fn integer_overflow_is_out_of_range() {
        assert_eq!(integer("9223372036854775807"), Ok(i64::MAX));
        assert_eq!(
            integer("9223372036854775808"),
            Err(SanitizationErrorKind::OutOfRange)
        );
    }
}
