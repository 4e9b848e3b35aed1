//! Sanitizers that turn tainted request input into verified values.
//!
//! One sanitizer exists per value kind:
//! - text: [`RawSanitizer`], [`StringSanitizer`], [`UrlEncodedSanitizer`],
//!   [`SlashEscapeSanitizer`], [`HtmlSanitizer`]
//! - numbers: [`FloatSanitizer`], [`IntegerSanitizer`]
//! - addresses: [`EmailSanitizer`], [`UrlSanitizer`], [`IpSanitizer`]
//!
//! Text sanitizers never reject input. Number and address sanitizers strip
//! characters that cannot belong to the target type and then validate what
//! remains.

mod email;
mod ip;
mod number;
mod text;
mod uri;

use std::fmt;

use crate::{Tainted, Verified};

pub use email::{is_valid_email, is_valid_email_with, sanitize_email_chars, EmailGrammar, EmailSanitizer};
pub use ip::{IpRanges, IpSanitizer};
pub use number::{normalize_float, parse_integer_literal, FloatSanitizer, IntegerSanitizer};
pub use text::{
    add_slashes, encode_high, encode_quotes, escape_html, strip_low, strip_tags, url_encode,
    HtmlSanitizer, RawSanitizer, SlashEscapeSanitizer, StringSanitizer, UrlEncodedSanitizer,
};
pub use uri::{sanitize_url_chars, UrlSanitizer};

/// Characters removed from both ends of every input value.
const TRIM_CHARS: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B'];

/// Trims ASCII blanks, NUL and vertical tab from both ends.
pub(crate) fn trim_input(s: &str) -> &str {
    s.trim_matches(TRIM_CHARS)
}

/// Error returned when sanitization fails.
///
/// The error never contains the rejected input, only the kind of failure and
/// a description of the rule that was broken.
///
/// # Examples
///
/// ```
/// use filter_input::{SanitizationError, SanitizationErrorKind};
///
/// let error = SanitizationError::new(SanitizationErrorKind::MalformedInput, "not a float literal");
/// assert_eq!(error.kind(), SanitizationErrorKind::MalformedInput);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizationError {
    kind: SanitizationErrorKind,
    message: String,
}

impl SanitizationError {
    /// Creates a new sanitization error.
    pub fn new(kind: SanitizationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> SanitizationErrorKind {
        self.kind
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SanitizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sanitization failed ({}): {}", self.kind, self.message)
    }
}

impl std::error::Error for SanitizationError {}

/// Kind of sanitization error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SanitizationErrorKind {
    /// Nothing usable was left after stripping invalid characters.
    Empty,
    /// The stripped input does not match the grammar of the target type.
    MalformedInput,
    /// A number does not fit the target type.
    OutOfRange,
    /// An address falls in a range the caller excluded.
    ForbiddenRange,
    /// Input exceeds the configured maximum length.
    TooLong,
}

impl fmt::Display for SanitizationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty input"),
            Self::MalformedInput => write!(f, "malformed input"),
            Self::OutOfRange => write!(f, "out of range"),
            Self::ForbiddenRange => write!(f, "forbidden range"),
            Self::TooLong => write!(f, "input too long"),
        }
    }
}

/// Trait for sanitizing tainted request input into verified values.
///
/// # Invariants
///
/// Implementations MUST:
/// - Only call `Verified::new_unchecked` after validation succeeds
/// - Return `Err(SanitizationError)` if validation fails
/// - Not copy the rejected input into the error
///
/// # Examples
///
/// ```
/// use filter_input::{FloatSanitizer, Sanitizer, Tainted};
///
/// let tainted = Tainted::new("124,65".to_string());
/// let verified = FloatSanitizer.sanitize(tainted).expect("comma decimal");
/// assert_eq!(*verified.as_ref(), 124.65);
/// ```
pub trait Sanitizer {
    /// The verified type produced on success.
    type Output;

    /// Sanitizes a tainted value, returning a verified value on success.
    ///
    /// # Errors
    ///
    /// Returns `SanitizationError` if the input fails validation.
    fn sanitize(&self, input: Tainted<String>) -> Result<Verified<Self::Output>, SanitizationError>;
}
