use std::fmt;
use std::str::FromStr;

use crate::sanitizer::{
    EmailGrammar, EmailSanitizer, FloatSanitizer, HtmlSanitizer, IntegerSanitizer, IpRanges,
    IpSanitizer, RawSanitizer, SanitizationError, Sanitizer, SlashEscapeSanitizer,
    StringSanitizer, UrlEncodedSanitizer, UrlSanitizer,
};
use crate::{Error, FilterValue, Tainted, Verified};

/// The kind of value an input is filtered as, with its per-kind flags.
///
/// ```
/// use filter_input::ValueKind;
///
/// let kind: ValueKind = "float".parse().unwrap();
/// assert_eq!(kind, ValueKind::Float);
/// assert!(kind.is_numeric());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Trimmed, otherwise untouched
    Raw,
    /// Tags and control characters stripped, quotes encoded, optionally high characters encoded
    String {
        /// Encode `&` and characters above 127 as numeric entities
        encode_high: bool,
    },
    /// Percent-encoded for embedding in a URL
    UrlEncoded,
    /// Quotes, backslash and NUL backslash-escaped
    SlashEscaped,
    /// HTML special characters escaped
    Html,
    /// Decimal number with `.` or `,` separators
    Float,
    /// Decimal, octal or hexadecimal integer
    Integer,
    /// E-mail address
    Email,
    /// Absolute URL
    Url {
        /// Prepend `http://` when no scheme is present
        add_scheme: bool,
    },
    /// IPv4 or IPv6 address
    Ip(IpRanges),
}

impl ValueKind {
    /// All kind names accepted by [`FromStr`], flags at their defaults.
    pub const NAMES: [&'static str; 10] = [
        "raw",
        "string",
        "string_url_encoded",
        "string_slashes",
        "html",
        "float",
        "integer",
        "email",
        "url",
        "ip",
    ];

    /// Short name of the kind, ignoring flags.
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Raw => "raw",
            ValueKind::String { .. } => "string",
            ValueKind::UrlEncoded => "string_url_encoded",
            ValueKind::SlashEscaped => "string_slashes",
            ValueKind::Html => "html",
            ValueKind::Float => "float",
            ValueKind::Integer => "integer",
            ValueKind::Email => "email",
            ValueKind::Url { .. } => "url",
            ValueKind::Ip(_) => "ip",
        }
    }

    /// Returns `true` for the float and integer kinds.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ValueKind::Float | ValueKind::Integer)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ValueKind {
    type Err = Error;

    /// Parses a kind name. `string_magic_quotes` is an alias for
    /// `string_slashes`. Flags take their defaults.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "raw" => Ok(ValueKind::Raw),
            "string" => Ok(ValueKind::String { encode_high: false }),
            "string_url_encoded" => Ok(ValueKind::UrlEncoded),
            "string_slashes" | "string_magic_quotes" => Ok(ValueKind::SlashEscaped),
            "html" => Ok(ValueKind::Html),
            "float" => Ok(ValueKind::Float),
            "integer" | "int" => Ok(ValueKind::Integer),
            "email" => Ok(ValueKind::Email),
            "url" => Ok(ValueKind::Url { add_scheme: true }),
            "ip" => Ok(ValueKind::Ip(IpRanges::default())),
            _ => Err(Error::UnknownKind(s.to_string())),
        }
    }
}

/// Dispatches to the sanitizer for a [`ValueKind`], widening its output
/// to [`FilterValue`].
pub(crate) struct KindSanitizer<'a> {
    kind: &'a ValueKind,
    grammar: EmailGrammar,
}

impl<'a> KindSanitizer<'a> {
    pub(crate) fn new(kind: &'a ValueKind, grammar: EmailGrammar) -> Self {
        Self { kind, grammar }
    }
}

fn text<S: Sanitizer<Output = String>>(
    sanitizer: S,
    input: Tainted<String>,
) -> Result<Verified<FilterValue>, SanitizationError> {
    sanitizer.sanitize(input).map(|v| v.map(FilterValue::Text))
}

impl Sanitizer for KindSanitizer<'_> {
    type Output = FilterValue;

    fn sanitize(&self, input: Tainted<String>) -> Result<Verified<FilterValue>, SanitizationError> {
        match *self.kind {
            ValueKind::Raw => text(RawSanitizer, input),
            ValueKind::String { encode_high } => {
                let sanitizer = if encode_high {
                    StringSanitizer::encoding_high()
                } else {
                    StringSanitizer::new()
                };
                text(sanitizer, input)
            }
            ValueKind::UrlEncoded => text(UrlEncodedSanitizer, input),
            ValueKind::SlashEscaped => text(SlashEscapeSanitizer, input),
            ValueKind::Html => text(HtmlSanitizer, input),
            ValueKind::Float => FloatSanitizer
                .sanitize(input)
                .map(|v| v.map(FilterValue::Float)),
            ValueKind::Integer => IntegerSanitizer
                .sanitize(input)
                .map(|v| v.map(FilterValue::Integer)),
            ValueKind::Email => text(EmailSanitizer::new(self.grammar), input),
            ValueKind::Url { add_scheme } => {
                let sanitizer = if add_scheme {
                    UrlSanitizer::new()
                } else {
                    UrlSanitizer::without_scheme_insertion()
                };
                text(sanitizer, input)
            }
            ValueKind::Ip(ranges) => text(IpSanitizer::new(ranges), input),
        }
    }
}
