//! Text sanitizers. None of them reject input; they only transform it.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::{trim_input, SanitizationError, Sanitizer};
use crate::{Tainted, Verified};

/// Bytes left as-is by [`url_encode`]: ASCII alphanumerics and `-._`.
const URL_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_');

/// Removes every character with a value below 32.
pub fn strip_low(s: &str) -> String {
    s.chars().filter(|c| (*c as u32) >= 32).collect()
}

/// Removes HTML and PHP-style tags.
///
/// A `<` opens a tag unless whitespace or the end of input follows it. The
/// tag runs to the next `>` outside a quoted attribute value; an unclosed tag
/// swallows the rest of the input.
///
/// ```
/// assert_eq!(filter_input::strip_tags("<b>bold</b> a < b"), "bold a < b");
/// ```
pub fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '<' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some(next) if !next.is_whitespace() => {}
            _ => {
                out.push(c);
                continue;
            }
        }
        let mut quote = None;
        for t in chars.by_ref() {
            match (quote, t) {
                (None, '>') => break,
                (None, '"' | '\'') => quote = Some(t),
                (Some(q), _) if q == t => quote = None,
                _ => {}
            }
        }
    }
    out
}

/// Encodes `'` as `&#39;` and `"` as `&#34;`.
///
/// ```
/// assert_eq!(filter_input::encode_quotes(r#"say "it's""#), "say &#34;it&#39;s&#34;");
/// ```
pub fn encode_quotes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&#34;"),
            _ => out.push(c),
        }
    }
    out
}

/// Encodes `&` and every character above 127 as a decimal numeric entity.
///
/// ```
/// assert_eq!(filter_input::encode_high("J\u{fc}ri & co"), "J&#252;ri &#38; co");
/// ```
pub fn encode_high(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c == '&' || (c as u32) > 127 {
            out.push_str(&format!("&#{};", c as u32));
        } else {
            out.push(c);
        }
    }
    out
}

/// Percent-encodes everything except ASCII alphanumerics and `-._`.
///
/// Characters outside ASCII are encoded as their UTF-8 bytes.
///
/// ```
/// assert_eq!(filter_input::url_encode("Hello world!"), "Hello%20world%21");
/// ```
pub fn url_encode(s: &str) -> String {
    utf8_percent_encode(s, URL_ENCODE_SET).to_string()
}

/// Backslash-escapes `'`, `"` and `\`, and writes NUL as `\0`.
///
/// ```
/// assert_eq!(filter_input::add_slashes("rock'n'roll"), r"rock\'n\'roll");
/// ```
pub fn add_slashes(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '\'' | '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\0' => out.push_str("\\0"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes the five characters with special meaning in HTML and XML.
///
/// Both quote styles are encoded, so the output is safe inside single- or
/// double-quoted attributes.
///
/// ```
/// assert_eq!(
///     filter_input::escape_html(r#"<a href="x">'rock' & roll</a>"#),
///     "&lt;a href=&quot;x&quot;&gt;&#039;rock&#039; &amp; roll&lt;/a&gt;"
/// );
/// ```
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Returns the input trimmed, without any other change.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawSanitizer;

impl Sanitizer for RawSanitizer {
    type Output = String;

    fn sanitize(&self, input: Tainted<String>) -> Result<Verified<String>, SanitizationError> {
        let raw = input.into_inner();
        Ok(Verified::new_unchecked(trim_input(&raw).to_string()))
    }
}

/// Strips tags and control characters, encodes quotes, and optionally
/// entity-encodes high characters.
///
/// High characters are encoded before quotes, so the `&` of a quote entity
/// is never encoded a second time.
///
/// # Examples
///
/// ```
/// use filter_input::{Sanitizer, StringSanitizer, Tainted};
///
/// let plain = StringSanitizer::new();
/// let verified = plain.sanitize(Tainted::new(" J\u{fc}ri\n".to_string())).unwrap();
/// assert_eq!(verified.as_ref(), "J\u{fc}ri");
///
/// let encoded = StringSanitizer::encoding_high();
/// let verified = encoded.sanitize(Tainted::new("J\u{fc}ri".to_string())).unwrap();
/// assert_eq!(verified.as_ref(), "J&#252;ri");
///
/// let verified = plain.sanitize(Tainted::new("<i>it's</i>".to_string())).unwrap();
/// assert_eq!(verified.as_ref(), "it&#39;s");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringSanitizer {
    encode_high: bool,
}

impl StringSanitizer {
    /// Creates a sanitizer that leaves characters above 127 as they are.
    pub fn new() -> Self {
        Self { encode_high: false }
    }

    /// Creates a sanitizer that also encodes `&` and characters above 127.
    pub fn encoding_high() -> Self {
        Self { encode_high: true }
    }

    /// Returns whether high characters are entity-encoded.
    pub fn encodes_high(&self) -> bool {
        self.encode_high
    }
}

impl Sanitizer for StringSanitizer {
    type Output = String;

    fn sanitize(&self, input: Tainted<String>) -> Result<Verified<String>, SanitizationError> {
        let raw = input.into_inner();
        let mut cleaned = strip_low(&strip_tags(&raw));
        if self.encode_high {
            cleaned = encode_high(&cleaned);
        }
        let cleaned = encode_quotes(&cleaned);
        Ok(Verified::new_unchecked(trim_input(&cleaned).to_string()))
    }
}

/// Strips control characters and percent-encodes the rest for URL embedding.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlEncodedSanitizer;

impl Sanitizer for UrlEncodedSanitizer {
    type Output = String;

    fn sanitize(&self, input: Tainted<String>) -> Result<Verified<String>, SanitizationError> {
        let raw = input.into_inner();
        let encoded = url_encode(&strip_low(&raw));
        Ok(Verified::new_unchecked(trim_input(&encoded).to_string()))
    }
}

/// Backslash-escapes quotes, backslashes and NUL.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlashEscapeSanitizer;

impl Sanitizer for SlashEscapeSanitizer {
    type Output = String;

    fn sanitize(&self, input: Tainted<String>) -> Result<Verified<String>, SanitizationError> {
        let raw = input.into_inner();
        let escaped = add_slashes(&raw);
        Ok(Verified::new_unchecked(trim_input(&escaped).to_string()))
    }
}

/// Escapes HTML special characters with full entities.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlSanitizer;

impl Sanitizer for HtmlSanitizer {
    type Output = String;

    fn sanitize(&self, input: Tainted<String>) -> Result<Verified<String>, SanitizationError> {
        let raw = input.into_inner();
        let escaped = escape_html(&raw);
        Ok(Verified::new_unchecked(trim_input(&escaped).to_string()))
    }
}
