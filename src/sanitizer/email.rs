//! E-mail address sanitizer.
//!
//! The grammar is assembled from RFC 822 style fragments: a dot-atom or
//! quoted local part, then a fully qualified domain name or a bracketed
//! IPv4, IPv6 or domain literal. Single-label domains such as `localhost` do
//! not match, and the last label must start with a letter.

use std::sync::LazyLock;

use regex::Regex;

use super::{trim_input, SanitizationError, SanitizationErrorKind, Sanitizer};
use crate::{Tainted, Verified};

// Local-part characters, a subset of what `sanitize_email_chars` keeps
const ATEXT: &str = r"[A-Za-z0-9!#$%&*+=?^_`{|}~'-]";
const ATEXT_OR_DOT: &str = r"[A-Za-z0-9!#$%&*+=?^_`{|}~'.-]";
const QUOTED_CHAR: &str = r#"(?:\\\\|\\"|\\?[A-Za-z0-9!#$%&*+=?^_`{|}~()<>\[\]:;@,. '/-])"#;
const IPV4_PART: &str = r"(?:25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9][0-9]|[0-9])";
const IPV6_PART: &str = r"[A-Fa-f0-9]{1,4}";
const FQDN_PART: &str = r"[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?";
const TLD_PART: &str = r"[A-Za-z](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?";

/// Local-part length limits, in bytes: (quoted, unquoted).
const MAX_LOCAL: (usize, usize) = (66, 64);
/// Whole-address length limits, in bytes: (quoted, unquoted).
const MAX_ADDRESS: (usize, usize) = (256, 254);

static STRICT: LazyLock<Regex> = LazyLock::new(|| build_pattern(EmailGrammar::Strict));
static LENIENT: LazyLock<Regex> = LazyLock::new(|| build_pattern(EmailGrammar::Lenient));

/// Which unquoted local parts are accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmailGrammar {
    /// Dot-atom: no leading, trailing or consecutive dots.
    #[default]
    Strict,
    /// Dots may appear anywhere in the local part.
    Lenient,
}

fn ipv4() -> String {
    format!(r"(?:{p}\.){{3}}{p}", p = IPV4_PART)
}

fn ipv6() -> String {
    let h = IPV6_PART;
    let v4 = ipv4();
    let alternatives = [
        format!("(?:{h}:){{7}}(?:{h}|:)"),
        format!("(?:{h}:){{6}}(?::{h}|:{v4}|:)"),
        format!("(?:{h}:){{5}}(?:(?::{h}){{1,2}}|:{v4}|:)"),
        format!("(?:{h}:){{4}}(?:(?::{h}){{1,3}}|(?::{h})?:{v4}|:)"),
        format!("(?:{h}:){{3}}(?:(?::{h}){{1,4}}|(?::{h}){{0,2}}:{v4}|:)"),
        format!("(?:{h}:){{2}}(?:(?::{h}){{1,5}}|(?::{h}){{0,3}}:{v4}|:)"),
        format!("(?:{h}:)(?:(?::{h}){{1,6}}|(?::{h}){{0,4}}:{v4}|:)"),
        format!(":(?:(?::{h}){{1,7}}|(?::{h}){{0,5}}:{v4}|:)"),
    ];
    format!("(?:{})", alternatives.join("|"))
}

fn build_pattern(grammar: EmailGrammar) -> Regex {
    let dot_string = match grammar {
        EmailGrammar::Strict => format!(r"{a}+(?:\.{a}+)*", a = ATEXT),
        EmailGrammar::Lenient => format!("{}+", ATEXT_OR_DOT),
    };
    let fqdn = format!(r"(?:{p}\.)+{t}", p = FQDN_PART, t = TLD_PART);
    let local = format!(r#"(?P<local>{dot_string}|"{QUOTED_CHAR}+")"#);
    let domain = format!(r"(?:{fqdn}|\[{v4}\]|\[{v6}\]|\[{fqdn}\])", v4 = ipv4(), v6 = ipv6());

    Regex::new(&format!("^{local}@{domain}$")).expect("e-mail grammar compiles")
}

/// Returns whether `address` matches the strict e-mail grammar.
///
/// ```
/// use filter_input::is_valid_email;
///
/// assert!(is_valid_email("name@example.com"));
/// assert!(is_valid_email("admin@[192.168.0.1]"));
/// assert!(!is_valid_email("postmaster@localhost"));
/// assert!(!is_valid_email("first..last@example.com"));
/// ```
pub fn is_valid_email(address: &str) -> bool {
    is_valid_email_with(address, EmailGrammar::Strict)
}

/// Returns whether `address` matches the e-mail grammar variant.
pub fn is_valid_email_with(address: &str, grammar: EmailGrammar) -> bool {
    let pattern = match grammar {
        EmailGrammar::Strict => &*STRICT,
        EmailGrammar::Lenient => &*LENIENT,
    };

    let Some(caps) = pattern.captures(address) else {
        return false;
    };
    let local = caps.name("local").map_or("", |m| m.as_str());
    let (max_local, max_address) = if local.starts_with('"') {
        (MAX_LOCAL.0, MAX_ADDRESS.0)
    } else {
        (MAX_LOCAL.1, MAX_ADDRESS.1)
    };

    local.len() <= max_local && address.len() <= max_address
}

/// Removes every character that cannot appear in an e-mail address.
///
/// Kept: ASCII letters and digits and ``!#$%&'*+-=?^_`{|}~@.[]``.
pub fn sanitize_email_chars(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric() || "!#$%&'*+-=?^_`{|}~@.[]".contains(*c))
        .collect()
}

/// Strips illegal characters and validates an e-mail address.
///
/// # Examples
///
/// ```
/// use filter_input::{EmailSanitizer, Sanitizer, Tainted};
///
/// let sanitizer = EmailSanitizer::default();
/// let verified = sanitizer.sanitize(Tainted::new(" name@example.com ".to_string())).unwrap();
/// assert_eq!(verified.as_ref(), "name@example.com");
///
/// assert!(sanitizer.sanitize(Tainted::new("postmaster@localhost".to_string())).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmailSanitizer {
    grammar: EmailGrammar,
}

impl EmailSanitizer {
    /// Creates a sanitizer using the given grammar variant.
    pub fn new(grammar: EmailGrammar) -> Self {
        Self { grammar }
    }
}

impl Sanitizer for EmailSanitizer {
    type Output = String;

    fn sanitize(&self, input: Tainted<String>) -> Result<Verified<String>, SanitizationError> {
        let raw = input.into_inner();
        let cleaned = sanitize_email_chars(&raw);
        let address = trim_input(&cleaned);

        if address.is_empty() {
            return Err(SanitizationError::new(
                SanitizationErrorKind::Empty,
                "no address characters left after stripping",
            ));
        }
        if !is_valid_email_with(address, self.grammar) {
            return Err(SanitizationError::new(
                SanitizationErrorKind::MalformedInput,
                "not a valid e-mail address",
            ));
        }
        Ok(Verified::new_unchecked(address.to_string()))
    }
}
