//! URL sanitizer.

use url::{Host, Url};

use super::{trim_input, SanitizationError, SanitizationErrorKind, Sanitizer};
use crate::{Tainted, Verified};

/// Punctuation allowed in a URL besides ASCII letters and digits.
const URL_PUNCTUATION: &str = "$-_.+!*'(),{}|\\^~[]`<>#%\";/?:@&=";

/// A first `:` beyond this byte offset cannot end a scheme name.
const MAX_SCHEME_END: usize = 11;

/// Schemes whose URLs must carry a `//` authority with a host.
const HOST_SCHEMES: &[&str] = &["http", "https", "ftp", "ws", "wss"];

/// Removes every character that cannot appear in a URL.
///
/// ```
/// assert_eq!(filter_input::sanitize_url_chars("exa mple.com/\u{e4}"), "example.com/");
/// ```
pub fn sanitize_url_chars(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric() || URL_PUNCTUATION.contains(*c))
        .collect()
}

/// Strips illegal characters, optionally prepends `http://`, and validates
/// the result as an absolute URL.
///
/// The verified value is the amended input string, not a normalized URL.
/// Web schemes (`http`, `https`, `ftp`, `ws`, `wss`) must be written with
/// `://` and name a host made of letters, digits and inner hyphens, or an IP
/// address. Input shaped like `host:port` has no scheme and is rejected.
///
/// # Examples
///
/// ```
/// use filter_input::{Sanitizer, Tainted, UrlSanitizer};
///
/// let verified = UrlSanitizer::new().sanitize(Tainted::new("www.example.com".to_string())).unwrap();
/// assert_eq!(verified.as_ref(), "http://www.example.com");
///
/// let strict = UrlSanitizer::without_scheme_insertion();
/// assert!(strict.sanitize(Tainted::new("www.example.com".to_string())).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlSanitizer {
    add_scheme: bool,
}

impl UrlSanitizer {
    /// Creates a sanitizer that prepends `http://` to scheme-less input.
    pub fn new() -> Self {
        Self { add_scheme: true }
    }

    /// Creates a sanitizer that rejects scheme-less input.
    pub fn without_scheme_insertion() -> Self {
        Self { add_scheme: false }
    }

    /// Returns whether `http://` is prepended to scheme-less input.
    pub fn adds_scheme(&self) -> bool {
        self.add_scheme
    }

    fn needs_scheme(url: &str) -> bool {
        match url.find(':') {
            None => true,
            Some(pos) => pos > MAX_SCHEME_END,
        }
    }
}

/// Returns whether the text after the first `:` is a bare port number.
fn is_host_and_port(url: &str) -> bool {
    let Some((_, rest)) = url.split_once(':') else {
        return false;
    };
    let port = rest
        .split(|c| matches!(c, '/' | '?' | '#'))
        .next()
        .unwrap_or_default();
    !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit())
}

fn is_host_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= 63
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

/// Checks what `Url::parse` tolerates but an absolute web URL must not have:
/// a missing or backslashed `//`, an empty authority, or an invalid host name.
fn has_valid_authority(candidate: &str, url: &Url) -> bool {
    let scheme = url.scheme();
    if !HOST_SCHEMES.contains(&scheme) {
        return true;
    }

    let after_scheme = candidate.get(scheme.len()..).unwrap_or_default();
    let Some(authority) = after_scheme.strip_prefix("://") else {
        return false;
    };
    if authority.starts_with('/') {
        return false;
    }

    match url.host() {
        Some(Host::Domain(domain)) => domain.split('.').all(is_host_label),
        Some(Host::Ipv4(_) | Host::Ipv6(_)) => true,
        None => false,
    }
}

impl Default for UrlSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sanitizer for UrlSanitizer {
    type Output = String;

    fn sanitize(&self, input: Tainted<String>) -> Result<Verified<String>, SanitizationError> {
        let raw = input.into_inner();
        let cleaned = sanitize_url_chars(&raw);
        let mut candidate = trim_input(&cleaned).to_string();

        if candidate.is_empty() {
            return Err(SanitizationError::new(
                SanitizationErrorKind::Empty,
                "no URL characters left after stripping",
            ));
        }
        if self.add_scheme && Self::needs_scheme(&candidate) {
            candidate.insert_str(0, "http://");
        }

        if is_host_and_port(&candidate) {
            return Err(SanitizationError::new(
                SanitizationErrorKind::MalformedInput,
                "host and port without a scheme",
            ));
        }

        let url = Url::parse(&candidate).map_err(|_| {
            SanitizationError::new(SanitizationErrorKind::MalformedInput, "not an absolute URL")
        })?;
        if !has_valid_authority(&candidate, &url) {
            return Err(SanitizationError::new(
                SanitizationErrorKind::MalformedInput,
                "missing or invalid host",
            ));
        }

        Ok(Verified::new_unchecked(candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(sanitizer: UrlSanitizer, input: &str) -> Result<String, SanitizationErrorKind> {
        sanitizer
            .sanitize(Tainted::new(input.to_string()))
            .map(Verified::into_inner)
            .map_err(|e| e.kind())
    }

    #[test]
    fn keeps_complete_urls_untouched() {
        assert_eq!(
            url(UrlSanitizer::new(), "https://example.com/path?q=1#frag"),
            Ok("https://example.com/path?q=1#frag".to_string())
        );
    }

    #[test]
    fn returns_input_rather_than_normalized_form() {
        // Url would serialize this as "http://example.com/"
        assert_eq!(
            url(UrlSanitizer::new(), "HTTP://Example.com"),
            Ok("HTTP://Example.com".to_string())
        );
    }

    #[test]
    fn prepends_scheme_when_missing() {
        assert_eq!(
            url(UrlSanitizer::new(), "www.example.com/index.html"),
            Ok("http://www.example.com/index.html".to_string())
        );
    }

    #[test]
    fn late_colon_does_not_count_as_scheme() {
        // first ':' at byte 15
        assert_eq!(
            url(UrlSanitizer::new(), "www.example.com:8080/"),
            Ok("http://www.example.com:8080/".to_string())
        );
    }

    #[test]
    fn without_scheme_insertion_rejects_bare_host() {
        assert_eq!(
            url(UrlSanitizer::without_scheme_insertion(), "www.example.com"),
            Err(SanitizationErrorKind::MalformedInput)
        );
        assert!(!UrlSanitizer::without_scheme_insertion().adds_scheme());
        assert!(UrlSanitizer::default().adds_scheme());
    }

    #[test]
    fn strips_illegal_characters_before_validating() {
        assert_eq!(
            url(UrlSanitizer::new(), " http://exa mple.com/\u{e4}\n"),
            Ok("http://example.com/".to_string())
        );
    }

    #[test]
    fn non_special_schemes_are_accepted() {
        assert_eq!(
            url(UrlSanitizer::new(), "mailto:name@example.com"),
            Ok("mailto:name@example.com".to_string())
        );
    }

    #[test]
    fn special_scheme_without_host_is_rejected() {
        assert_eq!(
            url(UrlSanitizer::new(), "http://"),
            Err(SanitizationErrorKind::MalformedInput)
        );
    }

    #[test]
    fn web_schemes_need_double_slash() {
        for input in [
            "http:example.com",
            r"http:\\example.com",
            "https:/example.com",
            "http:///example.com",
        ] {
            assert_eq!(
                url(UrlSanitizer::new(), input),
                Err(SanitizationErrorKind::MalformedInput),
                "{}",
                input
            );
        }
    }

    #[test]
    fn host_labels_are_checked() {
        for input in [
            "http://exa_mple.com",
            "http://-bad-.com",
            "http://example..com",
            "http://bad-.example.com/x",
        ] {
            assert_eq!(
                url(UrlSanitizer::new(), input),
                Err(SanitizationErrorKind::MalformedInput),
                "{}",
                input
            );
        }
        assert_eq!(
            url(UrlSanitizer::new(), "http://a-b.example.com:8080/x"),
            Ok("http://a-b.example.com:8080/x".to_string())
        );
        assert_eq!(
            url(UrlSanitizer::new(), "http://192.168.0.1/"),
            Ok("http://192.168.0.1/".to_string())
        );
        assert_eq!(url(UrlSanitizer::new(), "http://[::1]:80/"), Ok("http://[::1]:80/".to_string()));
    }

    #[test]
    fn host_and_port_is_not_a_scheme() {
        assert_eq!(
            url(UrlSanitizer::new(), "localhost:8080"),
            Err(SanitizationErrorKind::MalformedInput)
        );
        assert_eq!(
            url(UrlSanitizer::without_scheme_insertion(), "example.com:443/path"),
            Err(SanitizationErrorKind::MalformedInput)
        );
    }

    #[test]
    fn empty_after_stripping() {
        assert_eq!(url(UrlSanitizer::new(), "\u{e4}\u{f6}"), Err(SanitizationErrorKind::Empty));
    }
}
