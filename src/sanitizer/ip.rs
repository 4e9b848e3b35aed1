//! IP address sanitizer with optional range exclusions.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use super::{trim_input, uri::sanitize_url_chars, SanitizationError, SanitizationErrorKind, Sanitizer};
use crate::{Tainted, Verified};

/// Address ranges an [`IpSanitizer`] should reject.
///
/// Everything is allowed by default.
///
/// ```
/// use filter_input::IpRanges;
///
/// let public_only = IpRanges::any().without_private().without_reserved();
/// assert!(public_only.excludes_private());
/// assert!(!public_only.excludes_loopback());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct IpRanges {
    no_loopback: bool,
    no_private: bool,
    no_reserved: bool,
}

impl IpRanges {
    /// Allows every address.
    pub fn any() -> Self {
        Self::default()
    }

    /// Rejects `127.0.0.0/8` and `::1`.
    pub fn without_loopback(mut self) -> Self {
        self.no_loopback = true;
        self
    }

    /// Rejects `10/8`, `172.16/12`, `192.168/16` and `fc00::/7`.
    pub fn without_private(mut self) -> Self {
        self.no_private = true;
        self
    }

    /// Rejects unspecified, loopback, link-local, mapped and class E ranges.
    pub fn without_reserved(mut self) -> Self {
        self.no_reserved = true;
        self
    }

    /// Returns whether loopback addresses are rejected.
    pub fn excludes_loopback(&self) -> bool {
        self.no_loopback
    }

    /// Returns whether private addresses are rejected.
    pub fn excludes_private(&self) -> bool {
        self.no_private
    }

    /// Returns whether reserved addresses are rejected.
    pub fn excludes_reserved(&self) -> bool {
        self.no_reserved
    }

    /// Returns the name of the first excluded range `addr` falls in.
    fn violation(&self, addr: IpAddr) -> Option<&'static str> {
        if self.no_loopback && is_loopback(addr) {
            return Some("loopback address");
        }
        if self.no_private && is_private(addr) {
            return Some("private address");
        }
        if self.no_reserved && is_reserved(addr) {
            return Some("reserved address");
        }
        None
    }
}

fn is_loopback(addr: IpAddr) -> bool {
    match addr {
        IpAddr::V4(v4) => v4.octets()[0] == 127,
        IpAddr::V6(v6) => v6 == Ipv6Addr::LOCALHOST,
    }
}

fn is_private(addr: IpAddr) -> bool {
    match addr {
        IpAddr::V4(v4) => v4.is_private(),
        // fc00::/7
        IpAddr::V6(v6) => (v6.segments()[0] & 0xfe00) == 0xfc00,
    }
}

fn is_reserved(addr: IpAddr) -> bool {
    match addr {
        IpAddr::V4(v4) => is_reserved_v4(v4),
        IpAddr::V6(v6) => is_reserved_v6(v6),
    }
}

fn is_reserved_v4(v4: Ipv4Addr) -> bool {
    let [a, b, ..] = v4.octets();
    a == 0 || a == 127 || (a == 169 && b == 254) || a >= 240
}

fn is_reserved_v6(v6: Ipv6Addr) -> bool {
    let seg = v6.segments();
    let mapped = seg[..5].iter().all(|s| *s == 0) && seg[5] == 0xffff;
    v6.is_unspecified() || v6 == Ipv6Addr::LOCALHOST || mapped || (seg[0] & 0xffc0) == 0xfe80
}

/// Validates an IPv4 or IPv6 address, optionally excluding ranges.
///
/// The verified value is the trimmed input, not a canonical rendering.
///
/// # Examples
///
/// ```
/// use filter_input::{IpRanges, IpSanitizer, Sanitizer, Tainted};
///
/// let sanitizer = IpSanitizer::new(IpRanges::any().without_private());
/// assert!(sanitizer.sanitize(Tainted::new("8.8.8.8".to_string())).is_ok());
/// assert!(sanitizer.sanitize(Tainted::new("192.168.1.10".to_string())).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IpSanitizer {
    ranges: IpRanges,
}

impl IpSanitizer {
    /// Creates a sanitizer rejecting the given ranges.
    pub fn new(ranges: IpRanges) -> Self {
        Self { ranges }
    }
}

impl Sanitizer for IpSanitizer {
    type Output = String;

    fn sanitize(&self, input: Tainted<String>) -> Result<Verified<String>, SanitizationError> {
        let raw = input.into_inner();
        let cleaned = sanitize_url_chars(&raw);
        let candidate = trim_input(&cleaned);

        if candidate.is_empty() {
            return Err(SanitizationError::new(
                SanitizationErrorKind::Empty,
                "no address characters left after stripping",
            ));
        }

        let addr: IpAddr = candidate.parse().map_err(|_| {
            SanitizationError::new(SanitizationErrorKind::MalformedInput, "not an IP address")
        })?;

        if let Some(range) = self.ranges.violation(addr) {
            return Err(SanitizationError::new(
                SanitizationErrorKind::ForbiddenRange,
                range,
            ));
        }

        Ok(Verified::new_unchecked(candidate.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(ranges: IpRanges, input: &str) -> Result<String, SanitizationErrorKind> {
        IpSanitizer::new(ranges)
            .sanitize(Tainted::new(input.to_string()))
            .map(Verified::into_inner)
            .map_err(|e| e.kind())
    }

    #[test]
    fn accepts_v4_and_v6() {
        assert_eq!(ip(IpRanges::any(), "8.8.8.8"), Ok("8.8.8.8".to_string()));
        assert_eq!(ip(IpRanges::any(), " 2001:db8::1 "), Ok("2001:db8::1".to_string()));
        assert_eq!(ip(IpRanges::any(), "::1"), Ok("::1".to_string()));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert_eq!(ip(IpRanges::any(), "256.0.0.1"), Err(SanitizationErrorKind::MalformedInput));
        assert_eq!(ip(IpRanges::any(), "1.2.3"), Err(SanitizationErrorKind::MalformedInput));
        assert_eq!(ip(IpRanges::any(), "example.com"), Err(SanitizationErrorKind::MalformedInput));
        assert_eq!(ip(IpRanges::any(), ""), Err(SanitizationErrorKind::Empty));
    }

    #[test]
    fn no_private_rejects_private_ranges() {
        let ranges = IpRanges::any().without_private();
        for addr in ["10.0.0.1", "172.16.5.4", "172.31.255.255", "192.168.0.1", "fd00::1", "fc00::"] {
            assert_eq!(ip(ranges, addr), Err(SanitizationErrorKind::ForbiddenRange), "{}", addr);
        }
        for addr in ["172.32.0.1", "11.0.0.1", "fe00::1", "127.0.0.1"] {
            assert!(ip(ranges, addr).is_ok(), "{}", addr);
        }
    }

    #[test]
    fn no_reserved_rejects_reserved_ranges() {
        let ranges = IpRanges::any().without_reserved();
        for addr in [
            "0.1.2.3",
            "127.0.0.1",
            "169.254.1.1",
            "240.0.0.1",
            "255.255.255.255",
            "::",
            "::1",
            "::ffff:8.8.8.8",
            "fe80::1",
            "febf::1",
        ] {
            assert_eq!(ip(ranges, addr), Err(SanitizationErrorKind::ForbiddenRange), "{}", addr);
        }
        for addr in ["8.8.8.8", "10.0.0.1", "fec0::1", "2001:db8::1"] {
            assert!(ip(ranges, addr).is_ok(), "{}", addr);
        }
    }

    #[test]
    fn no_loopback_rejects_loopback_only() {
        let ranges = IpRanges::any().without_loopback();
        for addr in ["127.0.0.1", "127.255.0.9", "::1", "0:0:0:0:0:0:0:1"] {
            assert_eq!(ip(ranges, addr), Err(SanitizationErrorKind::ForbiddenRange), "{}", addr);
        }
        assert!(ip(ranges, "10.0.0.1").is_ok());
        assert!(ip(ranges, "::").is_ok());
    }

    #[test]
    fn returns_trimmed_input_not_canonical_form() {
        assert_eq!(
            ip(IpRanges::any(), "0:0:0:0:0:0:0:1"),
            Ok("0:0:0:0:0:0:0:1".to_string())
        );
    }

    #[test]
    fn range_errors_name_the_range() {
        let err = IpSanitizer::new(IpRanges::any().without_private())
            .sanitize(Tainted::new("10.1.2.3".to_string()))
            .unwrap_err();
        assert_eq!(err.message(), "private address");
        assert!(!err.to_string().contains("10.1.2.3"));
    }
}
