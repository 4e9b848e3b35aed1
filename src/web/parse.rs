//! Parsers for the raw request parts a framework hands over.

use percent_encoding::percent_decode_str;
use url::form_urlencoded;

/// Splits an `application/x-www-form-urlencoded` string into pairs.
///
/// Used for both query strings and form bodies. `+` decodes to a space and a
/// pair without `=` has an empty value. A leading `?` is ignored.
pub(crate) fn urlencoded_pairs(input: &str) -> Vec<(String, String)> {
    let input = input.strip_prefix('?').unwrap_or(input);
    form_urlencoded::parse(input.as_bytes())
        .filter(|(k, _)| !k.is_empty())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Splits a `Cookie` header value (`a=1; b=2`) into pairs.
///
/// Names are taken verbatim; values are percent-decoded. Entries without
/// `=` are skipped.
pub(crate) fn cookie_pairs(header: &str) -> Vec<(String, String)> {
    header
        .split(';')
        .filter_map(|entry| {
            let (name, value) = entry.split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            let value = percent_decode_str(value.trim()).decode_utf8_lossy().into_owned();
            Some((name.to_string(), value))
        })
        .collect()
}
