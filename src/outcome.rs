//! Outcomes of a filter call.

use std::fmt;

use crate::Verified;

/// A sanitized value of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// Output of the text, e-mail, URL and IP kinds
    Text(String),
    /// Output of the float kind
    Float(f64),
    /// Output of the integer kind
    Integer(i64),
}

impl FilterValue {
    /// Returns the text, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FilterValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the float, if this is a float value.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            FilterValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the integer, if this is an integer value.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FilterValue::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Text(s) => f.write_str(s),
            FilterValue::Float(v) => write!(f, "{}", v),
            FilterValue::Integer(v) => write!(f, "{}", v),
        }
    }
}

/// Values that count as "nothing useful" for the merged request source.
///
/// Only empty text is blank. Numeric zero is a real value.
pub(crate) trait Blank {
    fn is_blank(&self) -> bool;
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Blank for f64 {
    fn is_blank(&self) -> bool {
        false
    }
}

impl Blank for i64 {
    fn is_blank(&self) -> bool {
        false
    }
}

impl Blank for FilterValue {
    fn is_blank(&self) -> bool {
        matches!(self, FilterValue::Text(s) if s.is_empty())
    }
}

/// Result of filtering one named input.
///
/// # Examples
///
/// ```
/// use filter_input::{FilterInput, InputSource, Filtered};
/// use filter_input::web::{ExtractTaintedInputs, RequestAdapter};
///
/// let mut adapter = RequestAdapter::new("req-1".to_string());
/// adapter.add_query_string("age=42&name=");
/// let input = FilterInput::new(adapter.extract_tainted_inputs());
///
/// assert_eq!(input.integer(InputSource::Query, "age").value(), Some(&42));
/// assert!(input.integer(InputSource::Query, "missing").is_absent());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Filtered<T> {
    /// The input was present and passed validation.
    Value(Verified<T>),
    /// The input was present but failed validation.
    Invalid,
    /// No input with that name exists in the source.
    Absent,
}

impl<T> Filtered<T> {
    /// Returns a reference to the value, if validation succeeded.
    pub fn value(&self) -> Option<&T> {
        match self {
            Filtered::Value(v) => Some(v.as_ref()),
            _ => None,
        }
    }

    /// Consumes the outcome, returning the value if validation succeeded.
    pub fn into_value(self) -> Option<T> {
        match self {
            Filtered::Value(v) => Some(v.into_inner()),
            _ => None,
        }
    }

    /// Returns the verified wrapper, if validation succeeded.
    pub fn verified(self) -> Option<Verified<T>> {
        match self {
            Filtered::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Returns `true` if the input was present and failed validation.
    pub fn is_invalid(&self) -> bool {
        matches!(self, Filtered::Invalid)
    }

    /// Returns `true` if the input was missing.
    pub fn is_absent(&self) -> bool {
        matches!(self, Filtered::Absent)
    }
}

/// Whether the merged request source should consult the next namespace.
pub(crate) fn wants_fallback<T: Blank>(filtered: &Filtered<T>) -> bool {
    match filtered {
        Filtered::Value(v) => v.as_ref().is_blank(),
        Filtered::Invalid | Filtered::Absent => true,
    }
}

impl Filtered<FilterValue> {
    /// Collapses the outcome into the loosely typed sentinel form.
    ///
    /// Invalid input is always [`Sentinel::False`]; absent input becomes
    /// `on_absent`.
    pub fn into_sentinel(self, on_absent: Sentinel) -> Sentinel {
        match self {
            Filtered::Value(v) => Sentinel::Value(v.into_inner()),
            Filtered::Invalid => Sentinel::False,
            Filtered::Absent => on_absent,
        }
    }
}

/// Loosely typed rendering of a [`Filtered`] outcome.
///
/// Callers that only distinguish "a value" from "no value" can match on this
/// instead of [`Filtered`].
#[derive(Debug, Clone, PartialEq)]
pub enum Sentinel {
    /// A valid value
    Value(FilterValue),
    /// Missing text input
    EmptyString,
    /// Invalid input, or missing input when no other marker applies
    False,
    /// Missing numeric input when null is not coerced to false
    Null,
}

impl Sentinel {
    /// Returns `true` for anything but [`Sentinel::Value`].
    pub fn is_missing(&self) -> bool {
        !matches!(self, Sentinel::Value(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_accessors() {
        let ok: Filtered<i64> = Filtered::Value(Verified::new_unchecked(7));
        assert_eq!(ok.value(), Some(&7));
        assert!(!ok.is_invalid());
        assert!(!ok.is_absent());
        assert_eq!(ok.into_value(), Some(7));

        let bad: Filtered<i64> = Filtered::Invalid;
        assert!(bad.is_invalid());
        assert_eq!(bad.into_value(), None);
    }

    #[test]
    fn fallback_on_empty_text_only() {
        let empty: Filtered<String> = Filtered::Value(Verified::new_unchecked(String::new()));
        let zero: Filtered<i64> = Filtered::Value(Verified::new_unchecked(0));
        let zero_float: Filtered<FilterValue> =
            Filtered::Value(Verified::new_unchecked(FilterValue::Float(0.0)));

        assert!(wants_fallback(&empty));
        assert!(!wants_fallback(&zero));
        assert!(!wants_fallback(&zero_float));
        assert!(wants_fallback(&Filtered::<i64>::Invalid));
        assert!(wants_fallback(&Filtered::<i64>::Absent));
    }

    #[test]
    fn sentinel_conversion() {
        let ok = Filtered::Value(Verified::new_unchecked(FilterValue::Integer(3)));
        assert_eq!(
            ok.into_sentinel(Sentinel::Null),
            Sentinel::Value(FilterValue::Integer(3))
        );
        assert_eq!(
            Filtered::<FilterValue>::Invalid.into_sentinel(Sentinel::EmptyString),
            Sentinel::False
        );
        assert_eq!(
            Filtered::<FilterValue>::Absent.into_sentinel(Sentinel::Null),
            Sentinel::Null
        );
    }

    #[test]
    fn filter_value_display() {
        assert_eq!(FilterValue::Text("x".to_string()).to_string(), "x");
        assert_eq!(FilterValue::Float(1234.56).to_string(), "1234.56");
        assert_eq!(FilterValue::Integer(-3).to_string(), "-3");
        assert_eq!(FilterValue::Integer(26).as_integer(), Some(26));
        assert_eq!(FilterValue::Integer(26).as_text(), None);
    }
}
