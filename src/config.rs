//! Options shared by every filter call of a [`FilterInput`](crate::FilterInput).

use crate::{EmailGrammar, Sentinel, ValueKind};

/// Behaviour switches for filtering.
///
/// # Examples
///
/// ```
/// use filter_input::{FilterOptions, Sentinel, ValueKind};
///
/// let options = FilterOptions::default();
/// assert_eq!(options.absent_sentinel(&ValueKind::Raw), Sentinel::EmptyString);
/// assert_eq!(options.absent_sentinel(&ValueKind::Float), Sentinel::False);
///
/// let strict = FilterOptions::default()
///     .with_empty_on_absent(false)
///     .with_null_to_false(false)
///     .with_max_input_len(4096);
/// assert_eq!(strict.absent_sentinel(&ValueKind::Raw), Sentinel::False);
/// assert_eq!(strict.absent_sentinel(&ValueKind::Integer), Sentinel::Null);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOptions {
    empty_on_absent: bool,
    null_to_false: bool,
    max_input_len: Option<usize>,
    email_grammar: EmailGrammar,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            empty_on_absent: true,
            null_to_false: true,
            max_input_len: None,
            email_grammar: EmailGrammar::Strict,
        }
    }
}

impl FilterOptions {
    /// Missing text input reads as an empty string instead of false.
    pub fn with_empty_on_absent(mut self, enabled: bool) -> Self {
        self.empty_on_absent = enabled;
        self
    }

    /// Missing numeric input reads as false instead of null.
    pub fn with_null_to_false(mut self, enabled: bool) -> Self {
        self.null_to_false = enabled;
        self
    }

    /// Inputs longer than `max_len` bytes are treated as invalid.
    pub fn with_max_input_len(mut self, max_len: usize) -> Self {
        self.max_input_len = Some(max_len);
        self
    }

    /// Selects the e-mail grammar variant.
    pub fn with_email_grammar(mut self, grammar: EmailGrammar) -> Self {
        self.email_grammar = grammar;
        self
    }

    /// Returns whether missing text input reads as an empty string.
    pub fn empty_on_absent(&self) -> bool {
        self.empty_on_absent
    }

    /// Returns whether missing numeric input reads as false.
    pub fn null_to_false(&self) -> bool {
        self.null_to_false
    }

    /// Returns the input length limit, if any.
    pub fn max_input_len(&self) -> Option<usize> {
        self.max_input_len
    }

    /// Returns the e-mail grammar variant.
    pub fn email_grammar(&self) -> EmailGrammar {
        self.email_grammar
    }

    /// The sentinel reported when input of `kind` is missing.
    pub fn absent_sentinel(&self, kind: &ValueKind) -> Sentinel {
        match (kind.is_numeric(), self.null_to_false, self.empty_on_absent) {
            (true, true, _) => Sentinel::False,
            (true, false, _) => Sentinel::Null,
            (false, _, true) => Sentinel::EmptyString,
            (false, _, false) => Sentinel::False,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IpRanges;

    #[test]
    fn defaults() {
        let options = FilterOptions::default();
        assert!(options.empty_on_absent());
        assert!(options.null_to_false());
        assert_eq!(options.max_input_len(), None);
        assert_eq!(options.email_grammar(), EmailGrammar::Strict);
    }

    #[test]
    fn text_kinds_follow_empty_on_absent() {
        let on = FilterOptions::default();
        let off = FilterOptions::default().with_empty_on_absent(false);
        for kind in [
            ValueKind::Raw,
            ValueKind::Html,
            ValueKind::Email,
            ValueKind::Url { add_scheme: true },
            ValueKind::Ip(IpRanges::any()),
        ] {
            assert_eq!(on.absent_sentinel(&kind), Sentinel::EmptyString);
            assert_eq!(off.absent_sentinel(&kind), Sentinel::False);
        }
    }

    #[test]
    fn numeric_kinds_follow_null_to_false() {
        let on = FilterOptions::default();
        let off = FilterOptions::default().with_null_to_false(false);
        for kind in [ValueKind::Float, ValueKind::Integer] {
            assert_eq!(on.absent_sentinel(&kind), Sentinel::False);
            assert_eq!(off.absent_sentinel(&kind), Sentinel::Null);
        }
        // empty_on_absent does not apply to numbers
        let no_empty = FilterOptions::default().with_empty_on_absent(false);
        assert_eq!(no_empty.absent_sentinel(&ValueKind::Float), Sentinel::False);
    }
}
