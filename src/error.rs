use std::fmt;

/// Errors that can occur when using the filter API incorrectly.
///
/// Malformed or missing user input is never reported through this type; it
/// surfaces as [`Filtered::Invalid`](crate::Filtered::Invalid) or
/// [`Filtered::Absent`](crate::Filtered::Absent). `Error` covers caller
/// mistakes such as naming a source or value kind that does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The named input source is not one of the six known namespaces
    UnknownSource(String),
    /// The named value kind is not one of the ten known kinds
    UnknownKind(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownSource(name) => write!(f, "unknown input source '{}'", name),
            Error::UnknownKind(name) => write!(f, "unknown value kind '{}'", name),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_names_the_offender() {
        let err = Error::UnknownSource("session".to_string());
        assert_eq!(err.to_string(), "unknown input source 'session'");

        let err = Error::UnknownKind("date".to_string());
        assert_eq!(err.to_string(), "unknown value kind 'date'");
    }

    #[test]
    fn error_is_std_error() {
        fn takes_error(_: &dyn std::error::Error) {}
        takes_error(&Error::UnknownKind("x".to_string()));
    }
}
