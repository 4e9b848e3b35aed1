/// A value that has passed a sanitizer and is safe to hand to application code.
///
/// `Verified<T>` is the only output of a [`Sanitizer`](crate::Sanitizer).
/// It carries the cleaned text, the parsed number or the validated address,
/// and proves at the type level that the raw [`Tainted`](crate::Tainted)
/// input went through a filter.
///
/// # Construction Invariants
///
/// There is no public constructor and no `From<T>` implementation. Only
/// sanitizers inside this crate create `Verified<T>`, after validation.
///
/// ```compile_fail
/// use filter_input::Verified;
///
/// // This will not compile - no public constructor:
/// let verified = Verified::new("data".to_string());
/// ```
///
/// # Access
///
/// - [`AsRef::as_ref`]: borrow the verified value
/// - [`into_inner`](Self::into_inner): consume and extract the value
///
/// ```
/// use filter_input::{IntegerSanitizer, Sanitizer, Tainted};
///
/// let verified = IntegerSanitizer
///     .sanitize(Tainted::new("0x1A".to_string()))
///     .expect("hex literal");
///
/// assert_eq!(*verified.as_ref(), 26);
/// assert_eq!(verified.into_inner(), 26);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verified<T> {
    inner: T,
}

impl<T> Verified<T> {
    /// Creates a `Verified<T>` without performing validation.
    ///
    /// Crate-internal: callers must have validated `value` already.
    pub(crate) fn new_unchecked(value: T) -> Self {
        Self { inner: value }
    }

    /// Consumes the `Verified<T>` and returns the inner value.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Transforms the verified value without leaving the verified domain.
    ///
    /// Used to erase a typed result into a [`FilterValue`](crate::FilterValue).
    pub(crate) fn map<U>(self, f: impl FnOnce(T) -> U) -> Verified<U> {
        Verified::new_unchecked(f(self.inner))
    }
}

impl<T> AsRef<T> for Verified<T> {
    fn as_ref(&self) -> &T {
        &self.inner
    }
}
