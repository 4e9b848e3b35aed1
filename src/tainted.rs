use std::fmt;

/// A wrapper for untrusted request input that must pass a sanitizer before use.
///
/// Every value read from a query string, form body, cookie, server variable
/// or environment variable enters the crate as `Tainted<String>`. The only
/// way to get at the content is through a [`Sanitizer`](crate::Sanitizer),
/// which produces a [`Verified<T>`](crate::Verified).
///
/// # Examples
///
/// ```
/// use filter_input::{HtmlSanitizer, Sanitizer, Tainted};
///
/// let user_input = Tainted::new("<b>rock & roll</b>".to_string());
///
/// // let s: String = user_input; // Won't compile!
/// let verified = HtmlSanitizer.sanitize(user_input).expect("html never rejects");
/// assert_eq!(verified.as_ref(), "&lt;b&gt;rock &amp; roll&lt;/b&gt;");
/// ```
// Clone: lookups hand out copies of the stored value.
#[derive(Clone, PartialEq, Eq)]
pub struct Tainted<T> {
    // Must stay private. A public field would let callers skip sanitization.
    inner: T,
}

impl<T> Tainted<T> {
    /// Wraps an untrusted value in `Tainted`.
    pub fn new(value: T) -> Self {
        Self { inner: value }
    }

    /// Extracts the inner value for sanitization.
    ///
    /// Restricted to the crate: only sanitizer implementations call this, and
    /// they wrap their result in `Verified<T>` only after validation.
    pub(crate) fn into_inner(self) -> T {
        self.inner
    }

    /// Borrows the inner value for crate-internal checks that do not
    /// release it (length limits, presence tests).
    pub(crate) fn peek(&self) -> &T {
        &self.inner
    }
}

// No Deref, AsRef, Borrow, From<T> or Into<T>: any of them would let tainted
// input flow around the sanitizers.

impl<T: fmt::Debug> fmt::Debug for Tainted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tainted")
            .field("inner", &self.inner)
            .finish()
    }
}
