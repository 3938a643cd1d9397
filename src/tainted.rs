use std::fmt;

/// Raw challenge input received from an identity provider.
///
/// Challenge headers and redirect URIs are attacker-controllable. `Tainted`
/// keeps them opaque until the parser has run them through the codec and
/// the validator; only crate-internal parsing code can read the value.
///
/// # Security Properties
///
/// - No `Deref`, `AsRef` or conversion back to the inner value
/// - Inner value readable only through the crate-private `into_inner`
/// - `Debug` marks the value as tainted
#[derive(Clone)]
pub(crate) struct Tainted<T> {
    // Must stay private; public access would let unvalidated challenge text
    // reach the response builder (CWE-20: Improper Input Validation).
    inner: T,
}

impl<T> Tainted<T> {
    /// Wraps untrusted challenge input.
    pub(crate) fn new(value: T) -> Self {
        Self { inner: value }
    }

    /// Releases the value to the parser.
    ///
    /// Only parsing code that immediately decodes and validates the value may
    /// call this.
    pub(crate) fn into_inner(self) -> T {
        self.inner
    }
}

// Do not add Deref, AsRef, Borrow, From<T> or Into<T>: they would let raw
// challenge text skip validation.

impl<T: fmt::Debug> fmt::Debug for Tainted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tainted")
            .field("inner", &self.inner)
            .finish()
    }
}
