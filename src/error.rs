//! Error codes shared by every error surfaced to the user.
//!
//! Each error enum maps its variants to a stable `E_*` code so failures can
//! be rendered and logged without matching on display strings.

/// Implement on error types that end up in a [`FailureInfo`].
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    /// Whether a manual re-dispatch is likely to succeed. Advisory only.
    fn retryable(&self) -> bool {
        false
    }
}

/// Observable detail of a failed operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureInfo {
    pub code: &'static str,
    pub message: String,
    pub retryable: bool,
}

impl FailureInfo {
    pub fn from_error(err: &(impl ErrorCode + ?Sized)) -> Self {
        Self { code: err.error_code(), message: err.to_string(), retryable: err.retryable() }
    }
}

impl std::fmt::Display for FailureInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}
