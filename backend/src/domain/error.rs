//! Domain-level error types.
//!
//! These errors are transport agnostic. The Transport Adapter decides how a
//! failed command is surfaced; the interpreter never turns them into partial
//! replies.

use std::fmt;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The backing store could not be reached.
    ServiceUnavailable,
    /// An unexpected error occurred inside the domain or an adapter.
    InternalError,
}

impl ErrorCode {
    /// Return the snake-case identifier used in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ServiceUnavailable => "service_unavailable",
            Self::InternalError => "internal_error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors emitted by the constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorValidationError {
    /// The message was empty once trimmed.
    EmptyMessage,
}

impl fmt::Display for ErrorValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "error message must not be empty"),
        }
    }
}

impl std::error::Error for ErrorValidationError {}

/// Domain error payload.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use wishlist_backend::domain::{Error, ErrorCode};
///
/// let err = Error::service_unavailable("store offline");
/// assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    message: String,
}

impl Error {
    /// Create a new error, falling back to the code name for blank messages.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(value) => value,
            Err(ErrorValidationError::EmptyMessage) => Self {
                code,
                message: code.as_str().to_owned(),
            },
        }
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(code: ErrorCode, message: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self { code, message })
    }

    /// Stable machine-readable error code.
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn service_unavailable_constructor_sets_code() {
        let err = Error::service_unavailable("pool exhausted");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
        assert_eq!(err.message(), "pool exhausted");
    }

    #[rstest]
    fn try_new_rejects_empty_messages() {
        let result = Error::try_new(ErrorCode::InternalError, "   ");
        assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
    }

    #[rstest]
    fn new_falls_back_to_code_for_blank_messages() {
        let err = Error::new(ErrorCode::InternalError, "");
        assert_eq!(err.message(), "internal_error");
    }

    #[rstest]
    fn display_includes_code_and_message() {
        let err = Error::internal("boom");
        assert_eq!(err.to_string(), "internal_error: boom");
    }
}
