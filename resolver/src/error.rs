//! Error types for token resolution.
//!
//! Every error aborts the parse; there is no partial result. Errors about the
//! shape of the input are kept apart from failures raised by a flag's
//! transform so callers can treat them differently.

use argspec_core::TransformError;
use thiserror::Error;

/// Errors that can occur while resolving tokens.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A value-bearing flag was given a second time.
    #[error("Flag --{0} already provided")]
    DuplicateFlag(String),

    /// A value-bearing flag had no value after it.
    #[error("Flag --{0} expects a value")]
    MissingFlagValue(String),

    /// More positional tokens than declared slots. Carries the first extra
    /// token.
    #[error("Unexpected argument {0}")]
    UnexpectedArgument(String),

    /// Fewer positional tokens than required slots. Carries the first
    /// unfilled slot's name.
    #[error("Missing required argument {0}")]
    MissingRequiredArgument(String),

    /// A required flag is still absent or falsy after its transform ran.
    #[error("Missing required flag --{0}")]
    MissingRequiredFlag(String),

    /// A flag's transform failed. The transform's error is passed through.
    #[error(transparent)]
    Transform(TransformError),
}

/// Broad classification of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The tokens don't fit the schema.
    Usage,
    /// A transform rejected a value.
    Transform,
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transform(_) => ErrorKind::Transform,
            _ => ErrorKind::Usage,
        }
    }

    /// Process exit code for this error: `2` for usage errors, `1` for
    /// transform failures.
    ///
    /// # Examples
    ///
    /// ```
    /// use argspec_resolver::ParseError;
    ///
    /// assert_eq!(ParseError::UnexpectedArgument("b".into()).exit_code(), 2);
    /// let failed = ParseError::Transform(argspec_core::transform_error("bad port"));
    /// assert_eq!(failed.exit_code(), 1);
    /// assert_eq!(failed.to_string(), "bad port");
    /// ```
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::Usage => 2,
            ErrorKind::Transform => 1,
        }
    }
}

/// Convenience alias for results with [`ParseError`].
pub type Result<T> = std::result::Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ParseError::DuplicateFlag("app".into()).to_string(),
            "Flag --app already provided"
        );
        assert_eq!(
            ParseError::MissingFlagValue("remote".into()).to_string(),
            "Flag --remote expects a value"
        );
        assert_eq!(
            ParseError::MissingRequiredArgument("APP".into()).to_string(),
            "Missing required argument APP"
        );
        assert_eq!(
            ParseError::MissingRequiredFlag("token".into()).to_string(),
            "Missing required flag --token"
        );
    }

    #[test]
    fn test_transform_error_is_not_wrapped() {
        let err = ParseError::Transform(argspec_core::transform_error("invalid app name"));
        assert_eq!(err.kind(), ErrorKind::Transform);
        assert_eq!(err.to_string(), "invalid app name");
    }
}
