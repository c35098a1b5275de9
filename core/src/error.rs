//! Error types for action execution.

use thiserror::Error;

/// Result type alias for action operations.
pub type Result<T> = std::result::Result<T, ActionError>;

/// Message used when an internal error must be surfaced to a caller.
const UNEXPECTED_MESSAGE: &str = "An unexpected error has occurred";

/// Failure modes of an action invocation.
///
/// Validation and query failures carry a user-facing message and an
/// optional machine-readable code; internal errors keep their source for
/// logging but never expose it through [`ActionError::message`].
#[derive(Debug, Error)]
pub enum ActionError {
    /// A validation hook rejected the parameters.
    #[error("{message}")]
    Validation {
        /// User-facing description of what failed validation.
        message: String,
        /// Optional code for client error handling.
        code: Option<String>,
    },

    /// The wrapped query operation failed.
    #[error("{message}")]
    Query {
        /// User-facing description of the failure.
        message: String,
        /// Optional code for client error handling.
        code: Option<String>,
    },

    /// The named action is not defined for the controller.
    #[error("`{0}` is not an action defined for this controller")]
    UnknownAction(String),

    /// An unexpected internal error.
    ///
    /// The source is available for logging via [`std::error::Error::source`]
    /// but is never included in the user-facing message.
    #[error("{}", UNEXPECTED_MESSAGE)]
    Other(#[from] anyhow::Error),
}

impl ActionError {
    /// Create a validation error with the given message.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            code: None,
        }
    }

    /// Create a query error with the given message.
    #[must_use]
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
            code: None,
        }
    }

    /// Attach a machine-readable code to a validation or query error.
    ///
    /// Has no effect on other variants.
    #[must_use]
    pub fn with_code(mut self, new_code: impl Into<String>) -> Self {
        if let Self::Validation { code, .. } | Self::Query { code, .. } = &mut self {
            *code = Some(new_code.into());
        }
        self
    }

    /// User-facing message for this error.
    ///
    /// Internal errors always yield a fixed message so source chains are
    /// never leaked to clients.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Validation { message, .. } | Self::Query { message, .. } => message.clone(),
            Self::UnknownAction(_) => self.to_string(),
            Self::Other(_) => UNEXPECTED_MESSAGE.to_string(),
        }
    }

    /// Machine-readable code, if one was attached.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Validation { code, .. } | Self::Query { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Whether this error came from a validation hook.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
