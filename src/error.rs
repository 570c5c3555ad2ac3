//! Harness error types.
//!
//! Errors are categorized by where in a run they surface:
//!
//! | Category | Variants | Resource state |
//! |----------|----------|----------------|
//! | **Pre-acquisition** | `InvalidInput` | never acquired |
//! | **Acquisition** | `ResourceUnavailable` | never acquired |
//! | **Run** | `OperationFailed`, `ResourceClosed`, `Backend` | released before return |

use thiserror::Error;

// Codes follow sysexits.h so they never collide with clap's usage error (2).

/// Process exit code for a malformed required parameter (`EX_DATAERR`).
pub const EXIT_INVALID_INPUT: u8 = 65;
/// Process exit code for a failed resource acquisition (`EX_UNAVAILABLE`).
pub const EXIT_RESOURCE_UNAVAILABLE: u8 = 69;
/// Process exit code for any failure raised while the operation runs
/// (`EX_SOFTWARE`).
pub const EXIT_OPERATION_FAILED: u8 = 70;

/// Errors that can occur during a harness run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HarnessError {
    /// A required parameter could not be read or parsed.
    #[error("Invalid input {input:?}: {reason}")]
    InvalidInput {
        /// The raw text that was read (empty if nothing could be read).
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The simulation resource could not be acquired.
    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),

    /// The dispatched operation reported a failure.
    #[error("Operation {operation} failed: {reason}")]
    OperationFailed {
        /// Identifier of the failing operation.
        operation: String,
        /// Failure reported by the operation.
        reason: String,
    },

    /// An operation was issued against a resource that is already closed.
    #[error("Resource closed: {0}")]
    ResourceClosed(String),

    /// Backend-internal failure raised while an operation runs.
    #[error("Backend error: {0}")]
    Backend(String),
}

impl HarnessError {
    /// Shorthand for an [`HarnessError::InvalidInput`].
    pub fn invalid_input(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for an [`HarnessError::OperationFailed`].
    pub fn operation_failed(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::OperationFailed {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if this error can only occur before a resource exists.
    pub fn is_pre_acquisition(&self) -> bool {
        matches!(self, Self::InvalidInput { .. } | Self::ResourceUnavailable(_))
    }

    /// Distinct non-zero process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidInput { .. } => EXIT_INVALID_INPUT,
            Self::ResourceUnavailable(_) => EXIT_RESOURCE_UNAVAILABLE,
            Self::OperationFailed { .. } | Self::ResourceClosed(_) | Self::Backend(_) => {
                EXIT_OPERATION_FAILED
            }
        }
    }
}

/// Result type for harness operations.
pub type HarnessResult<T> = Result<T, HarnessError>;
