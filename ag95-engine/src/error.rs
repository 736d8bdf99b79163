//! Engine error types.

use ag95_domain::DomainError;
use thiserror::Error;

/// Engine-level errors.
///
/// Out-of-range parameters are not errors: they come back as
/// `decision: None` results. Only input that cannot be read as a number,
/// or amounts so large that a limit overflows, end up here.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A specific request field failed to parse
    #[error("Invalid field {field}: {source}")]
    InvalidField {
        /// Field name as it appears in the request
        field: &'static str,
        /// Underlying parse failure
        #[source]
        source: DomainError,
    },

    /// A limit computation left the decimal range
    #[error("Arithmetic overflow: {0}")]
    Overflow(#[source] DomainError),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
