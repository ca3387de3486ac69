//! Error type for identifier generation.

use thiserror::Error;

/// Errors raised while configuring a generator or requesting identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UuidError {
    /// The alphabet or length failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// A request argument such as the bulk count is malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The requested number of distinct identifiers cannot be produced.
    #[error("cannot generate {requested} distinct identifiers: {reason}")]
    SpaceExhausted {
        /// Number of identifiers that was requested.
        requested: u128,
        /// Why the request was refused.
        reason: String,
    },
}

/// Result alias used throughout the generator.
pub type Result<T> = std::result::Result<T, UuidError>;
