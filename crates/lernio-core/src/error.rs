//! Error types for the recommendation engine.

use thiserror::Error;

/// Errors surfaced by the recommendation engine.
#[derive(Error, Debug)]
pub enum Error {
    /// Requested user id is absent from the trained model's index.
    ///
    /// Fatal to the single request that triggered it; retrying cannot
    /// succeed without retraining on data that contains the user.
    #[error("unknown user: '{0}' is not present in the training data")]
    UnknownUser(String),

    /// Invalid model configuration (e.g. rank outside the matrix shape).
    #[error("configuration error: {0}")]
    Config(String),

    /// A malformed enrollment record reached the matrix builder.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// The numerical backend failed to produce factor matrices.
    #[error("decomposition error: {0}")]
    Decomposition(String),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
