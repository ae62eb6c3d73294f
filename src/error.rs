//! Error types for montessori-mult.

use thiserror::Error;

/// Result type alias for montessori-mult operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for montessori-mult.
#[derive(Error, Debug)]
pub enum Error {
    /// The rejection-sampling loop ran out of attempts without finding a
    /// scenario that exchanges at least once and fits its digit width.
    #[error("no valid {kind} scenario after {attempts} attempts")]
    GenerationExhausted { kind: &'static str, attempts: u32 },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
