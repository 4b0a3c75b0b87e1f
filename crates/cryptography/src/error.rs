//! Error types for cryptographic operations.

use thiserror::Error;

/// Errors produced by point decoding and signature verification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// A compressed EC point did not decode to a curve point.
    #[error("invalid EC point encoding: {reason}")]
    InvalidPoint { reason: String },

    /// A signature blob had the wrong shape.
    #[error("invalid signature: expected {expected} bytes, got {actual}")]
    InvalidSignatureLength { expected: usize, actual: usize },
}

impl CryptoError {
    pub fn invalid_point<S: Into<String>>(reason: S) -> Self {
        Self::InvalidPoint {
            reason: reason.into(),
        }
    }
}

/// Result type for cryptographic operations.
pub type CryptoResult<T> = std::result::Result<T, CryptoError>;
