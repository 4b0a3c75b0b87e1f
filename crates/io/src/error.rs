//! Error types for binary serialization.

use thiserror::Error;

/// Errors produced by the binary reader and writer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IoError {
    /// Tried to read past the end of the input.
    #[error("unexpected end of stream: needed {needed} more byte(s) while {context}")]
    EndOfStream { needed: usize, context: &'static str },

    /// A length prefix or enum discriminant did not decode to anything valid.
    #[error("invalid data while {context}: {reason}")]
    InvalidData { context: &'static str, reason: String },

    /// A var-int exceeded the caller-supplied maximum.
    #[error("var-int {value} exceeds maximum {max}")]
    VarIntOutOfRange { value: u64, max: u64 },
}

impl IoError {
    pub fn invalid_data<S: Into<String>>(context: &'static str, reason: S) -> Self {
        Self::InvalidData {
            context,
            reason: reason.into(),
        }
    }
}

/// Result type for I/O operations.
pub type IoResult<T> = std::result::Result<T, IoError>;
