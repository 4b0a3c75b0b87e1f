//! Error type shared by the core entity model.

use thiserror::Error;

/// Errors raised while constructing or encoding core values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A byte slice had the wrong length for a fixed-size value.
    #[error("invalid length for {kind}: expected {expected} bytes, got {actual}")]
    InvalidLength {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A discriminant byte did not map to a known enum value.
    #[error("unknown {kind} value {value:#04x}")]
    UnknownEnumValue { kind: &'static str, value: u8 },

    /// A textual value failed to parse.
    #[error("invalid {kind}: {reason}")]
    InvalidFormat { kind: &'static str, reason: String },

    /// Serialization failure bubbled up from the io layer.
    #[error(transparent)]
    Io(#[from] neo2_io::IoError),

    /// Cryptographic failure bubbled up from the cryptography layer.
    #[error(transparent)]
    Crypto(#[from] neo2_cryptography::CryptoError),
}

impl CoreError {
    pub fn invalid_length(kind: &'static str, expected: usize, actual: usize) -> Self {
        Self::InvalidLength {
            kind,
            expected,
            actual,
        }
    }

    pub fn unknown_enum(kind: &'static str, value: u8) -> Self {
        Self::UnknownEnumValue { kind, value }
    }

    pub fn invalid_format<S: Into<String>>(kind: &'static str, reason: S) -> Self {
        Self::InvalidFormat {
            kind,
            reason: reason.into(),
        }
    }
}

/// Result type for core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;
