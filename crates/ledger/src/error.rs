//! Error types for ledger access.

use thiserror::Error;

/// Errors surfaced by the state facade.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Lookup of a key that must exist failed.
    #[error("{collection} entry not found: {key}")]
    NotFound { collection: &'static str, key: String },

    /// `add` of a key that is already present.
    #[error("{collection} entry already exists: {key}")]
    AlreadyExists { collection: &'static str, key: String },

    /// `update` of a key that is not present.
    #[error("{collection} entry missing for update: {key}")]
    MissingForUpdate { collection: &'static str, key: String },

    /// The view rejects writes, e.g. under a verification trigger.
    #[error("ledger view is read-only")]
    ReadOnly,
}

impl LedgerError {
    pub fn not_found(collection: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            collection,
            key: key.to_string(),
        }
    }

    pub fn already_exists(collection: &'static str, key: impl ToString) -> Self {
        Self::AlreadyExists {
            collection,
            key: key.to_string(),
        }
    }

    pub fn missing_for_update(collection: &'static str, key: impl ToString) -> Self {
        Self::MissingForUpdate {
            collection,
            key: key.to_string(),
        }
    }
}

/// Result type for ledger operations.
pub type LedgerResult<T> = std::result::Result<T, LedgerError>;
