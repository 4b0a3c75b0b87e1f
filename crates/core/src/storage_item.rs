//! Contract storage entries.

use crate::uint160::UInt160;
use serde::{Deserialize, Serialize};

/// Storage key: the owning contract's script hash plus the raw key bytes.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StorageKey {
    pub script_hash: UInt160,
    pub key: Vec<u8>,
}

impl StorageKey {
    pub fn new(script_hash: UInt160, key: Vec<u8>) -> Self {
        Self { script_hash, key }
    }
}

/// A stored value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageItem {
    pub value: Vec<u8>,
}

impl StorageItem {
    pub fn new(value: Vec<u8>) -> Self {
        Self { value }
    }
}
