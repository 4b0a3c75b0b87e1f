//! 160-bit hash, the script-hash type.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The length of a UInt160 in bytes.
pub const UINT160_SIZE: usize = 20;

/// A 160-bit hash stored little-endian, displayed big-endian as the chain
/// conventionally prints script hashes.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UInt160([u8; UINT160_SIZE]);

impl UInt160 {
    /// Wraps raw little-endian bytes.
    pub const fn new(bytes: [u8; UINT160_SIZE]) -> Self {
        Self(bytes)
    }

    /// The all-zero hash.
    pub const fn zero() -> Self {
        Self([0; UINT160_SIZE])
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// Builds from a little-endian slice of exactly 20 bytes.
    pub fn from_slice(data: &[u8]) -> CoreResult<Self> {
        let bytes: [u8; UINT160_SIZE] = data
            .try_into()
            .map_err(|_| CoreError::invalid_length("UInt160", UINT160_SIZE, data.len()))?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; UINT160_SIZE] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

impl From<[u8; UINT160_SIZE]> for UInt160 {
    fn from(bytes: [u8; UINT160_SIZE]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for UInt160 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut reversed = self.0;
        reversed.reverse();
        write!(f, "0x{}", hex::encode(reversed))
    }
}

impl fmt::Debug for UInt160 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UInt160({self})")
    }
}

impl FromStr for UInt160 {
    type Err = CoreError;

    /// Parses the display form: big-endian hex, optional `0x` prefix.
    fn from_str(s: &str) -> CoreResult<Self> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let mut bytes = hex::decode(s)
            .map_err(|e| CoreError::invalid_format("UInt160", e.to_string()))?;
        bytes.reverse();
        Self::from_slice(&bytes)
    }
}
