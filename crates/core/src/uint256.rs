//! 256-bit hash, the block/transaction/asset id type.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The length of a UInt256 in bytes.
pub const UINT256_SIZE: usize = 32;

/// A 256-bit hash stored little-endian, displayed big-endian.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UInt256([u8; UINT256_SIZE]);

impl UInt256 {
    /// Wraps raw little-endian bytes.
    pub const fn new(bytes: [u8; UINT256_SIZE]) -> Self {
        Self(bytes)
    }

    /// The all-zero hash.
    pub const fn zero() -> Self {
        Self([0; UINT256_SIZE])
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// Builds from a little-endian slice of exactly 32 bytes.
    pub fn from_slice(data: &[u8]) -> CoreResult<Self> {
        let bytes: [u8; UINT256_SIZE] = data
            .try_into()
            .map_err(|_| CoreError::invalid_length("UInt256", UINT256_SIZE, data.len()))?;
        Ok(Self(bytes))
    }

    /// Builds from a big-endian (display order) slice, as scripts push
    /// hashes on the stack.
    pub fn from_reversed_slice(data: &[u8]) -> CoreResult<Self> {
        let mut bytes: [u8; UINT256_SIZE] = data
            .try_into()
            .map_err(|_| CoreError::invalid_length("UInt256", UINT256_SIZE, data.len()))?;
        bytes.reverse();
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; UINT256_SIZE] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

impl From<[u8; UINT256_SIZE]> for UInt256 {
    fn from(bytes: [u8; UINT256_SIZE]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for UInt256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut reversed = self.0;
        reversed.reverse();
        write!(f, "0x{}", hex::encode(reversed))
    }
}

impl fmt::Debug for UInt256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UInt256({self})")
    }
}

impl FromStr for UInt256 {
    type Err = CoreError;

    /// Parses the display form: big-endian hex, optional `0x` prefix.
    fn from_str(s: &str) -> CoreResult<Self> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let mut bytes = hex::decode(s)
            .map_err(|e| CoreError::invalid_format("UInt256", e.to_string()))?;
        bytes.reverse();
        Self::from_slice(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversed_slice_matches_display_order() {
        let display = "9b7cffdaa674beae0f930ebe6085af9093e5fe56b34a5c220ccdcf6efc336fc5";
        let be_bytes = hex::decode(display).unwrap();
        let value = UInt256::from_reversed_slice(&be_bytes).unwrap();
        assert_eq!(value.to_string(), format!("0x{display}"));
    }

    #[test]
    fn parse_round_trips_display() {
        let value = UInt256::new([0x5C; 32]);
        let parsed: UInt256 = value.to_string().parse().unwrap();
        assert_eq!(parsed, value);
    }
}
