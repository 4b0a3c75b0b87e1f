//! Compressed secp256r1 point representation.

use crate::error::{CryptoError, CryptoResult};
use p256::ecdsa::VerifyingKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Size of a compressed point encoding.
pub const ECPOINT_SIZE: usize = 33;

/// A secp256r1 public key in compressed wire form.
///
/// Either 33 bytes with an `0x02`/`0x03` prefix, or the single byte `0x00`
/// for the point at infinity.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ECPoint {
    bytes: Vec<u8>,
}

impl ECPoint {
    /// The point at infinity.
    pub fn infinity() -> Self {
        Self { bytes: vec![0x00] }
    }

    /// Decodes a point, validating that it lies on the curve.
    pub fn from_bytes(data: &[u8]) -> CryptoResult<Self> {
        if data == [0x00] {
            return Ok(Self::infinity());
        }
        if data.len() != ECPOINT_SIZE {
            return Err(CryptoError::invalid_point(format!(
                "expected {ECPOINT_SIZE} bytes, got {}",
                data.len()
            )));
        }
        if data[0] != 0x02 && data[0] != 0x03 {
            return Err(CryptoError::invalid_point(format!(
                "unknown compression prefix {:#04x}",
                data[0]
            )));
        }
        VerifyingKey::from_sec1_bytes(data)
            .map_err(|_| CryptoError::invalid_point("not a point on secp256r1"))?;
        Ok(Self {
            bytes: data.to_vec(),
        })
    }

    pub fn is_infinity(&self) -> bool {
        self.bytes == [0x00]
    }

    /// The compressed encoding.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.clone()
    }
}

impl fmt::Display for ECPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.bytes))
    }
}

impl fmt::Debug for ECPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ECPoint({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compressed form of the secp256r1 generator point.
    const GENERATOR: &str = "036b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296";

    #[test]
    fn decodes_a_valid_point() {
        let bytes = hex::decode(GENERATOR).unwrap();
        let point = ECPoint::from_bytes(&bytes).unwrap();
        assert!(!point.is_infinity());
        assert_eq!(point.as_bytes(), &bytes[..]);
    }

    #[test]
    fn rejects_bad_prefix_and_length() {
        assert!(ECPoint::from_bytes(&[0x04; 33]).is_err());
        assert!(ECPoint::from_bytes(&[0x02; 20]).is_err());
    }

    #[test]
    fn rejects_coordinates_off_the_curve() {
        let mut bytes = hex::decode(GENERATOR).unwrap();
        bytes[32] ^= 0xFF;
        assert!(ECPoint::from_bytes(&bytes).is_err());
    }

    #[test]
    fn infinity_is_a_single_zero_byte() {
        let point = ECPoint::from_bytes(&[0x00]).unwrap();
        assert!(point.is_infinity());
        assert_eq!(point.as_bytes(), &[0x00]);
    }
}
