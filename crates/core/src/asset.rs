//! Registered asset state.

use crate::error::{CoreError, CoreResult};
use crate::fixed8::Fixed8;
use crate::uint160::UInt160;
use crate::uint256::UInt256;
use neo2_cryptography::ECPoint;
use serde::{Deserialize, Serialize};

/// Asset kind discriminants. The two native tokens cannot be re-created
/// by scripts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum AssetType {
    GoverningToken = 0x00,
    UtilityToken = 0x01,
    Currency = 0x08,
    CreditFlag = 0x40,
    Token = 0x60,
    DutyFlag = 0x80,
    Share = 0x90,
    Invoice = 0x98,
}

impl TryFrom<u8> for AssetType {
    type Error = CoreError;

    fn try_from(value: u8) -> CoreResult<Self> {
        match value {
            0x00 => Ok(Self::GoverningToken),
            0x01 => Ok(Self::UtilityToken),
            0x08 => Ok(Self::Currency),
            0x40 => Ok(Self::CreditFlag),
            0x60 => Ok(Self::Token),
            0x80 => Ok(Self::DutyFlag),
            0x90 => Ok(Self::Share),
            0x98 => Ok(Self::Invoice),
            other => Err(CoreError::unknown_enum("AssetType", other)),
        }
    }
}

/// State of a registered asset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Hash of the transaction that registered the asset.
    pub hash: UInt256,
    pub asset_type: AssetType,
    pub name: String,
    pub amount: Fixed8,
    pub available: Fixed8,
    pub precision: u8,
    pub owner: ECPoint,
    pub admin: UInt160,
    pub issuer: UInt160,
    /// Block height at which the registration lapses.
    pub expiration: u32,
    pub frozen: bool,
}
