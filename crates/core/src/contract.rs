//! Deployed contract state and the contract-parameter tree.

use crate::error::{CoreError, CoreResult};
use crate::uint160::UInt160;
use crate::uint256::UInt256;
use bitflags::bitflags;
use neo2_cryptography::{hash160, ECPoint};
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Capability flags a contract declares at deployment.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct ContractPropertyState: u8 {
        const HAS_STORAGE = 0x01;
        const HAS_DYNAMIC_INVOKE = 0x02;
        const PAYABLE = 0x04;
    }
}

impl Serialize for ContractPropertyState {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.bits())
    }
}

impl<'de> Deserialize<'de> for ContractPropertyState {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bits = u8::deserialize(deserializer)?;
        Ok(Self::from_bits_truncate(bits))
    }
}

/// Parameter kind discriminants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ContractParameterType {
    Signature = 0x00,
    Boolean = 0x01,
    Integer = 0x02,
    Hash160 = 0x03,
    Hash256 = 0x04,
    ByteArray = 0x05,
    PublicKey = 0x06,
    String = 0x07,
    Array = 0x10,
    InteropInterface = 0xf0,
    Void = 0xff,
}

impl TryFrom<u8> for ContractParameterType {
    type Error = CoreError;

    fn try_from(value: u8) -> CoreResult<Self> {
        match value {
            0x00 => Ok(Self::Signature),
            0x01 => Ok(Self::Boolean),
            0x02 => Ok(Self::Integer),
            0x03 => Ok(Self::Hash160),
            0x04 => Ok(Self::Hash256),
            0x05 => Ok(Self::ByteArray),
            0x06 => Ok(Self::PublicKey),
            0x07 => Ok(Self::String),
            0x10 => Ok(Self::Array),
            0xf0 => Ok(Self::InteropInterface),
            0xff => Ok(Self::Void),
            other => Err(CoreError::unknown_enum("ContractParameterType", other)),
        }
    }
}

/// A typed value tree, the payload shape of emitted notifications.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractParameter {
    Signature(Vec<u8>),
    Boolean(bool),
    Integer(BigInt),
    Hash160(UInt160),
    Hash256(UInt256),
    ByteArray(Vec<u8>),
    PublicKey(ECPoint),
    String(String),
    Array(Vec<ContractParameter>),
    InteropInterface(String),
    Void,
}

impl ContractParameter {
    pub fn parameter_type(&self) -> ContractParameterType {
        match self {
            Self::Signature(_) => ContractParameterType::Signature,
            Self::Boolean(_) => ContractParameterType::Boolean,
            Self::Integer(_) => ContractParameterType::Integer,
            Self::Hash160(_) => ContractParameterType::Hash160,
            Self::Hash256(_) => ContractParameterType::Hash256,
            Self::ByteArray(_) => ContractParameterType::ByteArray,
            Self::PublicKey(_) => ContractParameterType::PublicKey,
            Self::String(_) => ContractParameterType::String,
            Self::Array(_) => ContractParameterType::Array,
            Self::InteropInterface(_) => ContractParameterType::InteropInterface,
            Self::Void => ContractParameterType::Void,
        }
    }
}

/// State of a deployed contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    pub script: Vec<u8>,
    pub parameter_list: Vec<ContractParameterType>,
    pub return_type: ContractParameterType,
    pub properties: ContractPropertyState,
    pub name: String,
    pub code_version: String,
    pub author: String,
    pub email: String,
    pub description: String,
}

impl Contract {
    /// The contract id: Hash160 of the script.
    pub fn script_hash(&self) -> UInt160 {
        UInt160::new(hash160(&self.script))
    }

    pub fn has_storage(&self) -> bool {
        self.properties.contains(ContractPropertyState::HAS_STORAGE)
    }

    pub fn has_dynamic_invoke(&self) -> bool {
        self.properties
            .contains(ContractPropertyState::HAS_DYNAMIC_INVOKE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_hash_is_hash160_of_script() {
        let contract = Contract {
            script: vec![0x51, 0x52, 0x93],
            parameter_list: vec![],
            return_type: ContractParameterType::Void,
            properties: ContractPropertyState::HAS_STORAGE,
            name: "adder".into(),
            code_version: "1.0".into(),
            author: String::new(),
            email: String::new(),
            description: String::new(),
        };
        assert_eq!(
            contract.script_hash(),
            UInt160::new(hash160(&[0x51, 0x52, 0x93]))
        );
        assert!(contract.has_storage());
        assert!(!contract.has_dynamic_invoke());
    }

    #[test]
    fn parameter_type_projection() {
        assert_eq!(
            ContractParameter::Integer(BigInt::from(7)).parameter_type(),
            ContractParameterType::Integer
        );
        assert_eq!(
            ContractParameter::Void.parameter_type(),
            ContractParameterType::Void
        );
    }
}
