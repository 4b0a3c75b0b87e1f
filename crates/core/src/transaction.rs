//! The legacy transaction model and its canonical serialization.
//!
//! The unsigned serialization (everything but the witnesses) doubles as
//! the signed message for CHECKSIG/CHECKMULTISIG and as the preimage of
//! the transaction hash.

use crate::error::{CoreError, CoreResult};
use crate::fixed8::Fixed8;
use crate::uint160::UInt160;
use crate::uint256::UInt256;
use crate::witness::Witness;
use neo2_cryptography::hash256;
use neo2_io::serializable::{deserialize_vec, serialize_vec};
use neo2_io::{BinaryReader, BinaryWriter, IoError, IoResult, Serializable};
use serde::{Deserialize, Serialize};

const MAX_TRANSACTION_ATTRIBUTES: usize = 16;
const MAX_TRANSACTION_ITEMS: usize = 65_536;

/// Transaction kind discriminants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TransactionType {
    Miner = 0x00,
    Issue = 0x01,
    Claim = 0x02,
    Enrollment = 0x20,
    Register = 0x40,
    Contract = 0x80,
    Publish = 0xd0,
    Invocation = 0xd1,
}

impl TryFrom<u8> for TransactionType {
    type Error = CoreError;

    fn try_from(value: u8) -> CoreResult<Self> {
        match value {
            0x00 => Ok(Self::Miner),
            0x01 => Ok(Self::Issue),
            0x02 => Ok(Self::Claim),
            0x20 => Ok(Self::Enrollment),
            0x40 => Ok(Self::Register),
            0x80 => Ok(Self::Contract),
            0xd0 => Ok(Self::Publish),
            0xd1 => Ok(Self::Invocation),
            other => Err(CoreError::unknown_enum("TransactionType", other)),
        }
    }
}

/// Attribute kind discriminants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum AttributeUsage {
    ContractHash = 0x00,
    Ecdh02 = 0x02,
    Ecdh03 = 0x03,
    Script = 0x20,
    Vote = 0x30,
    DescriptionUrl = 0x81,
    Description = 0x90,
    Remark = 0xf0,
}

impl TryFrom<u8> for AttributeUsage {
    type Error = CoreError;

    fn try_from(value: u8) -> CoreResult<Self> {
        match value {
            0x00 => Ok(Self::ContractHash),
            0x02 => Ok(Self::Ecdh02),
            0x03 => Ok(Self::Ecdh03),
            0x20 => Ok(Self::Script),
            0x30 => Ok(Self::Vote),
            0x81 => Ok(Self::DescriptionUrl),
            0x90 => Ok(Self::Description),
            0xf0 => Ok(Self::Remark),
            other => Err(CoreError::unknown_enum("AttributeUsage", other)),
        }
    }
}

/// A typed attribute blob. The wire encoding of the data depends on the
/// usage byte, a quirk of the legacy format.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionAttribute {
    pub usage: AttributeUsage,
    pub data: Vec<u8>,
}

impl Serializable for TransactionAttribute {
    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_u8(self.usage as u8);
        match self.usage {
            AttributeUsage::ContractHash
            | AttributeUsage::Vote
            | AttributeUsage::Ecdh02
            | AttributeUsage::Ecdh03 => {
                if self.data.len() != 32 {
                    return Err(IoError::invalid_data(
                        "serializing attribute",
                        format!("usage {:?} requires 32 bytes", self.usage),
                    ));
                }
                writer.write_bytes(&self.data);
            }
            AttributeUsage::Script => {
                if self.data.len() != 20 {
                    return Err(IoError::invalid_data(
                        "serializing attribute",
                        "Script usage requires 20 bytes",
                    ));
                }
                writer.write_bytes(&self.data);
            }
            AttributeUsage::DescriptionUrl => {
                writer.write_u8(self.data.len() as u8);
                writer.write_bytes(&self.data);
            }
            AttributeUsage::Description | AttributeUsage::Remark => {
                writer.write_var_bytes(&self.data);
            }
        }
        Ok(())
    }

    fn deserialize(reader: &mut BinaryReader<'_>) -> IoResult<Self> {
        let usage_byte = reader.read_u8()?;
        let usage = AttributeUsage::try_from(usage_byte)
            .map_err(|e| IoError::invalid_data("reading attribute usage", e.to_string()))?;
        let data = match usage {
            AttributeUsage::ContractHash
            | AttributeUsage::Vote
            | AttributeUsage::Ecdh02
            | AttributeUsage::Ecdh03 => reader.read_bytes(32)?,
            AttributeUsage::Script => reader.read_bytes(20)?,
            AttributeUsage::DescriptionUrl => {
                let len = reader.read_u8()? as usize;
                reader.read_bytes(len)?
            }
            AttributeUsage::Description | AttributeUsage::Remark => {
                reader.read_var_bytes(65_535)?
            }
        };
        Ok(Self { usage, data })
    }
}

/// Reference to an output of a previous transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Input {
    pub prev_hash: UInt256,
    pub prev_index: u16,
}

impl Serializable for Input {
    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_bytes(self.prev_hash.as_bytes());
        writer.write_u16(self.prev_index);
        Ok(())
    }

    fn deserialize(reader: &mut BinaryReader<'_>) -> IoResult<Self> {
        let hash = reader.read_array::<32>()?;
        Ok(Self {
            prev_hash: UInt256::new(hash),
            prev_index: reader.read_u16()?,
        })
    }
}

/// A value locked to a script hash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    pub asset_id: UInt256,
    pub value: Fixed8,
    pub script_hash: UInt160,
}

impl Serializable for Output {
    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_bytes(self.asset_id.as_bytes());
        writer.write_i64(self.value.raw());
        writer.write_bytes(self.script_hash.as_bytes());
        Ok(())
    }

    fn deserialize(reader: &mut BinaryReader<'_>) -> IoResult<Self> {
        Ok(Self {
            asset_id: UInt256::new(reader.read_array::<32>()?),
            value: Fixed8::from_raw(reader.read_i64()?),
            script_hash: UInt160::new(reader.read_array::<20>()?),
        })
    }
}

/// A legacy transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub tx_type: TransactionType,
    pub version: u8,
    pub attributes: Vec<TransactionAttribute>,
    pub inputs: Vec<Input>,
    pub outputs: Vec<Output>,
    pub witnesses: Vec<Witness>,
}

impl Transaction {
    /// A bare transaction of the given type with no attachments.
    pub fn new(tx_type: TransactionType) -> Self {
        Self {
            tx_type,
            version: 0,
            attributes: Vec::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            witnesses: Vec::new(),
        }
    }

    /// Writes everything except the witnesses.
    pub fn serialize_unsigned(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_u8(self.tx_type as u8);
        writer.write_u8(self.version);
        serialize_vec(&self.attributes, writer)?;
        serialize_vec(&self.inputs, writer)?;
        serialize_vec(&self.outputs, writer)?;
        Ok(())
    }

    /// The canonical signed message: the unsigned serialization.
    pub fn message(&self) -> CoreResult<Vec<u8>> {
        let mut writer = BinaryWriter::new();
        self.serialize_unsigned(&mut writer)?;
        Ok(writer.into_bytes())
    }

    /// The transaction id: double SHA-256 of the signed message.
    pub fn hash(&self) -> CoreResult<UInt256> {
        Ok(UInt256::new(hash256(&self.message()?)))
    }
}

impl Serializable for Transaction {
    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        self.serialize_unsigned(writer)?;
        serialize_vec(&self.witnesses, writer)?;
        Ok(())
    }

    fn deserialize(reader: &mut BinaryReader<'_>) -> IoResult<Self> {
        let type_byte = reader.read_u8()?;
        let tx_type = TransactionType::try_from(type_byte)
            .map_err(|e| IoError::invalid_data("reading transaction type", e.to_string()))?;
        let version = reader.read_u8()?;
        let attributes = deserialize_vec(reader, MAX_TRANSACTION_ATTRIBUTES)?;
        let inputs = deserialize_vec(reader, MAX_TRANSACTION_ITEMS)?;
        let outputs = deserialize_vec(reader, MAX_TRANSACTION_ITEMS)?;
        let witnesses = deserialize_vec(reader, MAX_TRANSACTION_ITEMS)?;
        Ok(Self {
            tx_type,
            version,
            attributes,
            inputs,
            outputs,
            witnesses,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_transaction() -> Transaction {
        let mut tx = Transaction::new(TransactionType::Invocation);
        tx.attributes.push(TransactionAttribute {
            usage: AttributeUsage::Script,
            data: vec![0x11; 20],
        });
        tx.inputs.push(Input {
            prev_hash: UInt256::new([0x22; 32]),
            prev_index: 1,
        });
        tx.outputs.push(Output {
            asset_id: UInt256::new([0x33; 32]),
            value: Fixed8::from_units(5),
            script_hash: UInt160::new([0x44; 20]),
        });
        tx
    }

    #[test]
    fn serialization_round_trips() {
        let tx = sample_transaction();
        let bytes = tx.to_bytes().unwrap();
        let decoded = Transaction::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, tx);
    }

    #[test]
    fn hash_ignores_witnesses() {
        let mut tx = sample_transaction();
        let before = tx.hash().unwrap();
        tx.witnesses.push(Witness {
            invocation_script: vec![0x01],
            verification_script: vec![0x02],
        });
        assert_eq!(tx.hash().unwrap(), before);
    }

    #[test]
    fn message_starts_with_type_and_version() {
        let tx = sample_transaction();
        let message = tx.message().unwrap();
        assert_eq!(message[0], TransactionType::Invocation as u8);
        assert_eq!(message[1], 0);
    }

    #[test]
    fn serde_json_round_trips() {
        let tx = sample_transaction();
        let json = serde_json::to_string(&tx).unwrap();
        let decoded: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, tx);
        assert_eq!(decoded.hash().unwrap(), tx.hash().unwrap());
    }
}
