//! Block headers and blocks.

use crate::error::CoreResult;
use crate::transaction::Transaction;
use crate::uint160::UInt160;
use crate::uint256::UInt256;
use crate::witness::Witness;
use neo2_cryptography::hash256;
use neo2_io::serializable::{deserialize_vec, serialize_vec};
use neo2_io::{BinaryReader, BinaryWriter, IoError, IoResult, Serializable};
use serde::{Deserialize, Serialize};

const MAX_TRANSACTIONS_PER_BLOCK: usize = 65_536;

/// A block header. The unsigned serialization is the consensus-signed
/// message and the preimage of the block hash.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub version: u32,
    pub prev_hash: UInt256,
    pub merkle_root: UInt256,
    pub timestamp: u32,
    pub index: u32,
    pub consensus_data: u64,
    pub next_consensus: UInt160,
    pub witness: Witness,
}

impl Header {
    /// Writes everything except the witness.
    pub fn serialize_unsigned(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_u32(self.version);
        writer.write_bytes(self.prev_hash.as_bytes());
        writer.write_bytes(self.merkle_root.as_bytes());
        writer.write_u32(self.timestamp);
        writer.write_u32(self.index);
        writer.write_u64(self.consensus_data);
        writer.write_bytes(self.next_consensus.as_bytes());
        Ok(())
    }

    /// The consensus-signed message: the unsigned serialization.
    pub fn message(&self) -> CoreResult<Vec<u8>> {
        let mut writer = BinaryWriter::new();
        self.serialize_unsigned(&mut writer)?;
        Ok(writer.into_bytes())
    }

    /// The block id: double SHA-256 of the signed message.
    pub fn hash(&self) -> CoreResult<UInt256> {
        Ok(UInt256::new(hash256(&self.message()?)))
    }
}

impl Serializable for Header {
    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        self.serialize_unsigned(writer)?;
        // Single witness preceded by a fixed 0x01 count byte, a legacy quirk.
        writer.write_u8(1);
        Serializable::serialize(&self.witness, writer)
    }

    fn deserialize(reader: &mut BinaryReader<'_>) -> IoResult<Self> {
        let version = reader.read_u32()?;
        let prev_hash = UInt256::new(reader.read_array::<32>()?);
        let merkle_root = UInt256::new(reader.read_array::<32>()?);
        let timestamp = reader.read_u32()?;
        let index = reader.read_u32()?;
        let consensus_data = reader.read_u64()?;
        let next_consensus = UInt160::new(reader.read_array::<20>()?);
        let count = reader.read_u8()?;
        if count != 1 {
            return Err(IoError::invalid_data(
                "reading header witness",
                format!("expected witness count 1, got {count}"),
            ));
        }
        let witness = <Witness as Serializable>::deserialize(reader)?;
        Ok(Self {
            version,
            prev_hash,
            merkle_root,
            timestamp,
            index,
            consensus_data,
            next_consensus,
            witness,
        })
    }
}

/// A full block: a header plus its transactions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub header: Header,
    pub transactions: Vec<Transaction>,
}

impl Block {
    pub fn hash(&self) -> CoreResult<UInt256> {
        self.header.hash()
    }

    pub fn index(&self) -> u32 {
        self.header.index
    }
}

impl Serializable for Block {
    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        self.header.serialize_unsigned(writer)?;
        writer.write_u8(1);
        Serializable::serialize(&self.header.witness, writer)?;
        serialize_vec(&self.transactions, writer)
    }

    fn deserialize(reader: &mut BinaryReader<'_>) -> IoResult<Self> {
        let header = <Header as Serializable>::deserialize(reader)?;
        let transactions = deserialize_vec(reader, MAX_TRANSACTIONS_PER_BLOCK)?;
        Ok(Self {
            header,
            transactions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header() -> Header {
        Header {
            version: 0,
            prev_hash: UInt256::new([0x01; 32]),
            merkle_root: UInt256::new([0x02; 32]),
            timestamp: 1_468_595_301,
            index: 42,
            consensus_data: 0xdeadbeef,
            next_consensus: UInt160::new([0x03; 20]),
            witness: Witness::default(),
        }
    }

    #[test]
    fn header_round_trips() {
        let header = sample_header();
        let bytes = header.to_bytes().unwrap();
        assert_eq!(Header::from_bytes(&bytes).unwrap(), header);
    }

    #[test]
    fn hash_ignores_witness() {
        let mut header = sample_header();
        let before = header.hash().unwrap();
        header.witness.invocation_script = vec![0xFF];
        assert_eq!(header.hash().unwrap(), before);
    }

    #[test]
    fn block_hash_is_header_hash() {
        let block = Block {
            header: sample_header(),
            transactions: Vec::new(),
        };
        assert_eq!(block.hash().unwrap(), block.header.hash().unwrap());
    }
}
