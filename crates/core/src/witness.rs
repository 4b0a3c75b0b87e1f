//! Witness: the invocation/verification script pair attached to signed data.

use neo2_io::{BinaryReader, BinaryWriter, IoResult, Serializable};
use serde::{Deserialize, Serialize};

const MAX_WITNESS_SCRIPT: usize = 65_536;

/// A signature container: the invocation script pushes signatures, the
/// verification script consumes them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Witness {
    pub invocation_script: Vec<u8>,
    pub verification_script: Vec<u8>,
}

impl Serializable for Witness {
    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_var_bytes(&self.invocation_script);
        writer.write_var_bytes(&self.verification_script);
        Ok(())
    }

    fn deserialize(reader: &mut BinaryReader<'_>) -> IoResult<Self> {
        Ok(Self {
            invocation_script: reader.read_var_bytes(MAX_WITNESS_SCRIPT)?,
            verification_script: reader.read_var_bytes(MAX_WITNESS_SCRIPT)?,
        })
    }
}
