//! The serialization contract implemented by wire-format types.

use crate::binary_reader::BinaryReader;
use crate::binary_writer::BinaryWriter;
use crate::error::IoResult;

/// A type with a canonical binary encoding.
pub trait Serializable: Sized {
    /// Writes the canonical encoding of `self`.
    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()>;

    /// Reads a value from its canonical encoding.
    fn deserialize(reader: &mut BinaryReader<'_>) -> IoResult<Self>;

    /// Convenience: encodes into a fresh byte vector.
    fn to_bytes(&self) -> IoResult<Vec<u8>> {
        let mut writer = BinaryWriter::new();
        self.serialize(&mut writer)?;
        Ok(writer.into_bytes())
    }

    /// Convenience: decodes from a byte slice, ignoring trailing data.
    fn from_bytes(data: &[u8]) -> IoResult<Self> {
        let mut reader = BinaryReader::new(data);
        Self::deserialize(&mut reader)
    }
}

/// Writes a var-int count followed by each element.
pub fn serialize_vec<T: Serializable>(items: &[T], writer: &mut BinaryWriter) -> IoResult<()> {
    writer.write_var_int(items.len() as u64);
    for item in items {
        item.serialize(writer)?;
    }
    Ok(())
}

/// Reads a var-int count (bounded by `max`) followed by each element.
pub fn deserialize_vec<T: Serializable>(
    reader: &mut BinaryReader<'_>,
    max: usize,
) -> IoResult<Vec<T>> {
    let count = reader.read_var_int(max as u64)? as usize;
    let mut items = Vec::with_capacity(count.min(1024));
    for _ in 0..count {
        items.push(T::deserialize(reader)?);
    }
    Ok(items)
}
