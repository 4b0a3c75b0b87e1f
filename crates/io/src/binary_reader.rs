//! Cursor-style reader over an in-memory byte slice.

use crate::error::{IoError, IoResult};

/// Reads little-endian primitives and var-length data from a byte slice.
pub struct BinaryReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BinaryReader<'a> {
    /// Creates a reader positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current position in the underlying slice.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total length of the underlying slice.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the underlying slice is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn ensure(&self, count: usize, context: &'static str) -> IoResult<()> {
        if self.pos + count > self.data.len() {
            return Err(IoError::EndOfStream {
                needed: self.pos + count - self.data.len(),
                context,
            });
        }
        Ok(())
    }

    /// Reads `count` bytes and advances the cursor.
    pub fn read_bytes(&mut self, count: usize) -> IoResult<Vec<u8>> {
        self.ensure(count, "reading raw bytes")?;
        let out = self.data[self.pos..self.pos + count].to_vec();
        self.pos += count;
        Ok(out)
    }

    /// Reads a fixed-size array and advances the cursor.
    pub fn read_array<const N: usize>(&mut self) -> IoResult<[u8; N]> {
        self.ensure(N, "reading fixed array")?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.data[self.pos..self.pos + N]);
        self.pos += N;
        Ok(out)
    }

    pub fn read_u8(&mut self) -> IoResult<u8> {
        self.ensure(1, "reading u8")?;
        let b = self.data[self.pos];
        self.pos += 1;
        Ok(b)
    }

    pub fn read_bool(&mut self) -> IoResult<bool> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_u16(&mut self) -> IoResult<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_i16(&mut self) -> IoResult<i16> {
        Ok(i16::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> IoResult<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_u64(&mut self) -> IoResult<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    pub fn read_i64(&mut self) -> IoResult<i64> {
        Ok(i64::from_le_bytes(self.read_array()?))
    }

    /// Reads a var-int and rejects values above `max`.
    pub fn read_var_int(&mut self, max: u64) -> IoResult<u64> {
        let first = self.read_u8()?;
        let value = match first {
            0xFD => self.read_u16()? as u64,
            0xFE => self.read_u32()? as u64,
            0xFF => self.read_u64()?,
            b => b as u64,
        };
        if value > max {
            return Err(IoError::VarIntOutOfRange { value, max });
        }
        Ok(value)
    }

    /// Reads a var-int length prefix followed by that many bytes.
    pub fn read_var_bytes(&mut self, max: usize) -> IoResult<Vec<u8>> {
        let len = self.read_var_int(max as u64)? as usize;
        self.read_bytes(len)
    }

    /// Reads a var-bytes payload and decodes it as UTF-8.
    pub fn read_var_string(&mut self, max: usize) -> IoResult<String> {
        let bytes = self.read_var_bytes(max)?;
        String::from_utf8(bytes)
            .map_err(|e| IoError::invalid_data("reading var string", e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_primitives_in_order() {
        let data = [0x01, 0x02, 0x00, 0x03, 0x00, 0x00, 0x00];
        let mut reader = BinaryReader::new(&data);
        assert_eq!(reader.read_u8().unwrap(), 1);
        assert_eq!(reader.read_u16().unwrap(), 2);
        assert_eq!(reader.read_u32().unwrap(), 3);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn end_of_stream_reports_missing_bytes() {
        let mut reader = BinaryReader::new(&[0xAA]);
        let err = reader.read_u32().unwrap_err();
        assert!(matches!(err, IoError::EndOfStream { needed: 3, .. }));
    }

    #[test]
    fn var_int_prefixes() {
        let data = [0x10, 0xFD, 0x00, 0x01, 0xFE, 0x00, 0x00, 0x01, 0x00];
        let mut reader = BinaryReader::new(&data);
        assert_eq!(reader.read_var_int(u64::MAX).unwrap(), 0x10);
        assert_eq!(reader.read_var_int(u64::MAX).unwrap(), 0x100);
        assert_eq!(reader.read_var_int(u64::MAX).unwrap(), 0x10000);
    }

    #[test]
    fn var_int_above_max_is_rejected() {
        let mut reader = BinaryReader::new(&[0x20]);
        assert!(matches!(
            reader.read_var_int(0x10),
            Err(IoError::VarIntOutOfRange { value: 0x20, max: 0x10 })
        ));
    }
}
