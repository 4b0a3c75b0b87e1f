//! Fluent bytecode emitter.
//!
//! Used by tests and embedders to assemble scripts, and by the VM itself
//! to derive signature redeem scripts. Pushes always use the shortest
//! encoding, which is what compilers emit.

use crate::op_code::OpCode;
use crate::stack_item::bigint_to_bytes;
use neo2_core::UInt160;
use neo2_cryptography::{hash160, ECPoint};
use num_bigint::BigInt;

/// Incrementally builds a byte script.
#[derive(Default)]
pub struct ScriptBuilder {
    bytes: Vec<u8>,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Appends a bare opcode.
    pub fn emit(&mut self, op: OpCode) -> &mut Self {
        self.bytes.push(op.byte());
        self
    }

    /// Appends an integer push using the shortest form.
    pub fn emit_push_int(&mut self, value: i64) -> &mut Self {
        match value {
            -1 => self.emit(OpCode::PUSHM1),
            0 => self.emit(OpCode::PUSH0),
            1..=16 => {
                self.bytes.push(OpCode::PUSH1.byte() + (value as u8 - 1));
                self
            }
            _ => self.emit_push_bigint(&BigInt::from(value)),
        }
    }

    /// Appends an arbitrary-precision integer push.
    pub fn emit_push_bigint(&mut self, value: &BigInt) -> &mut Self {
        let bytes = bigint_to_bytes(value);
        self.emit_push_bytes(&bytes)
    }

    pub fn emit_push_bool(&mut self, value: bool) -> &mut Self {
        if value {
            self.emit(OpCode::PUSH1)
        } else {
            self.emit(OpCode::PUSH0)
        }
    }

    /// Appends a data push using the shortest form.
    pub fn emit_push_bytes(&mut self, data: &[u8]) -> &mut Self {
        match data.len() {
            0 => {
                self.emit(OpCode::PUSH0);
            }
            len @ 1..=75 => {
                self.bytes.push(len as u8);
                self.bytes.extend_from_slice(data);
            }
            len @ 76..=0xFF => {
                self.emit(OpCode::PUSHDATA1);
                self.bytes.push(len as u8);
                self.bytes.extend_from_slice(data);
            }
            len @ 0x100..=0xFFFF => {
                self.emit(OpCode::PUSHDATA2);
                self.bytes.extend_from_slice(&(len as u16).to_le_bytes());
                self.bytes.extend_from_slice(data);
            }
            len => {
                self.emit(OpCode::PUSHDATA4);
                self.bytes.extend_from_slice(&(len as u32).to_le_bytes());
                self.bytes.extend_from_slice(data);
            }
        }
        self
    }

    /// Appends a jump-family opcode with its 16-bit offset, relative to
    /// the opcode byte.
    pub fn emit_jump(&mut self, op: OpCode, offset: i16) -> &mut Self {
        self.emit(op);
        self.bytes.extend_from_slice(&offset.to_le_bytes());
        self
    }

    /// Appends APPCALL or TAILCALL with a static target.
    pub fn emit_appcall(&mut self, hash: &UInt160, tail: bool) -> &mut Self {
        self.emit(if tail {
            OpCode::TAILCALL
        } else {
            OpCode::APPCALL
        });
        self.bytes.extend_from_slice(hash.as_bytes());
        self
    }

    /// Appends a SYSCALL by name.
    pub fn emit_syscall(&mut self, name: &str) -> &mut Self {
        self.emit(OpCode::SYSCALL);
        self.bytes.push(name.len() as u8);
        self.bytes.extend_from_slice(name.as_bytes());
        self
    }
}

/// The single-signature redeem script of a public key, and the reduction
/// CheckWitness applies to 33-byte arguments.
pub fn signature_redeem_script(point: &ECPoint) -> Vec<u8> {
    let mut builder = ScriptBuilder::new();
    builder.emit_push_bytes(point.as_bytes()).emit(OpCode::CHECKSIG);
    builder.into_bytes()
}

/// Script hash of the single-signature redeem script.
pub fn signature_script_hash(point: &ECPoint) -> UInt160 {
    UInt160::new(hash160(&signature_redeem_script(point)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_int_pushes_use_single_bytes() {
        let mut builder = ScriptBuilder::new();
        builder
            .emit_push_int(-1)
            .emit_push_int(0)
            .emit_push_int(1)
            .emit_push_int(16);
        assert_eq!(builder.into_bytes(), vec![0x4F, 0x00, 0x51, 0x60]);
    }

    #[test]
    fn larger_ints_become_byte_pushes() {
        let mut builder = ScriptBuilder::new();
        builder.emit_push_int(0x1234);
        // Two bytes of payload behind a PUSHBYTES2.
        assert_eq!(builder.into_bytes(), vec![0x02, 0x34, 0x12]);
    }

    #[test]
    fn data_pushes_pick_the_shortest_prefix() {
        let mut builder = ScriptBuilder::new();
        builder.emit_push_bytes(&[0xAB; 75]);
        assert_eq!(builder.len(), 76);

        let mut builder = ScriptBuilder::new();
        builder.emit_push_bytes(&[0xAB; 76]);
        let bytes = builder.into_bytes();
        assert_eq!(bytes[0], OpCode::PUSHDATA1.byte());
        assert_eq!(bytes[1], 76);

        let mut builder = ScriptBuilder::new();
        builder.emit_push_bytes(&[0xAB; 300]);
        let bytes = builder.into_bytes();
        assert_eq!(bytes[0], OpCode::PUSHDATA2.byte());
        assert_eq!(u16::from_le_bytes([bytes[1], bytes[2]]), 300);
    }

    #[test]
    fn syscall_emits_length_prefixed_name() {
        let mut builder = ScriptBuilder::new();
        builder.emit_syscall("Neo.Runtime.Log");
        let bytes = builder.into_bytes();
        assert_eq!(bytes[0], OpCode::SYSCALL.byte());
        assert_eq!(bytes[1] as usize, "Neo.Runtime.Log".len());
        assert_eq!(&bytes[2..], b"Neo.Runtime.Log");
    }

    #[test]
    fn redeem_script_shape() {
        let point = ECPoint::infinity();
        let script = signature_redeem_script(&point);
        assert_eq!(script, vec![0x01, 0x00, OpCode::CHECKSIG.byte()]);
    }
}
