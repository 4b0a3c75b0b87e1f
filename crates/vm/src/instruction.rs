//! Instruction decoding.
//!
//! An instruction is one opcode byte plus its immediates. Decoding
//! validates the opcode byte and bounds-checks every immediate against
//! the end of the script; it never looks at the stacks.

use crate::error::{VmError, VmResult};
use crate::limits::{MAX_ITEM_SIZE, MAX_SYSCALL_NAME};
use crate::op_code::OpCode;

/// A decoded instruction.
#[derive(Debug, Clone)]
pub struct Instruction {
    /// Position of the opcode byte in the script.
    pub pointer: usize,
    pub opcode: OpCode,
    /// Immediate payload. For PUSHDATA* this is the data (the length
    /// prefix is consumed); for SYSCALL it is the name bytes; for jumps
    /// the two offset bytes; for APPCALL/TAILCALL the 20-byte target.
    pub operand: Vec<u8>,
    /// Position of the next instruction.
    pub next: usize,
}

impl Instruction {
    /// Decodes the instruction starting at `pc`. `pc` must be inside the
    /// script.
    pub fn decode(code: &[u8], pc: usize) -> VmResult<Self> {
        let byte = code[pc];
        if !OpCode::is_defined(byte) {
            return Err(VmError::UnknownOp {
                opcode: byte,
                position: pc,
            });
        }
        let opcode = OpCode(byte);
        let mut cursor = pc + 1;

        let take = |cursor: &mut usize, count: usize| -> VmResult<Vec<u8>> {
            if *cursor + count > code.len() {
                return Err(VmError::CodeOverflow { position: pc });
            }
            let bytes = code[*cursor..*cursor + count].to_vec();
            *cursor += count;
            Ok(bytes)
        };

        let operand = if opcode.is_push_bytes() {
            take(&mut cursor, opcode.push_bytes_len())?
        } else {
            match opcode {
                OpCode::PUSHDATA1 => {
                    let len = take(&mut cursor, 1)?[0] as usize;
                    take(&mut cursor, len)?
                }
                OpCode::PUSHDATA2 => {
                    let prefix = take(&mut cursor, 2)?;
                    let len = u16::from_le_bytes([prefix[0], prefix[1]]) as usize;
                    take(&mut cursor, len)?
                }
                OpCode::PUSHDATA4 => {
                    let prefix = take(&mut cursor, 4)?;
                    let len =
                        u32::from_le_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]) as usize;
                    if len > MAX_ITEM_SIZE {
                        return Err(VmError::ItemTooLarge {
                            size: len,
                            max: MAX_ITEM_SIZE,
                        });
                    }
                    take(&mut cursor, len)?
                }
                OpCode::JMP | OpCode::JMPIF | OpCode::JMPIFNOT | OpCode::CALL => {
                    take(&mut cursor, 2)?
                }
                OpCode::APPCALL | OpCode::TAILCALL => take(&mut cursor, 20)?,
                OpCode::SYSCALL => {
                    let len = take(&mut cursor, 1)?[0] as usize;
                    if len > MAX_SYSCALL_NAME {
                        return Err(VmError::invalid_arguments(
                            "SYSCALL",
                            format!("name of {len} bytes exceeds {MAX_SYSCALL_NAME}"),
                        ));
                    }
                    take(&mut cursor, len)?
                }
                _ => Vec::new(),
            }
        };

        Ok(Self {
            pointer: pc,
            opcode,
            operand,
            next: cursor,
        })
    }

    /// The signed 16-bit jump offset, relative to the opcode byte.
    pub fn jump_offset(&self) -> VmResult<i16> {
        if self.operand.len() != 2 {
            return Err(VmError::CodeOverflow {
                position: self.pointer,
            });
        }
        Ok(i16::from_le_bytes([self.operand[0], self.operand[1]]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_plain_opcode() {
        let instr = Instruction::decode(&[0x61], 0).unwrap();
        assert_eq!(instr.opcode, OpCode::NOP);
        assert!(instr.operand.is_empty());
        assert_eq!(instr.next, 1);
    }

    #[test]
    fn decodes_pushbytes_with_immediates() {
        let instr = Instruction::decode(&[0x03, 0xAA, 0xBB, 0xCC, 0x61], 0).unwrap();
        assert_eq!(instr.operand, vec![0xAA, 0xBB, 0xCC]);
        assert_eq!(instr.next, 4);
    }

    #[test]
    fn decodes_pushdata_prefixes() {
        let instr = Instruction::decode(&[0x4C, 0x02, 0x01, 0x02], 0).unwrap();
        assert_eq!(instr.operand, vec![0x01, 0x02]);

        let instr = Instruction::decode(&[0x4D, 0x01, 0x00, 0x7F], 0).unwrap();
        assert_eq!(instr.operand, vec![0x7F]);
    }

    #[test]
    fn truncated_immediates_fault() {
        assert!(matches!(
            Instruction::decode(&[0x03, 0xAA], 0),
            Err(VmError::CodeOverflow { position: 0 })
        ));
        assert!(matches!(
            Instruction::decode(&[0x62, 0x01], 0),
            Err(VmError::CodeOverflow { position: 0 })
        ));
    }

    #[test]
    fn unknown_byte_faults() {
        assert!(matches!(
            Instruction::decode(&[0x50], 0),
            Err(VmError::UnknownOp {
                opcode: 0x50,
                position: 0
            })
        ));
    }

    #[test]
    fn syscall_name_is_the_operand() {
        let mut code = vec![0x68, 0x04];
        code.extend_from_slice(b"Neo.");
        let instr = Instruction::decode(&code, 0).unwrap();
        assert_eq!(instr.operand, b"Neo.");
        assert_eq!(instr.next, code.len());
    }

    #[test]
    fn jump_offset_is_signed_little_endian() {
        let instr = Instruction::decode(&[0x62, 0xFE, 0xFF], 0).unwrap();
        assert_eq!(instr.jump_offset().unwrap(), -2);
    }
}
