//! The legacy opcode byte map.
//!
//! The table is open (PUSHBYTES is a 75-byte range), so opcodes are a
//! thin wrapper over the raw byte with named constants rather than a
//! closed enum. Byte values are consensus-critical and must never change.

use std::fmt;

/// A single opcode byte.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct OpCode(pub u8);

impl OpCode {
    // Push constants
    /// Pushes an empty buffer.
    pub const PUSH0: OpCode = OpCode(0x00);
    /// 0x01..=0x4B push that many immediate bytes.
    pub const PUSHBYTES1: OpCode = OpCode(0x01);
    pub const PUSHBYTES75: OpCode = OpCode(0x4B);
    pub const PUSHDATA1: OpCode = OpCode(0x4C);
    pub const PUSHDATA2: OpCode = OpCode(0x4D);
    pub const PUSHDATA4: OpCode = OpCode(0x4E);
    pub const PUSHM1: OpCode = OpCode(0x4F);
    pub const PUSH1: OpCode = OpCode(0x51);
    pub const PUSH2: OpCode = OpCode(0x52);
    pub const PUSH3: OpCode = OpCode(0x53);
    pub const PUSH4: OpCode = OpCode(0x54);
    pub const PUSH5: OpCode = OpCode(0x55);
    pub const PUSH6: OpCode = OpCode(0x56);
    pub const PUSH7: OpCode = OpCode(0x57);
    pub const PUSH8: OpCode = OpCode(0x58);
    pub const PUSH9: OpCode = OpCode(0x59);
    pub const PUSH10: OpCode = OpCode(0x5A);
    pub const PUSH11: OpCode = OpCode(0x5B);
    pub const PUSH12: OpCode = OpCode(0x5C);
    pub const PUSH13: OpCode = OpCode(0x5D);
    pub const PUSH14: OpCode = OpCode(0x5E);
    pub const PUSH15: OpCode = OpCode(0x5F);
    pub const PUSH16: OpCode = OpCode(0x60);

    // Control flow
    pub const NOP: OpCode = OpCode(0x61);
    pub const JMP: OpCode = OpCode(0x62);
    pub const JMPIF: OpCode = OpCode(0x63);
    pub const JMPIFNOT: OpCode = OpCode(0x64);
    pub const CALL: OpCode = OpCode(0x65);
    pub const RET: OpCode = OpCode(0x66);
    pub const APPCALL: OpCode = OpCode(0x67);
    pub const SYSCALL: OpCode = OpCode(0x68);
    pub const TAILCALL: OpCode = OpCode(0x69);

    // Alt stack
    pub const DUPFROMALTSTACK: OpCode = OpCode(0x6A);
    pub const TOALTSTACK: OpCode = OpCode(0x6B);
    pub const FROMALTSTACK: OpCode = OpCode(0x6C);

    // Stack shuffling
    pub const XDROP: OpCode = OpCode(0x6D);
    pub const XSWAP: OpCode = OpCode(0x72);
    pub const XTUCK: OpCode = OpCode(0x73);
    pub const DEPTH: OpCode = OpCode(0x74);
    pub const DROP: OpCode = OpCode(0x75);
    pub const DUP: OpCode = OpCode(0x76);
    pub const NIP: OpCode = OpCode(0x77);
    pub const OVER: OpCode = OpCode(0x78);
    pub const PICK: OpCode = OpCode(0x79);
    pub const ROLL: OpCode = OpCode(0x7A);
    pub const ROT: OpCode = OpCode(0x7B);
    pub const SWAP: OpCode = OpCode(0x7C);
    pub const TUCK: OpCode = OpCode(0x7D);

    // Bytes
    pub const CAT: OpCode = OpCode(0x7E);
    pub const SUBSTR: OpCode = OpCode(0x7F);
    pub const LEFT: OpCode = OpCode(0x80);
    pub const RIGHT: OpCode = OpCode(0x81);
    pub const SIZE: OpCode = OpCode(0x82);

    // Bitwise and equality
    pub const INVERT: OpCode = OpCode(0x83);
    pub const AND: OpCode = OpCode(0x84);
    pub const OR: OpCode = OpCode(0x85);
    pub const XOR: OpCode = OpCode(0x86);
    pub const EQUAL: OpCode = OpCode(0x87);

    // Arithmetic
    pub const INC: OpCode = OpCode(0x8B);
    pub const DEC: OpCode = OpCode(0x8C);
    pub const SIGN: OpCode = OpCode(0x8D);
    pub const NEGATE: OpCode = OpCode(0x8F);
    pub const ABS: OpCode = OpCode(0x90);
    pub const NOT: OpCode = OpCode(0x91);
    pub const NZ: OpCode = OpCode(0x92);
    pub const ADD: OpCode = OpCode(0x93);
    pub const SUB: OpCode = OpCode(0x94);
    pub const MUL: OpCode = OpCode(0x95);
    pub const DIV: OpCode = OpCode(0x96);
    pub const MOD: OpCode = OpCode(0x97);
    pub const SHL: OpCode = OpCode(0x98);
    pub const SHR: OpCode = OpCode(0x99);
    pub const BOOLAND: OpCode = OpCode(0x9A);
    pub const BOOLOR: OpCode = OpCode(0x9B);
    pub const NUMEQUAL: OpCode = OpCode(0x9C);
    pub const NUMNOTEQUAL: OpCode = OpCode(0x9E);
    pub const LT: OpCode = OpCode(0x9F);
    pub const GT: OpCode = OpCode(0xA0);
    pub const LTE: OpCode = OpCode(0xA1);
    pub const GTE: OpCode = OpCode(0xA2);
    pub const MIN: OpCode = OpCode(0xA3);
    pub const MAX: OpCode = OpCode(0xA4);
    pub const WITHIN: OpCode = OpCode(0xA5);

    // Crypto
    pub const SHA1: OpCode = OpCode(0xA7);
    pub const SHA256: OpCode = OpCode(0xA8);
    pub const HASH160: OpCode = OpCode(0xA9);
    pub const HASH256: OpCode = OpCode(0xAA);
    pub const CHECKSIG: OpCode = OpCode(0xAC);
    pub const CHECKMULTISIG: OpCode = OpCode(0xAE);

    // Collections
    pub const ARRAYSIZE: OpCode = OpCode(0xC0);
    pub const PACK: OpCode = OpCode(0xC1);
    pub const UNPACK: OpCode = OpCode(0xC2);
    pub const PICKITEM: OpCode = OpCode(0xC3);
    pub const SETITEM: OpCode = OpCode(0xC4);
    pub const NEWARRAY: OpCode = OpCode(0xC5);
    pub const NEWSTRUCT: OpCode = OpCode(0xC6);

    // Exceptions
    pub const THROW: OpCode = OpCode(0xF0);
    pub const THROWIFNOT: OpCode = OpCode(0xF1);

    /// The raw byte.
    pub const fn byte(self) -> u8 {
        self.0
    }

    /// True for PUSHBYTES1..=PUSHBYTES75.
    pub const fn is_push_bytes(self) -> bool {
        self.0 >= Self::PUSHBYTES1.0 && self.0 <= Self::PUSHBYTES75.0
    }

    /// Number of immediate bytes a PUSHBYTES opcode copies.
    pub const fn push_bytes_len(self) -> usize {
        self.0 as usize
    }

    /// True for PUSH1..=PUSH16.
    pub const fn is_push_int(self) -> bool {
        self.0 >= Self::PUSH1.0 && self.0 <= Self::PUSH16.0
    }

    /// The constant PUSH1..=PUSH16 pushes.
    pub const fn push_int_value(self) -> i64 {
        (self.0 - Self::PUSH1.0) as i64 + 1
    }

    /// True for every opcode a push-only script may contain (RET aside).
    pub const fn is_push(self) -> bool {
        self.0 <= Self::PUSH16.0
    }

    /// Whether the byte maps to an opcode at all.
    pub fn is_defined(byte: u8) -> bool {
        matches!(byte,
            0x00..=0x4F        // pushes (0x50 is unassigned)
            | 0x51..=0x69      // push ints, control flow
            | 0x6A..=0x6D      // alt stack, XDROP
            | 0x72..=0x87      // shuffling, bytes, bitwise
            | 0x8B..=0x8D      // INC, DEC, SIGN
            | 0x8F..=0x9C      // unary/binary arithmetic
            | 0x9E..=0xA5      // comparisons
            | 0xA7..=0xAA      // hashes
            | 0xAC | 0xAE      // signature checks
            | 0xC0..=0xC6      // collections
            | 0xF0 | 0xF1      // exceptions
        )
    }

    /// Mnemonic, for logs and errors.
    pub fn name(self) -> &'static str {
        if self.is_push_bytes() {
            return "PUSHBYTES";
        }
        if self.is_push_int() {
            return "PUSHINT";
        }
        match self {
            Self::PUSH0 => "PUSH0",
            Self::PUSHDATA1 => "PUSHDATA1",
            Self::PUSHDATA2 => "PUSHDATA2",
            Self::PUSHDATA4 => "PUSHDATA4",
            Self::PUSHM1 => "PUSHM1",
            Self::NOP => "NOP",
            Self::JMP => "JMP",
            Self::JMPIF => "JMPIF",
            Self::JMPIFNOT => "JMPIFNOT",
            Self::CALL => "CALL",
            Self::RET => "RET",
            Self::APPCALL => "APPCALL",
            Self::SYSCALL => "SYSCALL",
            Self::TAILCALL => "TAILCALL",
            Self::DUPFROMALTSTACK => "DUPFROMALTSTACK",
            Self::TOALTSTACK => "TOALTSTACK",
            Self::FROMALTSTACK => "FROMALTSTACK",
            Self::XDROP => "XDROP",
            Self::XSWAP => "XSWAP",
            Self::XTUCK => "XTUCK",
            Self::DEPTH => "DEPTH",
            Self::DROP => "DROP",
            Self::DUP => "DUP",
            Self::NIP => "NIP",
            Self::OVER => "OVER",
            Self::PICK => "PICK",
            Self::ROLL => "ROLL",
            Self::ROT => "ROT",
            Self::SWAP => "SWAP",
            Self::TUCK => "TUCK",
            Self::CAT => "CAT",
            Self::SUBSTR => "SUBSTR",
            Self::LEFT => "LEFT",
            Self::RIGHT => "RIGHT",
            Self::SIZE => "SIZE",
            Self::INVERT => "INVERT",
            Self::AND => "AND",
            Self::OR => "OR",
            Self::XOR => "XOR",
            Self::EQUAL => "EQUAL",
            Self::INC => "INC",
            Self::DEC => "DEC",
            Self::SIGN => "SIGN",
            Self::NEGATE => "NEGATE",
            Self::ABS => "ABS",
            Self::NOT => "NOT",
            Self::NZ => "NZ",
            Self::ADD => "ADD",
            Self::SUB => "SUB",
            Self::MUL => "MUL",
            Self::DIV => "DIV",
            Self::MOD => "MOD",
            Self::SHL => "SHL",
            Self::SHR => "SHR",
            Self::BOOLAND => "BOOLAND",
            Self::BOOLOR => "BOOLOR",
            Self::NUMEQUAL => "NUMEQUAL",
            Self::NUMNOTEQUAL => "NUMNOTEQUAL",
            Self::LT => "LT",
            Self::GT => "GT",
            Self::LTE => "LTE",
            Self::GTE => "GTE",
            Self::MIN => "MIN",
            Self::MAX => "MAX",
            Self::WITHIN => "WITHIN",
            Self::SHA1 => "SHA1",
            Self::SHA256 => "SHA256",
            Self::HASH160 => "HASH160",
            Self::HASH256 => "HASH256",
            Self::CHECKSIG => "CHECKSIG",
            Self::CHECKMULTISIG => "CHECKMULTISIG",
            Self::ARRAYSIZE => "ARRAYSIZE",
            Self::PACK => "PACK",
            Self::UNPACK => "UNPACK",
            Self::PICKITEM => "PICKITEM",
            Self::SETITEM => "SETITEM",
            Self::NEWARRAY => "NEWARRAY",
            Self::NEWSTRUCT => "NEWSTRUCT",
            Self::THROW => "THROW",
            Self::THROWIFNOT => "THROWIFNOT",
            _ => "UNKNOWN",
        }
    }
}

impl fmt::Debug for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:#04x})", self.name(), self.0)
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compatibility_critical_byte_values() {
        assert_eq!(OpCode::PUSH0.byte(), 0x00);
        assert_eq!(OpCode::PUSHDATA1.byte(), 0x4C);
        assert_eq!(OpCode::PUSHM1.byte(), 0x4F);
        assert_eq!(OpCode::PUSH16.byte(), 0x60);
        assert_eq!(OpCode::JMP.byte(), 0x62);
        assert_eq!(OpCode::APPCALL.byte(), 0x67);
        assert_eq!(OpCode::SYSCALL.byte(), 0x68);
        assert_eq!(OpCode::TAILCALL.byte(), 0x69);
        assert_eq!(OpCode::XSWAP.byte(), 0x72);
        assert_eq!(OpCode::CAT.byte(), 0x7E);
        assert_eq!(OpCode::EQUAL.byte(), 0x87);
        assert_eq!(OpCode::ADD.byte(), 0x93);
        assert_eq!(OpCode::WITHIN.byte(), 0xA5);
        assert_eq!(OpCode::SHA1.byte(), 0xA7);
        assert_eq!(OpCode::CHECKSIG.byte(), 0xAC);
        assert_eq!(OpCode::CHECKMULTISIG.byte(), 0xAE);
        assert_eq!(OpCode::ARRAYSIZE.byte(), 0xC0);
        assert_eq!(OpCode::NEWSTRUCT.byte(), 0xC6);
        assert_eq!(OpCode::THROW.byte(), 0xF0);
        assert_eq!(OpCode::THROWIFNOT.byte(), 0xF1);
    }

    #[test]
    fn undefined_bytes_are_rejected() {
        for byte in [0x50u8, 0x6E, 0x71, 0x88, 0x8E, 0x9D, 0xA6, 0xAB, 0xAD, 0xC7, 0xFF] {
            assert!(!OpCode::is_defined(byte), "{byte:#04x} should be undefined");
        }
        for byte in [0x00u8, 0x4B, 0x60, 0x66, 0x72, 0xAE, 0xC6, 0xF1] {
            assert!(OpCode::is_defined(byte), "{byte:#04x} should be defined");
        }
    }

    #[test]
    fn push_predicates() {
        assert!(OpCode(0x20).is_push_bytes());
        assert_eq!(OpCode(0x20).push_bytes_len(), 32);
        assert!(OpCode::PUSH16.is_push_int());
        assert_eq!(OpCode::PUSH16.push_int_value(), 16);
        assert_eq!(OpCode::PUSH1.push_int_value(), 1);
        assert!(OpCode::PUSH0.is_push());
        assert!(!OpCode::NOP.is_push());
    }
}
