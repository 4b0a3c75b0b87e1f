//! Per-opcode descriptors: the uniform accounting contract every step
//! goes through before its handler runs.
//!
//! Most opcodes have static stack arities; PACK, UNPACK, CHECKMULTISIG
//! and the dynamic APPCALL form resolve theirs by peeking at the stack
//! before anything is popped.

use crate::engine::ExecutionEngine;
use crate::error::{VmError, VmResult};
use crate::instruction::Instruction;
use crate::limits::{fees, MAX_ARRAY_SIZE, MAX_ITEM_SIZE};
use crate::op_code::OpCode;
use crate::stack_item::StackItem;
use crate::syscalls;
use neo2_core::Fixed8;

/// Stack/gas/size accounting of one decoded instruction.
#[derive(Debug, Clone, Default)]
pub struct OpDescriptor {
    /// Items popped from the main stack before dispatch.
    pub stack_in: usize,
    /// Items popped from the alt stack before dispatch.
    pub alt_in: usize,
    /// Items the handler may push onto the main stack.
    pub stack_out: usize,
    /// Items the handler may push onto the alt stack.
    pub alt_out: usize,
    /// Net main-stack delta not covered by in/out (in-place inserts and
    /// removals).
    pub modify: isize,
    /// Net alt-stack delta not covered by in/out.
    pub modify_alt: isize,
    /// Invocation frames the step may add.
    pub invocation: usize,
    /// Element count checked against the array limit.
    pub array_size: Option<usize>,
    /// Byte length checked against the item limit.
    pub item_size: Option<usize>,
    /// Gas subtracted before dispatch.
    pub fee: Fixed8,
}

impl OpDescriptor {
    fn new(fee_units: i64) -> Self {
        Self {
            fee: Fixed8::from_raw(fee_units),
            ..Self::default()
        }
    }

    fn io(mut self, stack_in: usize, stack_out: usize) -> Self {
        self.stack_in = stack_in;
        self.stack_out = stack_out;
        self
    }

    /// Enforces the array/item bounds this descriptor declared.
    pub fn check_bounds(&self) -> VmResult<()> {
        if let Some(size) = self.array_size {
            if size > MAX_ARRAY_SIZE {
                return Err(VmError::ArrayTooLarge {
                    size,
                    max: MAX_ARRAY_SIZE,
                });
            }
        }
        if let Some(size) = self.item_size {
            if size > MAX_ITEM_SIZE {
                return Err(VmError::ItemTooLarge {
                    size,
                    max: MAX_ITEM_SIZE,
                });
            }
        }
        Ok(())
    }

    /// Builds the descriptor for an instruction, peeking at the stacks
    /// where the arity is dynamic.
    pub(crate) fn for_instruction(
        instr: &Instruction,
        engine: &ExecutionEngine<'_>,
    ) -> VmResult<OpDescriptor> {
        let op = instr.opcode;

        if op.is_push_bytes() || op.is_push_int() {
            let mut d = OpDescriptor::new(fees::DEFAULT).io(0, 1);
            d.item_size = Some(instr.operand.len());
            return Ok(d);
        }

        let d = match op {
            OpCode::PUSH0 | OpCode::PUSHM1 => OpDescriptor::new(fees::DEFAULT).io(0, 1),
            OpCode::PUSHDATA1 | OpCode::PUSHDATA2 | OpCode::PUSHDATA4 => {
                let mut d = OpDescriptor::new(fees::DEFAULT).io(0, 1);
                d.item_size = Some(instr.operand.len());
                d
            }

            OpCode::NOP | OpCode::RET => OpDescriptor::new(fees::DEFAULT),
            OpCode::JMP => OpDescriptor::new(fees::DEFAULT),
            OpCode::JMPIF | OpCode::JMPIFNOT => OpDescriptor::new(fees::DEFAULT).io(1, 0),
            OpCode::CALL => {
                let mut d = OpDescriptor::new(fees::DEFAULT);
                d.invocation = 1;
                d
            }
            OpCode::APPCALL | OpCode::TAILCALL => {
                let dynamic = instr.operand.iter().all(|&b| b == 0);
                let mut d = OpDescriptor::new(fees::APPCALL)
                    .io(usize::from(dynamic), 0);
                if op == OpCode::APPCALL {
                    d.invocation = 1;
                }
                d
            }
            OpCode::SYSCALL => {
                let desc = syscalls::resolve(&instr.operand)?;
                OpDescriptor {
                    fee: desc.fee(engine)?,
                    ..OpDescriptor::default().io(desc.args, desc.returns)
                }
            }

            OpCode::TOALTSTACK => {
                let mut d = OpDescriptor::new(fees::DEFAULT).io(1, 0);
                d.alt_out = 1;
                d
            }
            OpCode::FROMALTSTACK => {
                let mut d = OpDescriptor::new(fees::DEFAULT).io(0, 1);
                d.alt_in = 1;
                d
            }
            OpCode::DUPFROMALTSTACK => OpDescriptor::new(fees::DEFAULT).io(0, 1),

            OpCode::XDROP => {
                let mut d = OpDescriptor::new(fees::DEFAULT).io(1, 0);
                d.modify = -1;
                d
            }
            OpCode::XSWAP => OpDescriptor::new(fees::DEFAULT).io(1, 0),
            OpCode::XTUCK => {
                let mut d = OpDescriptor::new(fees::DEFAULT).io(1, 0);
                d.modify = 1;
                d
            }
            OpCode::DEPTH => OpDescriptor::new(fees::DEFAULT).io(0, 1),
            OpCode::DROP => OpDescriptor::new(fees::DEFAULT).io(1, 0),
            OpCode::DUP | OpCode::OVER => OpDescriptor::new(fees::DEFAULT).io(0, 1),
            OpCode::NIP => OpDescriptor::new(fees::DEFAULT).io(2, 1),
            OpCode::PICK => OpDescriptor::new(fees::DEFAULT).io(1, 1),
            OpCode::ROLL => {
                let mut d = OpDescriptor::new(fees::DEFAULT).io(1, 1);
                d.modify = -1;
                d
            }
            OpCode::ROT => OpDescriptor::new(fees::DEFAULT).io(3, 3),
            OpCode::SWAP => OpDescriptor::new(fees::DEFAULT).io(2, 2),
            OpCode::TUCK => OpDescriptor::new(fees::DEFAULT).io(2, 3),

            OpCode::CAT => {
                let mut d = OpDescriptor::new(fees::DEFAULT).io(2, 1);
                let right = engine.peek(0)?.as_bytes()?;
                let left = engine.peek(1)?.as_bytes()?;
                d.item_size = Some(left.len() + right.len());
                d
            }
            OpCode::SUBSTR => OpDescriptor::new(fees::DEFAULT).io(3, 1),
            OpCode::LEFT | OpCode::RIGHT => OpDescriptor::new(fees::DEFAULT).io(2, 1),
            OpCode::SIZE => OpDescriptor::new(fees::DEFAULT).io(1, 1),

            OpCode::INVERT
            | OpCode::INC
            | OpCode::DEC
            | OpCode::SIGN
            | OpCode::NEGATE
            | OpCode::ABS
            | OpCode::NOT
            | OpCode::NZ => OpDescriptor::new(fees::DEFAULT).io(1, 1),

            OpCode::AND
            | OpCode::OR
            | OpCode::XOR
            | OpCode::EQUAL
            | OpCode::ADD
            | OpCode::SUB
            | OpCode::MUL
            | OpCode::DIV
            | OpCode::MOD
            | OpCode::SHL
            | OpCode::SHR
            | OpCode::BOOLAND
            | OpCode::BOOLOR
            | OpCode::NUMEQUAL
            | OpCode::NUMNOTEQUAL
            | OpCode::LT
            | OpCode::GT
            | OpCode::LTE
            | OpCode::GTE
            | OpCode::MIN
            | OpCode::MAX => OpDescriptor::new(fees::DEFAULT).io(2, 1),
            OpCode::WITHIN => OpDescriptor::new(fees::DEFAULT).io(3, 1),

            OpCode::SHA1 | OpCode::SHA256 => OpDescriptor::new(fees::DIGEST).io(1, 1),
            OpCode::HASH160 | OpCode::HASH256 => {
                OpDescriptor::new(fees::DOUBLE_DIGEST).io(1, 1)
            }
            OpCode::CHECKSIG => OpDescriptor::new(fees::CHECKSIG).io(2, 1),
            OpCode::CHECKMULTISIG => {
                let (stack_in, key_count, sig_count) = multisig_arity(engine)?;
                let mut d = OpDescriptor::new(
                    fees::CHECKMULTISIG_PER_KEY.saturating_mul(key_count as i64),
                )
                .io(stack_in, 1);
                d.array_size = Some(key_count.max(sig_count));
                d
            }

            OpCode::ARRAYSIZE => OpDescriptor::new(fees::DEFAULT).io(1, 1),
            OpCode::PACK => {
                let count = engine.peek(0)?.as_index("PACK")?;
                let mut d = OpDescriptor::new(fees::DEFAULT).io(1 + count, 1);
                d.array_size = Some(count);
                d
            }
            OpCode::UNPACK => {
                let items = engine.peek(0)?.as_items()?;
                let len = items.borrow().len();
                OpDescriptor::new(fees::DEFAULT).io(1, len + 1)
            }
            OpCode::PICKITEM => OpDescriptor::new(fees::DEFAULT).io(2, 1),
            OpCode::SETITEM => OpDescriptor::new(fees::DEFAULT).io(3, 0),
            OpCode::NEWARRAY | OpCode::NEWSTRUCT => {
                let count = engine.peek(0)?.as_index(op.name())?;
                let mut d = OpDescriptor::new(fees::DEFAULT).io(1, 1);
                d.array_size = Some(count);
                d
            }

            OpCode::THROW => OpDescriptor::new(fees::DEFAULT),
            OpCode::THROWIFNOT => OpDescriptor::new(fees::DEFAULT).io(1, 0),

            other => {
                return Err(VmError::UnknownOp {
                    opcode: other.byte(),
                    position: instr.pointer,
                })
            }
        };
        Ok(d)
    }
}

/// Resolves CHECKMULTISIG's dynamic arity by peeking: two consecutive
/// groups (public keys on top, then signatures), each either one Array
/// item or a count followed by that many items. Returns the total items
/// to pop, the key count and the signature count.
fn multisig_arity(engine: &ExecutionEngine<'_>) -> VmResult<(usize, usize, usize)> {
    let (key_items, key_count) = group_arity(engine, 0)?;
    let (sig_items, sig_count) = group_arity(engine, key_items)?;
    if key_count == 0 || sig_count == 0 {
        return Err(VmError::invalid_arguments(
            "CHECKMULTISIG",
            "empty key or signature group",
        ));
    }
    Ok((key_items + sig_items, key_count, sig_count))
}

fn group_arity(engine: &ExecutionEngine<'_>, base: usize) -> VmResult<(usize, usize)> {
    match engine.peek(base)? {
        StackItem::Array(items) | StackItem::Struct(items) => Ok((1, items.borrow().len())),
        other => {
            let count = other.as_index("CHECKMULTISIG")?;
            Ok((1 + count, count))
        }
    }
}
