//! Opcode handlers, one module per family.
//!
//! Handlers receive the arguments the engine already popped for them,
//! top-of-stack first, and push their results directly. The accounting
//! (underflow, gas, depth, stack-size, array/item bounds) has run before
//! a handler is entered.

pub mod bitwise;
pub mod compound;
pub mod control;
pub mod crypto;
pub mod numeric;
pub mod push;
pub mod splice;
pub mod stack;

use crate::engine::ExecutionEngine;
use crate::error::{VmError, VmResult};
use crate::instruction::Instruction;
use crate::op_code::OpCode;
use crate::stack_item::StackItem;

/// Routes one decoded instruction to its handler.
pub(crate) fn dispatch(
    engine: &mut ExecutionEngine<'_>,
    instr: &Instruction,
    args: Vec<StackItem>,
    alt_args: Vec<StackItem>,
) -> VmResult<()> {
    let op = instr.opcode;

    if op.is_push_bytes() {
        return push::push_data(engine, instr);
    }
    if op.is_push_int() {
        return push::push_int(engine, op.push_int_value());
    }

    match op {
        OpCode::PUSH0 => push::push0(engine),
        OpCode::PUSHM1 => push::push_int(engine, -1),
        OpCode::PUSHDATA1 | OpCode::PUSHDATA2 | OpCode::PUSHDATA4 => {
            push::push_data(engine, instr)
        }

        OpCode::NOP => Ok(()),
        OpCode::JMP => control::jump(engine, instr),
        OpCode::JMPIF => control::jump_if(engine, instr, args, true),
        OpCode::JMPIFNOT => control::jump_if(engine, instr, args, false),
        OpCode::CALL => control::call(engine, instr),
        OpCode::RET => {
            engine.ret();
            Ok(())
        }
        OpCode::APPCALL => control::app_call(engine, instr, args, false),
        OpCode::TAILCALL => control::app_call(engine, instr, args, true),
        OpCode::SYSCALL => crate::syscalls::invoke(engine, &instr.operand, args),

        OpCode::TOALTSTACK => stack::to_alt_stack(engine, args),
        OpCode::FROMALTSTACK => stack::from_alt_stack(engine, alt_args),
        OpCode::DUPFROMALTSTACK => stack::dup_from_alt_stack(engine),
        OpCode::XDROP => stack::x_drop(engine, args),
        OpCode::XSWAP => stack::x_swap(engine, args),
        OpCode::XTUCK => stack::x_tuck(engine, args),
        OpCode::DEPTH => stack::depth(engine),
        OpCode::DROP => Ok(()),
        OpCode::DUP => stack::dup(engine),
        OpCode::NIP => stack::nip(engine, args),
        OpCode::OVER => stack::over(engine),
        OpCode::PICK => stack::pick(engine, args),
        OpCode::ROLL => stack::roll(engine, args),
        OpCode::ROT => stack::rot(engine, args),
        OpCode::SWAP => stack::swap(engine, args),
        OpCode::TUCK => stack::tuck(engine, args),

        OpCode::CAT => splice::cat(engine, args),
        OpCode::SUBSTR => splice::substr(engine, args),
        OpCode::LEFT => splice::left(engine, args),
        OpCode::RIGHT => splice::right(engine, args),
        OpCode::SIZE => splice::size(engine, args),

        OpCode::INVERT => bitwise::invert(engine, args),
        OpCode::AND => bitwise::and(engine, args),
        OpCode::OR => bitwise::or(engine, args),
        OpCode::XOR => bitwise::xor(engine, args),
        OpCode::EQUAL => bitwise::equal(engine, args),

        OpCode::INC => numeric::inc(engine, args),
        OpCode::DEC => numeric::dec(engine, args),
        OpCode::SIGN => numeric::sign(engine, args),
        OpCode::NEGATE => numeric::negate(engine, args),
        OpCode::ABS => numeric::abs(engine, args),
        OpCode::NOT => numeric::not(engine, args),
        OpCode::NZ => numeric::nz(engine, args),
        OpCode::ADD => numeric::add(engine, args),
        OpCode::SUB => numeric::sub(engine, args),
        OpCode::MUL => numeric::mul(engine, args),
        OpCode::DIV => numeric::div(engine, args),
        OpCode::MOD => numeric::modulo(engine, args),
        OpCode::SHL => numeric::shl(engine, args),
        OpCode::SHR => numeric::shr(engine, args),
        OpCode::BOOLAND => numeric::bool_and(engine, args),
        OpCode::BOOLOR => numeric::bool_or(engine, args),
        OpCode::NUMEQUAL => numeric::num_equal(engine, args),
        OpCode::NUMNOTEQUAL => numeric::num_not_equal(engine, args),
        OpCode::LT => numeric::lt(engine, args),
        OpCode::GT => numeric::gt(engine, args),
        OpCode::LTE => numeric::lte(engine, args),
        OpCode::GTE => numeric::gte(engine, args),
        OpCode::MIN => numeric::min(engine, args),
        OpCode::MAX => numeric::max(engine, args),
        OpCode::WITHIN => numeric::within(engine, args),

        OpCode::SHA1 => crypto::sha1(engine, args),
        OpCode::SHA256 => crypto::sha256(engine, args),
        OpCode::HASH160 => crypto::hash160(engine, args),
        OpCode::HASH256 => crypto::hash256(engine, args),
        OpCode::CHECKSIG => crypto::check_sig(engine, args),
        OpCode::CHECKMULTISIG => crypto::check_multisig(engine, args),

        OpCode::ARRAYSIZE => compound::array_size(engine, args),
        OpCode::PACK => compound::pack(engine, args),
        OpCode::UNPACK => compound::unpack(engine, args),
        OpCode::PICKITEM => compound::pick_item(engine, args),
        OpCode::SETITEM => compound::set_item(engine, args),
        OpCode::NEWARRAY => compound::new_array(engine, args),
        OpCode::NEWSTRUCT => compound::new_struct(engine, args),

        OpCode::THROW => Err(VmError::Throw),
        OpCode::THROWIFNOT => control::throw_if_not(args),

        other => Err(VmError::UnknownOp {
            opcode: other.byte(),
            position: instr.pointer,
        }),
    }
}
