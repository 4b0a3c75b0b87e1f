//! Control-flow opcodes: jumps, calls, nested invocations, exceptions.

use crate::engine::{ExecutionEngine, Frame};
use crate::error::{VmError, VmResult};
use crate::instruction::Instruction;
use crate::stack_item::StackItem;
use neo2_core::UInt160;
use std::rc::Rc;

/// Jump offsets are relative to the opcode byte; compilers emit them that
/// way. The target may be one past the last byte (an implicit RET).
fn jump_target(engine: &ExecutionEngine<'_>, instr: &Instruction) -> VmResult<usize> {
    let offset = instr.jump_offset()? as isize;
    let target = instr.pointer as isize + offset;
    let code_len = engine
        .frames
        .last()
        .map(|f| f.code.len())
        .unwrap_or_default();
    if target < 0 || target > code_len as isize {
        return Err(VmError::invalid_arguments(
            "JMP",
            format!("target {target} outside script of {code_len} bytes"),
        ));
    }
    Ok(target as usize)
}

pub(crate) fn jump(engine: &mut ExecutionEngine<'_>, instr: &Instruction) -> VmResult<()> {
    let target = jump_target(engine, instr)?;
    if let Some(frame) = engine.frames.last_mut() {
        frame.pc = target;
    }
    Ok(())
}

pub(crate) fn jump_if(
    engine: &mut ExecutionEngine<'_>,
    instr: &Instruction,
    args: Vec<StackItem>,
    jump_when: bool,
) -> VmResult<()> {
    let target = jump_target(engine, instr)?;
    if args[0].as_bool() == jump_when {
        if let Some(frame) = engine.frames.last_mut() {
            frame.pc = target;
        }
    }
    Ok(())
}

/// CALL: a jump into a fresh frame of the same script. RET in the callee
/// resumes the caller right after the offset bytes.
pub(crate) fn call(engine: &mut ExecutionEngine<'_>, instr: &Instruction) -> VmResult<()> {
    let target = jump_target(engine, instr)?;
    let frame = engine
        .frames
        .last()
        .ok_or_else(|| VmError::stack_underflow(1, 0))?;
    let callee = Frame {
        code: Rc::clone(&frame.code),
        pc: target,
        script_hash: frame.script_hash,
        calling_script_hash: frame.calling_script_hash,
        push_only: frame.push_only,
    };
    engine.frames.push(callee);
    Ok(())
}

/// APPCALL/TAILCALL: loads a deployed contract's script as a nested
/// frame. An all-zero operand takes the target hash from the stack
/// instead (dynamic invocation). TAILCALL replaces the current frame, so
/// the invocation depth stays flat.
pub(crate) fn app_call(
    engine: &mut ExecutionEngine<'_>,
    instr: &Instruction,
    args: Vec<StackItem>,
    tail: bool,
) -> VmResult<()> {
    let hash = if instr.operand.iter().all(|&b| b == 0) {
        args[0].as_uint160()?
    } else {
        UInt160::from_slice(&instr.operand)?
    };
    let contract = engine
        .ledger()
        .contracts()
        .try_get(&hash)
        .ok_or(VmError::ContractNotFound { hash })?;
    let calling = engine.script_hash();
    if tail {
        engine.ret();
    }
    engine.load_script(contract.script, Some(calling), false)
}

pub(crate) fn throw_if_not(args: Vec<StackItem>) -> VmResult<()> {
    if args[0].as_bool() {
        Ok(())
    } else {
        Err(VmError::ThrowIfNot)
    }
}
