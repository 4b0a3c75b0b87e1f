//! Push-constant opcodes.

use crate::engine::ExecutionEngine;
use crate::error::VmResult;
use crate::instruction::Instruction;
use crate::stack_item::StackItem;

/// PUSH0: the empty buffer.
pub(crate) fn push0(engine: &mut ExecutionEngine<'_>) -> VmResult<()> {
    engine.push(StackItem::from_bytes(Vec::new()));
    Ok(())
}

/// PUSHBYTES1..75 and PUSHDATA1/2/4: the decoded immediate bytes.
pub(crate) fn push_data(engine: &mut ExecutionEngine<'_>, instr: &Instruction) -> VmResult<()> {
    engine.push(StackItem::from_bytes(instr.operand.clone()));
    Ok(())
}

/// PUSHM1 and PUSH1..16: a small integer constant.
pub(crate) fn push_int(engine: &mut ExecutionEngine<'_>, value: i64) -> VmResult<()> {
    engine.push(StackItem::from_int(value));
    Ok(())
}
