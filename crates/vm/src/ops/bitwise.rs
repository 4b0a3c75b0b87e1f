//! Bitwise opcodes and EQUAL.
//!
//! Bitwise operations act on the arbitrary-precision integers under
//! infinite two's-complement semantics, which is what `BigInt`'s
//! operators implement.

use crate::engine::ExecutionEngine;
use crate::error::VmResult;
use crate::stack_item::StackItem;
use num_bigint::BigInt;

/// INVERT: bitwise complement, `-(x + 1)`.
pub(crate) fn invert(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let value = args[0].as_int()?;
    engine.push(StackItem::Integer(-(value + BigInt::from(1))));
    Ok(())
}

pub(crate) fn and(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let right = args[0].as_int()?;
    let left = args[1].as_int()?;
    engine.push(StackItem::Integer(left & right));
    Ok(())
}

pub(crate) fn or(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let right = args[0].as_int()?;
    let left = args[1].as_int()?;
    engine.push(StackItem::Integer(left | right));
    Ok(())
}

pub(crate) fn xor(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let right = args[0].as_int()?;
    let left = args[1].as_int()?;
    engine.push(StackItem::Integer(left ^ right));
    Ok(())
}

/// EQUAL: the item-algebra equality predicate (structural for scalars,
/// identity for collections and entities).
pub(crate) fn equal(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    engine.push(StackItem::from_bool(args[0].equals(&args[1])));
    Ok(())
}
