//! Stack shuffling and the alt stack.

use crate::engine::ExecutionEngine;
use crate::error::VmResult;
use crate::stack_item::StackItem;

pub(crate) fn to_alt_stack(
    engine: &mut ExecutionEngine<'_>,
    mut args: Vec<StackItem>,
) -> VmResult<()> {
    engine.alt_push(args.remove(0));
    Ok(())
}

pub(crate) fn from_alt_stack(
    engine: &mut ExecutionEngine<'_>,
    mut alt_args: Vec<StackItem>,
) -> VmResult<()> {
    engine.push(alt_args.remove(0));
    Ok(())
}

pub(crate) fn dup_from_alt_stack(engine: &mut ExecutionEngine<'_>) -> VmResult<()> {
    let item = engine.alt_peek(0)?.clone();
    engine.push(item);
    Ok(())
}

/// XDROP n: removes the item n positions below the top.
pub(crate) fn x_drop(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let depth = args[0].as_index("XDROP")?;
    engine.remove_at(depth)?;
    Ok(())
}

/// XSWAP n: exchanges the top with the item n positions below it.
pub(crate) fn x_swap(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let depth = args[0].as_index("XSWAP")?;
    if depth == 0 {
        return Ok(());
    }
    engine.swap(0, depth)
}

/// XTUCK n: inserts a copy of the top item n positions below the top.
pub(crate) fn x_tuck(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let depth = args[0].as_index("XTUCK")?;
    let item = engine.peek(0)?.clone();
    engine.insert_at(depth, item)
}

pub(crate) fn depth(engine: &mut ExecutionEngine<'_>) -> VmResult<()> {
    let len = engine.stack.len();
    engine.push(StackItem::from_int(len as i64));
    Ok(())
}

pub(crate) fn dup(engine: &mut ExecutionEngine<'_>) -> VmResult<()> {
    let item = engine.peek(0)?.clone();
    engine.push(item);
    Ok(())
}

/// NIP: drops the item beneath the top.
pub(crate) fn nip(engine: &mut ExecutionEngine<'_>, mut args: Vec<StackItem>) -> VmResult<()> {
    engine.push(args.remove(0));
    Ok(())
}

pub(crate) fn over(engine: &mut ExecutionEngine<'_>) -> VmResult<()> {
    let item = engine.peek(1)?.clone();
    engine.push(item);
    Ok(())
}

/// PICK n: copies the item n positions below the top onto the top.
pub(crate) fn pick(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let depth = args[0].as_index("PICK")?;
    let item = engine.peek(depth)?.clone();
    engine.push(item);
    Ok(())
}

/// ROLL n: moves the item n positions below the top onto the top.
pub(crate) fn roll(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let depth = args[0].as_index("ROLL")?;
    let item = engine.remove_at(depth)?;
    engine.push(item);
    Ok(())
}

/// ROT: (x1 x2 x3) becomes (x2 x3 x1).
pub(crate) fn rot(engine: &mut ExecutionEngine<'_>, mut args: Vec<StackItem>) -> VmResult<()> {
    let x3 = args.remove(0);
    let x2 = args.remove(0);
    let x1 = args.remove(0);
    engine.push(x2);
    engine.push(x3);
    engine.push(x1);
    Ok(())
}

pub(crate) fn swap(engine: &mut ExecutionEngine<'_>, mut args: Vec<StackItem>) -> VmResult<()> {
    let top = args.remove(0);
    let second = args.remove(0);
    engine.push(top);
    engine.push(second);
    Ok(())
}

/// TUCK: (x1 x2) becomes (x2 x1 x2).
pub(crate) fn tuck(engine: &mut ExecutionEngine<'_>, mut args: Vec<StackItem>) -> VmResult<()> {
    let top = args.remove(0);
    let second = args.remove(0);
    engine.push(top.clone());
    engine.push(second);
    engine.push(top);
    Ok(())
}
