//! Array and struct opcodes.

use crate::engine::ExecutionEngine;
use crate::error::{VmError, VmResult};
use crate::stack_item::StackItem;

/// ARRAYSIZE: element count of a collection, or byte length of a buffer.
pub(crate) fn array_size(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let size = match &args[0] {
        StackItem::Array(items) | StackItem::Struct(items) => items.borrow().len(),
        other => other.as_bytes()?.len(),
    };
    engine.push(StackItem::from_int(size as i64));
    Ok(())
}

/// PACK: collects the popped items into a fresh array, top of stack
/// first.
pub(crate) fn pack(engine: &mut ExecutionEngine<'_>, mut args: Vec<StackItem>) -> VmResult<()> {
    args.remove(0); // the count, already resolved by the descriptor
    engine.push(StackItem::new_array(args));
    Ok(())
}

/// UNPACK: pushes the elements in reverse order followed by the length,
/// so the count ends up on top with element 0 directly beneath it.
pub(crate) fn unpack(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let items = args[0].as_items()?;
    let elements = items.borrow();
    for element in elements.iter().rev() {
        engine.push(element.clone());
    }
    engine.push(StackItem::from_int(elements.len() as i64));
    Ok(())
}

/// PICKITEM: element access by reference.
pub(crate) fn pick_item(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let index = args[0].as_index("PICKITEM")?;
    let items = args[1].as_items()?;
    let elements = items.borrow();
    let item = elements.get(index).cloned().ok_or(VmError::InvalidIndex {
        index: index as i64,
        len: elements.len(),
    })?;
    drop(elements);
    engine.push(item);
    Ok(())
}

/// SETITEM: element assignment. Struct values are deep-copied before
/// insertion; arrays keep their identity.
pub(crate) fn set_item(_engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let value = args[0].copy_on_assign();
    let index = args[1].as_index("SETITEM")?;
    let items = args[2].as_items()?;
    let mut elements = items.borrow_mut();
    let len = elements.len();
    let slot = elements.get_mut(index).ok_or(VmError::InvalidIndex {
        index: index as i64,
        len,
    })?;
    *slot = value;
    Ok(())
}

/// NEWARRAY n: an array of n false booleans.
pub(crate) fn new_array(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let count = args[0].as_index("NEWARRAY")?;
    engine.push(StackItem::new_array(vec![StackItem::from_bool(false); count]));
    Ok(())
}

/// NEWSTRUCT n: a struct of n false booleans.
pub(crate) fn new_struct(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let count = args[0].as_index("NEWSTRUCT")?;
    engine.push(StackItem::new_struct(vec![StackItem::from_bool(false); count]));
    Ok(())
}
