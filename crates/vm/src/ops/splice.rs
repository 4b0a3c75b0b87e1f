//! Byte-string opcodes.

use crate::engine::ExecutionEngine;
use crate::error::{VmError, VmResult};
use crate::stack_item::StackItem;

/// CAT: concatenation. The combined length was checked against the item
/// limit before dispatch.
pub(crate) fn cat(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let right = args[0].as_bytes()?;
    let mut left = args[1].as_bytes()?;
    left.extend_from_slice(&right);
    engine.push(StackItem::from_bytes(left));
    Ok(())
}

/// SUBSTR: the byte range `[start, end)`, clamped to the buffer.
pub(crate) fn substr(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let end = args[0].as_index("SUBSTR")?;
    let start = args[1].as_index("SUBSTR")?;
    let bytes = args[2].as_bytes()?;
    let start = start.min(bytes.len());
    let end = end.min(bytes.len());
    let slice = if start < end {
        bytes[start..end].to_vec()
    } else {
        Vec::new()
    };
    engine.push(StackItem::from_bytes(slice));
    Ok(())
}

/// LEFT: the first `count` bytes, clamped.
pub(crate) fn left(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let count = args[0].as_index("LEFT")?;
    let bytes = args[1].as_bytes()?;
    let count = count.min(bytes.len());
    engine.push(StackItem::from_bytes(bytes[..count].to_vec()));
    Ok(())
}

/// RIGHT: the last `count` bytes; the buffer must be at least that long.
pub(crate) fn right(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let count = args[0].as_index("RIGHT")?;
    let bytes = args[1].as_bytes()?;
    if bytes.len() < count {
        return Err(VmError::invalid_arguments(
            "RIGHT",
            format!("buffer of {} bytes is shorter than {count}", bytes.len()),
        ));
    }
    engine.push(StackItem::from_bytes(bytes[bytes.len() - count..].to_vec()));
    Ok(())
}

pub(crate) fn size(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let len = args[0].as_bytes()?.len();
    engine.push(StackItem::from_int(len as i64));
    Ok(())
}
