//! ExecutionEngine group: introspection of the running invocation tree.

use super::{insert, Catalogue, SyscallDescriptor};
use crate::engine::ExecutionEngine;
use crate::error::VmResult;
use crate::limits::fees;
use crate::stack_item::StackItem;
use neo2_core::{ScriptContainer, UInt160};
use std::sync::Arc;

pub(super) fn register(table: &mut Catalogue) {
    let d = fees::SYSCALL_DEFAULT;
    insert(
        table,
        SyscallDescriptor::new(
            "System.ExecutionEngine.GetScriptContainer",
            0,
            1,
            d,
            get_script_container,
        ),
    );
    insert(
        table,
        SyscallDescriptor::new(
            "System.ExecutionEngine.GetExecutingScriptHash",
            0,
            1,
            d,
            get_executing_script_hash,
        ),
    );
    insert(
        table,
        SyscallDescriptor::new(
            "System.ExecutionEngine.GetCallingScriptHash",
            0,
            1,
            d,
            get_calling_script_hash,
        ),
    );
    insert(
        table,
        SyscallDescriptor::new(
            "System.ExecutionEngine.GetEntryScriptHash",
            0,
            1,
            d,
            get_entry_script_hash,
        ),
    );
}

fn get_script_container(
    engine: &mut ExecutionEngine<'_>,
    _args: Vec<StackItem>,
) -> VmResult<Option<StackItem>> {
    let item = match engine.container() {
        ScriptContainer::Transaction(tx) => StackItem::Transaction(Arc::clone(tx)),
        ScriptContainer::Block(block) => StackItem::Block(Arc::clone(block)),
    };
    Ok(Some(item))
}

fn get_executing_script_hash(
    engine: &mut ExecutionEngine<'_>,
    _args: Vec<StackItem>,
) -> VmResult<Option<StackItem>> {
    Ok(Some(StackItem::Uint160(engine.script_hash())))
}

/// The entry frame has no caller; it reads as the zero hash.
fn get_calling_script_hash(
    engine: &mut ExecutionEngine<'_>,
    _args: Vec<StackItem>,
) -> VmResult<Option<StackItem>> {
    Ok(Some(StackItem::Uint160(
        engine.calling_script_hash().unwrap_or(UInt160::zero()),
    )))
}

fn get_entry_script_hash(
    engine: &mut ExecutionEngine<'_>,
    _args: Vec<StackItem>,
) -> VmResult<Option<StackItem>> {
    Ok(Some(StackItem::Uint160(engine.entry_script_hash())))
}
