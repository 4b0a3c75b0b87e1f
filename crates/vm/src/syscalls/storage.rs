//! Storage group: contract key/value state behind the context
//! capability.

use super::{insert, Catalogue, SyscallDescriptor, SyscallFee};
use crate::engine::ExecutionEngine;
use crate::error::{VmError, VmResult};
use crate::limits::{fees, MAX_ITEM_SIZE};
use crate::stack_item::{StackItem, StorageContext};
use neo2_core::constants::MAX_STORAGE_KEY_SIZE;
use neo2_core::{StorageItem, StorageKey, UInt160};

pub(super) fn register(table: &mut Catalogue) {
    insert(
        table,
        SyscallDescriptor::new(
            "Neo.Storage.GetContext",
            0,
            1,
            fees::SYSCALL_RUNTIME,
            get_context,
        ),
    );
    insert(
        table,
        SyscallDescriptor::new("Neo.Storage.Get", 2, 1, fees::STORAGE_ACCESS, get),
    );
    insert(
        table,
        SyscallDescriptor {
            name: "Neo.Storage.Put",
            args: 3,
            returns: 0,
            fee: SyscallFee::StoragePutPerKib,
            handler: put,
        },
    );
    insert(
        table,
        SyscallDescriptor::new("Neo.Storage.Delete", 2, 0, fees::STORAGE_ACCESS, delete),
    );
}

/// A context bound to the executing contract.
fn get_context(
    engine: &mut ExecutionEngine<'_>,
    _args: Vec<StackItem>,
) -> VmResult<Option<StackItem>> {
    Ok(Some(StackItem::StorageContext(StorageContext {
        script_hash: engine.script_hash(),
    })))
}

/// The contract behind the context must exist and have been deployed
/// with the storage property.
fn require_storage(engine: &ExecutionEngine<'_>, hash: UInt160) -> VmResult<()> {
    let contract = engine
        .ledger()
        .contracts()
        .try_get(&hash)
        .ok_or(VmError::ContractNotFound { hash })?;
    if !contract.has_storage() {
        return Err(VmError::ContractNoStorage { hash });
    }
    Ok(())
}

fn context_and_key(args: &[StackItem]) -> VmResult<(StorageContext, Vec<u8>)> {
    let ctx = args[0].as_storage_context()?;
    let key = args[1].as_bytes()?;
    if key.len() > MAX_STORAGE_KEY_SIZE {
        return Err(VmError::invalid_arguments(
            "Storage",
            format!("key of {} bytes is too long", key.len()),
        ));
    }
    Ok((ctx, key))
}

/// Missing keys read as the empty buffer.
fn get(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<Option<StackItem>> {
    let (ctx, key) = context_and_key(&args)?;
    require_storage(engine, ctx.script_hash)?;
    let value = engine
        .ledger()
        .storage()
        .try_get(&StorageKey::new(ctx.script_hash, key))
        .map(|item| item.value)
        .unwrap_or_default();
    Ok(Some(StackItem::from_bytes(value)))
}

fn put(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<Option<StackItem>> {
    let (ctx, key) = context_and_key(&args)?;
    let value = args[2].as_bytes()?;
    if value.len() > MAX_ITEM_SIZE {
        return Err(VmError::ItemTooLarge {
            size: value.len(),
            max: MAX_ITEM_SIZE,
        });
    }
    require_storage(engine, ctx.script_hash)?;
    engine.ledger_mut().storage_mut().upsert(
        StorageKey::new(ctx.script_hash, key),
        StorageItem::new(value),
    )?;
    Ok(None)
}

fn delete(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<Option<StackItem>> {
    let (ctx, key) = context_and_key(&args)?;
    require_storage(engine, ctx.script_hash)?;
    engine
        .ledger_mut()
        .storage_mut()
        .delete(&StorageKey::new(ctx.script_hash, key))?;
    Ok(None)
}
