//! Contract group: deployment, migration, destruction and the storage
//! context capability.

use super::{insert, Catalogue, SyscallDescriptor};
use crate::engine::ExecutionEngine;
use crate::error::{VmError, VmResult};
use crate::limits::{fees, MAX_SCRIPT_LENGTH};
use crate::stack_item::{StackItem, StorageContext};
use neo2_core::{Contract, ContractParameterType, ContractPropertyState, StorageKey};
use num_traits::ToPrimitive;
use std::sync::Arc;

pub(super) fn register(table: &mut Catalogue) {
    insert(
        table,
        SyscallDescriptor::new("Neo.Contract.Create", 9, 1, fees::STATE_CREATE, create),
    );
    insert(
        table,
        SyscallDescriptor::new("Neo.Contract.Migrate", 9, 1, fees::STATE_CREATE, migrate),
    );
    insert(
        table,
        SyscallDescriptor::new("Neo.Contract.Destroy", 0, 0, fees::SYSCALL_READ, destroy),
    );
    insert(
        table,
        SyscallDescriptor::new(
            "Neo.Contract.GetStorageContext",
            1,
            1,
            fees::SYSCALL_RUNTIME,
            get_storage_context,
        ),
    );
}

fn utf8(item: &StackItem) -> VmResult<String> {
    Ok(String::from_utf8_lossy(&item.as_bytes()?).into_owned())
}

/// Decodes the nine Create/Migrate arguments into contract state.
fn parse_contract(args: &[StackItem]) -> VmResult<Contract> {
    let script = args[0].as_bytes()?;
    if script.len() > MAX_SCRIPT_LENGTH {
        return Err(VmError::ScriptTooLarge {
            size: script.len(),
            max: MAX_SCRIPT_LENGTH,
        });
    }

    let parameter_list = args[1]
        .as_bytes()?
        .iter()
        .map(|&byte| {
            ContractParameterType::try_from(byte)
                .map_err(|_| VmError::InvalidContractParameterType { value: byte })
        })
        .collect::<VmResult<Vec<_>>>()?;

    let return_byte = args[2]
        .as_int()?
        .to_u8()
        .ok_or(VmError::InvalidContractParameterType { value: u8::MAX })?;
    let return_type = ContractParameterType::try_from(return_byte)
        .map_err(|_| VmError::InvalidContractParameterType { value: return_byte })?;

    let property_bits = args[3]
        .as_int()?
        .to_u8()
        .ok_or_else(|| VmError::invalid_arguments("Contract.Create", "properties out of range"))?;
    let properties = ContractPropertyState::from_bits_truncate(property_bits);

    Ok(Contract {
        script,
        parameter_list,
        return_type,
        properties,
        name: utf8(&args[4])?,
        code_version: utf8(&args[5])?,
        author: utf8(&args[6])?,
        email: utf8(&args[7])?,
        description: utf8(&args[8])?,
    })
}

/// Upserts the contract keyed by its script hash. When the hash is new,
/// the creating invocation is recorded so GetStorageContext can later
/// authorize it; an existing contract is returned untouched.
fn deploy(
    engine: &mut ExecutionEngine<'_>,
    args: &[StackItem],
) -> VmResult<(Contract, bool)> {
    let contract = parse_contract(args)?;
    let hash = contract.script_hash();
    match engine.ledger().contracts().try_get(&hash) {
        Some(existing) => Ok((existing, false)),
        None => {
            engine
                .ledger_mut()
                .contracts_mut()
                .upsert(hash, contract.clone())?;
            let creator = engine.script_hash();
            engine.created_contracts.insert(hash, creator);
            Ok((contract, true))
        }
    }
}

fn create(
    engine: &mut ExecutionEngine<'_>,
    args: Vec<StackItem>,
) -> VmResult<Option<StackItem>> {
    let (contract, _) = deploy(engine, &args)?;
    Ok(Some(StackItem::Contract(Arc::new(contract))))
}

/// Create, plus storage relocation: a freshly created contract with
/// storage inherits every storage item of the migrating contract, keys
/// preserved.
fn migrate(
    engine: &mut ExecutionEngine<'_>,
    args: Vec<StackItem>,
) -> VmResult<Option<StackItem>> {
    let (contract, created) = deploy(engine, &args)?;
    if created && contract.has_storage() {
        let source = engine.script_hash();
        let target = contract.script_hash();
        let items = engine.ledger().storage().find(&source);
        for (key, item) in items {
            engine
                .ledger_mut()
                .storage_mut()
                .upsert(StorageKey::new(target, key.key), item)?;
        }
    }
    Ok(Some(StackItem::Contract(Arc::new(contract))))
}

/// Removes the executing contract and, when it had storage, every one of
/// its storage items.
fn destroy(
    engine: &mut ExecutionEngine<'_>,
    _args: Vec<StackItem>,
) -> VmResult<Option<StackItem>> {
    let hash = engine.script_hash();
    let Some(contract) = engine.ledger().contracts().try_get(&hash) else {
        return Ok(None);
    };
    engine.ledger_mut().contracts_mut().delete(&hash)?;
    if contract.has_storage() {
        let items = engine.ledger().storage().find(&hash);
        for (key, _) in items {
            engine.ledger_mut().storage_mut().delete(&key)?;
        }
    }
    Ok(None)
}

/// Hands out a contract's storage context, but only to the invocation
/// that created the contract during this run.
fn get_storage_context(
    engine: &mut ExecutionEngine<'_>,
    args: Vec<StackItem>,
) -> VmResult<Option<StackItem>> {
    let contract = args[0].as_contract()?;
    let hash = contract.script_hash();
    match engine.created_contracts.get(&hash) {
        Some(creator) if *creator == engine.script_hash() => Ok(Some(
            StackItem::StorageContext(StorageContext { script_hash: hash }),
        )),
        _ => Err(VmError::StorageContextDenied { hash }),
    }
}
