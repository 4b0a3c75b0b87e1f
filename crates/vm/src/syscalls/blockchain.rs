//! Blockchain group: top-level ledger readers.

use super::{insert, Catalogue, SyscallDescriptor};
use crate::engine::ExecutionEngine;
use crate::error::{VmError, VmResult};
use crate::limits::fees;
use crate::stack_item::{bigint_from_bytes, StackItem};
use neo2_core::{Account, UInt256};
use num_traits::ToPrimitive;
use std::sync::Arc;

pub(super) fn register(table: &mut Catalogue) {
    insert(
        table,
        SyscallDescriptor::new(
            "Neo.Blockchain.GetHeight",
            0,
            1,
            fees::SYSCALL_DEFAULT,
            get_height,
        ),
    );
    insert(
        table,
        SyscallDescriptor::new(
            "Neo.Blockchain.GetHeader",
            1,
            1,
            fees::SYSCALL_READ,
            get_header,
        ),
    );
    insert(
        table,
        SyscallDescriptor::new(
            "Neo.Blockchain.GetBlock",
            1,
            1,
            fees::SYSCALL_READ_BULK,
            get_block,
        ),
    );
    insert(
        table,
        SyscallDescriptor::new(
            "Neo.Blockchain.GetTransaction",
            1,
            1,
            fees::SYSCALL_READ,
            get_transaction,
        ),
    );
    insert(
        table,
        SyscallDescriptor::new(
            "Neo.Blockchain.GetAccount",
            1,
            1,
            fees::SYSCALL_READ,
            get_account,
        ),
    );
    insert(
        table,
        SyscallDescriptor::new(
            "Neo.Blockchain.GetValidators",
            0,
            1,
            fees::SYSCALL_READ_BULK,
            get_validators,
        ),
    );
    insert(
        table,
        SyscallDescriptor::new(
            "Neo.Blockchain.GetAsset",
            1,
            1,
            fees::SYSCALL_READ,
            get_asset,
        ),
    );
    insert(
        table,
        SyscallDescriptor::new(
            "Neo.Blockchain.GetContract",
            1,
            1,
            fees::SYSCALL_READ,
            get_contract,
        ),
    );
}

/// A 256-bit key argument: scripts push hashes in display (reversed)
/// order, wrapper items are already internal.
pub(crate) fn uint256_argument(item: &StackItem) -> VmResult<UInt256> {
    match item {
        StackItem::Uint256(hash) => Ok(*hash),
        other => {
            let bytes = other.as_bytes()?;
            Ok(UInt256::from_reversed_slice(&bytes)?)
        }
    }
}

/// GetHeader/GetBlock accept a 32-byte hash (reversed) or an up-to-5-byte
/// little-endian block index.
fn hash_or_index(
    engine: &ExecutionEngine<'_>,
    item: &StackItem,
    op: &'static str,
) -> VmResult<UInt256> {
    if let StackItem::Uint256(hash) = item {
        return Ok(*hash);
    }
    let bytes = item.as_bytes()?;
    if bytes.len() == 32 {
        return Ok(UInt256::from_reversed_slice(&bytes)?);
    }
    if bytes.len() <= 5 {
        let index = bigint_from_bytes(&bytes)
            .to_u32()
            .ok_or_else(|| VmError::invalid_arguments(op, "index out of range"))?;
        return engine
            .ledger()
            .block_hash_at(index)
            .ok_or_else(|| VmError::invalid_arguments(op, format!("unknown block index {index}")));
    }
    Err(VmError::invalid_arguments(
        op,
        format!("{} bytes is neither a hash nor an index", bytes.len()),
    ))
}

fn get_height(
    engine: &mut ExecutionEngine<'_>,
    _args: Vec<StackItem>,
) -> VmResult<Option<StackItem>> {
    Ok(Some(StackItem::from_int(
        engine.ledger().current_height() as i64
    )))
}

fn get_header(
    engine: &mut ExecutionEngine<'_>,
    args: Vec<StackItem>,
) -> VmResult<Option<StackItem>> {
    let hash = hash_or_index(engine, &args[0], "GetHeader")?;
    let header = engine.ledger().headers().get(&hash)?;
    Ok(Some(StackItem::Header(Arc::new(header))))
}

fn get_block(
    engine: &mut ExecutionEngine<'_>,
    args: Vec<StackItem>,
) -> VmResult<Option<StackItem>> {
    let hash = hash_or_index(engine, &args[0], "GetBlock")?;
    let block = engine.ledger().blocks().get(&hash)?;
    Ok(Some(StackItem::Block(Arc::new(block))))
}

fn get_transaction(
    engine: &mut ExecutionEngine<'_>,
    args: Vec<StackItem>,
) -> VmResult<Option<StackItem>> {
    let hash = uint256_argument(&args[0])?;
    let tx = engine.ledger().transactions().get(&hash)?;
    Ok(Some(StackItem::Transaction(Arc::new(tx))))
}

/// Unknown accounts materialize as blank state rather than faulting.
fn get_account(
    engine: &mut ExecutionEngine<'_>,
    args: Vec<StackItem>,
) -> VmResult<Option<StackItem>> {
    let hash = args[0].as_uint160()?;
    let account = engine
        .ledger()
        .accounts()
        .try_get(&hash)
        .unwrap_or_else(|| Account::new(hash));
    Ok(Some(StackItem::Account(Arc::new(account))))
}

fn get_validators(
    engine: &mut ExecutionEngine<'_>,
    _args: Vec<StackItem>,
) -> VmResult<Option<StackItem>> {
    let points = engine
        .ledger()
        .validators()
        .all()
        .into_iter()
        .filter(|v| v.registered)
        .map(|v| StackItem::EcPoint(v.public_key))
        .collect();
    Ok(Some(StackItem::new_array(points)))
}

fn get_asset(
    engine: &mut ExecutionEngine<'_>,
    args: Vec<StackItem>,
) -> VmResult<Option<StackItem>> {
    let hash = uint256_argument(&args[0])?;
    let asset = engine.ledger().assets().get(&hash)?;
    Ok(Some(StackItem::Asset(Arc::new(asset))))
}

fn get_contract(
    engine: &mut ExecutionEngine<'_>,
    args: Vec<StackItem>,
) -> VmResult<Option<StackItem>> {
    let hash = args[0].as_uint160()?;
    let contract = engine.ledger().contracts().get(&hash)?;
    Ok(Some(StackItem::Contract(Arc::new(contract))))
}
