//! Entity accessor groups: Header, Block, Transaction, Attribute, Input,
//! Output, Account (read side), Asset, Contract.GetScript.

use super::blockchain::uint256_argument;
use super::{insert, Catalogue, SyscallDescriptor};
use crate::engine::ExecutionEngine;
use crate::error::{VmError, VmResult};
use crate::limits::fees;
use crate::stack_item::StackItem;
use std::sync::Arc;

pub(super) fn register(table: &mut Catalogue) {
    let d = fees::SYSCALL_DEFAULT;

    // Header accessors also accept Block items.
    insert(table, SyscallDescriptor::new("Neo.Header.GetHash", 1, 1, d, header_get_hash));
    insert(table, SyscallDescriptor::new("Neo.Header.GetVersion", 1, 1, d, header_get_version));
    insert(table, SyscallDescriptor::new("Neo.Header.GetPrevHash", 1, 1, d, header_get_prev_hash));
    insert(
        table,
        SyscallDescriptor::new("Neo.Header.GetMerkleRoot", 1, 1, d, header_get_merkle_root),
    );
    insert(table, SyscallDescriptor::new("Neo.Header.GetTimestamp", 1, 1, d, header_get_timestamp));
    insert(table, SyscallDescriptor::new("Neo.Header.GetIndex", 1, 1, d, header_get_index));
    insert(
        table,
        SyscallDescriptor::new("Neo.Header.GetConsensusData", 1, 1, d, header_get_consensus_data),
    );
    insert(
        table,
        SyscallDescriptor::new("Neo.Header.GetNextConsensus", 1, 1, d, header_get_next_consensus),
    );

    insert(
        table,
        SyscallDescriptor::new("Neo.Block.GetTransactionCount", 1, 1, d, block_get_transaction_count),
    );
    insert(
        table,
        SyscallDescriptor::new(
            "Neo.Block.GetTransactions",
            1,
            1,
            fees::SYSCALL_RUNTIME,
            block_get_transactions,
        ),
    );
    insert(
        table,
        SyscallDescriptor::new("Neo.Block.GetTransaction", 2, 1, d, block_get_transaction),
    );

    insert(table, SyscallDescriptor::new("Neo.Transaction.GetHash", 1, 1, d, tx_get_hash));
    insert(table, SyscallDescriptor::new("Neo.Transaction.GetType", 1, 1, d, tx_get_type));
    insert(
        table,
        SyscallDescriptor::new("Neo.Transaction.GetAttributes", 1, 1, d, tx_get_attributes),
    );
    insert(table, SyscallDescriptor::new("Neo.Transaction.GetInputs", 1, 1, d, tx_get_inputs));
    insert(table, SyscallDescriptor::new("Neo.Transaction.GetOutputs", 1, 1, d, tx_get_outputs));
    insert(
        table,
        SyscallDescriptor::new(
            "Neo.Transaction.GetReferences",
            1,
            1,
            fees::SYSCALL_READ_BULK,
            tx_get_references,
        ),
    );

    insert(table, SyscallDescriptor::new("Neo.Attribute.GetUsage", 1, 1, d, attribute_get_usage));
    insert(table, SyscallDescriptor::new("Neo.Attribute.GetData", 1, 1, d, attribute_get_data));

    insert(table, SyscallDescriptor::new("Neo.Input.GetHash", 1, 1, d, input_get_hash));
    insert(table, SyscallDescriptor::new("Neo.Input.GetIndex", 1, 1, d, input_get_index));

    insert(table, SyscallDescriptor::new("Neo.Output.GetAssetId", 1, 1, d, output_get_asset_id));
    insert(table, SyscallDescriptor::new("Neo.Output.GetValue", 1, 1, d, output_get_value));
    insert(
        table,
        SyscallDescriptor::new("Neo.Output.GetScriptHash", 1, 1, d, output_get_script_hash),
    );

    insert(
        table,
        SyscallDescriptor::new("Neo.Account.GetScriptHash", 1, 1, d, account_get_script_hash),
    );
    insert(table, SyscallDescriptor::new("Neo.Account.GetVotes", 1, 1, d, account_get_votes));
    insert(table, SyscallDescriptor::new("Neo.Account.GetBalance", 2, 1, d, account_get_balance));

    insert(table, SyscallDescriptor::new("Neo.Asset.GetAssetId", 1, 1, d, asset_get_asset_id));
    insert(table, SyscallDescriptor::new("Neo.Asset.GetAssetType", 1, 1, d, asset_get_asset_type));
    insert(table, SyscallDescriptor::new("Neo.Asset.GetAmount", 1, 1, d, asset_get_amount));
    insert(table, SyscallDescriptor::new("Neo.Asset.GetAvailable", 1, 1, d, asset_get_available));
    insert(table, SyscallDescriptor::new("Neo.Asset.GetPrecision", 1, 1, d, asset_get_precision));
    insert(table, SyscallDescriptor::new("Neo.Asset.GetOwner", 1, 1, d, asset_get_owner));
    insert(table, SyscallDescriptor::new("Neo.Asset.GetAdmin", 1, 1, d, asset_get_admin));
    insert(table, SyscallDescriptor::new("Neo.Asset.GetIssuer", 1, 1, d, asset_get_issuer));

    insert(table, SyscallDescriptor::new("Neo.Contract.GetScript", 1, 1, d, contract_get_script));
}

type Args = Vec<StackItem>;
type Out = VmResult<Option<StackItem>>;

fn header_get_hash(_engine: &mut ExecutionEngine<'_>, args: Args) -> Out {
    let header = args[0].as_header()?;
    Ok(Some(StackItem::Uint256(header.hash()?)))
}

fn header_get_version(_engine: &mut ExecutionEngine<'_>, args: Args) -> Out {
    Ok(Some(StackItem::from_int(args[0].as_header()?.version as i64)))
}

fn header_get_prev_hash(_engine: &mut ExecutionEngine<'_>, args: Args) -> Out {
    Ok(Some(StackItem::Uint256(args[0].as_header()?.prev_hash)))
}

fn header_get_merkle_root(_engine: &mut ExecutionEngine<'_>, args: Args) -> Out {
    Ok(Some(StackItem::Uint256(args[0].as_header()?.merkle_root)))
}

fn header_get_timestamp(_engine: &mut ExecutionEngine<'_>, args: Args) -> Out {
    Ok(Some(StackItem::from_int(args[0].as_header()?.timestamp as i64)))
}

fn header_get_index(_engine: &mut ExecutionEngine<'_>, args: Args) -> Out {
    Ok(Some(StackItem::from_int(args[0].as_header()?.index as i64)))
}

fn header_get_consensus_data(_engine: &mut ExecutionEngine<'_>, args: Args) -> Out {
    Ok(Some(StackItem::from_int(args[0].as_header()?.consensus_data)))
}

fn header_get_next_consensus(_engine: &mut ExecutionEngine<'_>, args: Args) -> Out {
    Ok(Some(StackItem::Uint160(args[0].as_header()?.next_consensus)))
}

fn block_get_transaction_count(_engine: &mut ExecutionEngine<'_>, args: Args) -> Out {
    let block = args[0].as_block()?;
    Ok(Some(StackItem::from_int(block.transactions.len() as i64)))
}

fn block_get_transactions(_engine: &mut ExecutionEngine<'_>, args: Args) -> Out {
    let block = args[0].as_block()?;
    let items = block
        .transactions
        .iter()
        .map(|tx| StackItem::Transaction(Arc::new(tx.clone())))
        .collect();
    Ok(Some(StackItem::new_array(items)))
}

fn block_get_transaction(_engine: &mut ExecutionEngine<'_>, args: Args) -> Out {
    let block = args[0].as_block()?;
    let index = args[1].as_index("Block.GetTransaction")?;
    let tx = block
        .transactions
        .get(index)
        .cloned()
        .ok_or(VmError::InvalidIndex {
            index: index as i64,
            len: block.transactions.len(),
        })?;
    Ok(Some(StackItem::Transaction(Arc::new(tx))))
}

fn tx_get_hash(_engine: &mut ExecutionEngine<'_>, args: Args) -> Out {
    let tx = args[0].as_transaction()?;
    Ok(Some(StackItem::Uint256(tx.hash()?)))
}

fn tx_get_type(_engine: &mut ExecutionEngine<'_>, args: Args) -> Out {
    let tx = args[0].as_transaction()?;
    Ok(Some(StackItem::from_int(tx.tx_type as u8 as i64)))
}

fn tx_get_attributes(_engine: &mut ExecutionEngine<'_>, args: Args) -> Out {
    let tx = args[0].as_transaction()?;
    let items = tx
        .attributes
        .iter()
        .map(|attr| StackItem::Attribute(Arc::new(attr.clone())))
        .collect();
    Ok(Some(StackItem::new_array(items)))
}

fn tx_get_inputs(_engine: &mut ExecutionEngine<'_>, args: Args) -> Out {
    let tx = args[0].as_transaction()?;
    let items = tx
        .inputs
        .iter()
        .map(|input| StackItem::Input(Arc::new(*input)))
        .collect();
    Ok(Some(StackItem::new_array(items)))
}

fn tx_get_outputs(_engine: &mut ExecutionEngine<'_>, args: Args) -> Out {
    let tx = args[0].as_transaction()?;
    let items = tx
        .outputs
        .iter()
        .map(|output| StackItem::Output(Arc::new(*output)))
        .collect();
    Ok(Some(StackItem::new_array(items)))
}

/// The outputs this transaction's inputs spend, resolved through the
/// ledger in input order.
fn tx_get_references(engine: &mut ExecutionEngine<'_>, args: Args) -> Out {
    let tx = args[0].as_transaction()?;
    let mut items = Vec::with_capacity(tx.inputs.len());
    for input in &tx.inputs {
        let output = engine
            .ledger()
            .output(&input.prev_hash, input.prev_index)
            .ok_or_else(|| {
                VmError::invalid_arguments("GetReferences", "unresolvable input reference")
            })?;
        items.push(StackItem::Output(Arc::new(output)));
    }
    Ok(Some(StackItem::new_array(items)))
}

fn attribute_get_usage(_engine: &mut ExecutionEngine<'_>, args: Args) -> Out {
    let attr = args[0].as_attribute()?;
    Ok(Some(StackItem::from_int(attr.usage as u8 as i64)))
}

fn attribute_get_data(_engine: &mut ExecutionEngine<'_>, args: Args) -> Out {
    let attr = args[0].as_attribute()?;
    Ok(Some(StackItem::from_bytes(attr.data.clone())))
}

fn input_get_hash(_engine: &mut ExecutionEngine<'_>, args: Args) -> Out {
    Ok(Some(StackItem::Uint256(args[0].as_input()?.prev_hash)))
}

fn input_get_index(_engine: &mut ExecutionEngine<'_>, args: Args) -> Out {
    Ok(Some(StackItem::from_int(args[0].as_input()?.prev_index as i64)))
}

fn output_get_asset_id(_engine: &mut ExecutionEngine<'_>, args: Args) -> Out {
    Ok(Some(StackItem::Uint256(args[0].as_output()?.asset_id)))
}

fn output_get_value(_engine: &mut ExecutionEngine<'_>, args: Args) -> Out {
    Ok(Some(StackItem::from_int(args[0].as_output()?.value.raw())))
}

fn output_get_script_hash(_engine: &mut ExecutionEngine<'_>, args: Args) -> Out {
    Ok(Some(StackItem::Uint160(args[0].as_output()?.script_hash)))
}

fn account_get_script_hash(_engine: &mut ExecutionEngine<'_>, args: Args) -> Out {
    Ok(Some(StackItem::Uint160(args[0].as_account()?.script_hash)))
}

fn account_get_votes(_engine: &mut ExecutionEngine<'_>, args: Args) -> Out {
    let account = args[0].as_account()?;
    let items = account
        .votes
        .iter()
        .map(|point| StackItem::EcPoint(point.clone()))
        .collect();
    Ok(Some(StackItem::new_array(items)))
}

fn account_get_balance(_engine: &mut ExecutionEngine<'_>, args: Args) -> Out {
    let account = args[0].as_account()?;
    let asset_id = uint256_argument(&args[1])?;
    Ok(Some(StackItem::from_int(account.balance(&asset_id).raw())))
}

fn asset_get_asset_id(_engine: &mut ExecutionEngine<'_>, args: Args) -> Out {
    Ok(Some(StackItem::Uint256(args[0].as_asset()?.hash)))
}

fn asset_get_asset_type(_engine: &mut ExecutionEngine<'_>, args: Args) -> Out {
    Ok(Some(StackItem::from_int(args[0].as_asset()?.asset_type as u8 as i64)))
}

fn asset_get_amount(_engine: &mut ExecutionEngine<'_>, args: Args) -> Out {
    Ok(Some(StackItem::from_int(args[0].as_asset()?.amount.raw())))
}

fn asset_get_available(_engine: &mut ExecutionEngine<'_>, args: Args) -> Out {
    Ok(Some(StackItem::from_int(args[0].as_asset()?.available.raw())))
}

fn asset_get_precision(_engine: &mut ExecutionEngine<'_>, args: Args) -> Out {
    Ok(Some(StackItem::from_int(args[0].as_asset()?.precision as i64)))
}

fn asset_get_owner(_engine: &mut ExecutionEngine<'_>, args: Args) -> Out {
    Ok(Some(StackItem::EcPoint(args[0].as_asset()?.owner.clone())))
}

fn asset_get_admin(_engine: &mut ExecutionEngine<'_>, args: Args) -> Out {
    Ok(Some(StackItem::Uint160(args[0].as_asset()?.admin)))
}

fn asset_get_issuer(_engine: &mut ExecutionEngine<'_>, args: Args) -> Out {
    Ok(Some(StackItem::Uint160(args[0].as_asset()?.issuer)))
}

fn contract_get_script(_engine: &mut ExecutionEngine<'_>, args: Args) -> Out {
    Ok(Some(StackItem::from_bytes(args[0].as_contract()?.script.clone())))
}
