//! Runtime group: trigger, witness checks, logs and notifications.

use super::{insert, Catalogue, SyscallDescriptor};
use crate::engine::ExecutionEngine;
use crate::error::{VmError, VmResult};
use crate::limits::fees;
use crate::script_builder::signature_script_hash;
use crate::stack_item::StackItem;
use neo2_core::UInt160;
use neo2_cryptography::ECPoint;

pub(super) fn register(table: &mut Catalogue) {
    insert(
        table,
        SyscallDescriptor::new(
            "Neo.Runtime.GetTrigger",
            0,
            1,
            fees::SYSCALL_DEFAULT,
            get_trigger,
        ),
    );
    insert(
        table,
        SyscallDescriptor::new(
            "Neo.Runtime.CheckWitness",
            1,
            1,
            fees::CHECK_WITNESS,
            check_witness,
        ),
    );
    insert(
        table,
        SyscallDescriptor::new("Neo.Runtime.Notify", 1, 0, fees::SYSCALL_RUNTIME, notify),
    );
    insert(
        table,
        SyscallDescriptor::new("Neo.Runtime.Log", 1, 0, fees::SYSCALL_RUNTIME, log),
    );
}

fn get_trigger(
    engine: &mut ExecutionEngine<'_>,
    _args: Vec<StackItem>,
) -> VmResult<Option<StackItem>> {
    Ok(Some(StackItem::from_int(
        engine.trigger().as_byte() as i64
    )))
}

/// Reduces the argument to a script hash (a 33-byte public key becomes
/// the hash of its signature redeem script) and tests it against the
/// container's authenticated set.
fn check_witness(
    engine: &mut ExecutionEngine<'_>,
    args: Vec<StackItem>,
) -> VmResult<Option<StackItem>> {
    let hash = witness_hash_argument(&args[0])?;
    Ok(Some(StackItem::from_bool(engine.check_witness(&hash)?)))
}

fn witness_hash_argument(item: &StackItem) -> VmResult<UInt160> {
    match item {
        StackItem::Uint160(hash) => Ok(*hash),
        StackItem::EcPoint(point) => Ok(signature_script_hash(point)),
        other => {
            let bytes = other.as_bytes()?;
            match bytes.len() {
                20 => Ok(UInt160::from_slice(&bytes)?),
                33 if bytes[0] != 0 => {
                    let point = ECPoint::from_bytes(&bytes)
                        .map_err(|_| VmError::bad_witness("malformed public key"))?;
                    Ok(signature_script_hash(&point))
                }
                _ => Err(VmError::bad_witness(
                    "argument is neither a script hash nor a public key",
                )),
            }
        }
    }
}

fn notify(
    engine: &mut ExecutionEngine<'_>,
    args: Vec<StackItem>,
) -> VmResult<Option<StackItem>> {
    let payload = args[0].to_contract_parameter();
    engine.emit_notification(payload);
    Ok(None)
}

fn log(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<Option<StackItem>> {
    let bytes = args[0].as_bytes()?;
    engine.emit_log(String::from_utf8_lossy(&bytes).into_owned());
    Ok(None)
}
