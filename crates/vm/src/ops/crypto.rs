//! Digest and signature opcodes.

use crate::engine::ExecutionEngine;
use crate::error::{VmError, VmResult};
use crate::stack_item::StackItem;
use neo2_cryptography as crypto;

pub(crate) fn sha1(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let data = args[0].as_bytes()?;
    engine.push(StackItem::from_bytes(crypto::sha1(&data).to_vec()));
    Ok(())
}

pub(crate) fn sha256(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let data = args[0].as_bytes()?;
    engine.push(StackItem::from_bytes(crypto::sha256(&data).to_vec()));
    Ok(())
}

pub(crate) fn hash160(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let data = args[0].as_bytes()?;
    engine.push(StackItem::from_bytes(crypto::hash160(&data).to_vec()));
    Ok(())
}

pub(crate) fn hash256(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let data = args[0].as_bytes()?;
    engine.push(StackItem::from_bytes(crypto::hash256(&data).to_vec()));
    Ok(())
}

/// CHECKSIG: verifies one signature over the container's signed message.
/// Malformed keys or signatures are a false result, not a fault.
pub(crate) fn check_sig(engine: &mut ExecutionEngine<'_>, args: Vec<StackItem>) -> VmResult<()> {
    let public_key = args[0].as_bytes()?;
    let signature = args[1].as_bytes()?;
    let message = engine.container_message()?;
    let valid = crypto::verify_signature(&public_key, &signature, &message);
    engine.push(StackItem::from_bool(valid));
    Ok(())
}

/// CHECKMULTISIG: m-of-n verification with a single forward cursor over
/// both groups. Keys and signatures must be supplied in matching order;
/// each key is tried at most once.
pub(crate) fn check_multisig(
    engine: &mut ExecutionEngine<'_>,
    args: Vec<StackItem>,
) -> VmResult<()> {
    let (keys, consumed) = take_group(&args, 0)?;
    let (signatures, _) = take_group(&args, consumed)?;
    let message = engine.container_message()?;

    let mut sig_index = 0;
    let mut key_index = 0;
    let mut valid = true;
    while valid && sig_index < signatures.len() && key_index < keys.len() {
        if crypto::verify_signature(&keys[key_index], &signatures[sig_index], &message) {
            sig_index += 1;
        }
        key_index += 1;
        // Fewer keys left than signatures: cannot succeed any more.
        if signatures.len() - sig_index > keys.len() - key_index {
            valid = false;
        }
    }
    engine.push(StackItem::from_bool(valid && sig_index == signatures.len()));
    Ok(())
}

/// Reads one group out of the popped arguments: either a single Array
/// item, or a count followed by that many items (restored to script
/// order). Returns the member byte blobs and the index after the group.
fn take_group(args: &[StackItem], start: usize) -> VmResult<(Vec<Vec<u8>>, usize)> {
    match &args[start] {
        StackItem::Array(items) | StackItem::Struct(items) => {
            let members = items
                .borrow()
                .iter()
                .map(StackItem::as_bytes)
                .collect::<VmResult<Vec<_>>>()?;
            Ok((members, start + 1))
        }
        counted => {
            let count = counted.as_index("CHECKMULTISIG")?;
            if start + 1 + count > args.len() {
                return Err(VmError::invalid_arguments(
                    "CHECKMULTISIG",
                    "group count exceeds popped arguments",
                ));
            }
            let mut members = args[start + 1..start + 1 + count]
                .iter()
                .map(StackItem::as_bytes)
                .collect::<VmResult<Vec<_>>>()?;
            // Popped top-first; script order is the reverse.
            members.reverse();
            Ok((members, start + 1 + count))
        }
    }
}
