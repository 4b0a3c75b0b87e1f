//! The system-call catalogue.
//!
//! Syscalls are named descriptors with the same accounting shape as
//! opcodes. The catalogue is built once at startup: a primary table
//! keyed by canonical name, and an alias table mapping every legacy
//! `AntShares.*` name onto its `Neo.*` counterpart. Lookup goes through
//! the alias table first; an unknown name faults the script.

pub mod accessors;
pub mod blockchain;
pub mod contract;
pub mod engine;
pub mod runtime;
pub mod state;
pub mod storage;

use crate::engine::ExecutionEngine;
use crate::error::{VmError, VmResult};
use crate::limits::fees;
use crate::stack_item::StackItem;
use hashbrown::HashMap;
use neo2_core::Fixed8;
use once_cell::sync::Lazy;

/// A system-call implementation.
pub type SyscallHandler =
    fn(&mut ExecutionEngine<'_>, Vec<StackItem>) -> VmResult<Option<StackItem>>;

/// How a syscall's fee is computed.
enum SyscallFee {
    Fixed(i64),
    /// Storage.Put: per started KiB of key plus value, resolved by
    /// peeking at the arguments before they are popped.
    StoragePutPerKib,
}

/// One catalogue entry.
pub struct SyscallDescriptor {
    pub name: &'static str,
    /// Items popped from the main stack, declaration order first.
    pub args: usize,
    /// Items pushed (0 or 1).
    pub returns: usize,
    fee: SyscallFee,
    handler: SyscallHandler,
}

impl SyscallDescriptor {
    fn new(
        name: &'static str,
        args: usize,
        returns: usize,
        fee_units: i64,
        handler: SyscallHandler,
    ) -> Self {
        Self {
            name,
            args,
            returns,
            fee: SyscallFee::Fixed(fee_units),
            handler,
        }
    }

    /// The fee of one invocation, given the current stack.
    pub fn fee(&self, engine: &ExecutionEngine<'_>) -> VmResult<Fixed8> {
        match self.fee {
            SyscallFee::Fixed(units) => Ok(Fixed8::from_raw(units)),
            SyscallFee::StoragePutPerKib => {
                let key = engine.peek(1)?.as_bytes()?;
                let value = engine.peek(2)?.as_bytes()?;
                let kib = ((key.len() + value.len()) / 1024) as i64 + 1;
                Ok(Fixed8::from_raw(fees::STORAGE_PUT_PER_KIB.saturating_mul(kib)))
            }
        }
    }
}

type Catalogue = HashMap<&'static str, SyscallDescriptor>;

fn insert(table: &mut Catalogue, descriptor: SyscallDescriptor) {
    table.insert(descriptor.name, descriptor);
}

/// Primary table, canonical names only.
static CATALOGUE: Lazy<Catalogue> = Lazy::new(|| {
    let mut table = Catalogue::new();
    runtime::register(&mut table);
    blockchain::register(&mut table);
    accessors::register(&mut table);
    state::register(&mut table);
    contract::register(&mut table);
    storage::register(&mut table);
    engine::register(&mut table);
    table
});

/// Legacy alias table: every `Neo.*` entry is also reachable under its
/// `AntShares.*` name.
static ALIASES: Lazy<HashMap<String, &'static str>> = Lazy::new(|| {
    CATALOGUE
        .keys()
        .filter_map(|name| {
            name.strip_prefix("Neo.")
                .map(|rest| (format!("AntShares.{rest}"), *name))
        })
        .collect()
});

/// Resolves raw name bytes to a catalogue entry.
pub(crate) fn resolve(name_bytes: &[u8]) -> VmResult<&'static SyscallDescriptor> {
    let name = std::str::from_utf8(name_bytes).map_err(|_| VmError::UnknownSyscall {
        name: format!("0x{}", hex_string(name_bytes)),
    })?;
    let canonical = ALIASES.get(name).copied().unwrap_or(name);
    CATALOGUE
        .get(canonical)
        .ok_or_else(|| VmError::UnknownSyscall {
            name: name.to_string(),
        })
}

/// Runs a resolved syscall and pushes its result, if any.
pub(crate) fn invoke(
    engine: &mut ExecutionEngine<'_>,
    name_bytes: &[u8],
    args: Vec<StackItem>,
) -> VmResult<()> {
    let descriptor = resolve(name_bytes)?;
    log::trace!("syscall {}", descriptor.name);
    if let Some(result) = (descriptor.handler)(engine, args)? {
        engine.push(result);
    }
    Ok(())
}

fn hex_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_names_resolve() {
        assert_eq!(resolve(b"Neo.Runtime.Log").unwrap().name, "Neo.Runtime.Log");
        assert_eq!(
            resolve(b"System.ExecutionEngine.GetScriptContainer")
                .unwrap()
                .name,
            "System.ExecutionEngine.GetScriptContainer"
        );
    }

    #[test]
    fn legacy_aliases_canonicalize() {
        assert_eq!(
            resolve(b"AntShares.Runtime.Log").unwrap().name,
            "Neo.Runtime.Log"
        );
        assert_eq!(
            resolve(b"AntShares.Blockchain.GetHeight").unwrap().name,
            "Neo.Blockchain.GetHeight"
        );
    }

    #[test]
    fn unknown_names_fault() {
        assert!(matches!(
            resolve(b"Neo.Runtime.NoSuchCall"),
            Err(VmError::UnknownSyscall { .. })
        ));
        assert!(matches!(
            resolve(&[0xFF, 0xFE]),
            Err(VmError::UnknownSyscall { .. })
        ));
    }
}
