//! Resource limits and the gas schedule.
//!
//! Both are consensus-critical: every implementation must fault on the
//! same step with the same remaining gas.

/// Combined size limit of the two operand stacks.
pub const MAX_STACK_SIZE: usize = 2048;

/// Depth limit of the invocation stack.
pub const MAX_INVOCATION_STACK_SIZE: usize = 1024;

/// Element-count limit for arrays and structs.
pub const MAX_ARRAY_SIZE: usize = 1024;

/// Byte-length limit for a single stack item.
pub const MAX_ITEM_SIZE: usize = 1024 * 1024;

/// Byte-length limit for a loadable script.
pub const MAX_SCRIPT_LENGTH: usize = 1024 * 1024;

/// Byte-length limit for a syscall name.
pub const MAX_SYSCALL_NAME: usize = 252;

/// Largest shift count SHL/SHR accept, in either direction.
pub const MAX_SHIFT: i64 = 256;

/// Per-operation fees in raw 10^-8 gas units.
pub mod fees {
    /// Plain opcodes: pushes, arithmetic, stack shuffling.
    pub const DEFAULT: i64 = 1;
    /// SHA-1 / SHA-256.
    pub const DIGEST: i64 = 10;
    /// HASH160 / HASH256 (double digests).
    pub const DOUBLE_DIGEST: i64 = 20;
    /// One ECDSA verification.
    pub const CHECKSIG: i64 = 1_000;
    /// CHECKMULTISIG, multiplied by the number of public keys.
    pub const CHECKMULTISIG_PER_KEY: i64 = 1_000;
    /// Loading another contract (APPCALL/TAILCALL).
    pub const APPCALL: i64 = 10;

    /// Cheap syscalls: accessors, trigger and hash getters.
    pub const SYSCALL_DEFAULT: i64 = 1;
    /// Runtime.Notify / Runtime.Log / context handouts.
    pub const SYSCALL_RUNTIME: i64 = 10;
    /// Single-entity ledger reads.
    pub const SYSCALL_READ: i64 = 100;
    /// Bulk ledger reads (blocks, validators, references).
    pub const SYSCALL_READ_BULK: i64 = 200;
    /// Runtime.CheckWitness (resolves the container's witness set).
    pub const CHECK_WITNESS: i64 = 200;
    /// Storage.Get / Storage.Delete.
    pub const STORAGE_ACCESS: i64 = 100;
    /// Storage.Put, per started KiB of key plus value.
    pub const STORAGE_PUT_PER_KIB: i64 = 1_000;
    /// Account.SetVotes.
    pub const SET_VOTES: i64 = 10_000;
    /// Validator.Register (1 gas).
    pub const REGISTER_VALIDATOR: i64 = 100_000_000;
    /// Asset.Create / Asset.Renew / Contract.Create / Contract.Migrate
    /// (5 gas).
    pub const STATE_CREATE: i64 = 500_000_000;
}
