//! The VM fault taxonomy.
//!
//! Every variant terminates the entire invocation tree: there is no
//! opcode-level catch, outer frames simply unwind and the run surfaces a
//! fault state with the error preserved.

use neo2_core::{CoreError, Fixed8, UInt160};
use neo2_ledger::LedgerError;
use thiserror::Error;

/// Faults raised while decoding or executing a script.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VmError {
    // --- decode faults ---
    /// A byte that maps to no opcode.
    #[error("unknown opcode {opcode:#04x} at position {position}")]
    UnknownOp { opcode: u8, position: usize },

    /// An instruction's immediates run past the end of the script.
    #[error("script ends inside the instruction at position {position}")]
    CodeOverflow { position: usize },

    /// A non-push opcode inside a push-only script.
    #[error("opcode {opcode:#04x} is not allowed in a push-only script")]
    PushOnlyViolation { opcode: u8 },

    /// A syscall name with no catalogue entry.
    #[error("unknown syscall: {name}")]
    UnknownSyscall { name: String },

    // --- type faults ---
    /// A coercion outside the declared source/target pairs.
    #[error("cannot interpret {actual} as {expected}")]
    InvalidType {
        expected: &'static str,
        actual: &'static str,
    },

    /// An element index outside a collection.
    #[error("index {index} out of range for length {len}")]
    InvalidIndex { index: i64, len: usize },

    /// A byte that maps to no contract parameter type.
    #[error("invalid contract parameter type {value:#04x}")]
    InvalidContractParameterType { value: u8 },

    /// A byte that maps to no asset type, or a native-token type.
    #[error("invalid asset type {value:#04x}")]
    InvalidAssetType { value: u8 },

    /// The operation needs a different script container kind.
    #[error("operation requires a {expected} script container")]
    InvalidScriptContainer { expected: &'static str },

    // --- bounds faults ---
    /// A count or index argument below zero.
    #[error("{op} argument must be non-negative, got {value}")]
    NegativeArgument { op: &'static str, value: i64 },

    /// Malformed operation arguments not covered by a more specific fault.
    #[error("invalid {op} arguments: {reason}")]
    InvalidArguments { op: &'static str, reason: String },

    /// Popping more items than the stack holds.
    #[error("stack underflow: needed {needed} item(s), had {available}")]
    StackUnderflow { needed: usize, available: usize },

    // --- resource faults ---
    /// The step would push the combined stacks past the limit.
    #[error("stack size would reach {size}, limit is {max}")]
    StackOverflow { size: usize, max: usize },

    /// The step would nest invocations past the limit.
    #[error("invocation depth would reach {depth}, limit is {max}")]
    InvocationOverflow { depth: usize, max: usize },

    /// The per-step fee exceeds the remaining gas.
    #[error("out of gas: fee {needed}, remaining {left}")]
    OutOfGas { needed: Fixed8, left: Fixed8 },

    /// A byte item above the item size limit.
    #[error("item of {size} bytes exceeds limit {max}")]
    ItemTooLarge { size: usize, max: usize },

    /// An array above the element count limit.
    #[error("array of {size} items exceeds limit {max}")]
    ArrayTooLarge { size: usize, max: usize },

    /// A script above the script size limit.
    #[error("script of {size} bytes exceeds limit {max}")]
    ScriptTooLarge { size: usize, max: usize },

    // --- semantic faults ---
    /// A required witness check failed.
    #[error("witness check failed: {reason}")]
    BadWitness { reason: &'static str },

    /// Storage access against a contract deployed without storage.
    #[error("contract {hash} has no storage")]
    ContractNoStorage { hash: UInt160 },

    /// A storage context requested by a script that did not create the
    /// contract.
    #[error("storage context of {hash} is not available to the executing contract")]
    StorageContextDenied { hash: UInt160 },

    /// A state change against a frozen account.
    #[error("account {hash} is frozen")]
    AccountFrozen { hash: UInt160 },

    /// A vote list above the limit.
    #[error("vote list of {count} exceeds limit {max}")]
    TooManyVotes { count: usize, max: usize },

    /// Voting from an account holding none of the governing token.
    #[error("account holds no governing token and cannot vote")]
    NotEligibleToVote,

    /// A contract call against an unknown script hash.
    #[error("contract not found: {hash}")]
    ContractNotFound { hash: UInt160 },

    /// Integer division or modulo by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A shift count outside the permitted window.
    #[error("shift count {value} outside permitted range of {max}")]
    ShiftOutOfRange { value: i64, max: i64 },

    // --- explicit faults ---
    /// The THROW opcode.
    #[error("THROW executed")]
    Throw,

    /// THROWIFNOT with a false condition.
    #[error("THROWIFNOT condition was false")]
    ThrowIfNot,

    // --- lower layers ---
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl VmError {
    pub fn invalid_type(expected: &'static str, actual: &'static str) -> Self {
        Self::InvalidType { expected, actual }
    }

    pub fn invalid_arguments<S: Into<String>>(op: &'static str, reason: S) -> Self {
        Self::InvalidArguments {
            op,
            reason: reason.into(),
        }
    }

    pub fn negative_argument(op: &'static str, value: i64) -> Self {
        Self::NegativeArgument { op, value }
    }

    pub fn stack_underflow(needed: usize, available: usize) -> Self {
        Self::StackUnderflow { needed, available }
    }

    pub fn bad_witness(reason: &'static str) -> Self {
        Self::BadWitness { reason }
    }
}

/// Result type for VM operations.
pub type VmResult<T> = std::result::Result<T, VmError>;
