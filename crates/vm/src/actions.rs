//! Actions: the observable side effects of a script run.
//!
//! Logs and notifications are appended to a run-wide list ordered by a
//! monotonically increasing index that spans the whole invocation tree.

use neo2_core::{ContractParameter, UInt160, UInt256};

/// Positional coordinates every action inherits: where in the chain the
/// triggering container sits. Supplied by the embedder with the init
/// bundle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActionTemplate {
    pub block_index: u32,
    pub block_hash: UInt256,
    pub transaction_index: u32,
    pub transaction_hash: UInt256,
}

/// A UTF-8 message emitted through `Neo.Runtime.Log`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogAction {
    pub block_index: u32,
    pub block_hash: UInt256,
    pub transaction_index: u32,
    pub transaction_hash: UInt256,
    /// Tree-wide emission index.
    pub index: u32,
    /// Script hash of the emitting contract.
    pub script_hash: UInt160,
    pub message: String,
}

/// A typed payload emitted through `Neo.Runtime.Notify`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotificationAction {
    pub block_index: u32,
    pub block_hash: UInt256,
    pub transaction_index: u32,
    pub transaction_hash: UInt256,
    /// Tree-wide emission index.
    pub index: u32,
    /// Script hash of the emitting contract.
    pub script_hash: UInt160,
    pub args: ContractParameter,
}

/// One emitted action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Log(LogAction),
    Notification(NotificationAction),
}

impl Action {
    /// The tree-wide emission index.
    pub fn index(&self) -> u32 {
        match self {
            Action::Log(log) => log.index,
            Action::Notification(n) => n.index,
        }
    }

    /// The emitting script hash.
    pub fn script_hash(&self) -> UInt160 {
        match self {
            Action::Log(log) => log.script_hash,
            Action::Notification(n) => n.script_hash,
        }
    }
}
