//! The entity whose execution triggered a script run.

use crate::block::Block;
use crate::error::CoreResult;
use crate::transaction::Transaction;
use std::sync::Arc;

/// The transaction or block a script executes on behalf of. Supplies the
/// canonical signed message for signature checks.
#[derive(Clone, Debug)]
pub enum ScriptContainer {
    Transaction(Arc<Transaction>),
    Block(Arc<Block>),
}

impl ScriptContainer {
    /// The canonical pre-witness serialization signature checks verify
    /// against.
    pub fn message(&self) -> CoreResult<Vec<u8>> {
        match self {
            Self::Transaction(tx) => tx.message(),
            Self::Block(block) => block.header.message(),
        }
    }

    /// The contained transaction, if any.
    pub fn transaction(&self) -> Option<&Arc<Transaction>> {
        match self {
            Self::Transaction(tx) => Some(tx),
            Self::Block(_) => None,
        }
    }

    /// The contained block, if any.
    pub fn block(&self) -> Option<&Arc<Block>> {
        match self {
            Self::Block(block) => Some(block),
            Self::Transaction(_) => None,
        }
    }
}

impl From<Transaction> for ScriptContainer {
    fn from(tx: Transaction) -> Self {
        Self::Transaction(Arc::new(tx))
    }
}

impl From<Block> for ScriptContainer {
    fn from(block: Block) -> Self {
        Self::Block(Arc::new(block))
    }
}
