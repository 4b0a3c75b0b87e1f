//! The blockchain state facade.

use crate::store::{FindStore, ReadAllStore, ReadStore, WriteStore};
use neo2_core::{
    Account, Asset, Block, Contract, Header, Output, StorageItem, StorageKey, Transaction,
    UInt160, UInt256, Validator,
};
use neo2_cryptography::ECPoint;

/// Typed view over chain state. The VM reads and writes exclusively
/// through this trait; commit/rollback of the staged writes belongs to
/// the persistence layer behind it.
pub trait Blockchain {
    /// Index of the current (latest persisted) block.
    fn current_height(&self) -> u32;

    /// Hash of the block at `index`, if within the chain.
    fn block_hash_at(&self, index: u32) -> Option<UInt256>;

    fn accounts(&self) -> &dyn ReadStore<UInt160, Account>;
    fn accounts_mut(&mut self) -> &mut dyn WriteStore<UInt160, Account>;

    fn assets(&self) -> &dyn ReadStore<UInt256, Asset>;
    fn assets_mut(&mut self) -> &mut dyn WriteStore<UInt256, Asset>;

    fn blocks(&self) -> &dyn ReadStore<UInt256, Block>;

    fn headers(&self) -> &dyn ReadStore<UInt256, Header>;

    fn transactions(&self) -> &dyn ReadStore<UInt256, Transaction>;

    fn contracts(&self) -> &dyn ReadStore<UInt160, Contract>;
    fn contracts_mut(&mut self) -> &mut dyn WriteStore<UInt160, Contract>;

    fn storage(&self) -> &dyn FindStore<StorageKey, UInt160, StorageItem>;
    fn storage_mut(&mut self) -> &mut dyn WriteStore<StorageKey, StorageItem>;

    fn validators(&self) -> &dyn ReadAllStore<ECPoint, Validator>;
    fn validators_mut(&mut self) -> &mut dyn WriteStore<ECPoint, Validator>;

    /// Resolves a transaction output by reference.
    fn output(&self, tx_hash: &UInt256, index: u16) -> Option<Output> {
        self.transactions()
            .try_get(tx_hash)
            .and_then(|tx| tx.outputs.get(index as usize).copied())
    }
}
