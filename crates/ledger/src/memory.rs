//! Map-backed implementation of the facade, for tests and scratch runs.

use crate::blockchain::Blockchain;
use crate::error::{LedgerError, LedgerResult};
use crate::store::{FindStore, ReadAllStore, ReadStore, WriteStore};
use neo2_core::{
    Account, Asset, Block, Contract, CoreResult, Header, StorageItem, StorageKey, Transaction,
    UInt160, UInt256, Validator,
};
use neo2_cryptography::ECPoint;
use std::collections::BTreeMap;
use std::fmt;

/// A single typed collection backed by an ordered map. Ordered iteration
/// keeps `all`/`find` deterministic, which consensus-facing callers rely
/// on.
pub struct MemoryStore<K, V> {
    name: &'static str,
    entries: BTreeMap<K, V>,
}

impl<K: Ord + Clone + fmt::Debug, V: Clone> MemoryStore<K, V> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Ord + Clone + fmt::Debug, V: Clone> ReadStore<K, V> for MemoryStore<K, V> {
    fn try_get(&self, key: &K) -> Option<V> {
        self.entries.get(key).cloned()
    }

    fn get(&self, key: &K) -> LedgerResult<V> {
        self.try_get(key)
            .ok_or_else(|| LedgerError::not_found(self.name, format!("{key:?}")))
    }
}

impl<K: Ord + Clone + fmt::Debug, V: Clone> ReadAllStore<K, V> for MemoryStore<K, V> {
    fn all(&self) -> Vec<V> {
        self.entries.values().cloned().collect()
    }
}

impl<K: Ord + Clone + fmt::Debug, V: Clone> WriteStore<K, V> for MemoryStore<K, V> {
    fn add(&mut self, key: K, value: V) -> LedgerResult<()> {
        if self.entries.contains_key(&key) {
            return Err(LedgerError::already_exists(self.name, format!("{key:?}")));
        }
        self.entries.insert(key, value);
        Ok(())
    }

    fn update(&mut self, key: K, value: V) -> LedgerResult<()> {
        if !self.entries.contains_key(&key) {
            return Err(LedgerError::missing_for_update(self.name, format!("{key:?}")));
        }
        self.entries.insert(key, value);
        Ok(())
    }

    fn upsert(&mut self, key: K, value: V) -> LedgerResult<()> {
        self.entries.insert(key, value);
        Ok(())
    }

    fn delete(&mut self, key: &K) -> LedgerResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

impl FindStore<StorageKey, UInt160, StorageItem> for MemoryStore<StorageKey, StorageItem> {
    fn find(&self, prefix: &UInt160) -> Vec<(StorageKey, StorageItem)> {
        self.entries
            .iter()
            .filter(|(key, _)| key.script_hash == *prefix)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

/// An in-memory chain view.
pub struct MemoryBlockchain {
    height: u32,
    block_index: BTreeMap<u32, UInt256>,
    accounts: MemoryStore<UInt160, Account>,
    assets: MemoryStore<UInt256, Asset>,
    blocks: MemoryStore<UInt256, Block>,
    headers: MemoryStore<UInt256, Header>,
    transactions: MemoryStore<UInt256, Transaction>,
    contracts: MemoryStore<UInt160, Contract>,
    storage: MemoryStore<StorageKey, StorageItem>,
    validators: MemoryStore<ECPoint, Validator>,
}

impl Default for MemoryBlockchain {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBlockchain {
    pub fn new() -> Self {
        Self {
            height: 0,
            block_index: BTreeMap::new(),
            accounts: MemoryStore::new("account"),
            assets: MemoryStore::new("asset"),
            blocks: MemoryStore::new("block"),
            headers: MemoryStore::new("header"),
            transactions: MemoryStore::new("transaction"),
            contracts: MemoryStore::new("contract"),
            storage: MemoryStore::new("storageItem"),
            validators: MemoryStore::new("validator"),
        }
    }

    pub fn set_height(&mut self, height: u32) {
        self.height = height;
    }

    /// Indexes a block, its header and its transactions, and advances the
    /// height if the block extends the chain.
    pub fn insert_block(&mut self, block: Block) -> CoreResult<()> {
        let hash = block.hash()?;
        for tx in &block.transactions {
            self.transactions
                .entries
                .insert(tx.hash()?, tx.clone());
        }
        self.headers.entries.insert(hash, block.header.clone());
        self.block_index.insert(block.index(), hash);
        self.height = self.height.max(block.index());
        self.blocks.entries.insert(hash, block);
        Ok(())
    }

    /// Indexes a lone transaction, as if carried by some persisted block.
    pub fn insert_transaction(&mut self, tx: Transaction) -> CoreResult<()> {
        self.transactions.entries.insert(tx.hash()?, tx);
        Ok(())
    }
}

impl Blockchain for MemoryBlockchain {
    fn current_height(&self) -> u32 {
        self.height
    }

    fn block_hash_at(&self, index: u32) -> Option<UInt256> {
        self.block_index.get(&index).copied()
    }

    fn accounts(&self) -> &dyn ReadStore<UInt160, Account> {
        &self.accounts
    }

    fn accounts_mut(&mut self) -> &mut dyn WriteStore<UInt160, Account> {
        &mut self.accounts
    }

    fn assets(&self) -> &dyn ReadStore<UInt256, Asset> {
        &self.assets
    }

    fn assets_mut(&mut self) -> &mut dyn WriteStore<UInt256, Asset> {
        &mut self.assets
    }

    fn blocks(&self) -> &dyn ReadStore<UInt256, Block> {
        &self.blocks
    }

    fn headers(&self) -> &dyn ReadStore<UInt256, Header> {
        &self.headers
    }

    fn transactions(&self) -> &dyn ReadStore<UInt256, Transaction> {
        &self.transactions
    }

    fn contracts(&self) -> &dyn ReadStore<UInt160, Contract> {
        &self.contracts
    }

    fn contracts_mut(&mut self) -> &mut dyn WriteStore<UInt160, Contract> {
        &mut self.contracts
    }

    fn storage(&self) -> &dyn FindStore<StorageKey, UInt160, StorageItem> {
        &self.storage
    }

    fn storage_mut(&mut self) -> &mut dyn WriteStore<StorageKey, StorageItem> {
        &mut self.storage
    }

    fn validators(&self) -> &dyn ReadAllStore<ECPoint, Validator> {
        &self.validators
    }

    fn validators_mut(&mut self) -> &mut dyn WriteStore<ECPoint, Validator> {
        &mut self.validators
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_rejects_duplicates_update_requires_presence() {
        let mut store: MemoryStore<UInt160, Account> = MemoryStore::new("account");
        let key = UInt160::new([1; 20]);
        store.add(key, Account::new(key)).unwrap();
        assert!(matches!(
            store.add(key, Account::new(key)),
            Err(LedgerError::AlreadyExists { .. })
        ));

        let other = UInt160::new([2; 20]);
        assert!(matches!(
            store.update(other, Account::new(other)),
            Err(LedgerError::MissingForUpdate { .. })
        ));
        store.upsert(other, Account::new(other)).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn storage_find_scans_by_script_hash() {
        let mut store: MemoryStore<StorageKey, StorageItem> = MemoryStore::new("storageItem");
        let mine = UInt160::new([1; 20]);
        let theirs = UInt160::new([2; 20]);
        for i in 0..3u8 {
            store
                .upsert(
                    StorageKey::new(mine, vec![i]),
                    StorageItem::new(vec![i; 2]),
                )
                .unwrap();
        }
        store
            .upsert(StorageKey::new(theirs, vec![9]), StorageItem::new(vec![]))
            .unwrap();

        let found = store.find(&mine);
        assert_eq!(found.len(), 3);
        assert!(found.iter().all(|(k, _)| k.script_hash == mine));
    }

    #[test]
    fn insert_block_indexes_header_hash_and_transactions() {
        let mut chain = MemoryBlockchain::new();
        let mut block = Block::default();
        block.header.index = 7;
        block
            .transactions
            .push(Transaction::new(neo2_core::TransactionType::Miner));
        let hash = block.hash().unwrap();
        let tx_hash = block.transactions[0].hash().unwrap();
        chain.insert_block(block).unwrap();

        assert_eq!(chain.current_height(), 7);
        assert_eq!(chain.block_hash_at(7), Some(hash));
        assert!(chain.headers().try_get(&hash).is_some());
        assert!(chain.transactions().try_get(&tx_hash).is_some());
    }
}
