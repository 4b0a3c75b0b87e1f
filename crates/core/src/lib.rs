//! Core value types and the ledger entity model of the neo2 chain.
//!
//! This crate defines the primitives the rest of the workspace is built
//! from: fixed-size hashes, the `Fixed8` fixed-point number, the legacy
//! transaction/block model with its canonical unsigned serialization, and
//! the contract-parameter tree emitted with notifications.

pub mod account;
pub mod asset;
pub mod block;
pub mod constants;
pub mod contract;
pub mod error;
pub mod fixed8;
pub mod script_container;
pub mod storage_item;
pub mod transaction;
pub mod uint160;
pub mod uint256;
pub mod validator;
pub mod witness;

pub use account::Account;
pub use asset::{Asset, AssetType};
pub use block::{Block, Header};
pub use contract::{
    Contract, ContractParameter, ContractParameterType, ContractPropertyState,
};
pub use error::{CoreError, CoreResult};
pub use fixed8::Fixed8;
pub use script_container::ScriptContainer;
pub use storage_item::{StorageItem, StorageKey};
pub use transaction::{
    AttributeUsage, Input, Output, Transaction, TransactionAttribute, TransactionType,
};
pub use uint160::UInt160;
pub use uint256::UInt256;
pub use validator::Validator;
pub use witness::Witness;
