//! The read/write view over blockchain state the VM executes against.
//!
//! The VM only ever talks to the [`Blockchain`] trait; what backs it — a
//! column-family store, a change-set overlay, a test fixture — is the
//! embedder's business. Writes are staged by the facade; the VM never
//! commits. This crate ships the trait, the generic store abstractions it
//! is built from, and a hash-map backed implementation for tests and
//! scratch runs.

pub mod blockchain;
pub mod error;
pub mod memory;
pub mod store;

pub use blockchain::Blockchain;
pub use error::{LedgerError, LedgerResult};
pub use memory::{MemoryBlockchain, MemoryStore};
pub use store::{FindStore, ReadAllStore, ReadStore, WriteStore};
