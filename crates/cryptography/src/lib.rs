//! Cryptographic primitives used by the neo2 virtual machine.
//!
//! The chain signs with ECDSA over secp256r1 and hashes with SHA-256 and
//! RIPEMD-160; the VM additionally exposes SHA-1 through an opcode.

pub mod ecdsa;
pub mod ecpoint;
pub mod error;
pub mod hash;

pub use ecdsa::verify_signature;
pub use ecpoint::ECPoint;
pub use error::{CryptoError, CryptoResult};
pub use hash::{hash160, hash256, ripemd160, sha1, sha256};
