//! Validator registration state.

use crate::fixed8::Fixed8;
use neo2_cryptography::ECPoint;
use serde::{Deserialize, Serialize};

/// A registered (or formerly registered) consensus candidate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validator {
    pub public_key: ECPoint,
    pub registered: bool,
    pub votes: Fixed8,
}

impl Validator {
    pub fn new(public_key: ECPoint) -> Self {
        Self {
            public_key,
            registered: true,
            votes: Fixed8::ZERO,
        }
    }
}
