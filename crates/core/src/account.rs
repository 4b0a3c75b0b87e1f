//! Account state.

use crate::fixed8::Fixed8;
use crate::uint160::UInt160;
use crate::uint256::UInt256;
use neo2_cryptography::ECPoint;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-script-hash account state: freeze flag, validator votes and asset
/// balances.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub script_hash: UInt160,
    pub frozen: bool,
    pub votes: Vec<ECPoint>,
    pub balances: BTreeMap<UInt256, Fixed8>,
}

impl Account {
    /// A fresh account with no votes and no balances.
    pub fn new(script_hash: UInt160) -> Self {
        Self {
            script_hash,
            frozen: false,
            votes: Vec::new(),
            balances: BTreeMap::new(),
        }
    }

    /// Balance of a single asset, zero when the account never held it.
    pub fn balance(&self, asset_id: &UInt256) -> Fixed8 {
        self.balances.get(asset_id).copied().unwrap_or(Fixed8::ZERO)
    }

    /// An account with no flags, no votes and no positive balances can be
    /// removed from state.
    pub fn is_deletable(&self) -> bool {
        !self.frozen
            && self.votes.is_empty()
            && self.balances.values().all(|v| *v <= Fixed8::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_balance_is_zero() {
        let account = Account::new(UInt160::zero());
        assert_eq!(account.balance(&UInt256::new([9; 32])), Fixed8::ZERO);
    }

    #[test]
    fn deletable_requires_no_state() {
        let mut account = Account::new(UInt160::zero());
        assert!(account.is_deletable());

        account.balances.insert(UInt256::new([1; 32]), Fixed8::ONE);
        assert!(!account.is_deletable());

        account.balances.insert(UInt256::new([1; 32]), Fixed8::ZERO);
        assert!(account.is_deletable());

        account.frozen = true;
        assert!(!account.is_deletable());
    }
}
