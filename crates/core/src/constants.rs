//! Protocol-level constants.

use crate::uint256::UInt256;

/// Asset id of the governing token. Accounts holding none of it may not
/// cast votes.
pub const GOVERNING_TOKEN_HASH: UInt256 = UInt256::new([
    0x9b, 0x7c, 0xff, 0xda, 0xa6, 0x74, 0xbe, 0xae, 0x0f, 0x93, 0x0e, 0xbe, 0x60, 0x85, 0xaf,
    0x90, 0x93, 0xe5, 0xfe, 0x56, 0xb3, 0x4a, 0x5c, 0x22, 0x0c, 0xcd, 0xcf, 0x6e, 0xfc, 0x33,
    0x6f, 0xc5,
]);

/// Approximate number of blocks produced in a year; the unit of asset
/// registration renewal.
pub const BLOCK_HEIGHT_YEAR: u32 = 2_000_000;

/// Upper bound on the vote list of a single account.
pub const MAX_VOTES: usize = 1024;

/// Upper bound on a registered asset name, in bytes.
pub const MAX_ASSET_NAME_LENGTH: usize = 1024;

/// Upper bound on a contract storage key, in bytes.
pub const MAX_STORAGE_KEY_SIZE: usize = 1024;
