//! State-mutating groups: account votes, validator registration, asset
//! registration and renewal.

use super::{insert, Catalogue, SyscallDescriptor};
use crate::engine::ExecutionEngine;
use crate::error::{VmError, VmResult};
use crate::limits::fees;
use crate::script_builder::signature_script_hash;
use crate::stack_item::StackItem;
use neo2_core::constants::{
    BLOCK_HEIGHT_YEAR, GOVERNING_TOKEN_HASH, MAX_ASSET_NAME_LENGTH, MAX_VOTES,
};
use neo2_core::{Account, Asset, AssetType, Fixed8, TransactionType, Validator};
use neo2_cryptography::ECPoint;
use num_traits::ToPrimitive;
use std::sync::Arc;

pub(super) fn register(table: &mut Catalogue) {
    insert(
        table,
        SyscallDescriptor::new("Neo.Account.SetVotes", 2, 0, fees::SET_VOTES, set_votes),
    );
    insert(
        table,
        SyscallDescriptor::new(
            "Neo.Validator.Register",
            1,
            1,
            fees::REGISTER_VALIDATOR,
            register_validator,
        ),
    );
    insert(
        table,
        SyscallDescriptor::new("Neo.Asset.Create", 7, 1, fees::STATE_CREATE, asset_create),
    );
    insert(
        table,
        SyscallDescriptor::new("Neo.Asset.Renew", 2, 1, fees::STATE_CREATE, asset_renew),
    );
}

/// Replaces an account's vote list. The account must not be frozen, must
/// hold governing token to cast non-empty votes, and must witness the
/// transaction. Accounts that end up empty are removed from state.
fn set_votes(
    engine: &mut ExecutionEngine<'_>,
    args: Vec<StackItem>,
) -> VmResult<Option<StackItem>> {
    let hash = args[0].as_account()?.script_hash;
    let votes = args[1]
        .as_items()?
        .borrow()
        .iter()
        .map(StackItem::as_ec_point)
        .collect::<VmResult<Vec<ECPoint>>>()?;
    if votes.len() > MAX_VOTES {
        return Err(VmError::TooManyVotes {
            count: votes.len(),
            max: MAX_VOTES,
        });
    }

    let mut account = engine
        .ledger()
        .accounts()
        .try_get(&hash)
        .unwrap_or_else(|| Account::new(hash));
    if account.frozen {
        return Err(VmError::AccountFrozen { hash });
    }
    if account.balance(&GOVERNING_TOKEN_HASH) <= Fixed8::ZERO && !votes.is_empty() {
        return Err(VmError::NotEligibleToVote);
    }
    if !engine.check_witness(&hash)? {
        return Err(VmError::bad_witness("account did not sign the container"));
    }

    account.votes = votes;
    if account.is_deletable() {
        engine.ledger_mut().accounts_mut().delete(&hash)?;
    } else {
        engine.ledger_mut().accounts_mut().upsert(hash, account)?;
    }
    Ok(None)
}

/// Registers a consensus candidate, witnessed by its own key. Re-
/// registration returns the existing state untouched.
fn register_validator(
    engine: &mut ExecutionEngine<'_>,
    args: Vec<StackItem>,
) -> VmResult<Option<StackItem>> {
    let public_key = args[0].as_ec_point()?;
    if !engine.check_witness(&signature_script_hash(&public_key))? {
        return Err(VmError::bad_witness("candidate key did not sign the container"));
    }

    let validator = match engine.ledger().validators().try_get(&public_key) {
        Some(existing) => existing,
        None => {
            let validator = Validator::new(public_key.clone());
            engine
                .ledger_mut()
                .validators_mut()
                .upsert(public_key, validator.clone())?;
            validator
        }
    };
    Ok(Some(StackItem::Validator(Arc::new(validator))))
}

/// Registers an asset. Only an invocation transaction may carry a
/// registration; the native tokens cannot be re-created; the owner key
/// must witness the transaction. The asset id is the transaction hash.
fn asset_create(
    engine: &mut ExecutionEngine<'_>,
    args: Vec<StackItem>,
) -> VmResult<Option<StackItem>> {
    let tx = engine
        .container()
        .transaction()
        .ok_or(VmError::InvalidScriptContainer {
            expected: "transaction",
        })?
        .clone();
    if tx.tx_type != TransactionType::Invocation {
        return Err(VmError::InvalidScriptContainer {
            expected: "invocation transaction",
        });
    }

    let type_byte = args[0]
        .as_int()?
        .to_u8()
        .ok_or(VmError::InvalidAssetType { value: u8::MAX })?;
    let asset_type = AssetType::try_from(type_byte)
        .map_err(|_| VmError::InvalidAssetType { value: type_byte })?;
    if matches!(
        asset_type,
        AssetType::GoverningToken | AssetType::UtilityToken
    ) {
        return Err(VmError::InvalidAssetType { value: type_byte });
    }

    let name_bytes = args[1].as_bytes()?;
    if name_bytes.len() > MAX_ASSET_NAME_LENGTH {
        return Err(VmError::invalid_arguments(
            "Asset.Create",
            format!("name of {} bytes is too long", name_bytes.len()),
        ));
    }
    let name = String::from_utf8_lossy(&name_bytes).into_owned();

    let amount = Fixed8::from_raw(
        args[2]
            .as_int()?
            .to_i64()
            .ok_or_else(|| VmError::invalid_arguments("Asset.Create", "amount out of range"))?,
    );
    let precision = args[3]
        .as_int()?
        .to_u8()
        .filter(|p| *p <= 8)
        .ok_or_else(|| VmError::invalid_arguments("Asset.Create", "precision above 8"))?;

    let owner = args[4].as_ec_point()?;
    if owner.is_infinity() {
        return Err(VmError::invalid_arguments("Asset.Create", "owner is infinity"));
    }
    if !engine.check_witness(&signature_script_hash(&owner))? {
        return Err(VmError::bad_witness("owner key did not sign the container"));
    }

    let admin = args[5].as_uint160()?;
    let issuer = args[6].as_uint160()?;

    let hash = tx.hash()?;
    let height = engine.ledger().current_height();
    let asset = Asset {
        hash,
        asset_type,
        name,
        amount,
        available: Fixed8::ZERO,
        precision,
        owner,
        admin,
        issuer,
        expiration: height.saturating_add(1).saturating_add(BLOCK_HEIGHT_YEAR),
        frozen: false,
    };
    engine.ledger_mut().assets_mut().upsert(hash, asset.clone())?;
    Ok(Some(StackItem::Asset(Arc::new(asset))))
}

/// Extends an asset registration by whole years of blocks, clamping at
/// the maximum height.
fn asset_renew(
    engine: &mut ExecutionEngine<'_>,
    args: Vec<StackItem>,
) -> VmResult<Option<StackItem>> {
    let hash = args[0].as_asset()?.hash;
    let years = args[1]
        .as_index("Asset.Renew")?
        .to_u32()
        .ok_or_else(|| VmError::invalid_arguments("Asset.Renew", "years out of range"))?;

    let mut asset = engine.ledger().assets().get(&hash)?;
    let height = engine.ledger().current_height();
    if asset.expiration < height.saturating_add(1) {
        asset.expiration = height.saturating_add(1);
    }
    asset.expiration = asset
        .expiration
        .saturating_add(years.saturating_mul(BLOCK_HEIGHT_YEAR));
    engine.ledger_mut().assets_mut().update(hash, asset.clone())?;
    Ok(Some(StackItem::from_int(asset.expiration as i64)))
}
