//! Syscall catalogue tests against an in-memory chain view.

use neo2_core::constants::{BLOCK_HEIGHT_YEAR, GOVERNING_TOKEN_HASH};
use neo2_core::{
    Block, Contract, ContractParameter, ContractParameterType, ContractPropertyState, Fixed8,
    Input, Output, ScriptContainer, StorageItem, StorageKey, Transaction, TransactionType,
    UInt160,
};
use neo2_cryptography::{hash160, ECPoint};
use neo2_ledger::{Blockchain, MemoryBlockchain};
use neo2_vm::script_builder::signature_script_hash;
use neo2_vm::{
    Action, ExecuteOptions, ExecutionEngine, ExecutionInit, ExecutionResult, OpCode,
    ScriptBuilder, StackItem, TriggerType, VmError,
};
use p256::ecdsa::signature::Signer;
use p256::ecdsa::{Signature, SigningKey};

fn execute(
    chain: &mut MemoryBlockchain,
    script: Vec<u8>,
    init: ExecutionInit,
) -> ExecutionResult {
    let _ = env_logger::builder().is_test(true).try_init();
    ExecutionEngine::execute_script(
        chain,
        script,
        init,
        Fixed8::from_units(100),
        ExecuteOptions::default(),
    )
}

fn plain_init() -> ExecutionInit {
    ExecutionInit::application(ScriptContainer::from(Transaction::new(
        TransactionType::Invocation,
    )))
}

/// An invocation transaction whose single input spends an output locked
/// to `witness`, making that hash pass CheckWitness.
fn witnessed_tx(chain: &mut MemoryBlockchain, witness: UInt160) -> Transaction {
    let mut funding = Transaction::new(TransactionType::Contract);
    funding.outputs.push(Output {
        asset_id: GOVERNING_TOKEN_HASH,
        value: Fixed8::from_units(1),
        script_hash: witness,
    });
    let funding_hash = funding.hash().unwrap();
    chain.insert_transaction(funding).unwrap();

    let mut tx = Transaction::new(TransactionType::Invocation);
    tx.inputs.push(Input {
        prev_hash: funding_hash,
        prev_index: 0,
    });
    tx
}

fn deploy(chain: &mut MemoryBlockchain, script: Vec<u8>, properties: ContractPropertyState) -> UInt160 {
    let contract = Contract {
        script,
        parameter_list: vec![],
        return_type: ContractParameterType::Void,
        properties,
        name: "fixture".into(),
        code_version: "1.0".into(),
        author: String::new(),
        email: String::new(),
        description: String::new(),
    };
    let hash = contract.script_hash();
    chain.contracts_mut().upsert(hash, contract).unwrap();
    hash
}

fn test_key() -> (SigningKey, ECPoint) {
    let key = SigningKey::from_slice(&[0x22; 32]).unwrap();
    let encoded = key.verifying_key().to_encoded_point(true);
    let point = ECPoint::from_bytes(encoded.as_bytes()).unwrap();
    (key, point)
}

#[test]
fn runtime_log_emits_an_action() {
    let mut chain = MemoryBlockchain::new();
    let mut b = ScriptBuilder::new();
    b.emit_push_bytes(b"hi\x00").emit_syscall("Neo.Runtime.Log").emit(OpCode::RET);
    let result = execute(&mut chain, b.into_bytes(), plain_init());
    assert!(result.state.is_halt(), "fault: {:?}", result.fault);
    assert_eq!(result.actions.len(), 1);
    match &result.actions[0] {
        Action::Log(log) => {
            assert_eq!(log.message, "hi\u{0}");
            assert_eq!(log.index, 0);
        }
        other => panic!("expected a log, got {other:?}"),
    }
}

#[test]
fn legacy_alias_behaves_identically() {
    let mut chain = MemoryBlockchain::new();
    let mut b = ScriptBuilder::new();
    b.emit_push_bytes(b"hi\x00")
        .emit_syscall("AntShares.Runtime.Log")
        .emit(OpCode::RET);
    let result = execute(&mut chain, b.into_bytes(), plain_init());
    assert!(result.state.is_halt(), "fault: {:?}", result.fault);
    assert_eq!(result.actions.len(), 1);
    match &result.actions[0] {
        Action::Log(log) => assert_eq!(log.message, "hi\u{0}"),
        other => panic!("expected a log, got {other:?}"),
    }
}

#[test]
fn unknown_syscall_faults() {
    let mut chain = MemoryBlockchain::new();
    let mut b = ScriptBuilder::new();
    b.emit_syscall("Neo.Runtime.DoesNotExist");
    let result = execute(&mut chain, b.into_bytes(), plain_init());
    assert!(matches!(result.fault, Some(VmError::UnknownSyscall { .. })));
}

#[test]
fn action_indices_are_monotonic_across_kinds() {
    let mut chain = MemoryBlockchain::new();
    let mut b = ScriptBuilder::new();
    b.emit_push_int(1)
        .emit_syscall("Neo.Runtime.Notify")
        .emit_push_bytes(b"log")
        .emit_syscall("Neo.Runtime.Log")
        .emit_push_int(2)
        .emit_syscall("Neo.Runtime.Notify")
        .emit(OpCode::RET);
    let result = execute(&mut chain, b.into_bytes(), plain_init());
    assert!(result.state.is_halt(), "fault: {:?}", result.fault);
    let indices: Vec<u32> = result.actions.iter().map(Action::index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
    match &result.actions[0] {
        Action::Notification(n) => {
            assert_eq!(n.args, ContractParameter::Integer(1.into()));
        }
        other => panic!("expected a notification, got {other:?}"),
    }
}

#[test]
fn get_trigger_reports_the_trigger_byte() {
    let mut chain = MemoryBlockchain::new();
    let mut b = ScriptBuilder::new();
    b.emit_syscall("Neo.Runtime.GetTrigger").emit(OpCode::RET);
    let script = b.into_bytes();

    let result = execute(&mut chain, script.clone(), plain_init());
    assert_eq!(result.stack[0].as_int().unwrap(), 0x10.into());

    let verification = ExecutionInit::verification(ScriptContainer::from(Transaction::new(
        TransactionType::Invocation,
    )));
    assert_eq!(verification.trigger, TriggerType::Verification);
    let result = execute(&mut chain, script, verification);
    assert_eq!(result.stack[0].as_int().unwrap(), 0x00.into());
}

#[test]
fn check_witness_resolves_input_references() {
    let mut chain = MemoryBlockchain::new();
    let witness = UInt160::new([0x77; 20]);
    let tx = witnessed_tx(&mut chain, witness);

    let mut b = ScriptBuilder::new();
    b.emit_push_bytes(witness.as_bytes())
        .emit_syscall("Neo.Runtime.CheckWitness")
        .emit_push_bytes(&[0x55; 20])
        .emit_syscall("Neo.Runtime.CheckWitness")
        .emit(OpCode::RET);
    let result = execute(
        &mut chain,
        b.into_bytes(),
        ExecutionInit::application(ScriptContainer::from(tx)),
    );
    assert!(result.state.is_halt(), "fault: {:?}", result.fault);
    assert!(result.stack[0].as_bool());
    assert!(!result.stack[1].as_bool());
}

#[test]
fn blockchain_readers_walk_headers_and_blocks() {
    let mut chain = MemoryBlockchain::new();
    let mut block = Block::default();
    block.header.index = 5;
    block.header.timestamp = 1_468_595_301;
    block
        .transactions
        .push(Transaction::new(TransactionType::Miner));
    chain.insert_block(block).unwrap();

    let mut b = ScriptBuilder::new();
    b.emit_syscall("Neo.Blockchain.GetHeight")
        .emit_push_int(5)
        .emit_syscall("Neo.Blockchain.GetHeader")
        .emit_syscall("Neo.Header.GetIndex")
        .emit_push_int(5)
        .emit_syscall("Neo.Blockchain.GetBlock")
        .emit_syscall("Neo.Block.GetTransactionCount")
        .emit(OpCode::RET);
    let result = execute(&mut chain, b.into_bytes(), plain_init());
    assert!(result.state.is_halt(), "fault: {:?}", result.fault);
    assert_eq!(result.stack[0].as_int().unwrap(), 5.into());
    assert_eq!(result.stack[1].as_int().unwrap(), 5.into());
    assert_eq!(result.stack[2].as_int().unwrap(), 1.into());
}

#[test]
fn get_transaction_takes_reversed_hashes() {
    let mut chain = MemoryBlockchain::new();
    let tx = Transaction::new(TransactionType::Claim);
    let hash = tx.hash().unwrap();
    chain.insert_transaction(tx).unwrap();

    let mut reversed = hash.to_vec();
    reversed.reverse();
    let mut b = ScriptBuilder::new();
    b.emit_push_bytes(&reversed)
        .emit_syscall("Neo.Blockchain.GetTransaction")
        .emit_syscall("Neo.Transaction.GetType")
        .emit(OpCode::RET);
    let result = execute(&mut chain, b.into_bytes(), plain_init());
    assert!(result.state.is_halt(), "fault: {:?}", result.fault);
    assert_eq!(
        result.stack[0].as_int().unwrap(),
        (TransactionType::Claim as u8).into()
    );
}

#[test]
fn storage_round_trip_through_the_context() {
    let mut chain = MemoryBlockchain::new();
    // The executing script is itself the deployed contract.
    let mut b = ScriptBuilder::new();
    b.emit_push_bytes(b"value")
        .emit_push_bytes(b"key")
        .emit_syscall("Neo.Storage.GetContext")
        .emit_syscall("Neo.Storage.Put")
        .emit_push_bytes(b"key")
        .emit_syscall("Neo.Storage.GetContext")
        .emit_syscall("Neo.Storage.Get")
        .emit_push_bytes(b"missing")
        .emit_syscall("Neo.Storage.GetContext")
        .emit_syscall("Neo.Storage.Get")
        .emit(OpCode::RET);
    let script = b.into_bytes();
    let hash = deploy(&mut chain, script.clone(), ContractPropertyState::HAS_STORAGE);

    let result = execute(&mut chain, script, plain_init());
    assert!(result.state.is_halt(), "fault: {:?}", result.fault);
    assert_eq!(result.stack[0].as_bytes().unwrap(), b"value");
    assert!(result.stack[1].as_bytes().unwrap().is_empty());

    let stored = chain
        .storage()
        .try_get(&StorageKey::new(hash, b"key".to_vec()))
        .unwrap();
    assert_eq!(stored.value, b"value");
}

#[test]
fn storage_without_the_property_faults() {
    let mut chain = MemoryBlockchain::new();
    let mut b = ScriptBuilder::new();
    b.emit_push_bytes(b"key")
        .emit_syscall("Neo.Storage.GetContext")
        .emit_syscall("Neo.Storage.Get");
    let script = b.into_bytes();
    deploy(&mut chain, script.clone(), ContractPropertyState::empty());

    let result = execute(&mut chain, script, plain_init());
    assert!(matches!(
        result.fault,
        Some(VmError::ContractNoStorage { .. })
    ));
}

#[test]
fn appcall_runs_the_callee_on_the_shared_stack() {
    let mut chain = MemoryBlockchain::new();
    let mut callee = ScriptBuilder::new();
    callee.emit(OpCode::ADD).emit(OpCode::RET);
    let callee_hash = deploy(&mut chain, callee.into_bytes(), ContractPropertyState::empty());

    let mut caller = ScriptBuilder::new();
    caller
        .emit_push_int(2)
        .emit_push_int(3)
        .emit_appcall(&callee_hash, false)
        .emit_push_int(10)
        .emit(OpCode::ADD)
        .emit(OpCode::RET);
    let result = execute(&mut chain, caller.into_bytes(), plain_init());
    assert!(result.state.is_halt(), "fault: {:?}", result.fault);
    assert_eq!(result.stack[0].as_int().unwrap(), 15.into());
}

#[test]
fn dynamic_appcall_pops_the_target_hash() {
    let mut chain = MemoryBlockchain::new();
    let mut callee = ScriptBuilder::new();
    callee.emit_push_int(7).emit(OpCode::RET);
    let callee_hash = deploy(&mut chain, callee.into_bytes(), ContractPropertyState::empty());

    let mut caller = ScriptBuilder::new();
    caller
        .emit_push_bytes(callee_hash.as_bytes())
        .emit_appcall(&UInt160::zero(), false)
        .emit(OpCode::RET);
    let result = execute(&mut chain, caller.into_bytes(), plain_init());
    assert!(result.state.is_halt(), "fault: {:?}", result.fault);
    assert_eq!(result.stack[0].as_int().unwrap(), 7.into());
}

#[test]
fn appcall_against_an_unknown_hash_faults() {
    let mut chain = MemoryBlockchain::new();
    let mut caller = ScriptBuilder::new();
    caller.emit_appcall(&UInt160::new([9; 20]), false);
    let result = execute(&mut chain, caller.into_bytes(), plain_init());
    assert!(matches!(result.fault, Some(VmError::ContractNotFound { .. })));
}

#[test]
fn execution_engine_getters_see_the_invocation_tree() {
    let mut chain = MemoryBlockchain::new();
    let mut callee = ScriptBuilder::new();
    callee
        .emit_syscall("System.ExecutionEngine.GetExecutingScriptHash")
        .emit_syscall("System.ExecutionEngine.GetCallingScriptHash")
        .emit_syscall("System.ExecutionEngine.GetEntryScriptHash")
        .emit(OpCode::RET);
    let callee_hash = deploy(&mut chain, callee.into_bytes(), ContractPropertyState::empty());

    let mut caller = ScriptBuilder::new();
    caller.emit_appcall(&callee_hash, false).emit(OpCode::RET);
    let caller_script = caller.into_bytes();
    let caller_hash = UInt160::new(hash160(&caller_script));

    let result = execute(&mut chain, caller_script, plain_init());
    assert!(result.state.is_halt(), "fault: {:?}", result.fault);
    assert_eq!(result.stack[0].as_uint160().unwrap(), callee_hash);
    assert_eq!(result.stack[1].as_uint160().unwrap(), caller_hash);
    assert_eq!(result.stack[2].as_uint160().unwrap(), caller_hash);
}

/// Builds the nine Contract.Create arguments (script on top) followed by
/// the given syscall.
fn emit_contract_args(b: &mut ScriptBuilder, script: &[u8], properties: u8) {
    b.emit_push_bytes(b"")
        .emit_push_bytes(b"")
        .emit_push_bytes(b"")
        .emit_push_bytes(b"1.0")
        .emit_push_bytes(b"created")
        .emit_push_int(properties as i64)
        .emit_push_int(ContractParameterType::Void as u8 as i64)
        .emit_push_bytes(b"")
        .emit_push_bytes(script);
}

#[test]
fn contract_create_records_the_creator_for_storage_context() {
    let mut chain = MemoryBlockchain::new();
    let mut new_contract = ScriptBuilder::new();
    new_contract.emit_push_int(1).emit(OpCode::RET);
    let new_script = new_contract.into_bytes();
    let new_hash = UInt160::new(hash160(&new_script));

    let mut b = ScriptBuilder::new();
    emit_contract_args(&mut b, &new_script, 0x01);
    b.emit_syscall("Neo.Contract.Create")
        .emit_syscall("Neo.Contract.GetStorageContext")
        .emit_push_bytes(b"seed")
        .emit(OpCode::SWAP)
        .emit_syscall("Neo.Storage.Get")
        .emit(OpCode::RET);
    let result = execute(&mut chain, b.into_bytes(), plain_init());
    assert!(result.state.is_halt(), "fault: {:?}", result.fault);
    // Fresh storage reads as empty.
    assert!(result.stack[0].as_bytes().unwrap().is_empty());
    assert!(chain.contracts().try_get(&new_hash).is_some());
}

#[test]
fn storage_context_is_denied_to_non_creators() {
    let mut chain = MemoryBlockchain::new();
    let mut other = ScriptBuilder::new();
    other.emit_push_int(1).emit(OpCode::RET);
    let other_hash = deploy(
        &mut chain,
        other.into_bytes(),
        ContractPropertyState::HAS_STORAGE,
    );

    let mut b = ScriptBuilder::new();
    b.emit_push_bytes(other_hash.as_bytes())
        .emit_syscall("Neo.Blockchain.GetContract")
        .emit_syscall("Neo.Contract.GetStorageContext");
    let result = execute(&mut chain, b.into_bytes(), plain_init());
    assert!(matches!(
        result.fault,
        Some(VmError::StorageContextDenied { .. })
    ));
}

#[test]
fn migrate_copies_storage_to_the_new_contract() {
    let mut chain = MemoryBlockchain::new();
    let mut new_contract = ScriptBuilder::new();
    new_contract.emit_push_int(2).emit(OpCode::RET);
    let new_script = new_contract.into_bytes();
    let new_hash = UInt160::new(hash160(&new_script));

    let mut b = ScriptBuilder::new();
    emit_contract_args(&mut b, &new_script, 0x01);
    b.emit_syscall("Neo.Contract.Migrate").emit(OpCode::RET);
    let migrating_script = b.into_bytes();
    let migrating_hash = deploy(
        &mut chain,
        migrating_script.clone(),
        ContractPropertyState::HAS_STORAGE,
    );
    chain
        .storage_mut()
        .upsert(
            StorageKey::new(migrating_hash, b"k".to_vec()),
            StorageItem::new(b"v".to_vec()),
        )
        .unwrap();

    let result = execute(&mut chain, migrating_script, plain_init());
    assert!(result.state.is_halt(), "fault: {:?}", result.fault);
    let copied = chain
        .storage()
        .try_get(&StorageKey::new(new_hash, b"k".to_vec()))
        .unwrap();
    assert_eq!(copied.value, b"v");
}

#[test]
fn destroy_removes_the_contract_and_its_storage() {
    let mut chain = MemoryBlockchain::new();
    let mut b = ScriptBuilder::new();
    b.emit_syscall("Neo.Contract.Destroy").emit(OpCode::RET);
    let script = b.into_bytes();
    let hash = deploy(&mut chain, script.clone(), ContractPropertyState::HAS_STORAGE);
    chain
        .storage_mut()
        .upsert(
            StorageKey::new(hash, b"k".to_vec()),
            StorageItem::new(b"v".to_vec()),
        )
        .unwrap();

    let result = execute(&mut chain, script, plain_init());
    assert!(result.state.is_halt(), "fault: {:?}", result.fault);
    assert!(chain.contracts().try_get(&hash).is_none());
    assert!(chain
        .storage()
        .try_get(&StorageKey::new(hash, b"k".to_vec()))
        .is_none());
}

#[test]
fn asset_create_registers_under_the_transaction_hash() {
    let mut chain = MemoryBlockchain::new();
    chain.set_height(10);
    let (_, owner) = test_key();
    let owner_witness = signature_script_hash(&owner);
    let tx = witnessed_tx(&mut chain, owner_witness);
    let tx_hash = tx.hash().unwrap();

    let mut b = ScriptBuilder::new();
    // Declaration order (type, name, amount, precision, owner, admin,
    // issuer) pops top-first, so push the issuer first.
    b.emit_push_bytes(&[0x01; 20]) // issuer
        .emit_push_bytes(&[0x02; 20]) // admin
        .emit_push_bytes(owner.as_bytes())
        .emit_push_int(8) // precision
        .emit_push_bigint(&100_000_000_000u64.into()) // amount
        .emit_push_bytes(b"Token") // name
        .emit_push_int(0x60) // AssetType::Token
        .emit_syscall("Neo.Asset.Create")
        .emit_syscall("Neo.Asset.GetAssetId")
        .emit(OpCode::RET);
    let result = execute(
        &mut chain,
        b.into_bytes(),
        ExecutionInit::application(ScriptContainer::from(tx)),
    );
    assert!(result.state.is_halt(), "fault: {:?}", result.fault);

    let asset = chain.assets().try_get(&tx_hash).expect("asset registered");
    assert_eq!(asset.name, "Token");
    assert_eq!(asset.expiration, 10 + 1 + BLOCK_HEIGHT_YEAR);
    match &result.stack[0] {
        StackItem::Uint256(id) => assert_eq!(*id, tx_hash),
        other => panic!("expected an asset id, got {other:?}"),
    }
}

#[test]
fn asset_create_rejects_native_token_types() {
    let mut chain = MemoryBlockchain::new();
    let (_, owner) = test_key();
    let tx = witnessed_tx(&mut chain, signature_script_hash(&owner));

    let mut b = ScriptBuilder::new();
    b.emit_push_bytes(&[0x01; 20])
        .emit_push_bytes(&[0x02; 20])
        .emit_push_bytes(owner.as_bytes())
        .emit_push_int(0)
        .emit_push_int(1)
        .emit_push_bytes(b"fake governing")
        .emit_push_int(0x00) // AssetType::GoverningToken
        .emit_syscall("Neo.Asset.Create");
    let result = execute(
        &mut chain,
        b.into_bytes(),
        ExecutionInit::application(ScriptContainer::from(tx)),
    );
    assert!(matches!(
        result.fault,
        Some(VmError::InvalidAssetType { value: 0x00 })
    ));
}

#[test]
fn asset_renew_extends_the_expiration() {
    let mut chain = MemoryBlockchain::new();
    chain.set_height(10);
    let (_, owner) = test_key();
    let tx = witnessed_tx(&mut chain, signature_script_hash(&owner));
    let tx_hash = tx.hash().unwrap();

    let mut b = ScriptBuilder::new();
    b.emit_push_bytes(&[0x01; 20])
        .emit_push_bytes(&[0x02; 20])
        .emit_push_bytes(owner.as_bytes())
        .emit_push_int(8)
        .emit_push_bigint(&100_000_000u64.into())
        .emit_push_bytes(b"Token")
        .emit_push_int(0x60)
        .emit_syscall("Neo.Asset.Create")
        .emit_push_int(2) // years
        .emit(OpCode::SWAP)
        .emit_syscall("Neo.Asset.Renew")
        .emit(OpCode::RET);
    let result = execute(
        &mut chain,
        b.into_bytes(),
        ExecutionInit::application(ScriptContainer::from(tx)),
    );
    assert!(result.state.is_halt(), "fault: {:?}", result.fault);

    let asset = chain.assets().try_get(&tx_hash).unwrap();
    assert_eq!(asset.expiration, 10 + 1 + 3 * BLOCK_HEIGHT_YEAR);
}

#[test]
fn set_votes_requires_balance_and_witness() {
    let mut chain = MemoryBlockchain::new();
    let account_hash = UInt160::new([0x31; 20]);
    let tx = witnessed_tx(&mut chain, account_hash);
    let (_, candidate) = test_key();

    let mut account = neo2_core::Account::new(account_hash);
    account
        .balances
        .insert(GOVERNING_TOKEN_HASH, Fixed8::from_units(5));
    chain.accounts_mut().upsert(account_hash, account).unwrap();

    let mut b = ScriptBuilder::new();
    b.emit_push_bytes(candidate.as_bytes())
        .emit_push_int(1)
        .emit(OpCode::PACK) // the vote list
        .emit_push_bytes(account_hash.as_bytes())
        .emit_syscall("Neo.Blockchain.GetAccount")
        .emit_syscall("Neo.Account.SetVotes")
        .emit(OpCode::RET);
    let result = execute(
        &mut chain,
        b.into_bytes(),
        ExecutionInit::application(ScriptContainer::from(tx)),
    );
    assert!(result.state.is_halt(), "fault: {:?}", result.fault);

    let stored = chain.accounts().try_get(&account_hash).unwrap();
    assert_eq!(stored.votes, vec![candidate]);
}

#[test]
fn set_votes_without_governing_balance_faults() {
    let mut chain = MemoryBlockchain::new();
    let account_hash = UInt160::new([0x32; 20]);
    let tx = witnessed_tx(&mut chain, account_hash);
    let (_, candidate) = test_key();

    let mut b = ScriptBuilder::new();
    b.emit_push_bytes(candidate.as_bytes())
        .emit_push_int(1)
        .emit(OpCode::PACK)
        .emit_push_bytes(account_hash.as_bytes())
        .emit_syscall("Neo.Blockchain.GetAccount")
        .emit_syscall("Neo.Account.SetVotes");
    let result = execute(
        &mut chain,
        b.into_bytes(),
        ExecutionInit::application(ScriptContainer::from(tx)),
    );
    assert!(matches!(result.fault, Some(VmError::NotEligibleToVote)));
}

#[test]
fn validator_register_is_idempotent() {
    let mut chain = MemoryBlockchain::new();
    let (_, candidate) = test_key();
    let tx = witnessed_tx(&mut chain, signature_script_hash(&candidate));

    let mut b = ScriptBuilder::new();
    b.emit_push_bytes(candidate.as_bytes())
        .emit_syscall("Neo.Validator.Register")
        .emit_push_bytes(candidate.as_bytes())
        .emit_syscall("Neo.Validator.Register")
        .emit(OpCode::RET);
    let result = execute(
        &mut chain,
        b.into_bytes(),
        ExecutionInit::application(ScriptContainer::from(tx)),
    );
    assert!(result.state.is_halt(), "fault: {:?}", result.fault);
    let validator = chain.validators().try_get(&candidate).unwrap();
    assert!(validator.registered);
}

#[test]
fn checksig_and_checkmultisig_agree() {
    let mut chain = MemoryBlockchain::new();
    let (key, point) = test_key();
    let tx = Transaction::new(TransactionType::Invocation);
    let message = tx.message().unwrap();
    let signature: Signature = key.sign(&message);
    let sig_bytes = signature.to_bytes().to_vec();
    let init = || ExecutionInit::application(ScriptContainer::from(tx.clone()));

    let mut single = ScriptBuilder::new();
    single
        .emit_push_bytes(&sig_bytes)
        .emit_push_bytes(point.as_bytes())
        .emit(OpCode::CHECKSIG)
        .emit(OpCode::RET);
    let single_result = execute(&mut chain, single.into_bytes(), init());
    assert!(single_result.state.is_halt(), "fault: {:?}", single_result.fault);

    // Counted form: sig, 1, key, 1.
    let mut counted = ScriptBuilder::new();
    counted
        .emit_push_bytes(&sig_bytes)
        .emit_push_int(1)
        .emit_push_bytes(point.as_bytes())
        .emit_push_int(1)
        .emit(OpCode::CHECKMULTISIG)
        .emit(OpCode::RET);
    let counted_result = execute(&mut chain, counted.into_bytes(), init());
    assert!(counted_result.state.is_halt(), "fault: {:?}", counted_result.fault);

    // Array form: [sig], [key].
    let mut arrays = ScriptBuilder::new();
    arrays
        .emit_push_bytes(&sig_bytes)
        .emit_push_int(1)
        .emit(OpCode::PACK)
        .emit_push_bytes(point.as_bytes())
        .emit_push_int(1)
        .emit(OpCode::PACK)
        .emit(OpCode::CHECKMULTISIG)
        .emit(OpCode::RET);
    let arrays_result = execute(&mut chain, arrays.into_bytes(), init());
    assert!(arrays_result.state.is_halt(), "fault: {:?}", arrays_result.fault);

    assert!(single_result.stack[0].as_bool());
    assert!(counted_result.stack[0].as_bool());
    assert!(arrays_result.stack[0].as_bool());

    // A wrong message fails all forms the same way.
    let mut other_tx = Transaction::new(TransactionType::Invocation);
    other_tx.version = 1;
    let bad_init =
        ExecutionInit::application(ScriptContainer::from(other_tx));
    let mut bad = ScriptBuilder::new();
    bad.emit_push_bytes(&sig_bytes)
        .emit_push_bytes(point.as_bytes())
        .emit(OpCode::CHECKSIG)
        .emit(OpCode::RET);
    let bad_result = execute(&mut chain, bad.into_bytes(), bad_init);
    assert!(bad_result.state.is_halt());
    assert!(!bad_result.stack[0].as_bool());
}

#[test]
fn two_of_two_multisig_requires_both_signatures_in_order() {
    let mut chain = MemoryBlockchain::new();
    let key_a = SigningKey::from_slice(&[0x41; 32]).unwrap();
    let key_b = SigningKey::from_slice(&[0x42; 32]).unwrap();
    let point_a = ECPoint::from_bytes(key_a.verifying_key().to_encoded_point(true).as_bytes()).unwrap();
    let point_b = ECPoint::from_bytes(key_b.verifying_key().to_encoded_point(true).as_bytes()).unwrap();

    let tx = Transaction::new(TransactionType::Invocation);
    let message = tx.message().unwrap();
    let sig_a: Signature = key_a.sign(&message);
    let sig_b: Signature = key_b.sign(&message);
    let init = || ExecutionInit::application(ScriptContainer::from(tx.clone()));

    // Signatures in key order verify.
    let mut good = ScriptBuilder::new();
    good.emit_push_bytes(&sig_a.to_bytes())
        .emit_push_bytes(&sig_b.to_bytes())
        .emit_push_int(2)
        .emit_push_bytes(point_a.as_bytes())
        .emit_push_bytes(point_b.as_bytes())
        .emit_push_int(2)
        .emit(OpCode::CHECKMULTISIG)
        .emit(OpCode::RET);
    let result = execute(&mut chain, good.into_bytes(), init());
    assert!(result.state.is_halt(), "fault: {:?}", result.fault);
    assert!(result.stack[0].as_bool());

    // Swapped signatures break the forward-cursor walk.
    let mut swapped = ScriptBuilder::new();
    swapped
        .emit_push_bytes(&sig_b.to_bytes())
        .emit_push_bytes(&sig_a.to_bytes())
        .emit_push_int(2)
        .emit_push_bytes(point_a.as_bytes())
        .emit_push_bytes(point_b.as_bytes())
        .emit_push_int(2)
        .emit(OpCode::CHECKMULTISIG)
        .emit(OpCode::RET);
    let result = execute(&mut chain, swapped.into_bytes(), init());
    assert!(result.state.is_halt(), "fault: {:?}", result.fault);
    assert!(!result.stack[0].as_bool());
}

#[test]
fn script_container_is_reachable_from_scripts() {
    let mut chain = MemoryBlockchain::new();
    let tx = Transaction::new(TransactionType::Invocation);
    let tx_hash = tx.hash().unwrap();

    let mut b = ScriptBuilder::new();
    b.emit_syscall("System.ExecutionEngine.GetScriptContainer")
        .emit_syscall("Neo.Transaction.GetHash")
        .emit(OpCode::RET);
    let result = execute(
        &mut chain,
        b.into_bytes(),
        ExecutionInit::application(ScriptContainer::from(tx)),
    );
    assert!(result.state.is_halt(), "fault: {:?}", result.fault);
    match &result.stack[0] {
        StackItem::Uint256(hash) => assert_eq!(*hash, tx_hash),
        other => panic!("expected the tx hash, got {other:?}"),
    }
}

#[test]
fn notifications_carry_contract_parameter_trees() {
    let mut chain = MemoryBlockchain::new();
    let mut b = ScriptBuilder::new();
    b.emit_push_bytes(b"transfer")
        .emit_push_int(5)
        .emit_push_int(2)
        .emit(OpCode::PACK)
        .emit_syscall("Neo.Runtime.Notify")
        .emit(OpCode::RET);
    let result = execute(&mut chain, b.into_bytes(), plain_init());
    assert!(result.state.is_halt(), "fault: {:?}", result.fault);
    match &result.actions[0] {
        Action::Notification(n) => match &n.args {
            ContractParameter::Array(items) => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[0], ContractParameter::Integer(5.into()));
                assert_eq!(items[1], ContractParameter::ByteArray(b"transfer".to_vec()));
            }
            other => panic!("expected an array payload, got {other:?}"),
        },
        other => panic!("expected a notification, got {other:?}"),
    }
}
