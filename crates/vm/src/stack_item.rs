//! The runtime value algebra.
//!
//! Arrays and structs carry reference semantics: two stack slots may
//! alias the same backing storage, and that aliasing is observable to
//! scripts. They are therefore `Rc<RefCell<..>>`; structs additionally
//! deep-copy when assigned into another collection. Ledger entities ride
//! the stack as opaque wrappers whose coercions are deliberately narrow.

use crate::error::{VmError, VmResult};
use neo2_core::{
    Account, Asset, Block, Contract, ContractParameter, Header, Input, Output, Transaction,
    TransactionAttribute, UInt160, UInt256, Validator,
};
use neo2_cryptography::ECPoint;
use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

/// Capability token authorizing storage access on behalf of a contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StorageContext {
    pub script_hash: UInt160,
}

/// Shared backing storage of an Array or Struct item.
pub type ItemList = Rc<RefCell<Vec<StackItem>>>;

/// A value on one of the operand stacks.
#[derive(Clone, Debug)]
pub enum StackItem {
    Boolean(bool),
    Integer(BigInt),
    Buffer(Vec<u8>),
    Array(ItemList),
    Struct(ItemList),
    Block(Arc<Block>),
    Header(Arc<Header>),
    Transaction(Arc<Transaction>),
    Input(Arc<Input>),
    Output(Arc<Output>),
    Attribute(Arc<TransactionAttribute>),
    Account(Arc<Account>),
    Asset(Arc<Asset>),
    Contract(Arc<Contract>),
    Validator(Arc<Validator>),
    EcPoint(ECPoint),
    Uint160(UInt160),
    Uint256(UInt256),
    StorageContext(StorageContext),
}

/// Canonical little-endian two's-complement encoding; zero is empty.
pub fn bigint_to_bytes(value: &BigInt) -> Vec<u8> {
    if value.is_zero() {
        Vec::new()
    } else {
        value.to_signed_bytes_le()
    }
}

/// Inverse of [`bigint_to_bytes`]; the empty buffer decodes to zero.
pub fn bigint_from_bytes(bytes: &[u8]) -> BigInt {
    if bytes.is_empty() {
        BigInt::zero()
    } else {
        BigInt::from_signed_bytes_le(bytes)
    }
}

impl StackItem {
    pub fn from_bool(value: bool) -> Self {
        StackItem::Boolean(value)
    }

    pub fn from_int<T: Into<BigInt>>(value: T) -> Self {
        StackItem::Integer(value.into())
    }

    pub fn from_bytes<T: Into<Vec<u8>>>(value: T) -> Self {
        StackItem::Buffer(value.into())
    }

    pub fn new_array(items: Vec<StackItem>) -> Self {
        StackItem::Array(Rc::new(RefCell::new(items)))
    }

    pub fn new_struct(items: Vec<StackItem>) -> Self {
        StackItem::Struct(Rc::new(RefCell::new(items)))
    }

    /// The variant name, for faults and logs.
    pub fn type_name(&self) -> &'static str {
        match self {
            StackItem::Boolean(_) => "Boolean",
            StackItem::Integer(_) => "Integer",
            StackItem::Buffer(_) => "Buffer",
            StackItem::Array(_) => "Array",
            StackItem::Struct(_) => "Struct",
            StackItem::Block(_) => "Block",
            StackItem::Header(_) => "Header",
            StackItem::Transaction(_) => "Transaction",
            StackItem::Input(_) => "Input",
            StackItem::Output(_) => "Output",
            StackItem::Attribute(_) => "Attribute",
            StackItem::Account(_) => "Account",
            StackItem::Asset(_) => "Asset",
            StackItem::Contract(_) => "Contract",
            StackItem::Validator(_) => "Validator",
            StackItem::EcPoint(_) => "ECPoint",
            StackItem::Uint160(_) => "UInt160",
            StackItem::Uint256(_) => "UInt256",
            StackItem::StorageContext(_) => "StorageContext",
        }
    }

    pub fn is_struct(&self) -> bool {
        matches!(self, StackItem::Struct(_))
    }

    /// Truthiness. Total: collections and entity wrappers are always
    /// true, buffers are true when any byte is non-zero.
    pub fn as_bool(&self) -> bool {
        match self {
            StackItem::Boolean(b) => *b,
            StackItem::Integer(i) => !i.is_zero(),
            StackItem::Buffer(b) => b.iter().any(|&byte| byte != 0),
            _ => true,
        }
    }

    /// Numeric value of a scalar item.
    pub fn as_int(&self) -> VmResult<BigInt> {
        match self {
            StackItem::Boolean(b) => Ok(BigInt::from(u8::from(*b))),
            StackItem::Integer(i) => Ok(i.clone()),
            StackItem::Buffer(b) => Ok(bigint_from_bytes(b)),
            other => Err(VmError::invalid_type("Integer", other.type_name())),
        }
    }

    /// Byte encoding of a scalar item or a hash/key wrapper.
    pub fn as_bytes(&self) -> VmResult<Vec<u8>> {
        match self {
            StackItem::Boolean(b) => Ok(if *b { vec![1] } else { Vec::new() }),
            StackItem::Integer(i) => Ok(bigint_to_bytes(i)),
            StackItem::Buffer(b) => Ok(b.clone()),
            StackItem::Uint160(h) => Ok(h.to_vec()),
            StackItem::Uint256(h) => Ok(h.to_vec()),
            StackItem::EcPoint(p) => Ok(p.to_vec()),
            other => Err(VmError::invalid_type("Buffer", other.type_name())),
        }
    }

    /// Shared element storage of an Array or Struct.
    pub fn as_items(&self) -> VmResult<ItemList> {
        match self {
            StackItem::Array(items) | StackItem::Struct(items) => Ok(Rc::clone(items)),
            other => Err(VmError::invalid_type("Array", other.type_name())),
        }
    }

    pub fn as_block(&self) -> VmResult<Arc<Block>> {
        match self {
            StackItem::Block(block) => Ok(Arc::clone(block)),
            other => Err(VmError::invalid_type("Block", other.type_name())),
        }
    }

    /// Header view: accepts a Header item or a Block item (a block's
    /// header fields are addressable through the same accessors).
    pub fn as_header(&self) -> VmResult<Header> {
        match self {
            StackItem::Header(header) => Ok((**header).clone()),
            StackItem::Block(block) => Ok(block.header.clone()),
            other => Err(VmError::invalid_type("Header", other.type_name())),
        }
    }

    pub fn as_transaction(&self) -> VmResult<Arc<Transaction>> {
        match self {
            StackItem::Transaction(tx) => Ok(Arc::clone(tx)),
            other => Err(VmError::invalid_type("Transaction", other.type_name())),
        }
    }

    pub fn as_input(&self) -> VmResult<Arc<Input>> {
        match self {
            StackItem::Input(input) => Ok(Arc::clone(input)),
            other => Err(VmError::invalid_type("Input", other.type_name())),
        }
    }

    pub fn as_output(&self) -> VmResult<Arc<Output>> {
        match self {
            StackItem::Output(output) => Ok(Arc::clone(output)),
            other => Err(VmError::invalid_type("Output", other.type_name())),
        }
    }

    pub fn as_attribute(&self) -> VmResult<Arc<TransactionAttribute>> {
        match self {
            StackItem::Attribute(attr) => Ok(Arc::clone(attr)),
            other => Err(VmError::invalid_type("Attribute", other.type_name())),
        }
    }

    pub fn as_account(&self) -> VmResult<Arc<Account>> {
        match self {
            StackItem::Account(account) => Ok(Arc::clone(account)),
            other => Err(VmError::invalid_type("Account", other.type_name())),
        }
    }

    pub fn as_asset(&self) -> VmResult<Arc<Asset>> {
        match self {
            StackItem::Asset(asset) => Ok(Arc::clone(asset)),
            other => Err(VmError::invalid_type("Asset", other.type_name())),
        }
    }

    pub fn as_contract(&self) -> VmResult<Arc<Contract>> {
        match self {
            StackItem::Contract(contract) => Ok(Arc::clone(contract)),
            other => Err(VmError::invalid_type("Contract", other.type_name())),
        }
    }

    pub fn as_validator(&self) -> VmResult<Arc<Validator>> {
        match self {
            StackItem::Validator(validator) => Ok(Arc::clone(validator)),
            other => Err(VmError::invalid_type("Validator", other.type_name())),
        }
    }

    pub fn as_storage_context(&self) -> VmResult<StorageContext> {
        match self {
            StackItem::StorageContext(ctx) => Ok(*ctx),
            other => Err(VmError::invalid_type("StorageContext", other.type_name())),
        }
    }

    /// A script hash: the wrapper itself or a 20-byte buffer, as-is.
    pub fn as_uint160(&self) -> VmResult<UInt160> {
        match self {
            StackItem::Uint160(hash) => Ok(*hash),
            other => {
                let bytes = other.as_bytes()?;
                UInt160::from_slice(&bytes).map_err(VmError::from)
            }
        }
    }

    /// A public key: the wrapper itself or a compressed 33-byte buffer.
    pub fn as_ec_point(&self) -> VmResult<ECPoint> {
        match self {
            StackItem::EcPoint(point) => Ok(point.clone()),
            other => {
                let bytes = other.as_bytes()?;
                ECPoint::from_bytes(&bytes)
                    .map_err(|e| VmError::Core(neo2_core::CoreError::from(e)))
            }
        }
    }

    /// Structural equality for scalars (the canonical byte encodings are
    /// compared, so `Integer` and `Buffer` can be equal), value equality
    /// for hash/key wrappers, reference equality for everything else.
    pub fn equals(&self, other: &StackItem) -> bool {
        use StackItem::*;
        match (self, other) {
            (Array(a), Array(b)) | (Struct(a), Struct(b)) => Rc::ptr_eq(a, b),
            (Block(a), Block(b)) => Arc::ptr_eq(a, b),
            (Header(a), Header(b)) => Arc::ptr_eq(a, b),
            (Transaction(a), Transaction(b)) => Arc::ptr_eq(a, b),
            (Input(a), Input(b)) => Arc::ptr_eq(a, b),
            (Output(a), Output(b)) => Arc::ptr_eq(a, b),
            (Attribute(a), Attribute(b)) => Arc::ptr_eq(a, b),
            (Account(a), Account(b)) => Arc::ptr_eq(a, b),
            (Asset(a), Asset(b)) => Arc::ptr_eq(a, b),
            (Contract(a), Contract(b)) => Arc::ptr_eq(a, b),
            (Validator(a), Validator(b)) => Arc::ptr_eq(a, b),
            (EcPoint(a), EcPoint(b)) => a == b,
            (Uint160(a), Uint160(b)) => a == b,
            (Uint256(a), Uint256(b)) => a == b,
            (StorageContext(a), StorageContext(b)) => a == b,
            (a, b) if a.is_scalar() && b.is_scalar() => {
                match (a.as_bytes(), b.as_bytes()) {
                    (Ok(left), Ok(right)) => left == right,
                    _ => false,
                }
            }
            _ => false,
        }
    }

    fn is_scalar(&self) -> bool {
        matches!(
            self,
            StackItem::Boolean(_) | StackItem::Integer(_) | StackItem::Buffer(_)
        )
    }

    /// The copy stored when a value is assigned into another collection:
    /// structs are cloned element-wise into fresh storage, everything
    /// else (arrays included) keeps its identity.
    pub fn copy_on_assign(&self) -> StackItem {
        match self {
            StackItem::Struct(items) => {
                let cloned = items
                    .borrow()
                    .iter()
                    .map(StackItem::copy_on_assign)
                    .collect();
                StackItem::new_struct(cloned)
            }
            other => other.clone(),
        }
    }

    /// Projects the item into the serializable parameter tree carried by
    /// notifications.
    pub fn to_contract_parameter(&self) -> ContractParameter {
        match self {
            StackItem::Boolean(b) => ContractParameter::Boolean(*b),
            StackItem::Integer(i) => ContractParameter::Integer(i.clone()),
            StackItem::Buffer(b) => ContractParameter::ByteArray(b.clone()),
            StackItem::Array(items) | StackItem::Struct(items) => ContractParameter::Array(
                items
                    .borrow()
                    .iter()
                    .map(StackItem::to_contract_parameter)
                    .collect(),
            ),
            StackItem::Uint160(h) => ContractParameter::Hash160(*h),
            StackItem::Uint256(h) => ContractParameter::Hash256(*h),
            StackItem::EcPoint(p) => ContractParameter::PublicKey(p.clone()),
            other => ContractParameter::InteropInterface(other.type_name().to_string()),
        }
    }

    /// Index helper for collection opcodes: faults on negative values and
    /// on values that do not fit a machine word.
    pub fn as_index(&self, op: &'static str) -> VmResult<usize> {
        let value = self.as_int()?;
        let value = value
            .to_i64()
            .ok_or_else(|| VmError::invalid_arguments(op, "count does not fit in 64 bits"))?;
        if value < 0 {
            return Err(VmError::negative_argument(op, value));
        }
        Ok(value as usize)
    }
}
