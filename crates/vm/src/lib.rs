//! The neo2 virtual machine.
//!
//! A stack-based bytecode interpreter executing smart-contract scripts
//! against a blockchain state view. A run takes a script, an execution
//! init bundle (the containing transaction or block, the trigger kind and
//! an action template), a gas budget and a [`neo2_ledger::Blockchain`]
//! facade, and produces the final evaluation stack, a halt/fault state,
//! the gas consumed and the actions (logs and notifications) the script
//! emitted.
//!
//! Execution is deterministic byte for byte: the opcode table, the gas
//! schedule, the stack/size limits and the syscall catalogue are all part
//! of the consensus surface.
//!
//! ## Example
//!
//! ```rust,no_run
//! use neo2_core::{ScriptContainer, Transaction, TransactionType};
//! use neo2_ledger::MemoryBlockchain;
//! use neo2_vm::{ExecuteOptions, ExecutionEngine, ExecutionInit, OpCode, ScriptBuilder};
//!
//! let mut builder = ScriptBuilder::new();
//! builder.emit_push_int(2).emit_push_int(3).emit(OpCode::ADD).emit(OpCode::RET);
//!
//! let mut chain = MemoryBlockchain::new();
//! let init = ExecutionInit::application(
//!     ScriptContainer::from(Transaction::new(TransactionType::Invocation)),
//! );
//! let result = ExecutionEngine::execute_script(
//!     &mut chain,
//!     builder.into_bytes(),
//!     init,
//!     neo2_core::Fixed8::from_units(10),
//!     ExecuteOptions::default(),
//! );
//! assert!(result.state.is_halt());
//! ```

pub mod actions;
pub mod descriptor;
pub mod engine;
pub mod error;
pub mod instruction;
pub mod limits;
pub mod op_code;
pub mod ops;
pub mod script_builder;
pub mod stack_item;
pub mod syscalls;
pub mod trigger;

pub use actions::{Action, ActionTemplate, LogAction, NotificationAction};
pub use descriptor::OpDescriptor;
pub use engine::{
    ExecuteOptions, ExecutionEngine, ExecutionInit, ExecutionResult, VmState,
};
pub use error::{VmError, VmResult};
pub use instruction::Instruction;
pub use op_code::OpCode;
pub use script_builder::ScriptBuilder;
pub use stack_item::{StackItem, StorageContext};
pub use trigger::TriggerType;
