//! The execution engine: fetch, decode, account, dispatch.
//!
//! One engine instance owns the two operand stacks, the invocation
//! stack of frames, the gas budget, the action log and the
//! created-contracts map. Nested invocations (CALL/APPCALL/TAILCALL) are
//! frames on the same engine, so stacks and counters are shared across
//! the whole invocation tree, and any fault unwinds all of it.

use crate::actions::{Action, ActionTemplate, LogAction, NotificationAction};
use crate::descriptor::OpDescriptor;
use crate::error::{VmError, VmResult};
use crate::instruction::Instruction;
use crate::limits::{MAX_INVOCATION_STACK_SIZE, MAX_SCRIPT_LENGTH, MAX_STACK_SIZE};
use crate::ops;
use crate::stack_item::StackItem;
use crate::trigger::TriggerType;
use hashbrown::HashMap;
use neo2_core::{ContractParameter, Fixed8, ScriptContainer, UInt160};
use neo2_cryptography::hash160;
use neo2_ledger::Blockchain;
use std::rc::Rc;

/// Terminal state of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VmState {
    Halt,
    Fault,
}

impl VmState {
    pub fn is_halt(&self) -> bool {
        matches!(self, VmState::Halt)
    }

    pub fn is_fault(&self) -> bool {
        matches!(self, VmState::Fault)
    }
}

/// Immutable per-run inputs: the triggering container, the trigger kind
/// and the coordinates stamped onto emitted actions.
#[derive(Clone, Debug)]
pub struct ExecutionInit {
    pub container: ScriptContainer,
    pub trigger: TriggerType,
    pub template: ActionTemplate,
}

impl ExecutionInit {
    pub fn new(container: ScriptContainer, trigger: TriggerType, template: ActionTemplate) -> Self {
        Self {
            container,
            trigger,
            template,
        }
    }

    /// An Application-trigger bundle with the template derived from the
    /// container where possible.
    pub fn application(container: ScriptContainer) -> Self {
        let template = Self::derive_template(&container);
        Self::new(container, TriggerType::Application, template)
    }

    /// A Verification-trigger bundle.
    pub fn verification(container: ScriptContainer) -> Self {
        let template = Self::derive_template(&container);
        Self::new(container, TriggerType::Verification, template)
    }

    fn derive_template(container: &ScriptContainer) -> ActionTemplate {
        let mut template = ActionTemplate::default();
        if let Some(tx) = container.transaction() {
            if let Ok(hash) = tx.hash() {
                template.transaction_hash = hash;
            }
        }
        if let Some(block) = container.block() {
            template.block_index = block.index();
            if let Ok(hash) = block.hash() {
                template.block_hash = hash;
            }
        }
        template
    }
}

/// Per-call knobs of `execute_script`.
#[derive(Clone, Debug, Default)]
pub struct ExecuteOptions {
    /// Script hash recorded as the caller of the loaded script.
    pub calling_script_hash: Option<UInt160>,
    /// Restricts the script to push opcodes and RET.
    pub push_only: bool,
}

/// What a run hands back to the embedder.
#[derive(Debug)]
pub struct ExecutionResult {
    pub state: VmState,
    /// The main evaluation stack as of termination (bottom first).
    pub stack: Vec<StackItem>,
    /// Emitted actions in emission order.
    pub actions: Vec<Action>,
    pub gas_consumed: Fixed8,
    /// The fault that terminated the run, when `state` is `Fault`.
    pub fault: Option<VmError>,
}

/// One invocation frame: a script with its own program counter and
/// script-hash identity. The operand stacks live on the engine and are
/// shared by every frame.
pub(crate) struct Frame {
    pub code: Rc<Vec<u8>>,
    pub pc: usize,
    pub script_hash: UInt160,
    pub calling_script_hash: Option<UInt160>,
    pub push_only: bool,
}

/// The virtual machine.
pub struct ExecutionEngine<'a> {
    ledger: &'a mut dyn Blockchain,
    pub(crate) init: ExecutionInit,
    pub(crate) stack: Vec<StackItem>,
    pub(crate) alt: Vec<StackItem>,
    pub(crate) frames: Vec<Frame>,
    gas_left: Fixed8,
    start_gas: Fixed8,
    pub(crate) action_index: u32,
    actions: Vec<Action>,
    /// Contract hash -> script hash of the invocation that created it.
    pub(crate) created_contracts: HashMap<UInt160, UInt160>,
    entry_script_hash: UInt160,
}

impl<'a> ExecutionEngine<'a> {
    /// Runs `code` to completion against `ledger` and returns the final
    /// state. This is the only public entry point; nested invocations go
    /// through APPCALL/TAILCALL inside the run.
    pub fn execute_script(
        ledger: &'a mut dyn Blockchain,
        code: Vec<u8>,
        init: ExecutionInit,
        gas: Fixed8,
        options: ExecuteOptions,
    ) -> ExecutionResult {
        let mut engine = ExecutionEngine {
            ledger,
            init,
            stack: Vec::new(),
            alt: Vec::new(),
            frames: Vec::new(),
            gas_left: gas,
            start_gas: gas,
            action_index: 0,
            actions: Vec::new(),
            created_contracts: HashMap::new(),
            entry_script_hash: UInt160::zero(),
        };

        let outcome = engine
            .load_script(code, options.calling_script_hash, options.push_only)
            .and_then(|_| {
                engine.entry_script_hash = engine.frames[0].script_hash;
                engine.run()
            });

        let (state, fault) = match outcome {
            Ok(()) => (VmState::Halt, None),
            Err(error) => {
                log::debug!("script faulted: {error}");
                (VmState::Fault, Some(error))
            }
        };

        ExecutionResult {
            state,
            stack: engine.stack,
            actions: engine.actions,
            gas_consumed: engine
                .start_gas
                .checked_sub(engine.gas_left)
                .unwrap_or(engine.start_gas),
            fault,
        }
    }

    fn run(&mut self) -> VmResult<()> {
        loop {
            let Some(frame) = self.frames.last() else {
                return Ok(());
            };
            // Running off the end of the code is an implicit RET.
            if frame.pc >= frame.code.len() {
                self.frames.pop();
                continue;
            }
            self.step()?;
        }
    }

    /// Executes exactly one instruction of the current frame. The checks
    /// run in a fixed order; nothing is popped before they all pass, so a
    /// faulting step leaves no partial stack effects behind.
    fn step(&mut self) -> VmResult<()> {
        let (code, pc, push_only) = {
            let frame = self
                .frames
                .last()
                .ok_or(VmError::StackUnderflow {
                    needed: 1,
                    available: 0,
                })?;
            (Rc::clone(&frame.code), frame.pc, frame.push_only)
        };

        let instr = Instruction::decode(&code, pc)?;
        log::trace!("{:>6}: {}", instr.pointer, instr.opcode);

        if push_only && !instr.opcode.is_push() && instr.opcode != crate::op_code::OpCode::RET {
            return Err(VmError::PushOnlyViolation {
                opcode: instr.opcode.byte(),
            });
        }

        let desc = OpDescriptor::for_instruction(&instr, self)?;

        if self.stack.len() < desc.stack_in {
            return Err(VmError::stack_underflow(desc.stack_in, self.stack.len()));
        }
        if self.alt.len() < desc.alt_in {
            return Err(VmError::stack_underflow(desc.alt_in, self.alt.len()));
        }

        self.charge(desc.fee)?;

        let depth = self.frames.len() + desc.invocation;
        if depth > MAX_INVOCATION_STACK_SIZE {
            return Err(VmError::InvocationOverflow {
                depth,
                max: MAX_INVOCATION_STACK_SIZE,
            });
        }

        let projected = (self.stack.len() + self.alt.len() + desc.stack_out + desc.alt_out)
            as isize
            + desc.modify
            + desc.modify_alt;
        if projected > MAX_STACK_SIZE as isize {
            return Err(VmError::StackOverflow {
                size: projected.max(0) as usize,
                max: MAX_STACK_SIZE,
            });
        }

        desc.check_bounds()?;

        if let Some(frame) = self.frames.last_mut() {
            frame.pc = instr.next;
        }

        let mut args = Vec::with_capacity(desc.stack_in);
        for _ in 0..desc.stack_in {
            args.push(self.pop()?);
        }
        let mut alt_args = Vec::with_capacity(desc.alt_in);
        for _ in 0..desc.alt_in {
            alt_args.push(self.alt_pop()?);
        }

        ops::dispatch(self, &instr, args, alt_args)
    }

    /// Pushes a new frame for `code`. Its script hash is the Hash160 of
    /// the bytes, which for deployed contracts equals the contract hash.
    pub(crate) fn load_script(
        &mut self,
        code: Vec<u8>,
        calling_script_hash: Option<UInt160>,
        push_only: bool,
    ) -> VmResult<()> {
        if code.len() > MAX_SCRIPT_LENGTH {
            return Err(VmError::ScriptTooLarge {
                size: code.len(),
                max: MAX_SCRIPT_LENGTH,
            });
        }
        let script_hash = UInt160::new(hash160(&code));
        self.frames.push(Frame {
            code: Rc::new(code),
            pc: 0,
            script_hash,
            calling_script_hash,
            push_only,
        });
        Ok(())
    }

    /// Pops the current frame; control resumes in the caller at its
    /// already-advanced program counter.
    pub(crate) fn ret(&mut self) {
        self.frames.pop();
    }

    // --- operand stack access -------------------------------------------

    pub(crate) fn push(&mut self, item: StackItem) {
        self.stack.push(item);
    }

    pub(crate) fn pop(&mut self) -> VmResult<StackItem> {
        self.stack
            .pop()
            .ok_or_else(|| VmError::stack_underflow(1, 0))
    }

    /// The item `depth` positions below the top, without removing it.
    pub(crate) fn peek(&self, depth: usize) -> VmResult<&StackItem> {
        let len = self.stack.len();
        if depth >= len {
            return Err(VmError::stack_underflow(depth + 1, len));
        }
        Ok(&self.stack[len - 1 - depth])
    }

    /// Removes the item `depth` positions below the top.
    pub(crate) fn remove_at(&mut self, depth: usize) -> VmResult<StackItem> {
        let len = self.stack.len();
        if depth >= len {
            return Err(VmError::stack_underflow(depth + 1, len));
        }
        Ok(self.stack.remove(len - 1 - depth))
    }

    /// Inserts an item so that it sits `depth` positions below the top.
    pub(crate) fn insert_at(&mut self, depth: usize, item: StackItem) -> VmResult<()> {
        let len = self.stack.len();
        if depth > len {
            return Err(VmError::stack_underflow(depth, len));
        }
        self.stack.insert(len - depth, item);
        Ok(())
    }

    /// Swaps the items at two depths.
    pub(crate) fn swap(&mut self, a: usize, b: usize) -> VmResult<()> {
        let len = self.stack.len();
        if a >= len || b >= len {
            return Err(VmError::stack_underflow(a.max(b) + 1, len));
        }
        self.stack.swap(len - 1 - a, len - 1 - b);
        Ok(())
    }

    pub(crate) fn alt_push(&mut self, item: StackItem) {
        self.alt.push(item);
    }

    pub(crate) fn alt_pop(&mut self) -> VmResult<StackItem> {
        self.alt
            .pop()
            .ok_or_else(|| VmError::stack_underflow(1, 0))
    }

    pub(crate) fn alt_peek(&self, depth: usize) -> VmResult<&StackItem> {
        let len = self.alt.len();
        if depth >= len {
            return Err(VmError::stack_underflow(depth + 1, len));
        }
        Ok(&self.alt[len - 1 - depth])
    }

    // --- frame and environment access -----------------------------------

    /// Script hash of the executing frame.
    pub(crate) fn script_hash(&self) -> UInt160 {
        self.frames
            .last()
            .map(|f| f.script_hash)
            .unwrap_or(self.entry_script_hash)
    }

    pub(crate) fn calling_script_hash(&self) -> Option<UInt160> {
        self.frames.last().and_then(|f| f.calling_script_hash)
    }

    pub(crate) fn entry_script_hash(&self) -> UInt160 {
        self.entry_script_hash
    }

    pub(crate) fn trigger(&self) -> TriggerType {
        self.init.trigger
    }

    pub(crate) fn container(&self) -> &ScriptContainer {
        &self.init.container
    }

    /// The canonical signed message of the script container.
    pub(crate) fn container_message(&self) -> VmResult<Vec<u8>> {
        Ok(self.init.container.message()?)
    }

    pub(crate) fn ledger(&self) -> &dyn Blockchain {
        &*self.ledger
    }

    pub(crate) fn ledger_mut(&mut self) -> &mut dyn Blockchain {
        self.ledger
    }

    // --- gas -------------------------------------------------------------

    /// Subtracts a fee; faults before touching the stacks when the
    /// budget does not cover it.
    pub(crate) fn charge(&mut self, fee: Fixed8) -> VmResult<()> {
        if self.gas_left < fee {
            return Err(VmError::OutOfGas {
                needed: fee,
                left: self.gas_left,
            });
        }
        self.gas_left = self
            .gas_left
            .checked_sub(fee)
            .ok_or(VmError::OutOfGas {
                needed: fee,
                left: self.gas_left,
            })?;
        Ok(())
    }

    // --- witnesses -------------------------------------------------------

    /// The authenticated script-hash set of the container: for a
    /// transaction the owners of all spent outputs plus `Script`
    /// attributes, for a block the consensus address of the previous
    /// header.
    pub(crate) fn witness_hashes(&self) -> VmResult<Vec<UInt160>> {
        match &self.init.container {
            ScriptContainer::Transaction(tx) => {
                let mut hashes = Vec::new();
                for input in &tx.inputs {
                    let output = self
                        .ledger
                        .output(&input.prev_hash, input.prev_index)
                        .ok_or(VmError::bad_witness("unresolvable input reference"))?;
                    hashes.push(output.script_hash);
                }
                for attr in &tx.attributes {
                    if attr.usage == neo2_core::AttributeUsage::Script {
                        hashes.push(UInt160::from_slice(&attr.data)?);
                    }
                }
                hashes.sort();
                hashes.dedup();
                Ok(hashes)
            }
            ScriptContainer::Block(block) => {
                if block.header.prev_hash.is_zero() {
                    return Ok(Vec::new());
                }
                let prev = self.ledger.headers().get(&block.header.prev_hash)?;
                Ok(vec![prev.next_consensus])
            }
        }
    }

    /// Whether `hash` is in the container's authenticated set.
    pub(crate) fn check_witness(&self, hash: &UInt160) -> VmResult<bool> {
        Ok(self.witness_hashes()?.contains(hash))
    }

    // --- actions ---------------------------------------------------------

    pub(crate) fn emit_log(&mut self, message: String) {
        let t = self.init.template;
        let action = LogAction {
            block_index: t.block_index,
            block_hash: t.block_hash,
            transaction_index: t.transaction_index,
            transaction_hash: t.transaction_hash,
            index: self.action_index,
            script_hash: self.script_hash(),
            message,
        };
        self.action_index += 1;
        self.actions.push(Action::Log(action));
    }

    pub(crate) fn emit_notification(&mut self, args: ContractParameter) {
        let t = self.init.template;
        let action = NotificationAction {
            block_index: t.block_index,
            block_hash: t.block_hash,
            transaction_index: t.transaction_index,
            transaction_hash: t.transaction_hash,
            index: self.action_index,
            script_hash: self.script_hash(),
            args,
        };
        self.action_index += 1;
        self.actions.push(Action::Notification(action));
    }
}
