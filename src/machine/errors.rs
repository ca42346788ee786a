//! Error types for the virtual machine
//!
//! [`Fault`] covers everything that can go wrong while an instruction runs.
//! Faults abort the current step and are returned to the caller of
//! [`execute_next_instruction`](super::engine::VirtualMachine::execute_next_instruction);
//! the engine never halts itself because of one, and registers changed
//! before the fault point keep their new values.
//!
//! [`LoadError`] covers configuration, opcode registration and program
//! loading, which happen outside the step loop.

use crate::memory::value::ValueKind;
use std::sync::Arc;
use thiserror::Error;

/// Runtime faults raised while executing an instruction
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Fault {
    /// Push past `EP`, or `enter` moving `EP` onto the heap
    #[error("Stack overflow: SP={sp} EP={ep} HP={hp}")]
    StackOverflow { sp: i64, ep: i64, hp: i64 },

    /// Pop or peek on an empty stack
    #[error("Stack underflow: attempt to pop on empty stack (SP={sp})")]
    StackUnderflow { sp: i64 },

    /// Heap allocation would cross `EP`
    #[error("Out of memory: requested {requested} cells with EP={ep} HP={hp}")]
    OutOfMemory { requested: usize, ep: i64, hp: i64 },

    /// Argument cannot be turned into a physical address
    #[error("Unable to convert {kind} argument of instruction {instruction} to a physical address")]
    InvalidAddressArgument {
        instruction: String,
        kind: ValueKind,
    },

    /// Operand is not an int or a ptr
    #[error("Argument for instruction {instruction} must be an int or a ptr, not {kind}")]
    TypeMismatch {
        instruction: String,
        kind: ValueKind,
    },

    /// No instruction in the program store carries this label
    #[error("Unresolvable label '{label}'")]
    UnresolvableLabel { label: Arc<str> },

    /// `PC` points outside the program store
    #[error("Program counter {pc} outside program store of {capacity} instructions")]
    ProgramCounterOutOfRange { pc: i64, capacity: usize },

    /// Direct memory access outside the arena
    #[error("Address {address} outside main memory of {size} cells")]
    AddressOutOfRange { address: i64, size: usize },

    /// Instruction is missing a required argument
    #[error("Instruction {instruction} requires argument {position}")]
    MissingArgument { instruction: String, position: u8 },

    /// `enter` with a frame that would not leave `SP < EP`
    #[error("Frame size must be at least 1, got {requested}")]
    InvalidFrameSize { requested: i64 },

    /// Negative allocation size
    #[error("Instruction {instruction} cannot allocate {requested} cells")]
    InvalidAllocationSize { instruction: String, requested: i64 },
}

/// Errors raised while configuring a machine or loading a program
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("Invalid machine configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown opcode '{0}'")]
    UnknownOpcode(String),

    #[error("Opcode '{0}' is already registered")]
    DuplicateOpcode(String),

    #[error("Program has {len} instructions but the program store holds {capacity}")]
    ProgramTooLarge { len: usize, capacity: usize },

    #[error("Memory overlay address {address} outside main memory of {size} cells")]
    OverlayAddressOutOfRange { address: i64, size: usize },

    #[error("Instruction index {index} outside program store of {capacity} instructions")]
    InstructionIndexOutOfRange { index: usize, capacity: usize },
}
