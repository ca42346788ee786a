//! Virtual machine execution engine
//!
//! This module provides the core execution logic:
//! - [`engine`]: The [`VirtualMachine`](engine::VirtualMachine) itself: load,
//!   restart, fetch-decode-execute, halt, output and breakpoints
//! - [`stack_ops`]: push, pop, peek, frame reservation, direct memory access
//! - [`heap_ops`]: bump allocation
//! - [`address`]: label and immediate address resolution
//! - [`errors`]: Step faults and load errors
//! - [`config`]: Construction-time sizes
//!
//! # Execution Model
//!
//! A host repeatedly asks [`is_running`](engine::VirtualMachine::is_running)
//! and calls
//! [`execute_next_instruction`](engine::VirtualMachine::execute_next_instruction).
//! Each step reads the instruction at `PC`, advances `PC`, then calls the
//! opcode's handler, which may redirect `PC`. Running past the loaded
//! program executes nop padding indefinitely; only `halt` stops the machine.
//!
//! # Opcodes
//!
//! The engine defines no opcodes. Handlers are registered through
//! [`OpcodeTable`](crate::program::opcode::OpcodeTable) and call back into
//! the public operations in this module.

pub mod address;
pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod heap_ops;
pub mod output;
pub mod stack_ops;
