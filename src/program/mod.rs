//! Loadable programs
//!
//! - [`opcode`]: Opcode definitions and the registration table
//! - [`instruction`]: Instructions as stored in the program store
//!
//! A [`Program`] is what a front-end hands to
//! [`VirtualMachine::load`](crate::machine::engine::VirtualMachine::load):
//! the ordered instructions plus a memory overlay applied on every restart.

pub mod instruction;
pub mod opcode;

use crate::memory::value::Value;
use instruction::Instruction;

/// One seeded arena cell
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryInit {
    pub address: i64,
    pub value: Value,
}

impl MemoryInit {
    pub fn new(address: i64, value: Value) -> Self {
        MemoryInit { address, value }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Program {
    pub instructions: Vec<Instruction>,
    pub overlay: Vec<MemoryInit>,
}

impl Program {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Program {
            instructions,
            overlay: Vec::new(),
        }
    }

    pub fn with_overlay(mut self, overlay: Vec<MemoryInit>) -> Self {
        self.overlay = overlay;
        self
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}
