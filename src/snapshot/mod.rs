// Point-in-time copies of machine state

use crate::machine::engine::VirtualMachine;
use crate::memory::{registers::Registers, value::Value};

/// Every piece of mutable machine state except the program store
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub registers: Registers,
    pub memory: Vec<Value>,
    pub output: String,
    pub running: bool,
}

impl Snapshot {
    /// Number of occupied stack slots when the snapshot was taken
    pub fn stack_depth(&self) -> usize {
        self.registers.stack_depth()
    }

    /// Cells the heap had handed out when the snapshot was taken
    pub fn heap_size(&self) -> usize {
        usize::try_from(self.registers.hp)
            .map_or(0, |hp| self.memory.len().saturating_sub(hp))
    }
}

impl VirtualMachine {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            registers: *self.registers(),
            memory: self.memory().cells().to_vec(),
            output: self.output().as_str().to_string(),
            running: self.is_running(),
        }
    }
}
