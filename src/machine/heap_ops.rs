//! Heap allocation
//!
//! The heap is a bump allocator growing down from the top of the arena.
//! Each allocation lowers `HP` by the requested size and hands back a
//! pointer to the new `HP`. Nothing is ever freed; only a restart returns
//! heap cells.

use super::engine::VirtualMachine;
use super::errors::Fault;
use crate::memory::value::Value;
use tracing::debug;

impl VirtualMachine {
    /// Allocate `units` cells, returning a [`Value::Ptr`] to the lowest one.
    ///
    /// Raises [`Fault::OutOfMemory`] when the block would reach below `EP`;
    /// `HP` is unchanged in that case.
    pub fn allocate(&mut self, units: usize) -> Result<Value, Fault> {
        let regs = self.registers;
        let out_of_memory = Fault::OutOfMemory {
            requested: units,
            ep: regs.ep,
            hp: regs.hp,
        };

        let hp = i64::try_from(units)
            .ok()
            .and_then(|n| regs.hp.checked_sub(n))
            .ok_or_else(|| out_of_memory.clone())?;
        if hp < regs.ep {
            return Err(out_of_memory);
        }

        self.registers.hp = hp;
        debug!(units, hp, "heap block allocated");
        Ok(Value::Ptr(hp))
    }

    /// The live heap, lowest address first
    pub fn heap(&self) -> &[Value] {
        let hp = usize::try_from(self.registers.hp).unwrap_or(0);
        self.memory.cells().get(hp..).unwrap_or(&[])
    }

    /// Cells currently handed out by the allocator
    pub fn heap_size(&self) -> usize {
        self.heap().len()
    }
}
