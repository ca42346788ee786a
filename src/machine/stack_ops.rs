//! Stack operations
//!
//! The operand stack lives at the bottom of the arena, from address 0 up to
//! `SP`. Its ceiling is `EP`, not the physical end of the arena, so the
//! cells between `EP` and `HP` stay reserved for the heap even before any
//! allocation happens.
//!
//! # Faults
//!
//! - `push` raises [`Fault::StackOverflow`] when the new `SP` would reach `EP`
//! - `pop`/`peek` raise [`Fault::StackUnderflow`] on an empty stack
//! - `enter` raises [`Fault::InvalidFrameSize`] for frames smaller than one
//!   cell, and [`Fault::StackOverflow`] when the new `EP` would reach `HP`
//!
//! A failed operation leaves `SP`, `EP` and `HP` untouched, except for the
//! `SP` clamp in `enter` which happens before the overflow check.

use super::engine::VirtualMachine;
use super::errors::Fault;
use crate::memory::value::Value;
use tracing::debug;

impl VirtualMachine {
    pub fn push(&mut self, value: Value) -> Result<(), Fault> {
        let regs = self.registers;
        let sp = regs.sp + 1;
        if sp >= regs.ep {
            return Err(Fault::StackOverflow {
                sp: regs.sp,
                ep: regs.ep,
                hp: regs.hp,
            });
        }
        self.memory.set(sp, value)?;
        self.registers.sp = sp;
        Ok(())
    }

    /// Remove and return the top of the stack. The vacated cell keeps its
    /// value until a later push overwrites it.
    pub fn pop(&mut self) -> Result<Value, Fault> {
        let value = self.peek()?;
        self.registers.sp -= 1;
        Ok(value)
    }

    pub fn peek(&self) -> Result<Value, Fault> {
        let sp = self.registers.sp;
        if sp < 0 {
            return Err(Fault::StackUnderflow { sp });
        }
        self.memory.get(sp).cloned()
    }

    /// Reserve a frame of `frame_size` cells above `SP` by moving `EP`.
    ///
    /// Checked against the live `HP`, so earlier heap allocations shrink the
    /// room available for frames. `frame_size` must be at least 1 so that
    /// `SP < EP` still holds afterwards.
    pub fn enter(&mut self, frame_size: i64) -> Result<(), Fault> {
        if frame_size < 1 {
            return Err(Fault::InvalidFrameSize {
                requested: frame_size,
            });
        }
        if self.registers.sp < 0 {
            self.registers.sp = 0;
        }

        let regs = self.registers;
        let overflow = Fault::StackOverflow {
            sp: regs.sp,
            ep: regs.ep,
            hp: regs.hp,
        };
        let ep = regs
            .sp
            .checked_add(frame_size)
            .ok_or_else(|| overflow.clone())?;
        if ep >= regs.hp {
            return Err(overflow);
        }

        self.registers.ep = ep;
        debug!(sp = regs.sp, frame_size, ep, "frame reserved");
        Ok(())
    }

    /// Read any arena cell
    pub fn read_cell(&self, address: i64) -> Result<Value, Fault> {
        self.memory.get(address).cloned()
    }

    /// Write any arena cell
    pub fn write_cell(&mut self, address: i64, value: Value) -> Result<(), Fault> {
        self.memory.set(address, value)
    }

    /// The live stack, bottom first
    pub fn stack(&self) -> &[Value] {
        &self.memory.cells()[..self.registers.stack_depth()]
    }
}
