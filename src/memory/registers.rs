//! Machine registers
//!
//! Five signed registers describe where execution is and how the arena is
//! currently split:
//!
//! - `pc`: index into the program store
//! - `fp`: frame pointer, free for call-frame addressing by instructions
//! - `sp`: top occupied stack slot, `-1` when the stack is empty
//! - `ep`: highest index the stack may grow into
//! - `hp`: lowest allocated heap cell, arena size when the heap is empty
//!
//! The layout invariant is `sp < ep <= hp <= arena size`.

use crate::machine::config::MachineConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    pub pc: i64,
    pub fp: i64,
    pub sp: i64,
    pub ep: i64,
    pub hp: i64,
}

impl Registers {
    /// Register values at (re)start for the given configuration
    pub fn initial(config: &MachineConfig) -> Self {
        Registers {
            pc: 0,
            fp: 0,
            sp: -1,
            ep: config.max_stack_size as i64,
            hp: config.main_memory_size as i64,
        }
    }

    /// Check `sp < ep <= hp <= arena_size`
    pub fn is_consistent(&self, arena_size: usize) -> bool {
        self.sp < self.ep && self.ep <= self.hp && self.hp <= arena_size as i64
    }

    /// Number of occupied stack slots
    pub fn stack_depth(&self) -> usize {
        (self.sp + 1).max(0) as usize
    }
}
