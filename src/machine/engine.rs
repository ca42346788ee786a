// Execution engine for the virtual machine

use super::config::MachineConfig;
use super::constants::HALT_MARKER;
use super::errors::{Fault, LoadError};
use super::output::OutputBuffer;
use crate::memory::{arena::Arena, registers::Registers, value::Value};
use crate::program::instruction::Instruction;
use crate::program::{MemoryInit, Program};
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::{debug, info, trace};

/// A single machine: registers, arena and program store, exclusively owned
pub struct VirtualMachine {
    /// Sizes fixed at construction
    pub(super) config: MachineConfig,

    pub(super) registers: Registers,

    /// Stack and heap share this arena
    pub(super) memory: Arena,

    /// Program store, always `config.program_store_size` long
    pub(super) program: Vec<Instruction>,

    /// First program-store index for each label, built at load time
    pub(super) labels: FxHashMap<Arc<str>, usize>,

    /// Cells seeded on every restart
    overlay: Vec<MemoryInit>,

    output: OutputBuffer,

    running: bool,
}

impl VirtualMachine {
    /// Create a machine with an empty (all-nop) program store, ready to run
    pub fn new(config: MachineConfig) -> Result<Self, LoadError> {
        config.validate()?;

        let mut vm = VirtualMachine {
            config,
            registers: Registers::initial(&config),
            memory: Arena::new(config.main_memory_size),
            program: vec![Instruction::nop(); config.program_store_size],
            labels: FxHashMap::default(),
            overlay: Vec::new(),
            output: OutputBuffer::new(),
            running: false,
        };
        vm.restart();
        Ok(vm)
    }

    /// Replace the program store and memory overlay, then restart
    pub fn load(&mut self, program: Program) -> Result<(), LoadError> {
        let capacity = self.config.program_store_size;
        if program.len() > capacity {
            return Err(LoadError::ProgramTooLarge {
                len: program.len(),
                capacity,
            });
        }

        let size = self.config.main_memory_size;
        if let Some(bad) = program
            .overlay
            .iter()
            .find(|init| usize::try_from(init.address).map_or(true, |a| a >= size))
        {
            return Err(LoadError::OverlayAddressOutOfRange {
                address: bad.address,
                size,
            });
        }

        let Program {
            mut instructions,
            overlay,
        } = program;
        let loaded = instructions.len();
        instructions.resize(capacity, Instruction::nop());

        self.labels = Self::index_labels(&instructions);
        self.program = instructions;
        self.overlay = overlay;

        debug!(
            instructions = loaded,
            labels = self.labels.len(),
            overlay = self.overlay.len(),
            "program loaded"
        );

        self.restart();
        Ok(())
    }

    /// Reset registers, output and memory, then reapply the memory overlay.
    /// Safe to call at any point; in-flight state is discarded.
    pub fn restart(&mut self) {
        self.registers = Registers::initial(&self.config);
        self.output.clear();
        self.running = true;
        self.memory.clear();

        let applied = self.memory.apply_overlay(&self.overlay);
        debug_assert!(applied.is_ok(), "overlay addresses are checked in load");

        debug!(
            ep = self.registers.ep,
            hp = self.registers.hp,
            "machine restarted"
        );
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Fetch the instruction at `PC`, advance `PC`, then run the handler.
    /// Does nothing once the machine has halted.
    pub fn execute_next_instruction(&mut self) -> Result<(), Fault> {
        if !self.running {
            return Ok(());
        }

        let pc = self.registers.pc;
        let instr = self.fetch(pc)?.clone();
        self.registers.pc = pc + 1;

        trace!(pc, instruction = %instr, "dispatch");
        (instr.opcode().handler)(&instr, self)
    }

    fn fetch(&self, pc: i64) -> Result<&Instruction, Fault> {
        usize::try_from(pc)
            .ok()
            .and_then(|i| self.program.get(i))
            .ok_or(Fault::ProgramCounterOutOfRange {
                pc,
                capacity: self.program.len(),
            })
    }

    /// Stop execution and append the halt marker to the output
    pub fn halt(&mut self) {
        self.running = false;
        self.output.push_str(HALT_MARKER);
        info!(pc = self.registers.pc, "machine halted");
    }

    /// Append a value's display form to the output buffer
    pub fn print(&mut self, value: &Value) {
        self.output.print(value);
    }

    /// Take everything printed since the last drain
    pub fn drain_output(&mut self) -> String {
        self.output.drain()
    }

    pub fn output(&self) -> &OutputBuffer {
        &self.output
    }

    /// Flip the breakpoint on the instruction at `index`, returning the new state
    pub fn toggle_breakpoint(&mut self, index: usize) -> Result<bool, LoadError> {
        let capacity = self.program.len();
        self.program
            .get_mut(index)
            .map(Instruction::toggle_breakpoint)
            .ok_or(LoadError::InstructionIndexOutOfRange { index, capacity })
    }

    /// Whether the instruction about to run has a breakpoint set
    pub fn is_next_instruction_breakpoint(&self) -> bool {
        self.current_instruction()
            .is_some_and(Instruction::is_breakpoint)
    }

    /// The instruction at `PC`, if `PC` is inside the program store
    pub fn current_instruction(&self) -> Option<&Instruction> {
        usize::try_from(self.registers.pc)
            .ok()
            .and_then(|i| self.program.get(i))
    }

    pub fn instruction(&self, index: usize) -> Option<&Instruction> {
        self.program.get(index)
    }

    pub fn program_store(&self) -> &[Instruction] {
        &self.program
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    /// Instructions may rewrite any register directly (jumps, frame setup)
    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.registers
    }

    pub fn memory(&self) -> &Arena {
        &self.memory
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }
}
