//! # Introduction
//!
//! `arenavm` is a register-and-stack virtual machine. A program is a fixed
//! array of instructions; data lives in one fixed-size arena that serves as
//! both the operand stack (growing up from address 0) and a bump-allocated
//! heap (growing down from the top), kept apart by a movable boundary
//! register.
//!
//! ## Execution pipeline
//!
//! ```text
//! OpcodeTable → Instructions → Program → VirtualMachine::load → step … halt
//! ```
//!
//! 1. [`program`]: opcode registration, instructions and loadable programs.
//! 2. [`machine`]: the engine: registers, dispatch, stack and heap
//!    operations, address resolution, faults.
//! 3. [`memory`]: tagged [`memory::value::Value`]s, the
//!    [`memory::arena::Arena`] and the [`memory::registers::Registers`].
//! 4. [`snapshot`]: comparable copies of the machine state.
//! 5. [`driver`]: a host loop with breakpoints and step limits.
//! 6. [`isa`]: a reference instruction set registered through the public
//!    opcode table, the same way any other front-end would.
//!
//! ## Example
//!
//! ```
//! use arenavm::isa;
//! use arenavm::machine::{config::MachineConfig, engine::VirtualMachine};
//! use arenavm::memory::value::Value;
//! use arenavm::program::Program;
//!
//! let table = isa::standard_table().unwrap();
//! let program = Program::new(vec![
//!     table.instruction("ldc").unwrap().with_arg1(Value::Float(3.0)),
//!     table.instruction("print").unwrap(),
//!     table.instruction("halt").unwrap(),
//! ]);
//!
//! let mut vm = VirtualMachine::new(MachineConfig::new(16, 16, 4)).unwrap();
//! vm.load(program).unwrap();
//! while vm.is_running() {
//!     vm.execute_next_instruction().unwrap();
//! }
//! assert_eq!(vm.drain_output(), "3.0\nMachine halted");
//! ```

pub mod driver;
pub mod isa;
pub mod machine;
pub mod memory;
pub mod program;
pub mod snapshot;
