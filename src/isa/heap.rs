// Heap and frame instructions

use crate::machine::engine::VirtualMachine;
use crate::machine::errors::{Fault, LoadError};
use crate::program::instruction::Instruction;
use crate::program::opcode::{OpcodeDef, OpcodeTable};

pub fn register(table: &mut OpcodeTable) -> Result<(), LoadError> {
    table.register(
        OpcodeDef::new("new", "new", new)
            .with_semantics("HP ← HP - S[SP]; S[SP] ← HP")
            .with_description(
                "Pops a size from the stack, allocates that many cells from the heap, \
                 and pushes a pointer to the new block.",
            ),
    )?;
    table.register(
        OpcodeDef::new("enter", "enter m", enter)
            .with_semantics("EP ← SP + m")
            .with_description(
                "Reserves m stack cells above SP by moving the extension pointer. \
                 Fails if m is less than 1 or the reservation would reach the heap.",
            ),
    )?;
    Ok(())
}

fn new(instr: &Instruction, vm: &mut VirtualMachine) -> Result<(), Fault> {
    // The size stays popped if allocation fails
    let size = vm.pop()?;
    let requested = size.as_int_or_ptr().map_err(|kind| Fault::TypeMismatch {
        instruction: instr.name().to_string(),
        kind,
    })?;
    let units = usize::try_from(requested).map_err(|_| Fault::InvalidAllocationSize {
        instruction: instr.name().to_string(),
        requested,
    })?;

    let ptr = vm.allocate(units)?;
    vm.push(ptr)
}

fn enter(instr: &Instruction, vm: &mut VirtualMachine) -> Result<(), Fault> {
    let frame_size = instr.arg1_as_int()?;
    vm.enter(frame_size)
}
