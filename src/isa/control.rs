// Control-flow instructions

use crate::machine::engine::VirtualMachine;
use crate::machine::errors::{Fault, LoadError};
use crate::program::instruction::Instruction;
use crate::program::opcode::{OpcodeDef, OpcodeTable};

pub fn register(table: &mut OpcodeTable) -> Result<(), LoadError> {
    table.register(
        OpcodeDef::new("ujp", "ujp a", ujp)
            .with_semantics("PC ← a")
            .with_description("Jumps unconditionally to the address or label a."),
    )?;
    table.register(
        OpcodeDef::new("halt", "halt", halt)
            .with_semantics("stop")
            .with_description("Stops the machine."),
    )?;
    Ok(())
}

fn ujp(instr: &Instruction, vm: &mut VirtualMachine) -> Result<(), Fault> {
    // Range is checked on the next fetch
    let target = vm.resolve_arg1(instr)?;
    vm.registers_mut().pc = target;
    Ok(())
}

fn halt(_instr: &Instruction, vm: &mut VirtualMachine) -> Result<(), Fault> {
    vm.halt();
    Ok(())
}
