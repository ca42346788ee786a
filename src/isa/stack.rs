// Constant and direct-address load/store instructions

use crate::machine::engine::VirtualMachine;
use crate::machine::errors::{Fault, LoadError};
use crate::program::instruction::Instruction;
use crate::program::opcode::{OpcodeDef, OpcodeTable};

pub fn register(table: &mut OpcodeTable) -> Result<(), LoadError> {
    table.register(
        OpcodeDef::new("ldc", "ldc c", ldc)
            .with_semantics("SP ← SP + 1; S[SP] ← c")
            .with_description("Pushes the constant argument (of any type) onto the stack."),
    )?;
    table.register(
        OpcodeDef::new("ldo", "ldo q", ldo)
            .with_semantics("SP ← SP + 1; S[SP] ← S[q]")
            .with_description("Pushes the value stored at absolute address q onto the stack."),
    )?;
    table.register(
        OpcodeDef::new("sro", "sro q", sro)
            .with_semantics("S[q] ← S[SP]; SP ← SP - 1")
            .with_description("Pops the top of the stack into absolute address q."),
    )?;
    Ok(())
}

fn ldc(instr: &Instruction, vm: &mut VirtualMachine) -> Result<(), Fault> {
    let value = instr.require_arg1()?.clone();
    vm.push(value)
}

fn ldo(instr: &Instruction, vm: &mut VirtualMachine) -> Result<(), Fault> {
    let address = vm.resolve_arg1(instr)?;
    let value = vm.read_cell(address)?;
    vm.push(value)
}

fn sro(instr: &Instruction, vm: &mut VirtualMachine) -> Result<(), Fault> {
    let address = vm.resolve_arg1(instr)?;
    let value = vm.pop()?;
    vm.write_cell(address, value)
}
