// Output instructions

use crate::machine::engine::VirtualMachine;
use crate::machine::errors::{Fault, LoadError};
use crate::program::instruction::Instruction;
use crate::program::opcode::{OpcodeDef, OpcodeTable};

pub fn register(table: &mut OpcodeTable) -> Result<(), LoadError> {
    table.register(
        OpcodeDef::new("print", "print", print)
            .with_semantics("print S[SP]; SP ← SP - 1")
            .with_description(
                "Prints the value on top of the stack to the standard output, then pops it. \
                 Floats always print with a decimal point, even when whole.",
            ),
    )?;
    Ok(())
}

fn print(_instr: &Instruction, vm: &mut VirtualMachine) -> Result<(), Fault> {
    let value = vm.pop()?;
    vm.print(&value);
    Ok(())
}
