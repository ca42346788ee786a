// Integration tests for dispatch, address resolution, opcodes and the driver

use arenavm::driver::{Driver, RunLimits, StopReason};
use arenavm::isa;
use arenavm::machine::{
    config::MachineConfig,
    engine::VirtualMachine,
    errors::{Fault, LoadError},
};
use arenavm::memory::value::{Value, ValueKind};
use arenavm::program::instruction::Instruction;
use arenavm::program::opcode::{OpcodeDef, OpcodeTable};
use arenavm::program::{MemoryInit, Program};

fn machine() -> VirtualMachine {
    VirtualMachine::new(MachineConfig::new(16, 16, 4)).expect("valid config")
}

fn op(table: &OpcodeTable, name: &str) -> Instruction {
    table.instruction(name).expect("registered opcode")
}

fn run_to_halt(vm: &mut VirtualMachine) -> String {
    let outcome = Driver::new(RunLimits {
        max_steps: Some(1_000),
        stop_at_breakpoints: false,
    })
    .run(vm);
    assert_eq!(outcome.reason, StopReason::Halted, "output: {}", outcome.output);
    outcome.output
}

#[test]
fn test_step_advances_pc_before_handler() {
    fn record_pc(_instr: &Instruction, vm: &mut VirtualMachine) -> Result<(), Fault> {
        let pc = vm.registers().pc;
        vm.push(Value::Int(pc))
    }

    let mut table = OpcodeTable::new();
    table.register(OpcodeDef::new("pc", "pc", record_pc)).unwrap();

    let mut vm = machine();
    vm.load(Program::new(vec![op(&table, "pc"), op(&table, "pc")]))
        .unwrap();
    vm.execute_next_instruction().unwrap();
    vm.execute_next_instruction().unwrap();

    assert_eq!(vm.stack(), &[Value::Int(1), Value::Int(2)]);
}

#[test]
fn test_print_program() {
    let table = isa::standard_table().unwrap();
    let mut vm = machine();
    vm.load(Program::new(vec![
        op(&table, "ldc").with_arg1(Value::Float(3.0)),
        op(&table, "print"),
        op(&table, "ldc").with_arg1(Value::Float(3.5)),
        op(&table, "print"),
        op(&table, "ldc").with_arg1(Value::Int(3)),
        op(&table, "print"),
        op(&table, "halt"),
    ]))
    .unwrap();

    assert_eq!(run_to_halt(&mut vm), "3.03.53\nMachine halted");
}

#[test]
fn test_overlay_globals_through_load_and_store() {
    let table = isa::standard_table().unwrap();
    let mut vm = machine();
    vm.load(
        Program::new(vec![
            op(&table, "ldo").with_arg1(Value::Int(10)),
            op(&table, "ldc").with_arg1(Value::Int(5)),
            op(&table, "sro").with_arg1(Value::Int(10)),
            op(&table, "print"),
            op(&table, "halt"),
        ])
        .with_overlay(vec![MemoryInit::new(10, Value::Float(1.25))]),
    )
    .unwrap();

    assert_eq!(run_to_halt(&mut vm), "1.25\nMachine halted");
    assert_eq!(vm.read_cell(10).unwrap(), Value::Int(5));

    vm.restart();
    assert_eq!(vm.read_cell(10).unwrap(), Value::Float(1.25));
}

#[test]
fn test_new_pushes_heap_pointer() {
    let table = isa::standard_table().unwrap();
    let mut vm = machine();
    vm.load(Program::new(vec![
        op(&table, "ldc").with_arg1(Value::Int(3)),
        op(&table, "new"),
        op(&table, "halt"),
    ]))
    .unwrap();

    run_to_halt(&mut vm);
    assert_eq!(vm.stack(), &[Value::Ptr(13)]);
    assert_eq!(vm.registers().hp, 13);
}

#[test]
fn test_new_out_of_memory_keeps_size_popped() {
    let table = isa::standard_table().unwrap();
    let mut vm = machine();
    vm.load(Program::new(vec![
        op(&table, "ldc").with_arg1(Value::Int(20)),
        op(&table, "new"),
    ]))
    .unwrap();

    vm.execute_next_instruction().unwrap();
    let result = vm.execute_next_instruction();
    assert!(matches!(result, Err(Fault::OutOfMemory { requested: 20, .. })));
    assert_eq!(vm.registers().sp, -1);
    assert_eq!(vm.registers().hp, 16);
    // Faults do not halt the machine
    assert!(vm.is_running());
}

#[test]
fn test_new_rejects_bad_sizes() {
    let table = isa::standard_table().unwrap();
    let mut vm = machine();
    vm.load(Program::new(vec![
        op(&table, "ldc").with_arg1(Value::Int(-2)),
        op(&table, "new"),
        op(&table, "ldc").with_arg1(Value::Float(2.0)),
        op(&table, "new"),
    ]))
    .unwrap();

    vm.execute_next_instruction().unwrap();
    assert!(matches!(
        vm.execute_next_instruction(),
        Err(Fault::InvalidAllocationSize { requested: -2, .. })
    ));
    vm.execute_next_instruction().unwrap();
    assert!(matches!(
        vm.execute_next_instruction(),
        Err(Fault::TypeMismatch { kind: ValueKind::Float, .. })
    ));
}

#[test]
fn test_enter_type_mismatch_names_instruction() {
    let table = isa::standard_table().unwrap();
    let mut vm = machine();
    vm.load(Program::new(vec![
        op(&table, "enter").with_arg1(Value::label("frame"))
    ]))
    .unwrap();

    let fault = vm.execute_next_instruction().unwrap_err();
    assert_eq!(
        fault,
        Fault::TypeMismatch {
            instruction: "enter".to_string(),
            kind: ValueKind::Label,
        }
    );
    assert_eq!(
        fault.to_string(),
        "Argument for instruction enter must be an int or a ptr, not label"
    );
}

#[test]
fn test_enter_instruction_with_max_frame() {
    let table = isa::standard_table().unwrap();
    let mut vm = machine();
    vm.load(Program::new(vec![
        op(&table, "ldc").with_arg1(Value::Int(1)),
        op(&table, "ldc").with_arg1(Value::Int(1)),
        op(&table, "enter").with_arg1(Value::Int(i64::MAX)),
        op(&table, "enter").with_arg1(Value::Int(-3)),
    ]))
    .unwrap();

    vm.execute_next_instruction().unwrap();
    vm.execute_next_instruction().unwrap();
    assert!(matches!(
        vm.execute_next_instruction(),
        Err(Fault::StackOverflow { .. })
    ));
    assert_eq!(
        vm.execute_next_instruction(),
        Err(Fault::InvalidFrameSize { requested: -3 })
    );
    assert_eq!(vm.registers().ep, 4);
    assert!(vm.registers().is_consistent(16));
}

#[test]
fn test_label_resolution() {
    let table = isa::standard_table().unwrap();
    let mut program: Vec<_> = (0..5).map(|_| Instruction::nop()).collect();
    program.push(op(&table, "halt").with_label("loop"));
    let mut vm = machine();
    vm.load(Program::new(program)).unwrap();

    assert_eq!(vm.resolve_address("ujp", &Value::label("loop")).unwrap(), 5);
    assert_eq!(vm.scan_label("loop"), Some(5));
    assert_eq!(vm.resolve_address("ujp", &Value::Int(7)).unwrap(), 7);
    assert_eq!(vm.resolve_address("ldo", &Value::Ptr(9)).unwrap(), 9);

    let missing = vm.resolve_address("ujp", &Value::label("nowhere"));
    assert!(matches!(
        missing,
        Err(Fault::UnresolvableLabel { ref label }) if &**label == "nowhere"
    ));
    assert_eq!(vm.scan_label("nowhere"), None);

    assert_eq!(
        vm.resolve_address("sro", &Value::Float(1.0)),
        Err(Fault::InvalidAddressArgument {
            instruction: "sro".to_string(),
            kind: ValueKind::Float,
        })
    );
}

#[test]
fn test_float_address_names_instruction() {
    let table = isa::standard_table().unwrap();
    let mut vm = machine();
    vm.load(Program::new(vec![
        op(&table, "ldo").with_arg1(Value::Float(2.0))
    ]))
    .unwrap();

    let fault = vm.execute_next_instruction().unwrap_err();
    assert_eq!(
        fault,
        Fault::InvalidAddressArgument {
            instruction: "ldo".to_string(),
            kind: ValueKind::Float,
        }
    );
    assert!(fault.to_string().contains("instruction ldo"));
    assert!(vm.stack().is_empty());
}

#[test]
fn test_duplicate_labels_resolve_to_first() {
    let table = isa::standard_table().unwrap();
    let mut vm = machine();
    vm.load(Program::new(vec![
        Instruction::nop(),
        op(&table, "halt").with_label("dup"),
        op(&table, "halt").with_label("dup"),
    ]))
    .unwrap();

    assert_eq!(vm.label_address("dup"), Some(1));
    assert_eq!(vm.scan_label("dup"), Some(1));
}

#[test]
fn test_jump_to_label() {
    let table = isa::standard_table().unwrap();
    let mut vm = machine();
    vm.load(Program::new(vec![
        op(&table, "ujp").with_arg1(Value::label("end")),
        op(&table, "ldc").with_arg1(Value::Int(1)),
        op(&table, "print"),
        op(&table, "ldc").with_arg1(Value::Int(2)).with_label("end"),
        op(&table, "print"),
        op(&table, "halt"),
    ]))
    .unwrap();

    assert_eq!(run_to_halt(&mut vm), "2\nMachine halted");
}

#[test]
fn test_out_of_range_pc_faults_on_next_fetch() {
    let table = isa::standard_table().unwrap();
    let mut vm = machine();
    vm.load(Program::new(vec![op(&table, "ujp").with_arg1(Value::Int(40))]))
        .unwrap();

    vm.execute_next_instruction().unwrap();
    assert_eq!(vm.registers().pc, 40);
    assert!(vm.current_instruction().is_none());
    assert!(!vm.is_next_instruction_breakpoint());
    assert!(matches!(
        vm.execute_next_instruction(),
        Err(Fault::ProgramCounterOutOfRange { pc: 40, capacity: 16 })
    ));
}

#[test]
fn test_program_without_halt_spins_on_padding() {
    let table = isa::standard_table().unwrap();
    let mut vm = machine();
    vm.load(Program::new(vec![
        op(&table, "ldc").with_arg1(Value::Int(7)),
        op(&table, "print"),
    ]))
    .unwrap();

    let outcome = Driver::new(RunLimits {
        max_steps: Some(10),
        stop_at_breakpoints: true,
    })
    .run(&mut vm);
    assert_eq!(outcome.reason, StopReason::StepLimit);
    assert_eq!(outcome.steps, 10);
    assert_eq!(outcome.output, "7");
    assert_eq!(vm.registers().pc, 10);
    assert!(vm.is_running());
}

#[test]
fn test_driver_pauses_at_breakpoints() {
    let table = isa::standard_table().unwrap();
    let mut vm = machine();
    vm.load(Program::new(vec![
        op(&table, "ldc").with_arg1(Value::Int(1)),
        op(&table, "print"),
        op(&table, "halt"),
    ]))
    .unwrap();
    assert_eq!(vm.toggle_breakpoint(1), Ok(true));

    let mut driver = Driver::new(RunLimits::default());
    let first = driver.run(&mut vm);
    assert_eq!(first.reason, StopReason::Breakpoint { pc: 1 });
    assert_eq!(first.steps, 1);
    assert!(vm.is_next_instruction_breakpoint());

    let second = driver.run(&mut vm);
    assert_eq!(second.reason, StopReason::Halted);
    assert_eq!(second.output, "1\nMachine halted");

    assert_eq!(vm.toggle_breakpoint(1), Ok(false));
    assert_eq!(
        vm.toggle_breakpoint(16),
        Err(LoadError::InstructionIndexOutOfRange { index: 16, capacity: 16 })
    );
}

#[test]
fn test_step_budget_spans_breakpoint_pauses() {
    let table = isa::standard_table().unwrap();
    let mut vm = machine();
    vm.load(Program::new(vec![
        op(&table, "ldc").with_arg1(Value::Int(1)).with_label("top"),
        op(&table, "print"),
        op(&table, "ujp").with_arg1(Value::label("top")),
    ]))
    .unwrap();
    assert_eq!(vm.toggle_breakpoint(0), Ok(true));

    let mut driver = Driver::new(RunLimits {
        max_steps: Some(5),
        stop_at_breakpoints: true,
    });
    let mut pauses = 0;
    let outcome = loop {
        let outcome = driver.run(&mut vm);
        match outcome.reason {
            StopReason::Breakpoint { pc: 0 } => {
                pauses += 1;
                assert!(pauses < 10, "step budget never ran out");
            }
            _ => break outcome,
        }
    };

    assert_eq!(outcome.reason, StopReason::StepLimit);
    assert_eq!(driver.total_steps(), 5);
    assert_eq!(pauses, 2);
    assert!(vm.is_running());
}

#[test]
fn test_driver_reports_fault_without_halting() {
    let table = isa::standard_table().unwrap();
    let mut vm = machine();
    vm.load(Program::new(vec![
        op(&table, "ldc").with_arg1(Value::Int(1)).with_label("top"),
        op(&table, "ujp").with_arg1(Value::label("top")),
    ]))
    .unwrap();

    let outcome = Driver::new(RunLimits::default()).run(&mut vm);
    match outcome.reason {
        StopReason::Fault { pc, fault } => {
            assert_eq!(pc, 0);
            assert!(matches!(fault, Fault::StackOverflow { sp: 3, ep: 4, .. }));
        }
        other => panic!("Expected fault, got {:?}", other),
    }
    assert!(vm.is_running());
}

#[test]
fn test_load_errors() {
    let table = isa::standard_table().unwrap();
    let mut vm = VirtualMachine::new(MachineConfig::new(2, 16, 4)).unwrap();

    let too_long = Program::new(vec![op(&table, "halt"); 3]);
    assert_eq!(
        vm.load(too_long),
        Err(LoadError::ProgramTooLarge { len: 3, capacity: 2 })
    );

    let bad_overlay = Program::new(vec![op(&table, "halt")])
        .with_overlay(vec![MemoryInit::new(16, Value::Int(1))]);
    assert_eq!(
        vm.load(bad_overlay),
        Err(LoadError::OverlayAddressOutOfRange { address: 16, size: 16 })
    );
}

#[test]
fn test_load_restarts_machine() {
    let table = isa::standard_table().unwrap();
    let mut vm = machine();
    vm.push(Value::Int(4)).unwrap();
    vm.halt();

    vm.load(Program::new(vec![op(&table, "halt")])).unwrap();
    assert!(vm.is_running());
    assert_eq!(vm.registers().sp, -1);
    assert!(vm.output().is_empty());
    assert_eq!(vm.instruction(0).map(Instruction::name), Some("halt"));
    assert!(vm.instruction(1).is_some_and(Instruction::is_nop));
}
