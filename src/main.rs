// arenavm: run a built-in demo program on the virtual machine

use std::process;

use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use arenavm::driver::{Driver, RunLimits, StopReason};
use arenavm::isa;
use arenavm::machine::{config::MachineConfig, engine::VirtualMachine, errors::LoadError};
use arenavm::memory::value::Value;
use arenavm::program::{opcode::OpcodeTable, MemoryInit, Program};

#[derive(Parser, Debug)]
#[command(name = "arenavm")]
#[command(about = "Run a demo program on the stack/heap arena virtual machine")]
struct Args {
    /// Program to run
    #[arg(value_enum, default_value_t = Demo::Globals)]
    demo: Demo,

    /// Number of program-store slots
    #[arg(long = "program-store", default_value_t = 64)]
    program_store: usize,

    /// Number of main-memory cells shared by stack and heap
    #[arg(long = "memory", default_value_t = 64)]
    memory: usize,

    /// Initial extension pointer (stack ceiling)
    #[arg(long = "max-stack", default_value_t = 16)]
    max_stack: usize,

    /// Stop after this many instructions
    #[arg(long = "max-steps", default_value_t = 10_000)]
    max_steps: u64,

    /// Set a breakpoint on this instruction index (repeatable)
    #[arg(long = "break-at")]
    break_at: Vec<usize>,

    /// Run straight through breakpoints
    #[arg(long = "ignore-breakpoints")]
    ignore_breakpoints: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Demo {
    /// Print a seeded global and a constant
    Globals,
    /// Allocate two heap blocks and print their addresses
    Heap,
    /// Push in a loop until the stack overflows
    Overflow,
    /// Print once and never halt
    Spin,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt().with_env_filter(filter).with_target(false).init();
}

fn build_demo(demo: Demo, table: &OpcodeTable) -> Result<Program, LoadError> {
    let op = |name: &str| table.instruction(name);

    let program = match demo {
        Demo::Globals => Program::new(vec![
            op("ldo")?.with_arg1(Value::Int(20)).with_comment("seeded global"),
            op("print")?,
            op("ldc")?.with_arg1(Value::Int(42)),
            op("print")?,
            op("halt")?,
        ])
        .with_overlay(vec![MemoryInit::new(20, Value::Float(2.0))]),
        Demo::Heap => Program::new(vec![
            op("ldc")?.with_arg1(Value::Int(3)),
            op("new")?,
            op("print")?,
            op("ldc")?.with_arg1(Value::Int(4)),
            op("new")?,
            op("print")?,
            op("halt")?,
        ]),
        Demo::Overflow => Program::new(vec![
            op("ldc")?.with_arg1(Value::Int(1)).with_label("loop"),
            op("ujp")?.with_arg1(Value::label("loop")),
        ]),
        Demo::Spin => Program::new(vec![op("ldc")?.with_arg1(Value::Int(7)), op("print")?]),
    };
    Ok(program)
}

fn setup(args: &Args) -> Result<VirtualMachine, LoadError> {
    let table = isa::standard_table()?;
    let config = MachineConfig::new(args.program_store, args.memory, args.max_stack);
    let mut vm = VirtualMachine::new(config)?;
    vm.load(build_demo(args.demo, &table)?)?;
    for &index in &args.break_at {
        vm.toggle_breakpoint(index)?;
    }
    Ok(vm)
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut vm = match setup(&args) {
        Ok(vm) => vm,
        Err(e) => {
            error!("Setup failed: {}", e);
            process::exit(1);
        }
    };

    let mut driver = Driver::new(RunLimits {
        max_steps: Some(args.max_steps),
        stop_at_breakpoints: !args.ignore_breakpoints,
    });

    info!(demo = ?args.demo, "running");
    loop {
        let outcome = driver.run(&mut vm);
        print!("{}", outcome.output);

        match outcome.reason {
            StopReason::Breakpoint { pc } => {
                let regs = vm.registers();
                info!(
                    pc,
                    sp = regs.sp,
                    ep = regs.ep,
                    hp = regs.hp,
                    stack = ?vm.stack(),
                    "breakpoint, continuing"
                );
            }
            StopReason::Halted => {
                println!();
                break;
            }
            StopReason::StepLimit => {
                println!();
                info!(steps = driver.total_steps(), "step limit reached");
                break;
            }
            StopReason::Fault { pc, fault } => {
                println!();
                error!("Runtime error at instruction {}: {}", pc, fault);
                process::exit(2);
            }
        }
    }
}
