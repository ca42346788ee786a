//! Host driver loop
//!
//! The engine only knows how to take one step. [`Driver`] is the loop a
//! front-end would otherwise write itself: step while the machine runs,
//! pause in front of breakpoints, give up after a step budget, and report
//! faults without halting the machine.
//!
//! The step budget covers every `run` call made through one driver, so a
//! loop that keeps pausing at a breakpoint still runs out of steps.

use crate::machine::engine::VirtualMachine;
use crate::machine::errors::Fault;
use tracing::{debug, warn};

/// Why [`Driver::run`] returned
#[derive(Debug, Clone, PartialEq)]
pub enum StopReason {
    /// The program executed `halt`
    Halted,
    /// The next instruction has a breakpoint; it has not run yet
    Breakpoint { pc: i64 },
    /// The step budget ran out
    StepLimit,
    /// The instruction at `pc` faulted; the machine is still marked running
    Fault { pc: i64, fault: Fault },
}

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub reason: StopReason,
    /// Instructions executed during this call
    pub steps: u64,
    /// Output drained from the machine when the call returned
    pub output: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunLimits {
    pub max_steps: Option<u64>,
    pub stop_at_breakpoints: bool,
}

impl Default for RunLimits {
    fn default() -> Self {
        RunLimits {
            max_steps: None,
            stop_at_breakpoints: true,
        }
    }
}

#[derive(Debug, Default)]
pub struct Driver {
    limits: RunLimits,
    /// Breakpoint we last stopped at, stepped over on the next run
    paused_at: Option<i64>,
    /// Instructions executed across all `run` calls
    total_steps: u64,
}

impl Driver {
    pub fn new(limits: RunLimits) -> Self {
        Driver {
            limits,
            paused_at: None,
            total_steps: 0,
        }
    }

    /// Instructions executed by [`run`](Self::run) since the driver was
    /// created
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Step `vm` until it halts, faults, reaches a breakpoint, or uses up
    /// what is left of the step budget
    pub fn run(&mut self, vm: &mut VirtualMachine) -> RunOutcome {
        let mut steps = 0;
        let reason = loop {
            if !vm.is_running() {
                break StopReason::Halted;
            }
            if self.limits.max_steps.is_some_and(|max| self.total_steps >= max) {
                break StopReason::StepLimit;
            }

            let pc = vm.registers().pc;
            if self.limits.stop_at_breakpoints
                && vm.is_next_instruction_breakpoint()
                && self.paused_at != Some(pc)
            {
                self.paused_at = Some(pc);
                debug!(pc, "paused at breakpoint");
                break StopReason::Breakpoint { pc };
            }
            self.paused_at = None;

            if let Err(fault) = vm.execute_next_instruction() {
                warn!(pc, %fault, "instruction faulted");
                break StopReason::Fault { pc, fault };
            }
            steps += 1;
            self.total_steps += 1;
        };

        RunOutcome {
            reason,
            steps,
            output: vm.drain_output(),
        }
    }

    /// Execute exactly one instruction, ignoring breakpoints
    pub fn step(&mut self, vm: &mut VirtualMachine) -> Result<(), Fault> {
        self.paused_at = None;
        vm.execute_next_instruction()
    }
}
