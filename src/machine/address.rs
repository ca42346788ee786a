//! Address resolution
//!
//! Instruction arguments name addresses in two ways: as an immediate integer
//! (or pointer) that already is the address, or as a label that has to be
//! looked up in the program store. Label lookups return the lowest
//! program-store index carrying that label.
//!
//! Lookups go through an index built when the program is loaded. The index
//! always agrees with a front-to-back scan of the whole store
//! ([`VirtualMachine::scan_label`]).

use super::engine::VirtualMachine;
use super::errors::Fault;
use crate::memory::value::Value;
use crate::program::instruction::Instruction;
use rustc_hash::FxHashMap;
use std::sync::Arc;

impl VirtualMachine {
    /// Convert an argument of `instruction` into a physical program-store
    /// or memory address
    pub fn resolve_address(&self, instruction: &str, arg: &Value) -> Result<i64, Fault> {
        match arg {
            Value::Int(address) | Value::Ptr(address) => Ok(*address),
            Value::Label(label) => self
                .label_address(label)
                .map(|index| index as i64)
                .ok_or_else(|| Fault::UnresolvableLabel {
                    label: Arc::clone(label),
                }),
            other => Err(Fault::InvalidAddressArgument {
                instruction: instruction.to_string(),
                kind: other.kind(),
            }),
        }
    }

    /// Resolve the first argument of `instr`
    pub fn resolve_arg1(&self, instr: &Instruction) -> Result<i64, Fault> {
        self.resolve_address(instr.name(), instr.require_arg1()?)
    }

    /// Index of the first instruction labelled `label`
    pub fn label_address(&self, label: &str) -> Option<usize> {
        self.labels.get(label).copied()
    }

    /// Same answer as [`label_address`](Self::label_address), found by
    /// walking the whole program store
    pub fn scan_label(&self, label: &str) -> Option<usize> {
        self.program
            .iter()
            .position(|instr| instr.label() == Some(label))
    }

    pub(super) fn index_labels(program: &[Instruction]) -> FxHashMap<Arc<str>, usize> {
        let mut labels = FxHashMap::default();
        for (index, instr) in program.iter().enumerate() {
            if let Some(label) = instr.label() {
                // First occurrence wins
                labels.entry(Arc::from(label)).or_insert(index);
            }
        }
        labels
    }
}
