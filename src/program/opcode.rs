//! Opcode registry
//!
//! The engine defines no instructions of its own. Instruction-set modules
//! register an [`OpcodeDef`] per opcode, and each [`Instruction`] holds the
//! resolved definition so dispatch never looks anything up by name.

use super::instruction::Instruction;
use crate::machine::engine::VirtualMachine;
use crate::machine::errors::{Fault, LoadError};
use rustc_hash::FxHashMap;
use std::sync::{Arc, LazyLock};

/// Implementation of an opcode. Runs after `PC` has been advanced past the
/// instruction.
pub type Handler = fn(&Instruction, &mut VirtualMachine) -> Result<(), Fault>;

/// Metadata and behavior for one opcode
#[derive(Debug, Clone)]
pub struct OpcodeDef {
    pub name: String,
    /// Human-readable form, e.g. `enter m`
    pub display_name: String,
    pub semantics: String,
    pub description: String,
    pub handler: Handler,
}

impl OpcodeDef {
    pub fn new(name: &str, display_name: &str, handler: Handler) -> Self {
        OpcodeDef {
            name: name.to_string(),
            display_name: display_name.to_string(),
            semantics: String::new(),
            description: String::new(),
            handler,
        }
    }

    pub fn with_semantics(mut self, semantics: &str) -> Self {
        self.semantics = semantics.to_string();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }
}

fn nop(_instr: &Instruction, _vm: &mut VirtualMachine) -> Result<(), Fault> {
    Ok(())
}

/// Definition behind the padding instruction. Not registered in any table.
pub(crate) static NOP: LazyLock<Arc<OpcodeDef>> = LazyLock::new(|| {
    Arc::new(
        OpcodeDef::new("nop", "nop", nop)
            .with_semantics("PC ← PC + 1")
            .with_description("Padding for unused program-store slots; does nothing."),
    )
});

/// Name-keyed table of opcode definitions
#[derive(Debug, Clone, Default)]
pub struct OpcodeTable {
    defs: FxHashMap<String, Arc<OpcodeDef>>,
}

impl OpcodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition. Names are unique within a table.
    pub fn register(&mut self, def: OpcodeDef) -> Result<Arc<OpcodeDef>, LoadError> {
        if self.defs.contains_key(&def.name) {
            return Err(LoadError::DuplicateOpcode(def.name));
        }
        let def = Arc::new(def);
        self.defs.insert(def.name.clone(), Arc::clone(&def));
        Ok(def)
    }

    pub fn get(&self, name: &str) -> Option<Arc<OpcodeDef>> {
        self.defs.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.defs.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Build an argument-less instruction for a registered opcode
    pub fn instruction(&self, name: &str) -> Result<Instruction, LoadError> {
        self.get(name)
            .map(Instruction::new)
            .ok_or_else(|| LoadError::UnknownOpcode(name.to_string()))
    }

    /// All definitions sorted by name
    pub fn definitions(&self) -> Vec<Arc<OpcodeDef>> {
        let mut defs: Vec<_> = self.defs.values().cloned().collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_instr: &Instruction, _vm: &mut VirtualMachine) -> Result<(), Fault> {
        Ok(())
    }

    #[test]
    fn test_register_and_lookup() {
        let mut table = OpcodeTable::new();
        table
            .register(OpcodeDef::new("zap", "zap", noop).with_description("test"))
            .unwrap();

        assert!(table.contains("zap"));
        assert_eq!(table.len(), 1);
        let instr = table.instruction("zap").unwrap();
        assert_eq!(instr.name(), "zap");
        assert_eq!(instr.opcode().description, "test");
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut table = OpcodeTable::new();
        table.register(OpcodeDef::new("zap", "zap", noop)).unwrap();
        let err = table.register(OpcodeDef::new("zap", "zap", noop)).unwrap_err();
        assert!(matches!(err, LoadError::DuplicateOpcode(ref name) if name == "zap"));
    }

    #[test]
    fn test_unknown_opcode() {
        let table = OpcodeTable::new();
        assert!(matches!(
            table.instruction("missing"),
            Err(LoadError::UnknownOpcode(ref name)) if name == "missing"
        ));
    }

    #[test]
    fn test_nop_is_not_registered() {
        let table = OpcodeTable::new();
        assert!(table.is_empty());
        assert!(!table.contains("nop"));
        assert_eq!(NOP.name, "nop");
    }
}
