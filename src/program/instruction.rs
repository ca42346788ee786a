//! Program-store instructions
//!
//! An [`Instruction`] binds a resolved [`OpcodeDef`] to up to two argument
//! values, an optional label (the target of jumps), and debug metadata.
//! Everything except the breakpoint flag is fixed once built.

use super::opcode::{OpcodeDef, NOP};
use crate::machine::errors::Fault;
use crate::memory::value::Value;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Instruction {
    opcode: Arc<OpcodeDef>,
    arg1: Option<Value>,
    arg2: Option<Value>,
    label: Option<Arc<str>>,
    comment: Option<Arc<str>>,
    breakpoint: bool,
}

impl Instruction {
    pub fn new(opcode: Arc<OpcodeDef>) -> Self {
        Instruction {
            opcode,
            arg1: None,
            arg2: None,
            label: None,
            comment: None,
            breakpoint: false,
        }
    }

    /// The padding instruction placed in every unused program-store slot
    pub fn nop() -> Self {
        Self::new(Arc::clone(&NOP))
    }

    pub fn with_arg1(mut self, value: Value) -> Self {
        self.arg1 = Some(value);
        self
    }

    pub fn with_arg2(mut self, value: Value) -> Self {
        self.arg2 = Some(value);
        self
    }

    /// Attach a label. An empty name means no label.
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = (!label.is_empty()).then(|| Arc::from(label));
        self
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = (!comment.is_empty()).then(|| Arc::from(comment));
        self
    }

    pub fn opcode(&self) -> &Arc<OpcodeDef> {
        &self.opcode
    }

    pub fn name(&self) -> &str {
        &self.opcode.name
    }

    pub fn is_nop(&self) -> bool {
        Arc::ptr_eq(&self.opcode, &NOP)
    }

    pub fn arg1(&self) -> Option<&Value> {
        self.arg1.as_ref()
    }

    pub fn arg2(&self) -> Option<&Value> {
        self.arg2.as_ref()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn is_breakpoint(&self) -> bool {
        self.breakpoint
    }

    /// Flip the breakpoint flag and return the new state
    pub fn toggle_breakpoint(&mut self) -> bool {
        self.breakpoint = !self.breakpoint;
        self.breakpoint
    }

    /// First argument, or a fault naming this instruction if it is absent
    pub fn require_arg1(&self) -> Result<&Value, Fault> {
        self.require(self.arg1.as_ref(), 1)
    }

    pub fn require_arg2(&self) -> Result<&Value, Fault> {
        self.require(self.arg2.as_ref(), 2)
    }

    /// First argument as an integer; `Int` and `Ptr` are accepted
    pub fn arg1_as_int(&self) -> Result<i64, Fault> {
        self.as_int(self.require_arg1()?)
    }

    pub fn arg2_as_int(&self) -> Result<i64, Fault> {
        self.as_int(self.require_arg2()?)
    }

    fn require<'a>(&self, arg: Option<&'a Value>, position: u8) -> Result<&'a Value, Fault> {
        arg.ok_or_else(|| Fault::MissingArgument {
            instruction: self.name().to_string(),
            position,
        })
    }

    fn as_int(&self, value: &Value) -> Result<i64, Fault> {
        value.as_int_or_ptr().map_err(|kind| Fault::TypeMismatch {
            instruction: self.name().to_string(),
            kind,
        })
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())?;
        for arg in [&self.arg1, &self.arg2].into_iter().flatten() {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
