//! Runtime value representation
//!
//! This module defines the [`Value`] enum, the tagged datum stored in every
//! arena cell and carried as an instruction argument.
//!
//! # Value Types
//!
//! - [`Value::Int`]: 64-bit signed integer
//! - [`Value::Float`]: 64-bit float
//! - [`Value::Ptr`]: arena address (representationally an integer)
//! - [`Value::Label`]: reference to a labelled instruction
//!
//! # Coercion
//!
//! Operations that need an integer accept both `Int` and `Ptr`. `Float` and
//! `Label` are never coerced.

use std::fmt;
use std::sync::Arc;

/// Runtime values in the machine
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Ptr(i64),
    Label(Arc<str>),
}

/// The zero value every arena cell holds after a restart
impl Default for Value {
    fn default() -> Self {
        Value::Int(0)
    }
}

/// Discriminant of a [`Value`], used in fault reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Int,
    Float,
    Ptr,
    Label,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Ptr => "ptr",
            ValueKind::Label => "label",
        };
        f.write_str(name)
    }
}

impl Value {
    /// Create a label reference
    pub fn label(name: impl Into<Arc<str>>) -> Self {
        Value::Label(name.into())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Ptr(_) => ValueKind::Ptr,
            Value::Label(_) => ValueKind::Label,
        }
    }

    /// Get the integer payload of an `Int` or `Ptr`; any other kind is
    /// returned as the error so callers can build their own fault
    pub fn as_int_or_ptr(&self) -> Result<i64, ValueKind> {
        match self {
            Value::Int(n) | Value::Ptr(n) => Ok(*n),
            other => Err(other.kind()),
        }
    }

    /// Get the float value, returns None if not a Float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// Get the label name, returns None if not a Label
    pub fn as_label(&self) -> Option<&str> {
        match self {
            Value::Label(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self, Value::Ptr(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) | Value::Ptr(n) => write!(f, "{}", n),
            // Whole floats always keep a decimal point
            Value::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{}.0", x),
            Value::Float(x) => write!(f, "{}", x),
            Value::Label(name) => f.write_str(name),
        }
    }
}
