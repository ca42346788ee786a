//! Memory model for the virtual machine
//!
//! This module provides the core memory abstractions:
//! - [`value`]: Runtime value representation (Int, Float, Ptr, Label)
//! - [`arena`]: The single fixed-size region shared by stack and heap
//! - [`registers`]: The register set that partitions the arena
//!
//! # Layout
//!
//! The stack occupies `0..=SP` and grows upward; the heap occupies
//! `HP..size` and grows downward. `EP` is the movable boundary the stack may
//! not cross and the heap may not allocate below:
//!
//! ```text
//! push:     fault when SP + 1 >= EP
//! allocate: fault when HP - n  <  EP
//! enter m:  fault when m < 1 or SP + m >= HP
//! ```

pub mod arena;
pub mod registers;
pub mod value;
