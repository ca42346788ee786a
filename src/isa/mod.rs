//! Reference instruction set
//!
//! A small P-machine flavoured set of opcodes built purely on the engine's
//! public operations. Hosts can use it as-is, extend the returned table, or
//! ignore it and register their own.
//!
//! | Opcode    | Effect                                   |
//! |-----------|------------------------------------------|
//! | `ldc c`   | push constant `c`                        |
//! | `ldo q`   | push `S[q]`                              |
//! | `sro q`   | pop into `S[q]`                          |
//! | `print`   | pop and print                            |
//! | `new`     | pop size, allocate, push pointer         |
//! | `enter m` | reserve `m` stack cells above `SP`       |
//! | `ujp a`   | jump to address or label `a`             |
//! | `halt`    | stop the machine                         |

pub mod control;
pub mod heap;
pub mod io;
pub mod stack;

use crate::machine::errors::LoadError;
use crate::program::opcode::OpcodeTable;

/// Register every opcode in this module into `table`
pub fn register_all(table: &mut OpcodeTable) -> Result<(), LoadError> {
    stack::register(table)?;
    io::register(table)?;
    heap::register(table)?;
    control::register(table)?;
    Ok(())
}

/// A fresh table holding the reference instruction set
pub fn standard_table() -> Result<OpcodeTable, LoadError> {
    let mut table = OpcodeTable::new();
    register_all(&mut table)?;
    Ok(table)
}
