//! Unified stack/heap memory
//!
//! The [`Arena`] is a fixed-length run of [`Value`] cells. The operand stack
//! grows upward from address 0 and the heap grows downward from the top;
//! which cells belong to which region is decided by the machine's registers,
//! not by the arena itself.
//!
//! ```text
//! 0 ........ SP | free | EP ... HP ........ size-1
//! [ live stack ]        [reserved][ live heap   ]
//! ```

use super::value::Value;
use crate::machine::errors::Fault;
use crate::program::MemoryInit;

#[derive(Debug, Clone, PartialEq)]
pub struct Arena {
    cells: Vec<Value>,
}

impl Arena {
    /// Create a zero-filled arena of `size` cells
    pub fn new(size: usize) -> Self {
        Arena {
            cells: vec![Value::default(); size],
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Convert a signed address into a cell index
    fn index(&self, address: i64) -> Result<usize, Fault> {
        usize::try_from(address)
            .ok()
            .filter(|&i| i < self.cells.len())
            .ok_or(Fault::AddressOutOfRange {
                address,
                size: self.cells.len(),
            })
    }

    /// Read the value at `address`
    pub fn get(&self, address: i64) -> Result<&Value, Fault> {
        let i = self.index(address)?;
        Ok(&self.cells[i])
    }

    /// Overwrite the value at `address`
    pub fn set(&mut self, address: i64, value: Value) -> Result<(), Fault> {
        let i = self.index(address)?;
        self.cells[i] = value;
        Ok(())
    }

    /// Reset every cell to the zero value
    pub fn clear(&mut self) {
        self.cells.fill(Value::default());
    }

    /// Write each overlay entry in order; later entries win on the same
    /// address. Addresses are validated when the program is loaded.
    pub fn apply_overlay(&mut self, overlay: &[MemoryInit]) -> Result<(), Fault> {
        for init in overlay {
            self.set(init.address, init.value.clone())?;
        }
        Ok(())
    }

    /// All cells, lowest address first (for hosts rendering memory)
    pub fn cells(&self) -> &[Value] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_arena_is_zeroed() {
        let arena = Arena::new(4);
        assert_eq!(arena.len(), 4);
        assert!(arena.cells().iter().all(|v| *v == Value::Int(0)));
    }

    #[test]
    fn test_out_of_range_access() {
        let mut arena = Arena::new(4);
        assert!(matches!(
            arena.get(4),
            Err(Fault::AddressOutOfRange { address: 4, size: 4 })
        ));
        assert!(matches!(
            arena.set(-1, Value::Int(1)),
            Err(Fault::AddressOutOfRange { address: -1, .. })
        ));
    }

    #[test]
    fn test_overlay_then_clear() {
        let mut arena = Arena::new(8);
        let overlay = vec![
            MemoryInit::new(2, Value::Float(1.5)),
            MemoryInit::new(2, Value::Int(9)),
            MemoryInit::new(7, Value::Ptr(3)),
        ];
        arena.apply_overlay(&overlay).unwrap();
        assert_eq!(arena.get(2).unwrap(), &Value::Int(9));
        assert_eq!(arena.get(7).unwrap(), &Value::Ptr(3));

        arena.clear();
        assert_eq!(arena, Arena::new(8));
    }
}
