// Construction-time sizing for a machine

use super::constants::{DEFAULT_MAIN_MEMORY_SIZE, DEFAULT_MAX_STACK_SIZE, DEFAULT_PROGRAM_STORE_SIZE};
use super::errors::LoadError;

/// Fixed sizes of a machine instance. Changing any of them means building a
/// new [`VirtualMachine`](super::engine::VirtualMachine).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MachineConfig {
    /// Number of instruction slots
    pub program_store_size: usize,
    /// Number of arena cells shared by stack and heap
    pub main_memory_size: usize,
    /// Initial `EP`; the stack's share of the arena until `enter` moves it
    pub max_stack_size: usize,
}

impl MachineConfig {
    pub fn new(program_store_size: usize, main_memory_size: usize, max_stack_size: usize) -> Self {
        MachineConfig {
            program_store_size,
            main_memory_size,
            max_stack_size,
        }
    }

    pub fn validate(&self) -> Result<(), LoadError> {
        if self.program_store_size == 0 {
            return Err(LoadError::InvalidConfig(
                "program store size must be positive".to_string(),
            ));
        }
        if self.main_memory_size == 0 {
            return Err(LoadError::InvalidConfig(
                "main memory size must be positive".to_string(),
            ));
        }
        if i64::try_from(self.main_memory_size).is_err() {
            return Err(LoadError::InvalidConfig(format!(
                "main memory size {} is not addressable",
                self.main_memory_size
            )));
        }
        if self.max_stack_size > self.main_memory_size {
            return Err(LoadError::InvalidConfig(format!(
                "max stack size {} exceeds main memory size {}",
                self.max_stack_size, self.main_memory_size
            )));
        }
        Ok(())
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_PROGRAM_STORE_SIZE,
            DEFAULT_MAIN_MEMORY_SIZE,
            DEFAULT_MAX_STACK_SIZE,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(MachineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_stack_larger_than_memory() {
        let err = MachineConfig::new(8, 16, 17).validate().unwrap_err();
        assert!(matches!(err, LoadError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_zero_sizes() {
        assert!(MachineConfig::new(0, 16, 4).validate().is_err());
        assert!(MachineConfig::new(8, 0, 0).validate().is_err());
    }
}
