// Constants for the virtual machine

/// Text appended to the output buffer when the machine halts
pub const HALT_MARKER: &str = "\nMachine halted";

/// Default number of program-store slots
pub const DEFAULT_PROGRAM_STORE_SIZE: usize = 1024;

/// Default number of arena cells
pub const DEFAULT_MAIN_MEMORY_SIZE: usize = 1024;

/// Default initial extension pointer
pub const DEFAULT_MAX_STACK_SIZE: usize = 512;
