use thiserror::Error;

use crate::opcode::Opcode;

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum ProcessError {
    #[error("Illegal instruction {opcode:#06X} at {pc:#06X}.")]
    InvalidOpcode { opcode: Opcode, pc: u16 },
    #[error("Invalid stack state '{0}'.")]
    Stack(#[from] StackError),
    #[error("Unable to load {len} bytes at {address:#06X}, memory ends at 0x1000.")]
    OutOfMemory { address: u16, len: usize },
}

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum StackError {
    #[error("Stack is full!")]
    Overflow,
    #[error("Stack is empty!")]
    Underflow,
}

#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("File '{0}' not found")]
    FileNotFound(String),
    #[error("Unable to read the rom '{name}'.")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid rom archive.")]
    Archive(#[from] zip::result::ZipError),
    #[error("There is no rom named '{0}' in the archive.")]
    EntryNotFound(String),
    #[error("The rom '{name}' is {len} bytes long, which does not fit into memory.")]
    TooLarge { name: String, len: usize },
}

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Unknown clock speed '{0}', expected one of 60, 480 or 1020.")]
    UnknownClockSpeed(String),
}
