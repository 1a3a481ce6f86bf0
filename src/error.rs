use thiserror::Error;

/// Failure to read an image file into memory.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A fatal condition raised by the executor. The only cases the LC-3 ISA
/// defines are the reserved opcodes; everything else in the instruction set
/// is total.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Fault {
    #[error("RTI is reserved and not implemented (pc={pc:#06x})")]
    Rti { pc: u16 },
    #[error("opcode 1101 is reserved (pc={pc:#06x})")]
    ReservedOpcode { pc: u16 },
}

/// Bad command-line invocation.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("not enough arguments")]
    NoImages,
}

/// Everything that can go wrong while running a loaded program, composed so
/// callers can propagate either kind with `?`.
#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Fault(#[from] Fault),
}
