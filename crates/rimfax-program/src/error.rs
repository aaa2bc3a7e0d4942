//! Error types for the program facade.

use thiserror::Error;

/// Errors that can occur while working with a quantum program.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgramError {
    /// The API access token is absent or blank.
    #[error("Please set up your access token. See .env.example.")]
    MissingToken,

    /// The installed library is older than the caller requires.
    #[error("Please use rimfax version {required} or greater.")]
    VersionTooOld {
        /// The version floor that was requested.
        required: String,
    },

    /// A version string could not be parsed as `major.minor.patch`.
    #[error("Invalid version string: {0}")]
    InvalidVersion(String),

    /// No circuit registered under the requested name.
    #[error("Circuit not found: {0}")]
    CircuitNotFound(String),

    /// A circuit with this name already exists.
    #[error("Circuit already exists: {0}")]
    DuplicateCircuit(String),

    /// No register created under the requested name.
    #[error("Register not found: {0}")]
    RegisterNotFound(String),

    /// A register was re-created with a different size.
    #[error("Register '{name}' already exists with a different size ({existing} != {requested})")]
    RegisterSizeMismatch {
        /// Register name.
        name: String,
        /// Size of the existing register.
        existing: u32,
        /// Size the caller asked for.
        requested: u32,
    },

    /// A specs document could not be parsed.
    #[error("Invalid specs: {0}")]
    InvalidSpecs(String),

    /// An underlying circuit operation failed.
    #[error(transparent)]
    Ir(#[from] rimfax_ir::IrError),

    /// Emitting OpenQASM failed.
    #[error(transparent)]
    Emit(#[from] rimfax_qasm::EmitError),

    /// Compilation failed.
    #[error(transparent)]
    Compile(#[from] rimfax_compile::CompileError),

    /// Backend lookup or validation failed.
    #[error(transparent)]
    Backend(#[from] rimfax_backends::BackendError),

    /// Reading or writing a serialized form failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Reading a file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for program operations.
pub type ProgramResult<T> = Result<T, ProgramError>;
