//! Error types for circuit compilation.

use thiserror::Error;

/// Errors that can occur while compiling a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// A pass required a target basis but none was set in the properties.
    #[error("No basis gates set; a target basis is required for translation")]
    MissingBasisGates,

    /// A gate has no rewrite rule and is not part of the target basis.
    #[error("Gate '{0}' cannot be expressed in the target basis")]
    GateNotInBasis(String),

    /// Rewriting kept producing gates outside the basis. This indicates a
    /// cycle in the rewrite rules rather than a problem with the circuit.
    #[error("Basis translation did not converge after {0} rounds")]
    TranslationDiverged(usize),

    /// An underlying circuit operation failed.
    #[error(transparent)]
    Ir(#[from] rimfax_ir::IrError),

    /// Emitting the compiled circuit as OpenQASM failed.
    #[error(transparent)]
    Emit(#[from] rimfax_qasm::EmitError),
}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;
