//! Error types for the QASM emitter.

use rimfax_ir::{ClbitId, QubitId};
use thiserror::Error;

/// Errors that can occur during emission.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EmitError {
    /// A qubit wire has no register handle attached to the circuit.
    #[error("Qubit {0:?} has no register mapping")]
    UnmappedQubit(QubitId),

    /// A classical wire has no register handle attached to the circuit.
    #[error("Classical bit {0:?} has no register mapping")]
    UnmappedClbit(ClbitId),
}

/// Result type for emission operations.
pub type EmitResult<T> = Result<T, EmitError>;
