//! Error types for the IR crate.

use crate::wire::{ClbitId, QubitId};
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Register not attached to the circuit.
    #[error("Register '{0}' not found in circuit")]
    RegisterNotFound(String),

    /// A register with this name is already attached.
    #[error("Register '{0}' already exists in circuit")]
    DuplicateRegister(String),

    /// Bit index outside its register.
    #[error("Bit {register}[{index}] is out of range (register size is {size})")]
    BitOutOfRange {
        /// Name of the register.
        register: String,
        /// The offending index.
        index: u32,
        /// The register size.
        size: u32,
    },

    /// Qubit not found in circuit.
    #[error("Qubit {qubit:?} not found in circuit")]
    QubitNotFound {
        /// The qubit that was not found.
        qubit: QubitId,
    },

    /// Classical bit not found in circuit.
    #[error("Classical bit {clbit:?} not found in circuit")]
    ClbitNotFound {
        /// The classical bit that was not found.
        clbit: ClbitId,
    },

    /// Duplicate qubit in operation.
    #[error("Duplicate qubit {qubit:?} in operation")]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
    },

    /// Gate applied to the wrong number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// Invalid DAG structure.
    #[error("Invalid DAG structure: {0}")]
    InvalidDag(String),

    /// Invalid node index.
    #[error("Invalid node index")]
    InvalidNode,
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
