//! Error types for backend lookup.

use thiserror::Error;

/// Errors that can occur when resolving backends.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BackendError {
    /// No backend registered under the requested name.
    #[error("Backend not available: {0}")]
    Unavailable(String),

    /// The circuit does not fit on the backend.
    #[error("Circuit needs {needed} qubits but backend '{backend}' has {available}")]
    TooWide {
        /// Backend name.
        backend: String,
        /// Qubits the circuit uses.
        needed: usize,
        /// Qubits the backend provides.
        available: u32,
    },
}

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;
