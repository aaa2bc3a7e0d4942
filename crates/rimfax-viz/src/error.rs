//! Error handling for circuit drawing.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for drawing operations.
pub type VizResult<T> = Result<T, VizError>;

/// Errors that can occur while drawing or rendering a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VizError {
    /// The circuit has no qubits to draw.
    #[error("Cannot draw a circuit with no qubits")]
    EmptyCircuit,

    /// An external tool is not installed or not on the PATH.
    #[error("External tool not found: {0}")]
    ToolNotFound(String),

    /// The LaTeX compiler reported failure.
    #[error("pdflatex failed:\n{0}")]
    LatexFailed(String),

    /// The PDF rasterizer reported failure.
    #[error("pdftoppm failed: {0}")]
    RasterizeFailed(String),

    /// A tool exited successfully but its output file is missing.
    #[error("Render produced no output at {}", .0.display())]
    MissingOutput(PathBuf),

    /// Rewriting the circuit into the drawing basis failed.
    #[error(transparent)]
    Compile(#[from] rimfax_compile::CompileError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
