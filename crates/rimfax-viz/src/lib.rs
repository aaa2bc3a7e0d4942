//! Rimfax Circuit Diagrams
//!
//! Draws circuits as qcircuit LaTeX and, with the external toolchain
//! installed, renders them to PNG. The pipeline mirrors the classic
//! notebook workflow: write `circuit.tex` into a temporary directory,
//! compile it with `pdflatex`, rasterize the PDF with `pdftoppm`, and
//! remove the directory afterwards.
//!
//! # Example
//!
//! ```rust
//! use rimfax_ir::{Circuit, QuantumRegister};
//! use rimfax_viz::{latex_source, RenderOptions};
//!
//! let qr = QuantumRegister::new("qr", 2);
//! let mut circuit = Circuit::new("bell");
//! circuit.add_quantum_register(&qr).unwrap();
//! circuit.h(&qr[0]).unwrap();
//! circuit.cx(&qr[0], &qr[1]).unwrap();
//!
//! // Draw the gates as written rather than rewriting into a basis.
//! let options = RenderOptions { basis: None, ..RenderOptions::default() };
//! let source = latex_source(&circuit, &options).unwrap();
//! assert!(source.contains("\\gate{H}"));
//! assert!(source.contains("\\ctrl{1}"));
//! ```
//!
//! [`render_png`] needs `pdflatex` (with the `qcircuit` package) and
//! `pdftoppm` on the PATH, and reports which tool is missing otherwise.

pub mod error;
pub mod latex;
pub mod render;

pub use error::{VizError, VizResult};
pub use latex::latex_source;
pub use render::{render_png, RenderOptions};
