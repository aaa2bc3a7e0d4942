//! `OpenQASM` 2.0 Emitter for Rimfax
//!
//! This crate serializes Rimfax circuits to the `OpenQASM` 2.0 quantum
//! assembly language, the textual form accepted by the remote API and the
//! local simulators. Output follows the `qelib1.inc` gate vocabulary:
//! register declarations use `qreg`/`creg`, measurements use
//! `measure qr[i] -> cr[i];`, and conditional gates use the
//! `if(cr==value)` prefix.
//!
//! # Example
//!
//! ```rust
//! use rimfax_ir::{Circuit, ClassicalRegister, QuantumRegister};
//! use rimfax_qasm::emit;
//!
//! let qr = QuantumRegister::new("qr", 2);
//! let cr = ClassicalRegister::new("cr", 2);
//! let mut circuit = Circuit::new("bell");
//! circuit.add_quantum_register(&qr).unwrap();
//! circuit.add_classical_register(&cr).unwrap();
//! circuit
//!     .h(&qr[0])
//!     .unwrap()
//!     .cx(&qr[0], &qr[1])
//!     .unwrap()
//!     .measure(&qr[0], &cr[0])
//!     .unwrap()
//!     .measure(&qr[1], &cr[1])
//!     .unwrap();
//!
//! let qasm = emit(&circuit).unwrap();
//! assert!(qasm.starts_with("OPENQASM 2.0;\ninclude \"qelib1.inc\";\n"));
//! assert!(qasm.contains("h qr[0];"));
//! assert!(qasm.contains("cx qr[0],qr[1];"));
//! assert!(qasm.contains("measure qr[1] -> cr[1];"));
//! ```

mod emitter;
mod error;

pub use emitter::emit;
pub use error::{EmitError, EmitResult};
