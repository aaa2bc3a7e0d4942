//! Rimfax Circuit Compilation
//!
//! This crate turns circuits into payloads a backend can execute. It
//! implements a pass-based architecture: each compilation step is a
//! [`Pass`] run by a [`PassManager`], with target information shared
//! through a [`PropertySet`].
//!
//! # Overview
//!
//! Compiling for a backend means:
//! 1. **Translation**: Rewrite gates into the backend's native basis
//!    using their OpenQASM standard-library definitions.
//! 2. **Assembly**: Package the compiled circuits, their OpenQASM text,
//!    and the run parameters into a [`Qobj`].
//!
//! The local simulators accept the `u1`/`u2`/`u3`/`cx`/`id` basis and
//! place no connectivity restriction, so the default pipeline is a single
//! [`passes::BasisTranslation`] pass.
//!
//! # Example
//!
//! ```rust
//! use rimfax_compile::{assemble, CompileOptions};
//! use rimfax_ir::{Circuit, ClassicalRegister, QuantumRegister};
//!
//! let qr = QuantumRegister::new("qr", 2);
//! let cr = ClassicalRegister::new("cr", 2);
//! let mut circuit = Circuit::new("bell");
//! circuit.add_quantum_register(&qr).unwrap();
//! circuit.add_classical_register(&cr).unwrap();
//! circuit.h(&qr[0]).unwrap();
//! circuit.cx(&qr[0], &qr[1]).unwrap();
//! circuit.measure(&qr[0], &cr[0]).unwrap();
//! circuit.measure(&qr[1], &cr[1]).unwrap();
//!
//! let options = CompileOptions::new("local_qasm_simulator");
//! let qobj = assemble(&[&circuit], &options).unwrap();
//!
//! // The Hadamard was rewritten into the simulator basis.
//! assert_eq!(qobj.experiments[0].instructions[0].name, "u2");
//! assert!(qobj.experiments[0].qasm.starts_with("OPENQASM 2.0;"));
//! ```
//!
//! # Custom Passes
//!
//! Implement the [`Pass`] trait to add steps to the pipeline:
//!
//! ```rust
//! use rimfax_compile::{CompileResult, Pass, PassKind, PropertySet};
//! use rimfax_ir::Circuit;
//!
//! struct DepthReport;
//!
//! impl Pass for DepthReport {
//!     fn name(&self) -> &str { "depth_report" }
//!     fn kind(&self) -> PassKind { PassKind::Analysis }
//!
//!     fn run(&self, circuit: &mut Circuit, _props: &mut PropertySet) -> CompileResult<()> {
//!         println!("depth: {}", circuit.depth());
//!         Ok(())
//!     }
//! }
//! ```

pub mod error;
pub mod manager;
pub mod pass;
pub mod property;
pub mod qobj;

// Built-in passes
pub mod passes;

pub use error::{CompileError, CompileResult};
pub use manager::PassManager;
pub use pass::{Pass, PassKind};
pub use passes::BasisTranslation;
pub use property::{BasisGates, CouplingMap, PropertySet};
pub use qobj::{
    assemble, CompileOptions, Experiment, ExperimentConfig, Qobj, QobjCondition, QobjConfig,
    QobjInstruction, DEFAULT_MAX_CREDITS, DEFAULT_SHOTS,
};
