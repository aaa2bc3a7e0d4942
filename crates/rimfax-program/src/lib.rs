//! Rimfax Quantum Program Facade
//!
//! This crate is the front door of the toolkit. A [`QuantumProgram`]
//! holds named registers and circuits, exports OpenQASM, and compiles
//! circuits for the backends in its registry. Credentials and the two
//! startup guards live here too, so an application can check its
//! environment before doing any quantum work.
//!
//! # Example
//!
//! ```rust
//! use rimfax_program::QuantumProgram;
//!
//! let mut qp = QuantumProgram::new();
//! let qr = qp.create_quantum_register("qr", 2).unwrap();
//! let cr = qp.create_classical_register("cr", 2).unwrap();
//!
//! let circuit = qp.create_circuit("bell", &[&qr], &[&cr]).unwrap();
//! circuit.h(&qr[0]).unwrap();
//! circuit.cx(&qr[0], &qr[1]).unwrap();
//! circuit.measure(&qr[0], &cr[0]).unwrap();
//! circuit.measure(&qr[1], &cr[1]).unwrap();
//!
//! println!("{}", qp.get_qasm("bell").unwrap());
//!
//! let qobj = qp.compile(&["bell"], "local_qasm_simulator").unwrap();
//! assert_eq!(qobj.config.backend_name, "local_qasm_simulator");
//! ```
//!
//! # Startup Guards
//!
//! Programs that talk to a remote API typically begin with:
//!
//! ```rust,no_run
//! use rimfax_program::{require_version, ApiConfig};
//!
//! require_version("0.4.0").unwrap();
//! let config = ApiConfig::load().unwrap();
//! ```
//!
//! [`require_version`] rejects an installation older than the caller
//! needs, and [`ApiConfig::load`] fails with a fixed message when no
//! access token is configured.

pub mod config;
pub mod error;
pub mod program;
pub mod specs;
pub mod version;

pub use config::{ApiConfig, DEFAULT_API_URL};
pub use error::{ProgramError, ProgramResult};
pub use program::QuantumProgram;
pub use specs::{CircuitSpec, ProgramSpecs, RegisterSpec};
pub use version::require_version;
