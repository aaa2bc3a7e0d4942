//! Rimfax Backend Catalog
//!
//! This crate describes the backends circuits can be compiled for. Each
//! backend is a [`Capabilities`] record (qubit count, accepted basis,
//! connectivity, shot limits) held in a [`BackendRegistry`] keyed by name.
//!
//! The bundled entries are the two local simulators:
//!
//! | Name | Qubits | Basis |
//! |------|--------|-------|
//! | `local_qasm_simulator` | 24 | `u1,u2,u3,cx,id` |
//! | `local_unitary_simulator` | 12 | `u1,u2,u3,cx,id` |
//!
//! # Example
//!
//! ```rust
//! use rimfax_backends::BackendRegistry;
//!
//! let registry = BackendRegistry::with_local_backends();
//! let backend = registry.get("local_qasm_simulator").unwrap();
//!
//! assert!(backend.is_simulator);
//! assert!(backend.check_width(4).is_ok());
//! ```

pub mod capability;
pub mod error;
pub mod registry;

pub use capability::Capabilities;
pub use error::{BackendError, BackendResult};
pub use registry::BackendRegistry;
