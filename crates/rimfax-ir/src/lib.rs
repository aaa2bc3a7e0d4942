//! Rimfax Circuit Intermediate Representation
//!
//! This crate provides the core data structures for representing quantum
//! circuits in Rimfax: named registers, gates, instructions, and the DAG
//! that orders them. It is the foundation the rest of the stack (QASM
//! emission, compilation, rendering) builds on.
//!
//! # Overview
//!
//! Circuits are built over *registers*. A [`QuantumRegister`] is a named
//! group of qubit slots and a [`ClassicalRegister`] a named group of bit
//! slots for measurement outcomes. Indexing a register yields a [`Qubit`]
//! or [`Clbit`] handle (`qr[1]`), which the [`Circuit`] gate methods accept
//! and resolve to flat wire ids internally. The circuit itself is stored as
//! a DAG ([`CircuitDag`]) so that downstream passes can reorder, rewrite,
//! and measure depth efficiently.
//!
//! # Example: the first few steps of a program
//!
//! ```rust
//! use rimfax_ir::{Circuit, ClassicalRegister, QuantumRegister};
//!
//! let qr = QuantumRegister::new("qr", 2);
//! let cr = ClassicalRegister::new("cr", 2);
//!
//! let mut circuit = Circuit::new("Circuit");
//! circuit.add_quantum_register(&qr).unwrap();
//! circuit.add_classical_register(&cr).unwrap();
//!
//! circuit.h(&qr[0]).unwrap();
//! circuit.cx(&qr[0], &qr[1]).unwrap();
//! circuit.measure(&qr[0], &cr[0]).unwrap();
//! circuit.measure(&qr[1], &cr[1]).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 3); // H, CX, parallel measures
//! ```
//!
//! # Supported Gates
//!
//! The gate set follows the qelib1 vocabulary:
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `I` | 1 | Identity |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `H` | 1 | Hadamard |
//! | `S`, `Sdg`, `T`, `Tdg` | 1 | Phase gates |
//! | `U1`, `U2`, `U3` | 1 | Physical gates U1(λ), U2(φ,λ), U3(θ,φ,λ) |
//! | `Rx`, `Ry`, `Rz` | 1 | Axis rotations |
//! | `CX`, `CY`, `CZ`, `CH` | 2 | Controlled gates |
//! | `Swap` | 2 | SWAP |
//! | `CCX` | 3 | Toffoli |

pub mod circuit;
pub mod dag;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod parameter;
pub mod register;
pub mod wire;

pub use circuit::Circuit;
pub use dag::{CircuitDag, DagEdge, DagNode, NodeIndex, WireId};
pub use error::{IrError, IrResult};
pub use gate::{ClassicalCondition, Gate, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use parameter::ParameterExpression;
pub use register::{ClassicalRegister, Clbit, QuantumRegister, Qubit};
pub use wire::{ClbitId, QubitId};
