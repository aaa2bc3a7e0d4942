//! Property-based tests for circuit construction.
//!
//! Random instruction sequences are applied through the register API and
//! checked against the invariants the builder promises: instructions come
//! back in application order, counts stay consistent, and the underlying
//! DAG remains well formed.

use proptest::prelude::*;
use rimfax_ir::{Circuit, ClassicalRegister, QuantumRegister};

/// Operations that can be applied to a circuit.
#[derive(Debug, Clone)]
enum Op {
    H(u32),
    X(u32),
    Rx(u32, f64),
    CX(u32, u32),
    Measure(u32),
    Barrier,
}

impl Op {
    fn apply(&self, circuit: &mut Circuit, qr: &QuantumRegister, cr: &ClassicalRegister) {
        match *self {
            Op::H(q) => {
                circuit.h(&qr[q]).unwrap();
            }
            Op::X(q) => {
                circuit.x(&qr[q]).unwrap();
            }
            Op::Rx(q, angle) => {
                circuit.rx(angle, &qr[q]).unwrap();
            }
            Op::CX(c, t) => {
                circuit.cx(&qr[c], &qr[t]).unwrap();
            }
            Op::Measure(q) => {
                circuit.measure(&qr[q], &cr[q]).unwrap();
            }
            Op::Barrier => {
                circuit.barrier().unwrap();
            }
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Op::H(_) => "h",
            Op::X(_) => "x",
            Op::Rx(..) => "rx",
            Op::CX(..) => "cx",
            Op::Measure(_) => "measure",
            Op::Barrier => "barrier",
        }
    }
}

/// Generate a random operation for a circuit with the given qubit count.
fn arb_op(num_qubits: u32) -> impl Strategy<Value = Op> {
    if num_qubits < 2 {
        prop_oneof![
            (0..num_qubits).prop_map(Op::H),
            (0..num_qubits).prop_map(Op::X),
            (0..num_qubits, -3.2_f64..3.2).prop_map(|(q, a)| Op::Rx(q, a)),
            (0..num_qubits).prop_map(Op::Measure),
            Just(Op::Barrier),
        ]
        .boxed()
    } else {
        prop_oneof![
            (0..num_qubits).prop_map(Op::H),
            (0..num_qubits).prop_map(Op::X),
            (0..num_qubits, -3.2_f64..3.2).prop_map(|(q, a)| Op::Rx(q, a)),
            (0..num_qubits, 0..num_qubits)
                .prop_filter("Control and target must differ", |(c, t)| c != t)
                .prop_map(|(c, t)| Op::CX(c, t)),
            (0..num_qubits).prop_map(Op::Measure),
            Just(Op::Barrier),
        ]
        .boxed()
    }
}

fn arb_build() -> impl Strategy<Value = (u32, Vec<Op>)> {
    (1_u32..=5).prop_flat_map(|n| (Just(n), prop::collection::vec(arb_op(n), 1..=12)))
}

fn build_circuit(num_qubits: u32, ops: &[Op]) -> Circuit {
    let qr = QuantumRegister::new("q", num_qubits);
    let cr = ClassicalRegister::new("c", num_qubits);
    let mut circuit = Circuit::new("prop");
    circuit.add_quantum_register(&qr).unwrap();
    circuit.add_classical_register(&cr).unwrap();
    for op in ops {
        op.apply(&mut circuit, &qr, &cr);
    }
    circuit
}

proptest! {
    /// Instructions come back in exactly the order they were applied.
    #[test]
    fn test_instruction_order_matches_application((num_qubits, ops) in arb_build()) {
        let circuit = build_circuit(num_qubits, &ops);

        let expected: Vec<&str> = ops.iter().map(Op::name).collect();
        let actual: Vec<&str> = circuit.instructions().map(|i| i.name()).collect();
        prop_assert_eq!(actual, expected, "Instruction order diverged from application order");
    }

    /// Operation count and depth stay consistent with what was applied.
    #[test]
    fn test_counts_and_depth((num_qubits, ops) in arb_build()) {
        let circuit = build_circuit(num_qubits, &ops);

        prop_assert_eq!(circuit.num_ops(), ops.len());
        prop_assert!(circuit.depth() >= 1, "Nonempty circuit must have depth");
        prop_assert!(circuit.depth() <= circuit.num_ops(),
            "Depth cannot exceed operation count");
    }

    /// The DAG stays structurally valid under arbitrary construction.
    #[test]
    fn test_dag_integrity((num_qubits, ops) in arb_build()) {
        let circuit = build_circuit(num_qubits, &ops);
        prop_assert!(circuit.dag().verify_integrity().is_ok());
    }
}
