//! Property-based tests for basis translation.
//!
//! Random circuits over the full gate vocabulary are translated into the
//! hardware basis and checked for closure (every remaining gate is a basis
//! gate) and stability (translating twice changes nothing further).

use proptest::prelude::*;
use rimfax_compile::{BasisGates, BasisTranslation, Pass, PropertySet};
use rimfax_ir::{Circuit, QuantumRegister};

/// Gate applications drawn from across the vocabulary: bare 1-qubit
/// gates, parameterized rotations, and the compound 2- and 3-qubit gates
/// whose definitions expand through intermediate gates.
#[derive(Debug, Clone)]
enum Op {
    X(u32),
    H(u32),
    T(u32),
    Sdg(u32),
    Rx(u32, f64),
    U2(u32, f64, f64),
    CY(u32, u32),
    CZ(u32, u32),
    Swap(u32, u32),
    CCX(u32, u32, u32),
}

impl Op {
    fn apply(&self, circuit: &mut Circuit, qr: &QuantumRegister) {
        match *self {
            Op::X(q) => {
                circuit.x(&qr[q]).unwrap();
            }
            Op::H(q) => {
                circuit.h(&qr[q]).unwrap();
            }
            Op::T(q) => {
                circuit.t(&qr[q]).unwrap();
            }
            Op::Sdg(q) => {
                circuit.sdg(&qr[q]).unwrap();
            }
            Op::Rx(q, angle) => {
                circuit.rx(angle, &qr[q]).unwrap();
            }
            Op::U2(q, phi, lambda) => {
                circuit.u2(phi, lambda, &qr[q]).unwrap();
            }
            Op::CY(a, b) => {
                circuit.cy(&qr[a], &qr[b]).unwrap();
            }
            Op::CZ(a, b) => {
                circuit.cz(&qr[a], &qr[b]).unwrap();
            }
            Op::Swap(a, b) => {
                circuit.swap(&qr[a], &qr[b]).unwrap();
            }
            Op::CCX(a, b, c) => {
                circuit.ccx(&qr[a], &qr[b], &qr[c]).unwrap();
            }
        }
    }
}

fn arb_op(num_qubits: u32) -> impl Strategy<Value = Op> {
    let angle = -3.2_f64..3.2;
    prop_oneof![
        (0..num_qubits).prop_map(Op::X),
        (0..num_qubits).prop_map(Op::H),
        (0..num_qubits).prop_map(Op::T),
        (0..num_qubits).prop_map(Op::Sdg),
        (0..num_qubits, angle.clone()).prop_map(|(q, a)| Op::Rx(q, a)),
        (0..num_qubits, angle.clone(), angle.clone()).prop_map(|(q, p, l)| Op::U2(q, p, l)),
        arb_pair(num_qubits).prop_map(|(a, b)| Op::CY(a, b)),
        arb_pair(num_qubits).prop_map(|(a, b)| Op::CZ(a, b)),
        arb_pair(num_qubits).prop_map(|(a, b)| Op::Swap(a, b)),
        (0..num_qubits, 0..num_qubits, 0..num_qubits)
            .prop_filter("CCX operands must be distinct", |(a, b, c)| {
                a != b && b != c && a != c
            })
            .prop_map(|(a, b, c)| Op::CCX(a, b, c)),
    ]
}

fn arb_pair(num_qubits: u32) -> impl Strategy<Value = (u32, u32)> {
    (0..num_qubits, 0..num_qubits)
        .prop_filter("Operands must be distinct", |(a, b)| a != b)
}

fn arb_circuit() -> impl Strategy<Value = Circuit> {
    (3_u32..=5).prop_flat_map(|num_qubits| {
        prop::collection::vec(arb_op(num_qubits), 1..=10).prop_map(move |ops| {
            let qr = QuantumRegister::new("q", num_qubits);
            let mut circuit = Circuit::new("prop");
            circuit.add_quantum_register(&qr).unwrap();
            for op in &ops {
                op.apply(&mut circuit, &qr);
            }
            circuit
        })
    })
}

fn translate(circuit: &mut Circuit) {
    let mut props = PropertySet::new().with_basis(BasisGates::from_csv("u1,u2,u3,cx"));
    BasisTranslation.run(circuit, &mut props).unwrap();
}

proptest! {
    /// After translation every gate is a basis gate, and no wires were
    /// added or lost along the way.
    #[test]
    fn test_translation_closes_over_basis(mut circuit in arb_circuit()) {
        let original_qubits = circuit.num_qubits();
        let original_ops = circuit.num_ops();

        translate(&mut circuit);

        let basis = BasisGates::from_csv("u1,u2,u3,cx");
        for instruction in circuit.instructions() {
            prop_assert!(basis.contains(instruction.name()),
                "{} survived translation", instruction.name());
        }
        prop_assert_eq!(circuit.num_qubits(), original_qubits);
        prop_assert!(circuit.num_ops() >= original_ops,
            "Expansion cannot shrink the instruction stream");
    }

    /// Translating an already-translated circuit changes nothing.
    #[test]
    fn test_translation_is_stable(mut circuit in arb_circuit()) {
        translate(&mut circuit);
        let first: Vec<String> = circuit
            .instructions()
            .map(|i| format!("{i:?}"))
            .collect();

        translate(&mut circuit);
        let second: Vec<String> = circuit
            .instructions()
            .map(|i| format!("{i:?}"))
            .collect();

        prop_assert_eq!(first, second);
    }
}
