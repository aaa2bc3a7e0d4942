//! End-to-end emission of a full introductory circuit.

use rimfax_ir::{Circuit, ClassicalRegister, QuantumRegister};
use rimfax_qasm::emit;

/// Builds the standard four-qubit walkthrough circuit and checks the
/// emitted text line by line.
#[test]
fn emit_four_qubit_walkthrough() {
    let qr = QuantumRegister::new("qr", 4);
    let cr = ClassicalRegister::new("cr", 4);
    let mut circuit = Circuit::new("Circuit");
    circuit.add_quantum_register(&qr).unwrap();
    circuit.add_classical_register(&cr).unwrap();

    circuit
        .x(&qr[1])
        .unwrap()
        .y(&qr[2])
        .unwrap()
        .z(&qr[3])
        .unwrap()
        .cx(&qr[3], &qr[2])
        .unwrap()
        .barrier()
        .unwrap()
        .h(&qr[0])
        .unwrap()
        .s(&qr[0])
        .unwrap()
        .t(&qr[1])
        .unwrap()
        .iden(&qr[1])
        .unwrap()
        .u1(0.3, &qr[0])
        .unwrap()
        .u2(0.3, 0.2, &qr[1])
        .unwrap()
        .u3(0.3, 0.2, 0.1, &qr[2])
        .unwrap()
        .rx(0.2, &qr[0])
        .unwrap()
        .ry(0.2, &qr[1])
        .unwrap()
        .rz(0.2, &qr[2])
        .unwrap();

    for i in 0..3 {
        circuit.measure(&qr[i], &cr[i]).unwrap();
    }

    let qasm = emit(&circuit).unwrap();
    let expected = "\
OPENQASM 2.0;
include \"qelib1.inc\";
qreg qr[4];
creg cr[4];
x qr[1];
y qr[2];
z qr[3];
cx qr[3],qr[2];
barrier qr[0],qr[1],qr[2],qr[3];
h qr[0];
s qr[0];
t qr[1];
id qr[1];
u1(0.3) qr[0];
u2(0.3,0.2) qr[1];
u3(0.3,0.2,0.1) qr[2];
rx(0.2) qr[0];
ry(0.2) qr[1];
rz(0.2) qr[2];
measure qr[0] -> cr[0];
measure qr[1] -> cr[1];
measure qr[2] -> cr[2];
";
    assert_eq!(qasm, expected);
}
