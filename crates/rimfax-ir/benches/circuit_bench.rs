//! Benchmarks for circuit construction and analysis.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rimfax_ir::{Circuit, ClassicalRegister, QuantumRegister};

fn circuit_with_registers(num_qubits: u32) -> (Circuit, QuantumRegister, ClassicalRegister) {
    let qr = QuantumRegister::new("q", num_qubits);
    let cr = ClassicalRegister::new("c", num_qubits);
    let mut circuit = Circuit::new("bench");
    circuit.add_quantum_register(&qr).unwrap();
    circuit.add_classical_register(&cr).unwrap();
    (circuit, qr, cr)
}

fn bench_circuit_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("circuit_creation");

    for size in [4, 16, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let (circuit, _, _) = circuit_with_registers(black_box(size));
                black_box(circuit)
            });
        });
    }

    group.finish();
}

fn bench_gate_addition(c: &mut Criterion) {
    let mut group = c.benchmark_group("gate_addition");

    for num_gates in [10, 100, 1000] {
        group.bench_with_input(
            BenchmarkId::from_parameter(num_gates),
            &num_gates,
            |b, &num_gates| {
                b.iter(|| {
                    let (mut circuit, qr, _) = circuit_with_registers(1);
                    for _ in 0..num_gates {
                        circuit.h(&qr[0]).unwrap();
                    }
                    black_box(circuit)
                });
            },
        );
    }

    group.finish();
}

fn bench_ghz_circuit(c: &mut Criterion) {
    let mut group = c.benchmark_group("ghz_circuit");

    for size in [4, 16, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let (mut circuit, qr, cr) = circuit_with_registers(size);
                circuit.h(&qr[0]).unwrap();
                for i in 0..size - 1 {
                    circuit.cx(&qr[i], &qr[i + 1]).unwrap();
                }
                for i in 0..size {
                    circuit.measure(&qr[i], &cr[i]).unwrap();
                }
                black_box(circuit)
            });
        });
    }

    group.finish();
}

fn bench_circuit_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("circuit_depth");

    for size in [4, 16, 64] {
        let (mut circuit, qr, cr) = circuit_with_registers(size);
        circuit.h(&qr[0]).unwrap();
        for i in 0..size - 1 {
            circuit.cx(&qr[i], &qr[i + 1]).unwrap();
        }
        for i in 0..size {
            circuit.measure(&qr[i], &cr[i]).unwrap();
        }

        group.bench_with_input(BenchmarkId::from_parameter(size), &circuit, |b, circuit| {
            b.iter(|| black_box(circuit.depth()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_circuit_creation,
    bench_gate_addition,
    bench_ghz_circuit,
    bench_circuit_depth
);
criterion_main!(benches);
