//! QASM 2.0 emitter for serializing circuits.

use rimfax_ir::{Circuit, Gate, Instruction, InstructionKind};

use crate::error::{EmitError, EmitResult};

/// Emit a circuit as `OpenQASM` 2.0 source code.
///
/// The output declares every attached register in attachment order and
/// lists operations in application order, with operands qualified by
/// register name (`cx qr[3],qr[2];`).
pub fn emit(circuit: &Circuit) -> EmitResult<String> {
    let mut emitter = Qasm2Emitter::new(circuit);
    emitter.emit_circuit()
}

/// QASM 2.0 emitter.
struct Qasm2Emitter<'a> {
    circuit: &'a Circuit,
    output: String,
}

impl<'a> Qasm2Emitter<'a> {
    fn new(circuit: &'a Circuit) -> Self {
        Self {
            circuit,
            output: String::new(),
        }
    }

    fn emit_circuit(&mut self) -> EmitResult<String> {
        self.writeln("OPENQASM 2.0;");
        self.writeln("include \"qelib1.inc\";");

        for qreg in self.circuit.quantum_registers() {
            self.writeln(&format!("qreg {}[{}];", qreg.name(), qreg.size()));
        }
        for creg in self.circuit.classical_registers() {
            self.writeln(&format!("creg {}[{}];", creg.name(), creg.size()));
        }

        let instructions: Vec<&Instruction> = self.circuit.instructions().collect();
        for instruction in instructions {
            self.emit_instruction(instruction)?;
        }

        Ok(self.output.clone())
    }

    fn emit_instruction(&mut self, instruction: &Instruction) -> EmitResult<()> {
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let qubits = self.emit_qubits(&instruction.qubits)?;
                let stmt = match self.emit_gate_params(gate) {
                    Some(params) => format!("{}({params}) {qubits};", gate.name()),
                    None => format!("{} {qubits};", gate.name()),
                };
                match &gate.condition {
                    Some(cond) => {
                        self.writeln(&format!("if({}=={}) {stmt}", cond.register, cond.value));
                    }
                    None => self.writeln(&stmt),
                }
            }

            InstructionKind::Measure => {
                for (q, c) in instruction.qubits.iter().zip(instruction.clbits.iter()) {
                    let qubit = self
                        .circuit
                        .qubit(*q)
                        .ok_or(EmitError::UnmappedQubit(*q))?;
                    let clbit = self
                        .circuit
                        .clbit(*c)
                        .ok_or(EmitError::UnmappedClbit(*c))?;
                    self.writeln(&format!("measure {qubit} -> {clbit};"));
                }
            }

            InstructionKind::Reset => {
                let qubits = self.emit_qubits(&instruction.qubits)?;
                self.writeln(&format!("reset {qubits};"));
            }

            InstructionKind::Barrier => {
                let qubits = self.emit_qubits(&instruction.qubits)?;
                self.writeln(&format!("barrier {qubits};"));
            }
        }

        Ok(())
    }

    fn emit_gate_params(&self, gate: &Gate) -> Option<String> {
        let params = gate.gate.parameters();
        if params.is_empty() {
            return None;
        }
        Some(
            params
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(","),
        )
    }

    fn emit_qubits(&self, qubits: &[rimfax_ir::QubitId]) -> EmitResult<String> {
        let mut parts = Vec::with_capacity(qubits.len());
        for &q in qubits {
            let handle = self.circuit.qubit(q).ok_or(EmitError::UnmappedQubit(q))?;
            parts.push(handle.to_string());
        }
        Ok(parts.join(","))
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rimfax_ir::{ClassicalRegister, ParameterExpression, QuantumRegister};

    fn circuit_2x2() -> (Circuit, QuantumRegister, ClassicalRegister) {
        let qr = QuantumRegister::new("qr", 2);
        let cr = ClassicalRegister::new("cr", 2);
        let mut circuit = Circuit::new("test");
        circuit.add_quantum_register(&qr).unwrap();
        circuit.add_classical_register(&cr).unwrap();
        (circuit, qr, cr)
    }

    #[test]
    fn test_emit_bell_state() {
        let (mut circuit, qr, cr) = circuit_2x2();
        circuit
            .h(&qr[0])
            .unwrap()
            .cx(&qr[0], &qr[1])
            .unwrap()
            .measure(&qr[0], &cr[0])
            .unwrap()
            .measure(&qr[1], &cr[1])
            .unwrap();

        let qasm = emit(&circuit).unwrap();
        let expected = "\
OPENQASM 2.0;
include \"qelib1.inc\";
qreg qr[2];
creg cr[2];
h qr[0];
cx qr[0],qr[1];
measure qr[0] -> cr[0];
measure qr[1] -> cr[1];
";
        assert_eq!(qasm, expected);
    }

    #[test]
    fn test_emit_parameterized() {
        let (mut circuit, qr, _) = circuit_2x2();
        circuit
            .u1(0.3, &qr[0])
            .unwrap()
            .u2(0.3, 0.2, &qr[1])
            .unwrap()
            .u3(0.3, 0.2, 0.1, &qr[0])
            .unwrap()
            .rx(ParameterExpression::pi_ratio(1, 2), &qr[1])
            .unwrap();

        let qasm = emit(&circuit).unwrap();
        assert!(qasm.contains("u1(0.3) qr[0];"));
        assert!(qasm.contains("u2(0.3,0.2) qr[1];"));
        assert!(qasm.contains("u3(0.3,0.2,0.1) qr[0];"));
        assert!(qasm.contains("rx(pi/2) qr[1];"));
    }

    #[test]
    fn test_emit_conditional() {
        let (mut circuit, qr, cr) = circuit_2x2();
        circuit.x(&qr[0]).unwrap().c_if(&cr, 0).unwrap();

        let qasm = emit(&circuit).unwrap();
        assert!(qasm.contains("if(cr==0) x qr[0];"));
    }

    #[test]
    fn test_emit_barrier_and_reset() {
        let (mut circuit, qr, _) = circuit_2x2();
        circuit
            .x(&qr[0])
            .unwrap()
            .barrier()
            .unwrap()
            .reset(&qr[0])
            .unwrap();

        let qasm = emit(&circuit).unwrap();
        assert!(qasm.contains("barrier qr[0],qr[1];"));
        assert!(qasm.contains("reset qr[0];"));
    }

    #[test]
    fn test_emit_multiple_registers() {
        let a = QuantumRegister::new("a", 1);
        let b = QuantumRegister::new("b", 2);
        let mut circuit = Circuit::new("multi");
        circuit.add_quantum_register(&a).unwrap();
        circuit.add_quantum_register(&b).unwrap();
        circuit.cx(&a[0], &b[1]).unwrap();

        let qasm = emit(&circuit).unwrap();
        assert!(qasm.contains("qreg a[1];"));
        assert!(qasm.contains("qreg b[2];"));
        assert!(qasm.contains("cx a[0],b[1];"));
    }

    #[test]
    fn test_empty_circuit_header_only() {
        let circuit = Circuit::new("empty");
        let qasm = emit(&circuit).unwrap();
        assert_eq!(qasm, "OPENQASM 2.0;\ninclude \"qelib1.inc\";\n");
    }
}
