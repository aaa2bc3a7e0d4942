//! High-level circuit builder API.

use rustc_hash::FxHashMap;

use crate::dag::{CircuitDag, NodeIndex};
use crate::error::{IrError, IrResult};
use crate::gate::{ClassicalCondition, StandardGate};
use crate::instruction::Instruction;
use crate::parameter::ParameterExpression;
use crate::register::{ClassicalRegister, Clbit, QuantumRegister, Qubit};
use crate::wire::{ClbitId, QubitId};

/// A quantum circuit built over named registers.
///
/// Gate methods accept register handles (`&qr[0]`) and resolve them to
/// flat wire ids internally. Wires are numbered in register attachment
/// order, so the first register attached owns ids `0..size`.
#[derive(Debug, Clone)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Quantum registers in attachment order.
    quantum_registers: Vec<QuantumRegister>,
    /// Classical registers in attachment order.
    classical_registers: Vec<ClassicalRegister>,
    /// Flat wire-ordered qubit handles, indexed by [`QubitId`].
    qubits: Vec<Qubit>,
    /// Flat wire-ordered clbit handles, indexed by [`ClbitId`].
    clbits: Vec<Clbit>,
    /// Register name to (first wire id, size) for quantum registers.
    qreg_index: FxHashMap<String, (u32, u32)>,
    /// Register name to (first wire id, size) for classical registers.
    creg_index: FxHashMap<String, (u32, u32)>,
    /// The underlying DAG representation.
    dag: CircuitDag,
    /// Most recently applied operation, target of [`c_if`](Self::c_if).
    last_op: Option<NodeIndex>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantum_registers: vec![],
            classical_registers: vec![],
            qubits: vec![],
            clbits: vec![],
            qreg_index: FxHashMap::default(),
            creg_index: FxHashMap::default(),
            dag: CircuitDag::new(),
            last_op: None,
        }
    }

    /// Attach a quantum register to the circuit.
    ///
    /// Register names share one namespace with classical registers, as in
    /// OpenQASM.
    pub fn add_quantum_register(&mut self, register: &QuantumRegister) -> IrResult<&mut Self> {
        let name = register.name().to_string();
        if self.qreg_index.contains_key(&name) || self.creg_index.contains_key(&name) {
            return Err(IrError::DuplicateRegister(name));
        }

        let offset = self.qubits.len() as u32;
        for (i, bit) in register.bits().enumerate() {
            let id = QubitId(offset + i as u32);
            self.dag.add_qubit(id);
            self.qubits.push(bit.clone());
        }
        self.qreg_index.insert(name, (offset, register.size()));
        self.quantum_registers.push(register.clone());
        Ok(self)
    }

    /// Attach a classical register to the circuit.
    pub fn add_classical_register(&mut self, register: &ClassicalRegister) -> IrResult<&mut Self> {
        let name = register.name().to_string();
        if self.qreg_index.contains_key(&name) || self.creg_index.contains_key(&name) {
            return Err(IrError::DuplicateRegister(name));
        }

        let offset = self.clbits.len() as u32;
        for (i, bit) in register.bits().enumerate() {
            let id = ClbitId(offset + i as u32);
            self.dag.add_clbit(id);
            self.clbits.push(bit.clone());
        }
        self.creg_index.insert(name, (offset, register.size()));
        self.classical_registers.push(register.clone());
        Ok(self)
    }

    /// Resolve a register handle to its flat wire id.
    pub fn resolve_qubit(&self, qubit: &Qubit) -> IrResult<QubitId> {
        let (offset, size) = self
            .qreg_index
            .get(&qubit.register)
            .copied()
            .ok_or_else(|| IrError::RegisterNotFound(qubit.register.clone()))?;
        if qubit.index >= size {
            return Err(IrError::BitOutOfRange {
                register: qubit.register.clone(),
                index: qubit.index,
                size,
            });
        }
        Ok(QubitId(offset + qubit.index))
    }

    /// Resolve a classical register handle to its flat wire id.
    pub fn resolve_clbit(&self, clbit: &Clbit) -> IrResult<ClbitId> {
        let (offset, size) = self
            .creg_index
            .get(&clbit.register)
            .copied()
            .ok_or_else(|| IrError::RegisterNotFound(clbit.register.clone()))?;
        if clbit.index >= size {
            return Err(IrError::BitOutOfRange {
                register: clbit.register.clone(),
                index: clbit.index,
                size,
            });
        }
        Ok(ClbitId(offset + clbit.index))
    }

    /// Apply a raw instruction over flat wire ids.
    ///
    /// Gate methods are the usual entry point; this is for code that
    /// rewrites circuits instruction by instruction.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<NodeIndex> {
        let node = self.dag.apply(instruction)?;
        self.last_op = Some(node);
        Ok(node)
    }

    fn apply_1q(&mut self, gate: StandardGate, qubit: &Qubit) -> IrResult<&mut Self> {
        let q = self.resolve_qubit(qubit)?;
        self.apply(Instruction::single_qubit_gate(gate, q))?;
        Ok(self)
    }

    fn apply_2q(&mut self, gate: StandardGate, q1: &Qubit, q2: &Qubit) -> IrResult<&mut Self> {
        let a = self.resolve_qubit(q1)?;
        let b = self.resolve_qubit(q2)?;
        self.apply(Instruction::two_qubit_gate(gate, a, b))?;
        Ok(self)
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply identity gate.
    pub fn iden(&mut self, qubit: &Qubit) -> IrResult<&mut Self> {
        self.apply_1q(StandardGate::I, qubit)
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: &Qubit) -> IrResult<&mut Self> {
        self.apply_1q(StandardGate::X, qubit)
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: &Qubit) -> IrResult<&mut Self> {
        self.apply_1q(StandardGate::Y, qubit)
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: &Qubit) -> IrResult<&mut Self> {
        self.apply_1q(StandardGate::Z, qubit)
    }

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: &Qubit) -> IrResult<&mut Self> {
        self.apply_1q(StandardGate::H, qubit)
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: &Qubit) -> IrResult<&mut Self> {
        self.apply_1q(StandardGate::S, qubit)
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: &Qubit) -> IrResult<&mut Self> {
        self.apply_1q(StandardGate::Sdg, qubit)
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: &Qubit) -> IrResult<&mut Self> {
        self.apply_1q(StandardGate::T, qubit)
    }

    /// Apply T-dagger gate.
    pub fn tdg(&mut self, qubit: &Qubit) -> IrResult<&mut Self> {
        self.apply_1q(StandardGate::Tdg, qubit)
    }

    /// Apply Rx rotation gate.
    pub fn rx(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: &Qubit,
    ) -> IrResult<&mut Self> {
        self.apply_1q(StandardGate::Rx(theta.into()), qubit)
    }

    /// Apply Ry rotation gate.
    pub fn ry(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: &Qubit,
    ) -> IrResult<&mut Self> {
        self.apply_1q(StandardGate::Ry(theta.into()), qubit)
    }

    /// Apply Rz rotation gate.
    pub fn rz(
        &mut self,
        phi: impl Into<ParameterExpression>,
        qubit: &Qubit,
    ) -> IrResult<&mut Self> {
        self.apply_1q(StandardGate::Rz(phi.into()), qubit)
    }

    /// Apply u1 phase gate.
    pub fn u1(
        &mut self,
        lambda: impl Into<ParameterExpression>,
        qubit: &Qubit,
    ) -> IrResult<&mut Self> {
        self.apply_1q(StandardGate::U1(lambda.into()), qubit)
    }

    /// Apply u2 gate.
    pub fn u2(
        &mut self,
        phi: impl Into<ParameterExpression>,
        lambda: impl Into<ParameterExpression>,
        qubit: &Qubit,
    ) -> IrResult<&mut Self> {
        self.apply_1q(StandardGate::U2(phi.into(), lambda.into()), qubit)
    }

    /// Apply universal u3 gate.
    pub fn u3(
        &mut self,
        theta: impl Into<ParameterExpression>,
        phi: impl Into<ParameterExpression>,
        lambda: impl Into<ParameterExpression>,
        qubit: &Qubit,
    ) -> IrResult<&mut Self> {
        self.apply_1q(
            StandardGate::U3(theta.into(), phi.into(), lambda.into()),
            qubit,
        )
    }

    // =========================================================================
    // Multi-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: &Qubit, target: &Qubit) -> IrResult<&mut Self> {
        self.apply_2q(StandardGate::CX, control, target)
    }

    /// Apply controlled-Y gate.
    pub fn cy(&mut self, control: &Qubit, target: &Qubit) -> IrResult<&mut Self> {
        self.apply_2q(StandardGate::CY, control, target)
    }

    /// Apply controlled-Z gate.
    pub fn cz(&mut self, control: &Qubit, target: &Qubit) -> IrResult<&mut Self> {
        self.apply_2q(StandardGate::CZ, control, target)
    }

    /// Apply controlled-Hadamard gate.
    pub fn ch(&mut self, control: &Qubit, target: &Qubit) -> IrResult<&mut Self> {
        self.apply_2q(StandardGate::CH, control, target)
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: &Qubit, q2: &Qubit) -> IrResult<&mut Self> {
        self.apply_2q(StandardGate::Swap, q1, q2)
    }

    /// Apply Toffoli (CCX) gate.
    pub fn ccx(&mut self, c1: &Qubit, c2: &Qubit, target: &Qubit) -> IrResult<&mut Self> {
        let a = self.resolve_qubit(c1)?;
        let b = self.resolve_qubit(c2)?;
        let t = self.resolve_qubit(target)?;
        self.apply(Instruction::gate(StandardGate::CCX, [a, b, t]))?;
        Ok(self)
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Measure a qubit into a classical bit.
    pub fn measure(&mut self, qubit: &Qubit, clbit: &Clbit) -> IrResult<&mut Self> {
        let q = self.resolve_qubit(qubit)?;
        let c = self.resolve_clbit(clbit)?;
        self.apply(Instruction::measure(q, c))?;
        Ok(self)
    }

    /// Reset a qubit to |0⟩.
    pub fn reset(&mut self, qubit: &Qubit) -> IrResult<&mut Self> {
        let q = self.resolve_qubit(qubit)?;
        self.apply(Instruction::reset(q))?;
        Ok(self)
    }

    /// Apply a barrier across all qubits.
    ///
    /// A no-op on a circuit with no quantum registers.
    pub fn barrier(&mut self) -> IrResult<&mut Self> {
        if self.qubits.is_empty() {
            return Ok(self);
        }
        let qubits: Vec<QubitId> = (0..self.qubits.len() as u32).map(QubitId).collect();
        self.apply(Instruction::barrier(qubits))?;
        Ok(self)
    }

    /// Make the most recent gate conditional on a classical register value.
    ///
    /// Mirrors the `c_if` chaining style:
    ///
    /// ```rust
    /// # use rimfax_ir::{Circuit, ClassicalRegister, QuantumRegister};
    /// # let qr = QuantumRegister::new("qr", 1);
    /// # let cr = ClassicalRegister::new("cr", 1);
    /// # let mut circuit = Circuit::new("c");
    /// # circuit.add_quantum_register(&qr).unwrap();
    /// # circuit.add_classical_register(&cr).unwrap();
    /// circuit.x(&qr[0]).unwrap().c_if(&cr, 0).unwrap();
    /// ```
    ///
    /// Returns an error when no gate has been applied yet or when the most
    /// recent operation is not a gate.
    pub fn c_if(&mut self, register: &ClassicalRegister, value: u64) -> IrResult<&mut Self> {
        if !self.creg_index.contains_key(register.name()) {
            return Err(IrError::RegisterNotFound(register.name().to_string()));
        }
        let node = self.last_op.ok_or(IrError::InvalidNode)?;
        let inst = self
            .dag
            .get_instruction_mut(node)
            .ok_or(IrError::InvalidNode)?;
        let gate = inst.gate_mut().ok_or_else(|| {
            IrError::InvalidDag("c_if requires the preceding operation to be a gate".into())
        })?;
        gate.condition = Some(ClassicalCondition::new(register.name(), value));
        Ok(self)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.clbits.len()
    }

    /// Get the number of operations.
    pub fn num_ops(&self) -> usize {
        self.dag.num_ops()
    }

    /// Get the circuit depth.
    pub fn depth(&self) -> usize {
        self.dag.depth()
    }

    /// Iterate over instructions in application order.
    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.dag.topological_ops().map(|(_, inst)| inst)
    }

    /// Get the quantum registers in attachment order.
    pub fn quantum_registers(&self) -> &[QuantumRegister] {
        &self.quantum_registers
    }

    /// Get the classical registers in attachment order.
    pub fn classical_registers(&self) -> &[ClassicalRegister] {
        &self.classical_registers
    }

    /// Get the register handle for a flat qubit id.
    pub fn qubit(&self, id: QubitId) -> Option<&Qubit> {
        self.qubits.get(id.0 as usize)
    }

    /// Get the register handle for a flat clbit id.
    pub fn clbit(&self, id: ClbitId) -> Option<&Clbit> {
        self.clbits.get(id.0 as usize)
    }

    /// Get a reference to the underlying DAG.
    pub fn dag(&self) -> &CircuitDag {
        &self.dag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_two() -> (Circuit, QuantumRegister, ClassicalRegister) {
        let qr = QuantumRegister::new("qr", 2);
        let cr = ClassicalRegister::new("cr", 2);
        let mut circuit = Circuit::new("test");
        circuit.add_quantum_register(&qr).unwrap();
        circuit.add_classical_register(&cr).unwrap();
        (circuit, qr, cr)
    }

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new("test");
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 0);
        assert_eq!(circuit.num_clbits(), 0);
    }

    #[test]
    fn test_add_registers() {
        let (circuit, _, _) = two_by_two();
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.num_clbits(), 2);
        assert_eq!(circuit.quantum_registers().len(), 1);
        assert_eq!(circuit.classical_registers().len(), 1);
    }

    #[test]
    fn test_duplicate_register_rejected() {
        let (mut circuit, qr, _) = two_by_two();
        assert!(matches!(
            circuit.add_quantum_register(&qr),
            Err(IrError::DuplicateRegister(name)) if name == "qr"
        ));

        // Classical registers share the namespace.
        let clash = ClassicalRegister::new("qr", 1);
        assert!(circuit.add_classical_register(&clash).is_err());
    }

    #[test]
    fn test_bell_state() {
        let (mut circuit, qr, cr) = two_by_two();
        circuit
            .h(&qr[0])
            .unwrap()
            .cx(&qr[0], &qr[1])
            .unwrap()
            .measure(&qr[0], &cr[0])
            .unwrap()
            .measure(&qr[1], &cr[1])
            .unwrap();

        assert_eq!(circuit.num_ops(), 4);
        assert_eq!(circuit.depth(), 3); // H, CX, parallel measures
    }

    #[test]
    fn test_flat_ids_follow_attachment_order() {
        let qr1 = QuantumRegister::new("a", 2);
        let qr2 = QuantumRegister::new("b", 2);
        let mut circuit = Circuit::new("test");
        circuit.add_quantum_register(&qr1).unwrap();
        circuit.add_quantum_register(&qr2).unwrap();

        assert_eq!(circuit.resolve_qubit(&qr1[1]).unwrap(), QubitId(1));
        assert_eq!(circuit.resolve_qubit(&qr2[0]).unwrap(), QubitId(2));
        assert_eq!(circuit.qubit(QubitId(3)).unwrap().register, "b");
    }

    #[test]
    fn test_unattached_register_rejected() {
        let (mut circuit, _, _) = two_by_two();
        let other = QuantumRegister::new("other", 1);
        assert!(matches!(
            circuit.h(&other[0]),
            Err(IrError::RegisterNotFound(name)) if name == "other"
        ));
    }

    #[test]
    fn test_out_of_range_handle_rejected() {
        let (mut circuit, _, _) = two_by_two();
        // Build a handle past the attached register's size by hand.
        let stray = Qubit::new("qr", 5);
        assert!(matches!(
            circuit.x(&stray),
            Err(IrError::BitOutOfRange { index: 5, .. })
        ));
    }

    #[test]
    fn test_parameterized_gates() {
        let (mut circuit, qr, _) = two_by_two();
        circuit
            .u1(0.3, &qr[0])
            .unwrap()
            .u2(0.3, 0.2, &qr[1])
            .unwrap()
            .u3(0.3, 0.2, 0.1, &qr[0])
            .unwrap()
            .rx(0.2, &qr[0])
            .unwrap();

        assert_eq!(circuit.num_ops(), 4);
    }

    #[test]
    fn test_barrier_spans_all_qubits() {
        let (mut circuit, qr, _) = two_by_two();
        circuit.x(&qr[0]).unwrap().barrier().unwrap();

        let barrier = circuit.instructions().nth(1).unwrap();
        assert!(barrier.is_barrier());
        assert_eq!(barrier.qubits.len(), 2);
    }

    #[test]
    fn test_barrier_on_empty_circuit() {
        let mut circuit = Circuit::new("empty");
        circuit.barrier().unwrap();
        assert_eq!(circuit.num_ops(), 0);
    }

    #[test]
    fn test_c_if_attaches_condition() {
        let (mut circuit, qr, cr) = two_by_two();
        circuit.x(&qr[0]).unwrap().c_if(&cr, 0).unwrap();

        let inst = circuit.instructions().next().unwrap();
        let gate = inst.as_gate().unwrap();
        assert_eq!(
            gate.condition,
            Some(ClassicalCondition::new("cr", 0)),
        );
    }

    #[test]
    fn test_c_if_without_gate_fails() {
        let (mut circuit, qr, cr) = two_by_two();
        assert!(circuit.c_if(&cr, 0).is_err());

        circuit.measure(&qr[0], &cr[0]).unwrap();
        assert!(circuit.c_if(&cr, 0).is_err());
    }

    #[test]
    fn test_instruction_order() {
        let (mut circuit, qr, cr) = two_by_two();
        circuit
            .x(&qr[0])
            .unwrap()
            .y(&qr[1])
            .unwrap()
            .barrier()
            .unwrap()
            .measure(&qr[0], &cr[0])
            .unwrap();

        let names: Vec<&str> = circuit.instructions().map(Instruction::name).collect();
        assert_eq!(names, vec!["x", "y", "barrier", "measure"]);
    }
}
