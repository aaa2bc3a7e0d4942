//! Basis translation pass.
//!
//! Rewrites gates outside the target basis using their OpenQASM
//! standard-library (`qelib1.inc`) definitions. A definition may itself
//! contain non-basis gates (`cz` expands through `h`), so rewriting
//! repeats until the instruction stream is closed over the basis.

use tracing::debug;

use crate::error::{CompileError, CompileResult};
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;
use rimfax_ir::{Circuit, Instruction, ParameterExpression, QubitId, StandardGate};

/// Upper bound on rewrite rounds. The standard-library definitions bottom
/// out in the `u1`/`u2`/`u3`/`cx` primitives within three levels, so
/// reaching this bound means the rule set has a cycle.
const MAX_ROUNDS: usize = 8;

/// Rewrites gates into the target basis.
///
/// The pass rebuilds the circuit from its instruction stream rather than
/// patching nodes in place, which keeps instruction order stable. Classical
/// conditions transfer to every gate of a replacement, matching how a
/// conditioned composite gate behaves in OpenQASM. Measurements, resets,
/// and barriers pass through untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct BasisTranslation;

impl Pass for BasisTranslation {
    fn name(&self) -> &str {
        "basis_translation"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()> {
        let basis = properties
            .basis_gates
            .as_ref()
            .ok_or(CompileError::MissingBasisGates)?;

        let mut work: Vec<Instruction> = circuit.instructions().cloned().collect();
        let mut rounds = 0;
        loop {
            let mut changed = false;
            let mut next = Vec::with_capacity(work.len());

            for instruction in work {
                let gate = match instruction.as_gate() {
                    Some(gate) if !basis.contains(gate.name()) => gate.clone(),
                    _ => {
                        next.push(instruction);
                        continue;
                    }
                };

                let replacement = expand(&gate.gate, &instruction.qubits)
                    .ok_or_else(|| CompileError::GateNotInBasis(gate.name().to_string()))?;
                for mut expanded in replacement {
                    if let Some(condition) = &gate.condition {
                        if let Some(inner) = expanded.gate_mut() {
                            inner.condition = Some(condition.clone());
                        }
                    }
                    next.push(expanded);
                }
                changed = true;
            }

            work = next;
            if !changed {
                break;
            }
            rounds += 1;
            if rounds >= MAX_ROUNDS {
                return Err(CompileError::TranslationDiverged(rounds));
            }
        }
        debug!(rounds, ops = work.len(), "basis translation finished");

        let mut rebuilt = Circuit::new(circuit.name());
        for register in circuit.quantum_registers() {
            rebuilt.add_quantum_register(register)?;
        }
        for register in circuit.classical_registers() {
            rebuilt.add_classical_register(register)?;
        }
        for instruction in work {
            rebuilt.apply(instruction)?;
        }
        *circuit = rebuilt;

        Ok(())
    }

    fn should_run(&self, properties: &PropertySet) -> bool {
        properties.basis_gates.is_some()
    }
}

/// Expand a gate one step using its standard-library definition.
///
/// Returns `None` for the primitives `u3` and `cx`, which have no
/// definition. Operand arity was validated when the instruction entered
/// the circuit, so direct indexing into `qubits` is safe here.
fn expand(gate: &StandardGate, qubits: &[QubitId]) -> Option<Vec<Instruction>> {
    use ParameterExpression as P;
    use StandardGate as G;

    let one = |g: G| Instruction::single_qubit_gate(g, qubits[0]);
    let on = |g: G, q: QubitId| Instruction::single_qubit_gate(g, q);
    let cx = |a: QubitId, b: QubitId| Instruction::two_qubit_gate(G::CX, a, b);

    Some(match gate {
        G::I => vec![one(G::U3(P::zero(), P::zero(), P::zero()))],
        G::X => vec![one(G::U3(P::pi(), P::zero(), P::pi()))],
        G::Y => vec![one(G::U3(P::pi(), P::pi_ratio(1, 2), P::pi_ratio(1, 2)))],
        G::Z => vec![one(G::U1(P::pi()))],
        G::H => vec![one(G::U2(P::zero(), P::pi()))],
        G::S => vec![one(G::U1(P::pi_ratio(1, 2)))],
        G::Sdg => vec![one(G::U1(P::pi_ratio(-1, 2)))],
        G::T => vec![one(G::U1(P::pi_ratio(1, 4)))],
        G::Tdg => vec![one(G::U1(P::pi_ratio(-1, 4)))],

        G::Rx(theta) => vec![one(G::U3(
            theta.clone(),
            P::pi_ratio(-1, 2),
            P::pi_ratio(1, 2),
        ))],
        G::Ry(theta) => vec![one(G::U3(theta.clone(), P::zero(), P::zero()))],
        G::Rz(phi) => vec![one(G::U1(phi.clone()))],

        G::U1(lambda) => vec![one(G::U3(P::zero(), P::zero(), lambda.clone()))],
        G::U2(phi, lambda) => vec![one(G::U3(
            P::pi_ratio(1, 2),
            phi.clone(),
            lambda.clone(),
        ))],

        G::CY => {
            let (a, b) = (qubits[0], qubits[1]);
            vec![on(G::Sdg, b), cx(a, b), on(G::S, b)]
        }
        G::CZ => {
            let (a, b) = (qubits[0], qubits[1]);
            vec![on(G::H, b), cx(a, b), on(G::H, b)]
        }
        G::CH => {
            let (a, b) = (qubits[0], qubits[1]);
            vec![
                on(G::H, b),
                on(G::Sdg, b),
                cx(a, b),
                on(G::H, b),
                on(G::T, b),
                cx(a, b),
                on(G::T, b),
                on(G::H, b),
                on(G::S, b),
                on(G::X, b),
                on(G::S, a),
            ]
        }
        G::Swap => {
            let (a, b) = (qubits[0], qubits[1]);
            vec![cx(a, b), cx(b, a), cx(a, b)]
        }
        G::CCX => {
            let (a, b, c) = (qubits[0], qubits[1], qubits[2]);
            vec![
                on(G::H, c),
                cx(b, c),
                on(G::Tdg, c),
                cx(a, c),
                on(G::T, c),
                cx(b, c),
                on(G::Tdg, c),
                cx(a, c),
                on(G::T, b),
                on(G::T, c),
                on(G::H, c),
                cx(a, b),
                on(G::T, a),
                on(G::Tdg, b),
                cx(a, b),
            ]
        }

        G::U3(_, _, _) | G::CX => return None,
    })
}
