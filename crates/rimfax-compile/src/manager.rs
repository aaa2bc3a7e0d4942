//! Pass manager for running compilation pipelines.

use tracing::{debug, instrument};

use crate::error::CompileResult;
use crate::pass::Pass;
use crate::property::PropertySet;
use rimfax_ir::Circuit;

/// Runs a sequence of compilation passes over a circuit.
///
/// Passes execute in the order they were added. A pass whose
/// [`should_run`](Pass::should_run) returns `false` is skipped without
/// error, so a pipeline can be assembled once and reused across targets.
#[derive(Default)]
pub struct PassManager {
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    /// Create an empty pass manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pass to the pipeline.
    pub fn add_pass(&mut self, pass: impl Pass + 'static) -> &mut Self {
        self.passes.push(Box::new(pass));
        self
    }

    /// Run all passes over the circuit.
    ///
    /// Stops at the first failing pass and returns its error.
    #[instrument(skip(self, circuit, properties), fields(passes = self.passes.len()))]
    pub fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()> {
        for pass in &self.passes {
            if !pass.should_run(properties) {
                debug!(pass = pass.name(), "skipping pass");
                continue;
            }
            debug!(pass = pass.name(), kind = ?pass.kind(), "running pass");
            pass.run(circuit, properties)?;
        }
        Ok(())
    }

    /// Number of passes in the pipeline.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Check if the pipeline is empty.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

impl std::fmt::Debug for PassManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PassManager")
            .field("passes", &self.passes.iter().map(|p| p.name()).collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pass::PassKind;
    use rimfax_ir::{Circuit, Instruction, QuantumRegister, QubitId};

    struct AppendBarrier;

    impl Pass for AppendBarrier {
        fn name(&self) -> &str {
            "append_barrier"
        }

        fn kind(&self) -> PassKind {
            PassKind::Transformation
        }

        fn run(&self, circuit: &mut Circuit, _properties: &mut PropertySet) -> CompileResult<()> {
            let qubits: Vec<QubitId> = (0..circuit.num_qubits() as u32).map(QubitId).collect();
            circuit.apply(Instruction::barrier(qubits))?;
            Ok(())
        }
    }

    struct NeverRuns;

    impl Pass for NeverRuns {
        fn name(&self) -> &str {
            "never_runs"
        }

        fn kind(&self) -> PassKind {
            PassKind::Transformation
        }

        fn run(&self, _circuit: &mut Circuit, _properties: &mut PropertySet) -> CompileResult<()> {
            panic!("pass should have been skipped");
        }

        fn should_run(&self, _properties: &PropertySet) -> bool {
            false
        }
    }

    fn one_qubit_circuit() -> Circuit {
        let qr = QuantumRegister::new("q", 1);
        let mut circuit = Circuit::new("test");
        circuit.add_quantum_register(&qr).unwrap();
        circuit
    }

    #[test]
    fn test_empty_manager_is_noop() {
        let manager = PassManager::new();
        assert!(manager.is_empty());

        let mut circuit = one_qubit_circuit();
        let mut properties = PropertySet::new();
        manager.run(&mut circuit, &mut properties).unwrap();
        assert_eq!(circuit.num_ops(), 0);
    }

    #[test]
    fn test_passes_run_in_order() {
        let mut manager = PassManager::new();
        manager.add_pass(AppendBarrier).add_pass(AppendBarrier);
        assert_eq!(manager.len(), 2);

        let mut circuit = one_qubit_circuit();
        let mut properties = PropertySet::new();
        manager.run(&mut circuit, &mut properties).unwrap();
        assert_eq!(circuit.num_ops(), 2);
    }

    #[test]
    fn test_should_run_skips_pass() {
        let mut manager = PassManager::new();
        manager.add_pass(NeverRuns);

        let mut circuit = one_qubit_circuit();
        let mut properties = PropertySet::new();
        manager.run(&mut circuit, &mut properties).unwrap();
        assert_eq!(circuit.num_ops(), 0);
    }
}
