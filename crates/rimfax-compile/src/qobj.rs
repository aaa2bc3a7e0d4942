//! Qobj assembly.
//!
//! A qobj is the self-contained payload handed to a backend for
//! execution: run parameters, the compiled instruction stream of each
//! circuit, and the equivalent OpenQASM text. [`assemble`] produces one
//! from a batch of circuits by running the compilation pipeline and
//! serializing the result.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::CompileResult;
use crate::manager::PassManager;
use crate::passes::BasisTranslation;
use crate::property::{BasisGates, CouplingMap, PropertySet};
use rimfax_ir::{Circuit, Instruction};

/// Default number of shots per experiment.
pub const DEFAULT_SHOTS: u64 = 1024;

/// Default maximum credits to spend on a remote run.
pub const DEFAULT_MAX_CREDITS: u32 = 3;

/// Options controlling compilation and assembly.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Name of the backend the qobj is destined for.
    pub backend_name: String,
    /// Target basis. Defaults to the simulator basis when unset.
    pub basis_gates: Option<BasisGates>,
    /// Target connectivity. Unset means all-to-all.
    pub coupling_map: Option<CouplingMap>,
    /// Number of shots per experiment.
    pub shots: u64,
    /// Maximum credits to spend on a remote run.
    pub max_credits: u32,
    /// Simulator seed. A fresh one is drawn per experiment when unset.
    pub seed: Option<u64>,
}

impl CompileOptions {
    /// Create options for a backend with default run parameters.
    pub fn new(backend_name: impl Into<String>) -> Self {
        Self {
            backend_name: backend_name.into(),
            basis_gates: None,
            coupling_map: None,
            shots: DEFAULT_SHOTS,
            max_credits: DEFAULT_MAX_CREDITS,
            seed: None,
        }
    }

    /// Override the target basis.
    #[must_use]
    pub fn with_basis(mut self, basis_gates: BasisGates) -> Self {
        self.basis_gates = Some(basis_gates);
        self
    }

    /// Restrict two-qubit gates to a coupling map.
    #[must_use]
    pub fn with_coupling(mut self, coupling_map: CouplingMap) -> Self {
        self.coupling_map = Some(coupling_map);
        self
    }

    /// Set the number of shots.
    #[must_use]
    pub fn with_shots(mut self, shots: u64) -> Self {
        self.shots = shots;
        self
    }

    /// Pin the simulator seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// A compiled batch of experiments ready for a backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Qobj {
    /// Unique identifier for this batch.
    pub id: String,
    /// Run parameters shared by all experiments.
    pub config: QobjConfig,
    /// One entry per compiled circuit.
    pub experiments: Vec<Experiment>,
}

/// Run parameters shared by all experiments in a qobj.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QobjConfig {
    /// Number of shots per experiment.
    pub shots: u64,
    /// Maximum credits to spend on a remote run.
    pub max_credits: u32,
    /// Name of the target backend.
    pub backend_name: String,
}

/// One compiled circuit within a qobj.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experiment {
    /// Circuit name.
    pub name: String,
    /// Per-experiment compilation record.
    pub config: ExperimentConfig,
    /// Compiled instruction stream in execution order.
    pub instructions: Vec<QobjInstruction>,
    /// The compiled circuit as OpenQASM 2.0 text.
    pub qasm: String,
}

/// Compilation record for one experiment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Basis the circuit was translated into, comma-separated.
    pub basis_gates: String,
    /// Coupling edges the compilation honored, if any.
    pub coupling_map: Option<Vec<(u32, u32)>>,
    /// Seed for the simulator's random number generator.
    pub seed: u64,
}

/// A single instruction in wire-id form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QobjInstruction {
    /// Operation name (`u3`, `cx`, `measure`, ...).
    pub name: String,
    /// Gate parameters as plain floats.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<f64>,
    /// Qubit wire ids the operation acts on.
    pub qubits: Vec<u32>,
    /// Classical wire ids written by the operation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub memory: Vec<u32>,
    /// Classical condition guarding the operation, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional: Option<QobjCondition>,
}

/// Classical equality condition in qobj form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QobjCondition {
    /// Name of the classical register compared.
    pub register: String,
    /// Value the register must equal.
    pub value: u64,
}

/// Compile a batch of circuits into a qobj.
///
/// Each circuit is translated into the target basis, emitted as OpenQASM,
/// and recorded as one experiment. The input circuits are not modified.
#[instrument(skip(circuits, options), fields(circuits = circuits.len(), backend = %options.backend_name))]
pub fn assemble(circuits: &[&Circuit], options: &CompileOptions) -> CompileResult<Qobj> {
    let basis = options.basis_gates.clone().unwrap_or_default();

    let mut pipeline = PassManager::new();
    pipeline.add_pass(BasisTranslation);

    let mut experiments = Vec::with_capacity(circuits.len());
    for circuit in circuits {
        let mut compiled = (*circuit).clone();
        let mut properties = PropertySet::new().with_basis(basis.clone());
        if let Some(map) = &options.coupling_map {
            properties.coupling_map = Some(map.clone());
        }
        pipeline.run(&mut compiled, &mut properties)?;

        let qasm = rimfax_qasm::emit(&compiled)?;
        let instructions = compiled.instructions().map(to_qobj_instruction).collect();
        let seed = options.seed.unwrap_or_else(rand::random);

        experiments.push(Experiment {
            name: compiled.name().to_string(),
            config: ExperimentConfig {
                basis_gates: basis.to_csv(),
                coupling_map: options.coupling_map.as_ref().map(|m| m.edges().to_vec()),
                seed,
            },
            instructions,
            qasm,
        });
    }

    let qobj = Qobj {
        id: Uuid::new_v4().to_string(),
        config: QobjConfig {
            shots: options.shots,
            max_credits: options.max_credits,
            backend_name: options.backend_name.clone(),
        },
        experiments,
    };
    info!(id = %qobj.id, experiments = qobj.experiments.len(), "assembled qobj");
    Ok(qobj)
}

fn to_qobj_instruction(instruction: &Instruction) -> QobjInstruction {
    let (params, conditional) = match instruction.as_gate() {
        Some(gate) => (
            gate.gate.parameters().iter().map(|p| p.as_f64()).collect(),
            gate.condition.as_ref().map(|c| QobjCondition {
                register: c.register.clone(),
                value: c.value,
            }),
        ),
        None => (vec![], None),
    };
    QobjInstruction {
        name: instruction.name().to_string(),
        params,
        qubits: instruction.qubits.iter().map(|q| q.0).collect(),
        memory: instruction.clbits.iter().map(|c| c.0).collect(),
        conditional,
    }
}
