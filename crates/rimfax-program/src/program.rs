//! Top-level program facade.
//!
//! A [`QuantumProgram`] owns named registers and circuits and ties the
//! workflow together: create registers, build circuits over them, export
//! OpenQASM, and compile for a backend. It carries its own backend
//! registry (preloaded with the local simulators) and, optionally, API
//! credentials for remote targets.

use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;
use tracing::{debug, info, instrument};

use crate::config::ApiConfig;
use crate::error::{ProgramError, ProgramResult};
use crate::specs::ProgramSpecs;
use rimfax_backends::{BackendRegistry, Capabilities};
use rimfax_compile::{assemble, BasisGates, CompileOptions, CouplingMap, Qobj};
use rimfax_ir::{Circuit, ClassicalRegister, QuantumRegister};

/// Container for registers, circuits, and backend state.
///
/// # Example
///
/// ```
/// use rimfax_program::QuantumProgram;
///
/// let mut qp = QuantumProgram::new();
/// let qr = qp.create_quantum_register("qr", 2).unwrap();
/// let cr = qp.create_classical_register("cr", 2).unwrap();
///
/// let circuit = qp.create_circuit("bell", &[&qr], &[&cr]).unwrap();
/// circuit.h(&qr[0]).unwrap();
/// circuit.cx(&qr[0], &qr[1]).unwrap();
/// circuit.measure(&qr[0], &cr[0]).unwrap();
/// circuit.measure(&qr[1], &cr[1]).unwrap();
///
/// let qasm = qp.get_qasm("bell").unwrap();
/// assert!(qasm.contains("cx qr[0],qr[1];"));
///
/// let qobj = qp.compile(&["bell"], "local_qasm_simulator").unwrap();
/// assert_eq!(qobj.experiments.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct QuantumProgram {
    quantum_registers: FxHashMap<String, QuantumRegister>,
    classical_registers: FxHashMap<String, ClassicalRegister>,
    circuits: FxHashMap<String, Circuit>,
    registry: BackendRegistry,
    api_config: Option<ApiConfig>,
}

impl QuantumProgram {
    /// Create an empty program with the local simulators registered.
    pub fn new() -> Self {
        Self {
            quantum_registers: FxHashMap::default(),
            classical_registers: FxHashMap::default(),
            circuits: FxHashMap::default(),
            registry: BackendRegistry::with_local_backends(),
            api_config: None,
        }
    }

    /// Create a program from a declarative description.
    ///
    /// Registers named by multiple circuits are created once and shared.
    pub fn from_specs(specs: &ProgramSpecs) -> ProgramResult<Self> {
        let mut program = Self::new();
        for circuit_spec in &specs.circuits {
            let mut qregs = Vec::with_capacity(circuit_spec.quantum_registers.len());
            for reg in &circuit_spec.quantum_registers {
                qregs.push(program.create_quantum_register(&reg.name, reg.size)?);
            }
            let mut cregs = Vec::with_capacity(circuit_spec.classical_registers.len());
            for reg in &circuit_spec.classical_registers {
                cregs.push(program.create_classical_register(&reg.name, reg.size)?);
            }

            let qreg_refs: Vec<&QuantumRegister> = qregs.iter().collect();
            let creg_refs: Vec<&ClassicalRegister> = cregs.iter().collect();
            program.create_circuit(&circuit_spec.name, &qreg_refs, &creg_refs)?;
        }
        Ok(program)
    }

    /// Create (or fetch) a quantum register.
    ///
    /// Asking again for an existing name with the same size returns the
    /// existing register; a size mismatch is an error.
    pub fn create_quantum_register(
        &mut self,
        name: &str,
        size: u32,
    ) -> ProgramResult<QuantumRegister> {
        if let Some(existing) = self.quantum_registers.get(name) {
            if existing.size() == size {
                debug!(name, "reusing existing quantum register");
                return Ok(existing.clone());
            }
            return Err(ProgramError::RegisterSizeMismatch {
                name: name.to_string(),
                existing: existing.size(),
                requested: size,
            });
        }

        let register = QuantumRegister::new(name, size);
        info!(name, size, "created quantum register");
        self.quantum_registers
            .insert(name.to_string(), register.clone());
        Ok(register)
    }

    /// Create (or fetch) a classical register.
    pub fn create_classical_register(
        &mut self,
        name: &str,
        size: u32,
    ) -> ProgramResult<ClassicalRegister> {
        if let Some(existing) = self.classical_registers.get(name) {
            if existing.size() == size {
                debug!(name, "reusing existing classical register");
                return Ok(existing.clone());
            }
            return Err(ProgramError::RegisterSizeMismatch {
                name: name.to_string(),
                existing: existing.size(),
                requested: size,
            });
        }

        let register = ClassicalRegister::new(name, size);
        info!(name, size, "created classical register");
        self.classical_registers
            .insert(name.to_string(), register.clone());
        Ok(register)
    }

    /// Fetch a previously created quantum register.
    pub fn get_quantum_register(&self, name: &str) -> ProgramResult<&QuantumRegister> {
        self.quantum_registers
            .get(name)
            .ok_or_else(|| ProgramError::RegisterNotFound(name.to_string()))
    }

    /// Fetch a previously created classical register.
    pub fn get_classical_register(&self, name: &str) -> ProgramResult<&ClassicalRegister> {
        self.classical_registers
            .get(name)
            .ok_or_else(|| ProgramError::RegisterNotFound(name.to_string()))
    }

    /// Create a circuit over the given registers.
    ///
    /// Returns a mutable reference so gates can be appended immediately.
    pub fn create_circuit(
        &mut self,
        name: &str,
        quantum_registers: &[&QuantumRegister],
        classical_registers: &[&ClassicalRegister],
    ) -> ProgramResult<&mut Circuit> {
        match self.circuits.entry(name.to_string()) {
            Entry::Occupied(_) => Err(ProgramError::DuplicateCircuit(name.to_string())),
            Entry::Vacant(slot) => {
                let mut circuit = Circuit::new(name);
                for register in quantum_registers {
                    circuit.add_quantum_register(register)?;
                }
                for register in classical_registers {
                    circuit.add_classical_register(register)?;
                }
                info!(name, "created circuit");
                Ok(slot.insert(circuit))
            }
        }
    }

    /// Fetch a circuit by name.
    pub fn get_circuit(&self, name: &str) -> ProgramResult<&Circuit> {
        self.circuits
            .get(name)
            .ok_or_else(|| ProgramError::CircuitNotFound(name.to_string()))
    }

    /// Fetch a circuit by name for modification.
    pub fn get_circuit_mut(&mut self, name: &str) -> ProgramResult<&mut Circuit> {
        self.circuits
            .get_mut(name)
            .ok_or_else(|| ProgramError::CircuitNotFound(name.to_string()))
    }

    /// List all circuit names, sorted.
    pub fn circuit_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.circuits.keys().cloned().collect();
        names.sort();
        names
    }

    /// Export a circuit as OpenQASM 2.0 text.
    pub fn get_qasm(&self, name: &str) -> ProgramResult<String> {
        Ok(rimfax_qasm::emit(self.get_circuit(name)?)?)
    }

    /// Export several circuits as OpenQASM 2.0 text, in the given order.
    pub fn get_qasms(&self, names: &[&str]) -> ProgramResult<Vec<String>> {
        names.iter().map(|name| self.get_qasm(name)).collect()
    }

    /// List the backends circuits can be compiled for, sorted.
    pub fn available_backends(&self) -> Vec<String> {
        self.registry.available_backends()
    }

    /// Look up a backend's capabilities.
    pub fn backend_capabilities(&self, name: &str) -> ProgramResult<&Capabilities> {
        Ok(self.registry.get(name)?)
    }

    /// Register an additional backend.
    pub fn register_backend(&mut self, capabilities: Capabilities) {
        self.registry.register(capabilities);
    }

    /// Store API credentials for remote execution.
    pub fn set_api(&mut self, config: ApiConfig) {
        info!(url = %config.url, "api configured");
        self.api_config = Some(config);
    }

    /// The stored API credentials, if any.
    pub fn api_config(&self) -> Option<&ApiConfig> {
        self.api_config.as_ref()
    }

    /// Compile circuits for a backend with default options.
    pub fn compile(&self, names: &[&str], backend: &str) -> ProgramResult<Qobj> {
        self.compile_with(names, CompileOptions::new(backend))
    }

    /// Compile circuits with explicit options.
    ///
    /// The basis and coupling map default to what the backend advertises;
    /// options set by the caller win. Every circuit is checked against the
    /// backend's qubit count before any work happens.
    #[instrument(skip(self, names, options), fields(backend = %options.backend_name))]
    pub fn compile_with(&self, names: &[&str], mut options: CompileOptions) -> ProgramResult<Qobj> {
        let capabilities = self.registry.get(&options.backend_name)?;

        let mut circuits = Vec::with_capacity(names.len());
        for name in names {
            let circuit = self.get_circuit(name)?;
            capabilities.check_width(circuit.num_qubits())?;
            circuits.push(circuit);
        }

        if options.basis_gates.is_none() {
            options.basis_gates = Some(BasisGates::from_csv(&capabilities.basis_gates));
        }
        if options.coupling_map.is_none() {
            if let Some(edges) = &capabilities.coupling_map {
                let mut map = CouplingMap::new(capabilities.num_qubits);
                for &(a, b) in edges {
                    map.add_edge(a, b);
                }
                options.coupling_map = Some(map);
            }
        }

        Ok(assemble(&circuits, &options)?)
    }
}
