//! Backend capability descriptions.
//!
//! A [`Capabilities`] value describes what a backend can execute: how many
//! qubits it has, which gates it accepts, and whether two-qubit gates are
//! restricted to particular pairs. Compilation reads the basis from here;
//! validation checks circuits against the limits before assembly.

use serde::{Deserialize, Serialize};

use crate::error::{BackendError, BackendResult};

/// Description of a single backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the backend.
    pub name: String,
    /// One-line human description.
    pub description: String,
    /// Number of qubits available.
    pub num_qubits: u32,
    /// Gates the backend accepts, comma-separated (`"u1,u2,u3,cx,id"`).
    pub basis_gates: String,
    /// Allowed two-qubit pairs. `None` means all-to-all connectivity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupling_map: Option<Vec<(u32, u32)>>,
    /// Maximum number of shots per run.
    pub max_shots: u64,
    /// Whether this is a simulator rather than real hardware.
    pub is_simulator: bool,
}

impl Capabilities {
    /// The bundled shot-based simulator.
    pub fn qasm_simulator() -> Self {
        Self {
            name: "local_qasm_simulator".into(),
            description: "Shot-based OpenQASM simulator running in-process".into(),
            num_qubits: 24,
            basis_gates: "u1,u2,u3,cx,id".into(),
            coupling_map: None,
            max_shots: 100_000,
            is_simulator: true,
        }
    }

    /// The bundled unitary-matrix simulator.
    ///
    /// Evaluates the circuit unitary exactly, so shots do not apply and the
    /// qubit limit is lower (the matrix grows as `4^n`).
    pub fn unitary_simulator() -> Self {
        Self {
            name: "local_unitary_simulator".into(),
            description: "Unitary-matrix simulator running in-process".into(),
            num_qubits: 12,
            basis_gates: "u1,u2,u3,cx,id".into(),
            coupling_map: None,
            max_shots: 1,
            is_simulator: true,
        }
    }

    /// Iterate the basis gate names.
    pub fn basis_gate_names(&self) -> impl Iterator<Item = &str> {
        self.basis_gates
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Check that a circuit of the given width fits on this backend.
    pub fn check_width(&self, num_qubits: usize) -> BackendResult<()> {
        if num_qubits > self.num_qubits as usize {
            return Err(BackendError::TooWide {
                backend: self.name.clone(),
                needed: num_qubits,
                available: self.num_qubits,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qasm_simulator_capabilities() {
        let caps = Capabilities::qasm_simulator();
        assert_eq!(caps.name, "local_qasm_simulator");
        assert!(caps.is_simulator);
        assert!(caps.coupling_map.is_none());

        let gates: Vec<&str> = caps.basis_gate_names().collect();
        assert_eq!(gates, ["u1", "u2", "u3", "cx", "id"]);
    }

    #[test]
    fn test_check_width() {
        let caps = Capabilities::unitary_simulator();
        assert!(caps.check_width(12).is_ok());

        let err = caps.check_width(13).unwrap_err();
        assert!(matches!(
            err,
            BackendError::TooWide {
                needed: 13,
                available: 12,
                ..
            }
        ));
    }

    #[test]
    fn test_capabilities_serialize() {
        let caps = Capabilities::qasm_simulator();
        let value = serde_json::to_value(&caps).unwrap();
        assert_eq!(value["name"], "local_qasm_simulator");
        assert_eq!(value["basis_gates"], "u1,u2,u3,cx,id");
        // All-to-all connectivity omits the coupling_map key entirely.
        assert!(value.get("coupling_map").is_none());
    }
}
