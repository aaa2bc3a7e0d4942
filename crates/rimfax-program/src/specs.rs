//! Declarative program specifications.
//!
//! A [`ProgramSpecs`] value describes registers and circuits up front, as
//! an alternative to creating them one call at a time. Specs can be built
//! in code or loaded from a JSON or YAML document.
//!
//! ```
//! use rimfax_program::{CircuitSpec, ProgramSpecs, RegisterSpec};
//!
//! let specs = ProgramSpecs {
//!     circuits: vec![CircuitSpec {
//!         name: "Circuit".into(),
//!         quantum_registers: vec![RegisterSpec::new("qr", 4)],
//!         classical_registers: vec![RegisterSpec::new("cr", 4)],
//!     }],
//! };
//! assert_eq!(specs.circuits[0].quantum_registers[0].size, 4);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ProgramError, ProgramResult};

/// Declarative description of a whole program.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgramSpecs {
    /// Circuits to create, with their registers.
    #[serde(default)]
    pub circuits: Vec<CircuitSpec>,
}

impl ProgramSpecs {
    /// Parse specs from JSON.
    pub fn from_json(json: &str) -> ProgramResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse specs from YAML.
    pub fn from_yaml(yaml: &str) -> ProgramResult<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| ProgramError::InvalidSpecs(e.to_string()))
    }

    /// Load specs from a file, chosen by extension (`.json`, else YAML).
    pub fn from_file(path: impl AsRef<Path>) -> ProgramResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&contents),
            _ => Self::from_yaml(&contents),
        }
    }
}

/// One circuit with the registers it is built over.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircuitSpec {
    /// Name of the circuit.
    pub name: String,
    /// Quantum registers to attach, in order.
    #[serde(default)]
    pub quantum_registers: Vec<RegisterSpec>,
    /// Classical registers to attach, in order.
    #[serde(default)]
    pub classical_registers: Vec<RegisterSpec>,
}

/// A named register size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterSpec {
    /// Register name.
    pub name: String,
    /// Number of bits.
    pub size: u32,
}

impl RegisterSpec {
    /// Create a register spec.
    pub fn new(name: impl Into<String>, size: u32) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specs_from_json() {
        let json = r#"{
            "circuits": [{
                "name": "Circuit",
                "quantum_registers": [{"name": "qr", "size": 4}],
                "classical_registers": [{"name": "cr", "size": 4}]
            }]
        }"#;

        let specs = ProgramSpecs::from_json(json).unwrap();
        assert_eq!(specs.circuits.len(), 1);
        assert_eq!(specs.circuits[0].name, "Circuit");
        assert_eq!(specs.circuits[0].quantum_registers[0].name, "qr");
        assert_eq!(specs.circuits[0].classical_registers[0].size, 4);
    }

    #[test]
    fn test_empty_sections_default() {
        let specs = ProgramSpecs::from_json(r#"{"circuits": [{"name": "bare"}]}"#).unwrap();
        assert!(specs.circuits[0].quantum_registers.is_empty());
        assert!(specs.circuits[0].classical_registers.is_empty());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(ProgramSpecs::from_json("{not json").is_err());
    }

    #[test]
    fn test_specs_from_yaml() {
        let yaml = "\
circuits:
  - name: Circuit
    quantum_registers:
      - name: qr
        size: 4
    classical_registers:
      - name: cr
        size: 4
";
        let specs = ProgramSpecs::from_yaml(yaml).unwrap();
        assert_eq!(specs.circuits[0].name, "Circuit");
        assert_eq!(specs.circuits[0].quantum_registers[0].size, 4);
    }

    #[test]
    fn test_specs_from_file_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("specs.json");
        std::fs::write(&json_path, r#"{"circuits": [{"name": "a"}]}"#).unwrap();
        assert_eq!(ProgramSpecs::from_file(&json_path).unwrap().circuits[0].name, "a");

        let yaml_path = dir.path().join("specs.yaml");
        std::fs::write(&yaml_path, "circuits:\n  - name: b\n").unwrap();
        assert_eq!(ProgramSpecs::from_file(&yaml_path).unwrap().circuits[0].name, "b");

        assert!(matches!(
            ProgramSpecs::from_file(dir.path().join("missing.yaml")),
            Err(ProgramError::Io(_))
        ));
    }
}
