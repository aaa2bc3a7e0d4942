//! Shared properties for compilation passes.
//!
//! The [`PropertySet`] carries target information through the pass pipeline:
//! which gates the backend executes natively ([`BasisGates`]) and, for
//! devices with restricted connectivity, which qubit pairs may interact
//! ([`CouplingMap`]). Local simulators have no connectivity restriction, so
//! the coupling map is optional throughout.
//!
//! # Examples
//!
//! ```
//! use rimfax_compile::{BasisGates, PropertySet};
//!
//! let props = PropertySet::new().with_basis(BasisGates::simulator());
//!
//! let basis = props.basis_gates.as_ref().unwrap();
//! assert!(basis.contains("u3"));
//! assert!(!basis.contains("ccx"));
//! ```

use serde::{Deserialize, Serialize};

/// Gate names a target executes natively.
///
/// Everything outside the basis is rewritten by the translation pass.
/// Measurements, resets, and barriers are not gates and never appear here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasisGates {
    gates: Vec<String>,
}

impl BasisGates {
    /// Create a basis from an iterator of gate names.
    pub fn new(gates: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            gates: gates.into_iter().map(std::convert::Into::into).collect(),
        }
    }

    /// Parse a comma-separated basis string such as `"u1,u2,u3,cx"`.
    ///
    /// Whitespace around names is trimmed and empty segments are skipped.
    pub fn from_csv(spec: &str) -> Self {
        Self::new(
            spec.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty()),
        )
    }

    /// Render the basis as a comma-separated string.
    pub fn to_csv(&self) -> String {
        self.gates.join(",")
    }

    /// Check if a gate is in the basis.
    ///
    /// Linear search; basis sets are small.
    pub fn contains(&self, gate: &str) -> bool {
        self.gates.iter().any(|g| g == gate)
    }

    /// Get the basis gate names.
    pub fn gates(&self) -> &[String] {
        &self.gates
    }

    /// The basis the bundled simulators accept.
    pub fn simulator() -> Self {
        Self::new(["u1", "u2", "u3", "cx", "id"])
    }

    /// Every gate with a standard-library definition. Nothing translates
    /// against this basis.
    pub fn qelib() -> Self {
        Self::new([
            "id", "x", "y", "z", "h", "s", "sdg", "t", "tdg", "rx", "ry", "rz", "u1", "u2", "u3",
            "cx", "cy", "cz", "ch", "swap", "ccx",
        ])
    }
}

impl Default for BasisGates {
    fn default() -> Self {
        Self::simulator()
    }
}

/// Allowed two-qubit interactions on a target device.
///
/// Edges are bidirectional. An absent coupling map means all-to-all
/// connectivity, which is what the local simulators provide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouplingMap {
    edges: Vec<(u32, u32)>,
    num_qubits: u32,
}

impl CouplingMap {
    /// Create an empty coupling map over `num_qubits` qubits.
    pub fn new(num_qubits: u32) -> Self {
        Self {
            edges: vec![],
            num_qubits,
        }
    }

    /// Add an edge between two qubits.
    ///
    /// Duplicate edges (including reversed pairs) are silently ignored.
    pub fn add_edge(&mut self, q1: u32, q2: u32) {
        if self
            .edges
            .iter()
            .any(|&(a, b)| (a == q1 && b == q2) || (a == q2 && b == q1))
        {
            return;
        }
        self.edges.push((q1, q2));
    }

    /// Check if two qubits are directly connected.
    pub fn is_connected(&self, q1: u32, q2: u32) -> bool {
        self.edges
            .iter()
            .any(|&(a, b)| (a == q1 && b == q2) || (a == q2 && b == q1))
    }

    /// Get the coupling edges.
    pub fn edges(&self) -> &[(u32, u32)] {
        &self.edges
    }

    /// Get the number of physical qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Create a linear coupling map (0-1-2-3-...).
    pub fn linear(n: u32) -> Self {
        let mut map = Self::new(n);
        for i in 0..n.saturating_sub(1) {
            map.add_edge(i, i + 1);
        }
        map
    }

    /// Create a fully connected coupling map.
    pub fn full(n: u32) -> Self {
        let mut map = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                map.add_edge(i, j);
            }
        }
        map
    }
}

/// Properties shared between compilation passes.
///
/// Passes read target information from here and may record findings for
/// later passes. Both fields start out unset; [`with_basis`](Self::with_basis)
/// and [`with_coupling`](Self::with_coupling) fill them in builder style.
#[derive(Debug, Clone, Default)]
pub struct PropertySet {
    /// Target basis for gate translation.
    pub basis_gates: Option<BasisGates>,

    /// Target connectivity, if the device restricts it.
    pub coupling_map: Option<CouplingMap>,
}

impl PropertySet {
    /// Create a new empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target basis.
    #[must_use]
    pub fn with_basis(mut self, basis_gates: BasisGates) -> Self {
        self.basis_gates = Some(basis_gates);
        self
    }

    /// Set the target coupling map.
    #[must_use]
    pub fn with_coupling(mut self, coupling_map: CouplingMap) -> Self {
        self.coupling_map = Some(coupling_map);
        self
    }
}
