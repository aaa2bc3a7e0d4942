//! Backend registry for name-based lookup.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::capability::Capabilities;
use crate::error::{BackendError, BackendResult};

/// Central catalog of known backends.
///
/// The default registry carries the bundled local simulators;
/// [`register`](Self::register) adds or replaces entries.
pub struct BackendRegistry {
    backends: FxHashMap<String, Capabilities>,
}

impl BackendRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            backends: FxHashMap::default(),
        }
    }

    /// Create a registry preloaded with the bundled local simulators.
    pub fn with_local_backends() -> Self {
        let mut registry = Self::new();
        registry.register(Capabilities::qasm_simulator());
        registry.register(Capabilities::unitary_simulator());
        registry
    }

    /// Register a backend, replacing any previous entry with the same name.
    pub fn register(&mut self, capabilities: Capabilities) {
        debug!(backend = %capabilities.name, "registering backend");
        self.backends
            .insert(capabilities.name.clone(), capabilities);
    }

    /// Look up a backend by name.
    pub fn get(&self, name: &str) -> BackendResult<&Capabilities> {
        self.backends
            .get(name)
            .ok_or_else(|| BackendError::Unavailable(name.to_string()))
    }

    /// List all registered backend names, sorted.
    pub fn available_backends(&self) -> Vec<String> {
        let mut names: Vec<_> = self.backends.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if a backend is registered.
    pub fn has_backend(&self, name: &str) -> bool {
        self.backends.contains_key(name)
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::with_local_backends()
    }
}

impl std::fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendRegistry")
            .field("backends", &self.available_backends())
            .finish()
    }
}
