//! Compilation pass infrastructure.
//!
//! A [`Pass`] is a single unit of work in the compilation pipeline. Passes
//! read and write a shared [`PropertySet`] so that earlier passes can hand
//! results (a chosen basis, a coupling constraint) to later ones.

use crate::error::CompileResult;
use crate::property::PropertySet;
use rimfax_ir::Circuit;

/// The kind of a compilation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    /// Inspects the circuit and records findings in the property set.
    Analysis,
    /// Rewrites the circuit.
    Transformation,
}

/// A single compilation pass.
///
/// Passes receive the circuit by mutable reference and are free to rebuild
/// it wholesale, as long as register names and bit order are preserved.
pub trait Pass: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Whether this pass analyzes or transforms the circuit.
    fn kind(&self) -> PassKind;

    /// Execute the pass.
    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()>;

    /// Whether the pass should run given the current properties.
    ///
    /// Returning `false` skips the pass without error.
    fn should_run(&self, _properties: &PropertySet) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingPass;

    impl Pass for CountingPass {
        fn name(&self) -> &str {
            "counting"
        }

        fn kind(&self) -> PassKind {
            PassKind::Analysis
        }

        fn run(&self, _circuit: &mut Circuit, _properties: &mut PropertySet) -> CompileResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_pass_defaults() {
        let pass = CountingPass;
        assert_eq!(pass.name(), "counting");
        assert_eq!(pass.kind(), PassKind::Analysis);
        assert!(pass.should_run(&PropertySet::new()));
    }
}
