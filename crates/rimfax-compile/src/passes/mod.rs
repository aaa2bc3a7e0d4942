//! Built-in compilation passes.

pub mod translation;

pub use translation::BasisTranslation;
