//! Named quantum and classical registers.
//!
//! Registers are how programs address bits: a [`QuantumRegister`] groups
//! qubit slots under a name, a [`ClassicalRegister`] groups classical bit
//! slots used to store measurement outcomes. Indexing a register yields a
//! [`Qubit`] / [`Clbit`] handle (`qr[1]`) that gate methods on
//! [`Circuit`](crate::Circuit) accept. Handles carry no flat wire id; the
//! circuit resolves them when the operation is appended, so the same
//! register value can be shared freely between the program facade and the
//! builder.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// A handle to one qubit slot of a named register.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Qubit {
    /// The name of the register this qubit belongs to.
    pub register: String,
    /// The index within the register.
    pub index: u32,
}

impl Qubit {
    /// Create a handle for `register[index]`.
    pub fn new(register: impl Into<String>, index: u32) -> Self {
        Self {
            register: register.into(),
            index,
        }
    }
}

impl fmt::Display for Qubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.register, self.index)
    }
}

/// A handle to one bit slot of a named classical register.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Clbit {
    /// The name of the register this bit belongs to.
    pub register: String,
    /// The index within the register.
    pub index: u32,
}

impl Clbit {
    /// Create a handle for `register[index]`.
    pub fn new(register: impl Into<String>, index: u32) -> Self {
        Self {
            register: register.into(),
            index,
        }
    }
}

impl fmt::Display for Clbit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.register, self.index)
    }
}

/// A named group of qubit slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantumRegister {
    name: String,
    size: u32,
    /// Precomputed handles so `&qr[1]` works like a slice index.
    bits: Vec<Qubit>,
}

impl QuantumRegister {
    /// Create a register with `size` qubit slots.
    pub fn new(name: impl Into<String>, size: u32) -> Self {
        let name = name.into();
        let bits = (0..size).map(|i| Qubit::new(&name, i)).collect();
        Self { name, size, bits }
    }

    /// The register name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The number of qubit slots.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Get the handle for slot `index`, if in range.
    pub fn bit(&self, index: u32) -> Option<&Qubit> {
        self.bits.get(index as usize)
    }

    /// Iterate over the register's qubit handles in order.
    pub fn bits(&self) -> impl Iterator<Item = &Qubit> {
        self.bits.iter()
    }
}

impl Index<u32> for QuantumRegister {
    type Output = Qubit;

    /// Panics if `index >= size`, like slice indexing. Use
    /// [`bit`](Self::bit) for a checked lookup.
    fn index(&self, index: u32) -> &Qubit {
        &self.bits[index as usize]
    }
}

impl fmt::Display for QuantumRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "qreg {}[{}]", self.name, self.size)
    }
}

/// A named group of classical bit slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassicalRegister {
    name: String,
    size: u32,
    bits: Vec<Clbit>,
}

impl ClassicalRegister {
    /// Create a register with `size` bit slots.
    pub fn new(name: impl Into<String>, size: u32) -> Self {
        let name = name.into();
        let bits = (0..size).map(|i| Clbit::new(&name, i)).collect();
        Self { name, size, bits }
    }

    /// The register name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The number of bit slots.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Get the handle for slot `index`, if in range.
    pub fn bit(&self, index: u32) -> Option<&Clbit> {
        self.bits.get(index as usize)
    }

    /// Iterate over the register's bit handles in order.
    pub fn bits(&self) -> impl Iterator<Item = &Clbit> {
        self.bits.iter()
    }
}

impl Index<u32> for ClassicalRegister {
    type Output = Clbit;

    /// Panics if `index >= size`, like slice indexing. Use
    /// [`bit`](Self::bit) for a checked lookup.
    fn index(&self, index: u32) -> &Clbit {
        &self.bits[index as usize]
    }
}

impl fmt::Display for ClassicalRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "creg {}[{}]", self.name, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_indexing() {
        let qr = QuantumRegister::new("qr", 4);
        assert_eq!(qr.name(), "qr");
        assert_eq!(qr.size(), 4);
        assert_eq!(qr[1], Qubit::new("qr", 1));
        assert_eq!(format!("{}", qr[3]), "qr[3]");
    }

    #[test]
    fn test_register_bit_checked() {
        let cr = ClassicalRegister::new("cr", 2);
        assert!(cr.bit(1).is_some());
        assert!(cr.bit(2).is_none());
    }

    #[test]
    fn test_register_bits_iterator() {
        let qr = QuantumRegister::new("a", 3);
        let indices: Vec<u32> = qr.bits().map(|q| q.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_register_display() {
        let qr = QuantumRegister::new("qr", 2);
        let cr = ClassicalRegister::new("cr", 2);
        assert_eq!(format!("{qr}"), "qreg qr[2]");
        assert_eq!(format!("{cr}"), "creg cr[2]");
    }
}
