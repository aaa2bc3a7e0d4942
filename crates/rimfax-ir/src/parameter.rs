//! Gate angle parameters.
//!
//! Angles are either plain radian values or exact rational multiples of π.
//! The π form survives basis translation, so a Hadamard rewritten to
//! `u2(0, pi)` still prints `pi` rather than `3.141592653589793`.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// A concrete gate angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ParameterExpression {
    /// A literal angle in radians.
    Constant(f64),
    /// The exact value `num * π / den`, kept in this form for printing.
    PiRatio {
        /// Numerator, may be negative.
        num: i64,
        /// Denominator, always positive after normalization.
        den: i64,
    },
}

impl ParameterExpression {
    /// Create a literal angle.
    pub fn constant(value: f64) -> Self {
        ParameterExpression::Constant(value)
    }

    /// The angle zero.
    pub fn zero() -> Self {
        ParameterExpression::Constant(0.0)
    }

    /// The constant π.
    pub fn pi() -> Self {
        ParameterExpression::PiRatio { num: 1, den: 1 }
    }

    /// Create `num * π / den`, reduced to lowest terms.
    ///
    /// Panics if `den == 0`. A zero numerator collapses to the literal `0`.
    pub fn pi_ratio(num: i64, den: i64) -> Self {
        assert!(den != 0, "pi_ratio denominator must be nonzero");
        if num == 0 {
            return ParameterExpression::zero();
        }
        let sign = if (num < 0) != (den < 0) { -1 } else { 1 };
        let (num, den) = (num.abs(), den.abs());
        let g = gcd(num, den);
        ParameterExpression::PiRatio {
            num: sign * (num / g),
            den: den / g,
        }
    }

    /// Evaluate to a radian value.
    pub fn as_f64(&self) -> f64 {
        match self {
            ParameterExpression::Constant(v) => *v,
            ParameterExpression::PiRatio { num, den } => *num as f64 * PI / *den as f64,
        }
    }

    /// Check whether this angle is exactly zero.
    pub fn is_zero(&self) -> bool {
        matches!(self, ParameterExpression::Constant(v) if *v == 0.0)
    }
}

fn gcd(a: i64, b: i64) -> i64 {
    if b == 0 { a } else { gcd(b, a % b) }
}

impl fmt::Display for ParameterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterExpression::Constant(v) => write!(f, "{v}"),
            ParameterExpression::PiRatio { num: 1, den: 1 } => write!(f, "pi"),
            ParameterExpression::PiRatio { num: -1, den: 1 } => write!(f, "-pi"),
            ParameterExpression::PiRatio { num: 1, den } => write!(f, "pi/{den}"),
            ParameterExpression::PiRatio { num: -1, den } => write!(f, "-pi/{den}"),
            ParameterExpression::PiRatio { num, den: 1 } => write!(f, "{num}*pi"),
            ParameterExpression::PiRatio { num, den } => write!(f, "{num}*pi/{den}"),
        }
    }
}

impl From<f64> for ParameterExpression {
    fn from(value: f64) -> Self {
        ParameterExpression::Constant(value)
    }
}

impl std::ops::Neg for ParameterExpression {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            ParameterExpression::Constant(v) => ParameterExpression::Constant(-v),
            ParameterExpression::PiRatio { num, den } => {
                ParameterExpression::PiRatio { num: -num, den }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant() {
        let p = ParameterExpression::constant(0.3);
        assert_eq!(p.as_f64(), 0.3);
        assert_eq!(format!("{p}"), "0.3");
    }

    #[test]
    fn test_pi_ratio_reduces() {
        let p = ParameterExpression::pi_ratio(2, 4);
        assert_eq!(p, ParameterExpression::PiRatio { num: 1, den: 2 });
        assert!((p.as_f64() - PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_pi_ratio_zero_collapses() {
        assert!(ParameterExpression::pi_ratio(0, 3).is_zero());
    }

    #[test]
    fn test_display_forms() {
        assert_eq!(format!("{}", ParameterExpression::pi()), "pi");
        assert_eq!(format!("{}", ParameterExpression::pi_ratio(-1, 2)), "-pi/2");
        assert_eq!(format!("{}", ParameterExpression::pi_ratio(3, 4)), "3*pi/4");
        assert_eq!(format!("{}", ParameterExpression::pi_ratio(2, 1)), "2*pi");
    }

    #[test]
    fn test_neg() {
        let p = -ParameterExpression::pi_ratio(1, 2);
        assert_eq!(p, ParameterExpression::PiRatio { num: -1, den: 2 });
        assert_eq!((-ParameterExpression::constant(0.2)).as_f64(), -0.2);
    }

    #[test]
    fn test_sign_normalization() {
        let p = ParameterExpression::pi_ratio(1, -2);
        assert_eq!(p, ParameterExpression::PiRatio { num: -1, den: 2 });
    }
}
