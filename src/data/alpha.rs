//! The rank-turbulence divergence parameter.

use crate::error::{AllotaxError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Smallest positive finite alpha. Below it `r^-alpha` rounds to 1 and the
/// finite formula loses all precision; such values are treated as the
/// `alpha = 0` limit.
pub const MIN_POSITIVE_ALPHA: f64 = 1e-9;

/// Tuning parameter of rank-turbulence divergence.
///
/// Small values weight the tail of the rank distributions, large values the
/// head. `Infinite` compares only which system ranks a type higher.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AlphaRepr", into = "AlphaRepr")]
pub enum Alpha {
    /// A finite, non-negative alpha.
    Finite(f64),
    /// The alpha -> infinity limit.
    Infinite,
}

impl Alpha {
    /// Validate and wrap a raw value. `f64::INFINITY` maps to `Infinite`.
    pub fn new(value: f64) -> Result<Self> {
        if value.is_nan() || value < 0.0 {
            return Err(AllotaxError::InvalidParameter(format!(
                "alpha must be a non-negative number or infinity, got {}",
                value
            )));
        }
        if value > 0.0 && value < MIN_POSITIVE_ALPHA {
            return Err(AllotaxError::InvalidParameter(format!(
                "alpha must be 0 or at least {:e}, got {:e}",
                MIN_POSITIVE_ALPHA, value
            )));
        }
        if value.is_infinite() {
            Ok(Self::Infinite)
        } else {
            Ok(Self::Finite(value))
        }
    }

    /// The numeric value, `f64::INFINITY` for the infinite limit.
    pub fn value(&self) -> f64 {
        match self {
            Self::Finite(a) => *a,
            Self::Infinite => f64::INFINITY,
        }
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, Self::Infinite)
    }

    /// True for zero and for finite values too small to evaluate directly.
    pub fn is_zero_limit(&self) -> bool {
        matches!(self, Self::Finite(a) if *a < MIN_POSITIVE_ALPHA)
    }
}

impl Default for Alpha {
    fn default() -> Self {
        Self::Finite(1.0 / 3.0)
    }
}

impl fmt::Display for Alpha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(a) => write!(f, "{}", a),
            Self::Infinite => write!(f, "inf"),
        }
    }
}

impl FromStr for Alpha {
    type Err = AllotaxError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "inf" | "infinity" | "+inf" => Ok(Self::Infinite),
            _ => {
                let value: f64 = trimmed.parse().map_err(|_| {
                    AllotaxError::InvalidParameter(format!("cannot parse alpha '{}'", s))
                })?;
                Self::new(value)
            }
        }
    }
}

/// Wire form: JSON has no infinity literal, so the limit travels as a string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum AlphaRepr {
    Number(f64),
    Text(String),
}

impl TryFrom<AlphaRepr> for Alpha {
    type Error = AllotaxError;

    fn try_from(repr: AlphaRepr) -> Result<Self> {
        match repr {
            AlphaRepr::Number(value) => Alpha::new(value),
            AlphaRepr::Text(text) => text.parse(),
        }
    }
}

impl From<Alpha> for AlphaRepr {
    fn from(alpha: Alpha) -> Self {
        match alpha {
            Alpha::Finite(a) => AlphaRepr::Number(a),
            Alpha::Infinite => AlphaRepr::Text("inf".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_alpha() {
        assert_eq!("0.17".parse::<Alpha>().unwrap(), Alpha::Finite(0.17));
        assert_eq!("inf".parse::<Alpha>().unwrap(), Alpha::Infinite);
        assert_eq!("Infinity".parse::<Alpha>().unwrap(), Alpha::Infinite);
        assert!("-1".parse::<Alpha>().is_err());
        assert!("abc".parse::<Alpha>().is_err());
    }

    #[test]
    fn test_alpha_json() {
        let finite: Alpha = serde_json::from_str("0.5").unwrap();
        assert_eq!(finite, Alpha::Finite(0.5));

        let infinite: Alpha = serde_json::from_str("\"inf\"").unwrap();
        assert!(infinite.is_infinite());
        assert_eq!(serde_json::to_string(&infinite).unwrap(), "\"inf\"");

        assert!(serde_json::from_str::<Alpha>("-0.5").is_err());
    }

    #[test]
    fn test_tiny_alpha_rejected() {
        assert!(Alpha::new(1e-320).is_err());
        assert!("1e-12".parse::<Alpha>().is_err());
        assert!(serde_json::from_str::<Alpha>("1e-300").is_err());
        assert_eq!(Alpha::new(0.0).unwrap(), Alpha::Finite(0.0));
        assert_eq!(Alpha::new(MIN_POSITIVE_ALPHA).unwrap(), Alpha::Finite(1e-9));

        assert!(Alpha::Finite(0.0).is_zero_limit());
        assert!(Alpha::Finite(1e-320).is_zero_limit());
        assert!(!Alpha::Finite(0.17).is_zero_limit());
        assert!(!Alpha::Infinite.is_zero_limit());
    }
}
