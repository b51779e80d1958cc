//! Numeric attributes as delivered by the retrieval layer
//!
//! Upstream services are not strict about numeric encoding: the same field
//! may arrive as a JSON number, a numeric string, or (for malformed
//! records) arbitrary text. `Scalar` keeps the raw form so the field codec
//! can decide, per column, whether the value is representable.

use serde::{Deserialize, Serialize};

/// A numeric attribute in either of its wire forms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// JSON number
    Number(f64),
    /// JSON string, possibly numeric
    Text(String),
}

impl Scalar {
    /// Numeric value, if the scalar is a number or a parseable numeric string
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Number(v) if v.is_finite() => Some(*v),
            Scalar::Number(_) => None,
            Scalar::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        }
    }

    /// Text value, if the scalar is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            Scalar::Number(_) => None,
        }
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Number(v)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}
