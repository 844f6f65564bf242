// src/problem/mod.rs — Convex problem domain types

pub mod canonical;
pub mod validate;

pub use canonical::{canonical_json, spec_hash};
pub use validate::{validate, ValidationError};

use serde::{Deserialize, Serialize};

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sense {
    #[default]
    Minimize,
    Maximize,
}

impl Sense {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sense::Minimize => "minimize",
            Sense::Maximize => "maximize",
        }
    }
}

/// Per-variable `(lower, upper)` bounds. `None` leaves that side open.
pub type VarBounds = (Option<f64>, Option<f64>);

/// A problem as it arrives on the wire, before validation.
///
/// Entries of `c` and `b` are `Option<f64>` because JSON clients can
/// send `null` where a number belongs; `validate` rejects those with
/// the same message as NaN/Inf.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProblemPayload {
    pub c: Vec<Option<f64>>,
    #[serde(rename = "A", default)]
    pub a: Option<Vec<Vec<f64>>>,
    #[serde(default)]
    pub b: Option<Vec<Option<f64>>>,
    #[serde(rename = "Q", default)]
    pub q: Option<Vec<Vec<f64>>>,
    #[serde(default)]
    pub bounds: Option<Vec<VarBounds>>,
    #[serde(default)]
    pub sense: Sense,
}

/// A validated problem: minimize or maximize `0.5·xᵀQx + cᵀx` subject
/// to `Ax ≤ b` and per-variable bounds.
///
/// Instances only exist past [`validate`], so dimensions agree, every
/// entry of `c` and `b` is finite, and optional collections are never
/// empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemSpec {
    pub c: Vec<f64>,
    #[serde(rename = "A", default)]
    pub a: Option<Vec<Vec<f64>>>,
    #[serde(default)]
    pub b: Option<Vec<f64>>,
    #[serde(rename = "Q", default)]
    pub q: Option<Vec<Vec<f64>>>,
    #[serde(default)]
    pub bounds: Option<Vec<VarBounds>>,
    #[serde(default)]
    pub sense: Sense,
}

impl ProblemSpec {
    /// Number of decision variables.
    pub fn num_vars(&self) -> usize {
        self.c.len()
    }

    /// Number of inequality constraint rows.
    pub fn num_constraints(&self) -> usize {
        self.a.as_ref().map_or(0, Vec::len)
    }
}
