// src/solver/mod.rs — Solve backend abstraction

pub mod command;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::problem::ProblemSpec;

/// Terminal status reported by a solve backend. Statuses outside the
/// known set fold to `Unknown`; the orchestrator treats those as
/// failures rather than inventing a meaning for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverStatus {
    Optimal,
    Infeasible,
    Unbounded,
    SolverError,
    #[serde(other)]
    Unknown,
}

impl SolverStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SolverStatus::Optimal => "optimal",
            SolverStatus::Infeasible => "infeasible",
            SolverStatus::Unbounded => "unbounded",
            SolverStatus::SolverError => "solver_error",
            SolverStatus::Unknown => "unknown",
        }
    }
}

/// Raw result from a backend, before sanitization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverOutput {
    pub status: SolverStatus,
    #[serde(default)]
    pub objective_value: Option<f64>,
    #[serde(default)]
    pub solution: Option<Vec<f64>>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Error)]
pub enum SolverError {
    #[error("failed to launch solver '{command}': {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },
    #[error("solver exited with {code}: {stderr}")]
    Failed { code: String, stderr: String },
    #[error("solver wire format: {0}")]
    Json(#[from] serde_json::Error),
    #[error("solver io: {0}")]
    Io(#[from] std::io::Error),
}

/// A solve backend. Calls may block for a long time and are never
/// cancelled mid-flight; the caller owns the time budget and runs this
/// off the async runtime.
pub trait ConvexSolver: Send + Sync {
    fn solve(&self, spec: &ProblemSpec) -> Result<SolverOutput, SolverError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&SolverStatus::SolverError).unwrap(),
            "\"solver_error\""
        );
        let parsed: SolverStatus = serde_json::from_str("\"infeasible\"").unwrap();
        assert_eq!(parsed, SolverStatus::Infeasible);
    }

    #[test]
    fn test_unrecognized_status_folds_to_unknown() {
        let parsed: SolverStatus = serde_json::from_str("\"optimal_inaccurate\"").unwrap();
        assert_eq!(parsed, SolverStatus::Unknown);
    }

    #[test]
    fn test_output_fields_default_to_none() {
        let out: SolverOutput = serde_json::from_str(r#"{"status":"unbounded"}"#).unwrap();
        assert_eq!(out.status, SolverStatus::Unbounded);
        assert_eq!(out.objective_value, None);
        assert_eq!(out.solution, None);
        assert_eq!(out.message, None);
    }
}
