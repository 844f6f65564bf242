// src/core/sanitize.rs — Non-finite result scrubbing

use serde::{Deserialize, Serialize};

use crate::core::orchestrator::SolveOutcome;
use crate::solver::{SolverOutput, SolverStatus};

/// A solve result in wire-safe form: what gets serialized into HTTP
/// responses and into `solution_json`. JSON has no spelling for NaN or
/// infinity, so every numeric field here is individually nullable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveReport {
    pub status: SolverStatus,
    pub objective_value: Option<f64>,
    pub solution: Option<Vec<Option<f64>>>,
    pub message: Option<String>,
}

impl SolveReport {
    fn from_output(status: SolverStatus, out: SolverOutput) -> Self {
        Self {
            status,
            objective_value: out.objective_value,
            solution: out.solution.map(|xs| xs.into_iter().map(Some).collect()),
            message: out.message,
        }
    }
}

impl SolveOutcome {
    /// Wire form of a terminal outcome. Timeouts have no report: they
    /// surface as an HTTP error and are never persisted.
    pub fn into_report(self) -> Option<SolveReport> {
        match self {
            SolveOutcome::Optimal(out) => {
                Some(SolveReport::from_output(SolverStatus::Optimal, out))
            }
            SolveOutcome::Infeasible(out) => {
                Some(SolveReport::from_output(SolverStatus::Infeasible, out))
            }
            SolveOutcome::Unbounded(out) => {
                Some(SolveReport::from_output(SolverStatus::Unbounded, out))
            }
            SolveOutcome::SolverFailure { reason } => Some(SolveReport {
                status: SolverStatus::SolverError,
                objective_value: None,
                solution: None,
                message: Some(reason),
            }),
            SolveOutcome::TimedOut => None,
        }
    }
}

/// Replace non-finite numeric fields with null, each independently: a
/// NaN in one solution component never erases its finite siblings.
/// Finite values pass through untouched, so applying this twice is the
/// same as applying it once.
pub fn sanitize(report: SolveReport) -> SolveReport {
    SolveReport {
        status: report.status,
        objective_value: report.objective_value.filter(|v| v.is_finite()),
        solution: report
            .solution
            .map(|xs| xs.into_iter().map(|x| x.filter(|v| v.is_finite())).collect()),
        message: report.message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(objective: Option<f64>, solution: Option<Vec<Option<f64>>>) -> SolveReport {
        SolveReport {
            status: SolverStatus::Optimal,
            objective_value: objective,
            solution,
            message: None,
        }
    }

    #[test]
    fn test_finite_values_untouched() {
        let r = report(Some(2.5), Some(vec![Some(1.0), Some(0.0)]));
        assert_eq!(sanitize(r.clone()), r);
    }

    #[test]
    fn test_nan_objective_nulled() {
        let r = sanitize(report(Some(f64::NAN), None));
        assert_eq!(r.objective_value, None);
    }

    #[test]
    fn test_infinite_objective_nulled() {
        assert_eq!(sanitize(report(Some(f64::INFINITY), None)).objective_value, None);
        assert_eq!(
            sanitize(report(Some(f64::NEG_INFINITY), None)).objective_value,
            None
        );
    }

    #[test]
    fn test_nulling_is_field_local() {
        let r = sanitize(report(
            Some(3.0),
            Some(vec![Some(1.0), Some(f64::NAN), Some(2.0)]),
        ));
        assert_eq!(r.objective_value, Some(3.0));
        assert_eq!(r.solution, Some(vec![Some(1.0), None, Some(2.0)]));
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let once = sanitize(report(
            Some(f64::NAN),
            Some(vec![Some(f64::INFINITY), Some(4.0)]),
        ));
        assert_eq!(sanitize(once.clone()), once);
    }

    #[test]
    fn test_report_serializes_nulls() {
        let r = report(None, Some(vec![Some(1.0), None]));
        let json = serde_json::to_string(&r).unwrap();
        assert!(json.contains(r#""objective_value":null"#), "{json}");
        assert!(json.contains(r#""solution":[1.0,null]"#), "{json}");
    }

    #[test]
    fn test_timeout_has_no_report() {
        assert_eq!(SolveOutcome::TimedOut.into_report(), None);
    }

    #[test]
    fn test_failure_report_carries_reason() {
        let r = SolveOutcome::SolverFailure {
            reason: "backend crashed".into(),
        }
        .into_report()
        .unwrap();
        assert_eq!(r.status, SolverStatus::SolverError);
        assert_eq!(r.message.as_deref(), Some("backend crashed"));
        assert_eq!(r.objective_value, None);
    }

    #[test]
    fn test_outcome_report_keeps_fields() {
        let out = SolverOutput {
            status: SolverStatus::Infeasible,
            objective_value: Some(f64::INFINITY),
            solution: None,
            message: Some("primal infeasible".into()),
        };
        let r = SolveOutcome::Infeasible(out).into_report().unwrap();
        assert_eq!(r.status, SolverStatus::Infeasible);
        assert_eq!(r.objective_value, Some(f64::INFINITY));
        // Still raw here; sanitize is a separate, explicit step.
        assert_eq!(sanitize(r).objective_value, None);
    }
}
