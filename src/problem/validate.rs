// src/problem/validate.rs — Structural and numeric soundness checks

use thiserror::Error;

use crate::problem::{ProblemPayload, ProblemSpec};

/// Why a payload was rejected. The message is the client-facing reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("c (objective) is required")]
    MissingObjective,
    #[error("Each row of A must have len(c) columns")]
    BadRowWidth,
    #[error("len(b) must equal number of rows in A")]
    RhsLengthMismatch,
    #[error("len(bounds) must equal len(c)")]
    BoundsLengthMismatch,
    #[error("c contains NaN/Inf")]
    NonFiniteObjective,
    #[error("b contains NaN/Inf")]
    NonFiniteRhs,
    #[error("Q must be square with size len(c)")]
    QuadraticNotSquare,
}

/// Validate a wire payload and produce the dense spec.
///
/// Checks run in a fixed order and stop at the first failure. An empty
/// optional collection counts as absent, matching canonicalization, so
/// `"A": []` skips the row checks the same way a missing `A` does.
/// Runs before hashing and before any storage or solver interaction.
pub fn validate(payload: &ProblemPayload) -> Result<ProblemSpec, ValidationError> {
    if payload.c.is_empty() {
        return Err(ValidationError::MissingObjective);
    }
    let n = payload.c.len();

    let a = nonempty_matrix(&payload.a);
    if let Some(rows) = a {
        if rows.iter().any(|row| row.len() != n) {
            return Err(ValidationError::BadRowWidth);
        }
    }

    let raw_b = payload.b.as_deref().filter(|v| !v.is_empty());
    if let (Some(rows), Some(b)) = (a, raw_b) {
        if b.len() != rows.len() {
            return Err(ValidationError::RhsLengthMismatch);
        }
    }

    if let Some(bounds) = payload.bounds.as_deref().filter(|v| !v.is_empty()) {
        if bounds.len() != n {
            return Err(ValidationError::BoundsLengthMismatch);
        }
    }

    let c = finite_vec(&payload.c).ok_or(ValidationError::NonFiniteObjective)?;

    let b = match raw_b {
        Some(entries) => Some(finite_vec(entries).ok_or(ValidationError::NonFiniteRhs)?),
        None => None,
    };

    if let Some(q) = nonempty_matrix(&payload.q) {
        if q.len() != n || q.iter().any(|row| row.len() != n) {
            return Err(ValidationError::QuadraticNotSquare);
        }
    }

    Ok(ProblemSpec {
        c,
        a: payload.a.clone().filter(|rows| !rows.is_empty()),
        b,
        q: payload.q.clone().filter(|rows| !rows.is_empty()),
        bounds: payload.bounds.clone().filter(|v| !v.is_empty()),
        sense: payload.sense,
    })
}

fn nonempty_matrix(m: &Option<Vec<Vec<f64>>>) -> Option<&[Vec<f64>]> {
    m.as_deref().filter(|rows| !rows.is_empty())
}

/// Densify a vector of optional entries, refusing null and non-finite
/// values alike.
fn finite_vec(entries: &[Option<f64>]) -> Option<Vec<f64>> {
    entries
        .iter()
        .map(|e| e.filter(|v| v.is_finite()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Sense;

    fn payload(json: &str) -> ProblemPayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_empty_objective_rejected() {
        let err = validate(&payload(r#"{"c":[]}"#)).unwrap_err();
        assert_eq!(err, ValidationError::MissingObjective);
        assert_eq!(err.to_string(), "c (objective) is required");
    }

    #[test]
    fn test_row_width_mismatch_rejected() {
        let err = validate(&payload(r#"{"c":[1,2,3],"A":[[1,1]],"b":[1]}"#)).unwrap_err();
        assert_eq!(err, ValidationError::BadRowWidth);
        assert_eq!(err.to_string(), "Each row of A must have len(c) columns");
    }

    #[test]
    fn test_rhs_length_mismatch_rejected() {
        let err = validate(&payload(r#"{"c":[1,2],"A":[[1,1],[1,0]],"b":[1]}"#)).unwrap_err();
        assert_eq!(err, ValidationError::RhsLengthMismatch);
        assert_eq!(err.to_string(), "len(b) must equal number of rows in A");
    }

    #[test]
    fn test_bounds_length_mismatch_rejected() {
        let err =
            validate(&payload(r#"{"c":[1,2,3],"bounds":[[0,null],[0,null]]}"#)).unwrap_err();
        assert_eq!(err, ValidationError::BoundsLengthMismatch);
        assert_eq!(err.to_string(), "len(bounds) must equal len(c)");
    }

    #[test]
    fn test_null_in_objective_rejected() {
        let err = validate(&payload(r#"{"c":[1,null]}"#)).unwrap_err();
        assert_eq!(err, ValidationError::NonFiniteObjective);
        assert_eq!(err.to_string(), "c contains NaN/Inf");
    }

    #[test]
    fn test_nan_in_objective_rejected() {
        let p = ProblemPayload {
            c: vec![Some(1.0), Some(f64::NAN)],
            ..Default::default()
        };
        assert_eq!(validate(&p).unwrap_err(), ValidationError::NonFiniteObjective);
    }

    #[test]
    fn test_inf_in_rhs_rejected() {
        let p = ProblemPayload {
            c: vec![Some(1.0), Some(2.0)],
            a: Some(vec![vec![1.0, 1.0]]),
            b: Some(vec![Some(f64::INFINITY)]),
            ..Default::default()
        };
        let err = validate(&p).unwrap_err();
        assert_eq!(err, ValidationError::NonFiniteRhs);
        assert_eq!(err.to_string(), "b contains NaN/Inf");
    }

    #[test]
    fn test_null_in_rhs_rejected() {
        let err = validate(&payload(r#"{"c":[1,2],"A":[[1,1]],"b":[null]}"#)).unwrap_err();
        assert_eq!(err, ValidationError::NonFiniteRhs);
    }

    #[test]
    fn test_non_square_quadratic_rejected() {
        let err = validate(&payload(r#"{"c":[1,2],"Q":[[1,0,0],[0,1,0]]}"#)).unwrap_err();
        assert_eq!(err, ValidationError::QuadraticNotSquare);
        assert_eq!(err.to_string(), "Q must be square with size len(c)");
    }

    #[test]
    fn test_checks_stop_at_first_failure() {
        // Both A's row width and b's length are wrong; the row width
        // check comes first.
        let err = validate(&payload(r#"{"c":[1,2,3],"A":[[1,1]],"b":[1,2]}"#)).unwrap_err();
        assert_eq!(err, ValidationError::BadRowWidth);
    }

    #[test]
    fn test_valid_lp_densifies() {
        let spec = validate(&payload(
            r#"{"c":[1,2],"A":[[1,1]],"b":[5],"bounds":[[0,null],[0,null]],"sense":"minimize"}"#,
        ))
        .unwrap();
        assert_eq!(spec.c, vec![1.0, 2.0]);
        assert_eq!(spec.b, Some(vec![5.0]));
        assert_eq!(spec.sense, Sense::Minimize);
        assert_eq!(spec.bounds, Some(vec![(Some(0.0), None), (Some(0.0), None)]));
    }

    #[test]
    fn test_valid_qp_passes() {
        let spec = validate(&payload(
            r#"{"c":[0,0],"Q":[[2,0],[0,2]],"A":[[1,1]],"b":[5],"sense":"minimize"}"#,
        ))
        .unwrap();
        assert_eq!(spec.q, Some(vec![vec![2.0, 0.0], vec![0.0, 2.0]]));
    }

    #[test]
    fn test_empty_collections_treated_as_absent() {
        let spec = validate(&payload(r#"{"c":[1,2],"A":[],"b":[],"bounds":[],"Q":[]}"#)).unwrap();
        assert_eq!(spec.a, None);
        assert_eq!(spec.b, None);
        assert_eq!(spec.q, None);
        assert_eq!(spec.bounds, None);
    }

    #[test]
    fn test_rhs_without_constraint_rows_allowed() {
        let spec = validate(&payload(r#"{"c":[1],"b":[3]}"#)).unwrap();
        assert_eq!(spec.b, Some(vec![3.0]));
        assert_eq!(spec.a, None);
    }
}
