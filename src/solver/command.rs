// src/solver/command.rs — External solver subprocess (JSON over stdio)

use std::io::Write;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::problem::ProblemSpec;
use crate::solver::{ConvexSolver, SolverError, SolverOutput};

/// Runs a configured solver executable once per call: the problem goes
/// to its stdin as one JSON object and the result comes back on stdout
/// as one JSON object. Blocking by design; the orchestrator moves each
/// call onto the blocking pool.
pub struct CommandSolver {
    command: String,
    args: Vec<String>,
}

impl CommandSolver {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }
}

impl ConvexSolver for CommandSolver {
    fn solve(&self, spec: &ProblemSpec) -> Result<SolverOutput, SolverError> {
        let request = serde_json::to_string(spec)?;
        debug!(command = %self.command, vars = spec.num_vars(), "dispatching solve");

        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| SolverError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(request.as_bytes())?;
        }
        // Dropping stdin closes the pipe so the solver sees EOF.

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(SolverError::Failed {
                code: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(serde_json::from_slice(&output.stdout)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Sense;

    fn spec() -> ProblemSpec {
        ProblemSpec {
            c: vec![1.0, 2.0],
            a: Some(vec![vec![1.0, 1.0]]),
            b: Some(vec![5.0]),
            q: None,
            bounds: None,
            sense: Sense::Minimize,
        }
    }

    #[test]
    fn test_scripted_solver_output_parsed() {
        let solver = CommandSolver::new(
            "sh",
            vec![
                "-c".into(),
                r#"cat > /dev/null; echo '{"status":"optimal","objective_value":2.5,"solution":[0.5,1.0]}'"#
                    .into(),
            ],
        );
        let out = solver.solve(&spec()).unwrap();
        assert_eq!(out.status, crate::solver::SolverStatus::Optimal);
        assert_eq!(out.objective_value, Some(2.5));
        assert_eq!(out.solution, Some(vec![0.5, 1.0]));
    }

    #[test]
    fn test_solver_reads_problem_from_stdin() {
        // jq-free check: the subprocess sees the spec JSON verbatim.
        let solver = CommandSolver::new(
            "sh",
            vec![
                "-c".into(),
                r#"grep -q '"c":\[1.0,2.0\]' && echo '{"status":"optimal"}' || echo '{"status":"solver_error"}'"#
                    .into(),
            ],
        );
        let out = solver.solve(&spec()).unwrap();
        assert_eq!(out.status, crate::solver::SolverStatus::Optimal);
    }

    #[test]
    fn test_missing_executable_is_spawn_error() {
        let solver = CommandSolver::new("definitely-not-a-solver-binary", Vec::new());
        let err = solver.solve(&spec()).unwrap_err();
        assert!(matches!(err, SolverError::Spawn { .. }), "{err}");
    }

    #[test]
    fn test_nonzero_exit_is_failure() {
        let solver = CommandSolver::new(
            "sh",
            vec!["-c".into(), "cat > /dev/null; echo broken >&2; exit 3".into()],
        );
        let err = solver.solve(&spec()).unwrap_err();
        match err {
            SolverError::Failed { stderr, .. } => assert_eq!(stderr, "broken"),
            other => panic!("expected Failed, got: {other}"),
        }
    }

    #[test]
    fn test_garbage_output_is_wire_error() {
        let solver = CommandSolver::new(
            "sh",
            vec!["-c".into(), "cat > /dev/null; echo not-json".into()],
        );
        let err = solver.solve(&spec()).unwrap_err();
        assert!(matches!(err, SolverError::Json(_)), "{err}");
    }
}
