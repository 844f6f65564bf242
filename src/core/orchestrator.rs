// src/core/orchestrator.rs — Budgeted, capped solve dispatch

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::time::timeout;
use tracing::warn;

use crate::problem::ProblemSpec;
use crate::solver::{ConvexSolver, SolverOutput, SolverStatus};

/// Terminal outcome of one orchestrated solve attempt.
///
/// Infeasible, unbounded, and backend failures are data, not errors:
/// they flow to the caller (and into history) the same way an optimum
/// does. Only `TimedOut` short-circuits that path.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    Optimal(SolverOutput),
    Infeasible(SolverOutput),
    Unbounded(SolverOutput),
    SolverFailure { reason: String },
    TimedOut,
}

impl From<SolverOutput> for SolveOutcome {
    fn from(output: SolverOutput) -> Self {
        match output.status {
            SolverStatus::Optimal => SolveOutcome::Optimal(output),
            SolverStatus::Infeasible => SolveOutcome::Infeasible(output),
            SolverStatus::Unbounded => SolveOutcome::Unbounded(output),
            SolverStatus::SolverError => SolveOutcome::SolverFailure {
                reason: output
                    .message
                    .unwrap_or_else(|| "solver reported failure".into()),
            },
            SolverStatus::Unknown => SolveOutcome::SolverFailure {
                reason: output
                    .message
                    .unwrap_or_else(|| "solver returned unknown status".into()),
            },
        }
    }
}

/// Dispatches blocking solver calls under a concurrency cap and a
/// per-call time budget.
///
/// A solve that outlives its budget is abandoned, not cancelled: the
/// blocking task runs to completion and its result is dropped. The
/// permit travels into that task, so abandoned work keeps counting
/// against the cap until it actually finishes.
#[derive(Clone)]
pub struct SolveOrchestrator {
    solver: Arc<dyn ConvexSolver>,
    inflight: Arc<Semaphore>,
}

impl SolveOrchestrator {
    pub fn new(solver: Arc<dyn ConvexSolver>, max_inflight: usize) -> Self {
        Self {
            solver,
            inflight: Arc::new(Semaphore::new(max_inflight.max(1))),
        }
    }

    /// Run one solve under `budget`. The budget covers waiting for a
    /// permit as well as the solve itself. A zero budget times out
    /// without touching the solver or the permit pool.
    pub async fn solve(&self, spec: &ProblemSpec, budget: Duration) -> SolveOutcome {
        if budget.is_zero() {
            return SolveOutcome::TimedOut;
        }

        let solver = Arc::clone(&self.solver);
        let spec = spec.clone();
        let inflight = Arc::clone(&self.inflight);

        let attempt = async move {
            let permit = inflight.acquire_owned().await?;
            tokio::task::spawn_blocking(move || {
                let _permit = permit;
                solver.solve(&spec)
            })
            .await
            .map_err(anyhow::Error::from)
        };

        match timeout(budget, attempt).await {
            Err(_elapsed) => {
                warn!(budget_ms = budget.as_millis() as u64, "solve abandoned after budget");
                SolveOutcome::TimedOut
            }
            Ok(Err(join_err)) => SolveOutcome::SolverFailure {
                reason: join_err.to_string(),
            },
            Ok(Ok(Err(solver_err))) => SolveOutcome::SolverFailure {
                reason: solver_err.to_string(),
            },
            Ok(Ok(Ok(output))) => output.into(),
        }
    }
}
