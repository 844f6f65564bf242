// src/api/handlers.rs

use std::time::Instant;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use tracing::{error, info, warn};

use crate::api::{auth, types::*, ApiState};
use crate::core::history::HistoryPage;
use crate::core::sanitize::{sanitize, SolveReport};
use crate::limit::client_key;
use crate::problem::{spec_hash, validate, ProblemPayload, ProblemSpec};
use crate::storage::{NewSolveRecord, ProblemRow, SolutionRow};

fn err(status: StatusCode, detail: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            detail: detail.into(),
        }),
    )
}

/// POST /api/v1/solve — Validate and solve a problem, answering from
/// cache when an optimal solution for the same canonical hash exists.
pub async fn solve(
    State(state): State<ApiState>,
    Query(params): Query<SolveParams>,
    headers: HeaderMap,
    Json(body): Json<ProblemPayload>,
) -> Result<Json<SolveResponse>, (StatusCode, Json<ErrorResponse>)> {
    auth::check_api_key(state.api_token.as_deref(), &headers)?;

    if state.limiter.check(&client_key(&headers)).is_err() {
        return Err(err(StatusCode::TOO_MANY_REQUESTS, "Rate limit exceeded"));
    }

    let spec =
        validate(&body).map_err(|e| err(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;
    let hash = spec_hash(&spec);

    let bypass =
        headers.contains_key("x-force-recompute") || headers.contains_key("x-bypass-cache");

    if params.use_cache && !bypass {
        match state.store.lookup_cached(&hash).await {
            Ok(Some(hit)) => match serde_json::from_str::<SolveReport>(&hit.solution_json) {
                Ok(report) => {
                    info!("cache hit for {hash}");
                    return Ok(Json(SolveResponse {
                        report,
                        cached: true,
                        problem_id: Some(hit.problem_id),
                        solution_id: Some(hit.solution_id),
                    }));
                }
                Err(e) => warn!("stored solution {} unreadable: {e}", hit.solution_id),
            },
            Ok(None) => {}
            Err(e) => warn!("cache lookup failed: {e}"),
        }
    }

    let started = Instant::now();
    let outcome = state.orchestrator.solve(&spec, state.budget).await;
    let duration_ms = started.elapsed().as_millis() as i64;

    let Some(report) = outcome.into_report() else {
        return Err(err(StatusCode::GATEWAY_TIMEOUT, "Request timed out"));
    };
    let report = sanitize(report);

    let (problem_id, solution_id) =
        persist_result(&state, &spec, &hash, &report, duration_ms).await;

    Ok(Json(SolveResponse {
        report,
        cached: false,
        problem_id,
        solution_id,
    }))
}

/// Persist a computed result. Best-effort: a failed write returns null
/// ids instead of failing the solve that already happened.
async fn persist_result(
    state: &ApiState,
    spec: &ProblemSpec,
    hash: &str,
    report: &SolveReport,
    duration_ms: i64,
) -> (Option<String>, Option<String>) {
    let record = NewSolveRecord {
        spec_hash: hash.to_string(),
        payload_json: serde_json::to_string(spec).unwrap_or_default(),
        status: report.status.as_str().to_string(),
        objective_value: report.objective_value,
        solution_json: serde_json::to_string(report).unwrap_or_default(),
        duration_ms,
        cached: false,
    };

    match state.store.persist(record).await {
        Ok((problem_id, solution_id)) => {
            info!("persisted solve as problem {problem_id}");
            (Some(problem_id), Some(solution_id))
        }
        Err(e) => {
            warn!("failed to persist solve result: {e}");
            (None, None)
        }
    }
}

/// GET /api/v1/history — Recent solves, newest first.
pub async fn history(
    State(state): State<ApiState>,
    Query(params): Query<HistoryParams>,
    headers: HeaderMap,
) -> Result<Json<HistoryPage>, (StatusCode, Json<ErrorResponse>)> {
    auth::check_api_key(state.api_token.as_deref(), &headers)?;

    let page = state
        .history
        .list(params.limit, params.offset)
        .await
        .map_err(|e| {
            error!("history query failed: {e}");
            err(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
        })?;
    Ok(Json(page))
}

/// GET /api/v1/problems/:id — Fetch a stored problem by id.
pub async fn get_problem(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<ProblemRow>, (StatusCode, Json<ErrorResponse>)> {
    auth::check_api_key(state.api_token.as_deref(), &headers)?;

    match state.history.problem(&id).await {
        Ok(Some(row)) => Ok(Json(row)),
        Ok(None) => Err(err(StatusCode::NOT_FOUND, "Not found")),
        Err(e) => {
            error!("problem lookup failed: {e}");
            Err(err(StatusCode::INTERNAL_SERVER_ERROR, "Internal error"))
        }
    }
}

/// GET /api/v1/solutions/:id — Fetch a stored solution by id.
pub async fn get_solution(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<SolutionRow>, (StatusCode, Json<ErrorResponse>)> {
    auth::check_api_key(state.api_token.as_deref(), &headers)?;

    match state.history.solution(&id).await {
        Ok(Some(row)) => Ok(Json(row)),
        Ok(None) => Err(err(StatusCode::NOT_FOUND, "Not found")),
        Err(e) => {
            error!("solution lookup failed: {e}");
            Err(err(StatusCode::INTERNAL_SERVER_ERROR, "Internal error"))
        }
    }
}

/// GET /api/v1/health — Simple health check, no auth.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
