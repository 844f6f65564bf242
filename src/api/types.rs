// src/api/types.rs

use serde::{Deserialize, Serialize};

use crate::core::sanitize::SolveReport;

/// Query parameters for POST /api/v1/solve.
#[derive(Debug, Deserialize)]
pub struct SolveParams {
    /// Set `use_cache=false` to skip the lookup and force a fresh solve.
    #[serde(default = "default_use_cache")]
    pub use_cache: bool,
}

fn default_use_cache() -> bool {
    true
}

/// Query parameters for GET /api/v1/history.
#[derive(Debug, Default, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Response body for a solve, fresh or served from cache.
#[derive(Debug, Serialize)]
pub struct SolveResponse {
    #[serde(flatten)]
    pub report: SolveReport,
    pub cached: bool,
    /// Null when persistence failed; the solve result is still returned.
    pub problem_id: Option<String>,
    pub solution_id: Option<String>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}
