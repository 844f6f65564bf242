// src/core/history.rs — Paginated solve history reads

use anyhow::Result;
use serde::Serialize;

use crate::storage::{HistoryRow, ProblemRow, SolutionRow, StoreHandle};

/// Read-side companion to the solve pipeline: history pages and
/// by-id lookups, all served through the store actor.
#[derive(Clone)]
pub struct HistoryQuery {
    store: StoreHandle,
    default_limit: u32,
    max_limit: u32,
}

/// One page of history plus the paging values actually applied, so
/// clients can tell when a requested limit was clamped.
#[derive(Debug, Serialize)]
pub struct HistoryPage {
    pub items: Vec<HistoryRow>,
    pub limit: u32,
    pub offset: u32,
}

fn effective_limit(requested: Option<u32>, default: u32, max: u32) -> u32 {
    requested.unwrap_or(default).clamp(1, max)
}

impl HistoryQuery {
    pub fn new(store: StoreHandle, default_limit: u32, max_limit: u32) -> Self {
        Self {
            store,
            default_limit,
            max_limit: max_limit.max(1),
        }
    }

    /// List recent solves, newest problem first.
    pub async fn list(&self, limit: Option<u32>, offset: Option<u32>) -> Result<HistoryPage> {
        let limit = effective_limit(limit, self.default_limit, self.max_limit);
        let offset = offset.unwrap_or(0);
        let items = self.store.list_history(limit, offset).await?;
        Ok(HistoryPage {
            items,
            limit,
            offset,
        })
    }

    pub async fn problem(&self, id: &str) -> Result<Option<ProblemRow>> {
        self.store.get_problem(id.to_string()).await
    }

    pub async fn solution(&self, id: &str) -> Result<Option<SolutionRow>> {
        self.store.get_solution(id.to_string()).await
    }
}
