// src/storage/store.rs — SQLite operations

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use uuid::Uuid;

/// Low-level SQLite operations for problems and solutions.
pub struct Store {
    conn: Connection,
}

/// A submitted problem as stored.
#[derive(Debug, Clone, Serialize)]
pub struct ProblemRow {
    pub id: String,
    pub spec_hash: String,
    pub payload_json: String,
    pub created_at: String,
}

/// A stored solver outcome.
#[derive(Debug, Clone, Serialize)]
pub struct SolutionRow {
    pub id: String,
    pub problem_id: String,
    pub status: String,
    pub objective_value: Option<f64>,
    pub solution_json: String,
    pub duration_ms: i64,
    pub cached: bool,
    pub created_at: String,
}

/// Just the columns needed to answer a solve from cache.
#[derive(Debug, Clone)]
pub struct CachedSolutionRow {
    pub solution_id: String,
    pub problem_id: String,
    pub solution_json: String,
}

/// One history entry: a problem joined with its solution.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryRow {
    pub problem_id: String,
    pub spec_hash: String,
    pub created_at: String,
    pub solution_id: String,
    pub status: String,
    pub objective_value: Option<f64>,
    pub duration_ms: i64,
    pub cached: bool,
    pub solved_at: String,
}

/// A freshly computed solve, ready to persist as a problem/solution pair.
#[derive(Debug, Clone)]
pub struct NewSolveRecord {
    pub spec_hash: String,
    pub payload_json: String,
    pub status: String,
    pub objective_value: Option<f64>,
    pub solution_json: String,
    pub duration_ms: i64,
    pub cached: bool,
}

impl Store {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Raw connection access, used by tests and benchmarks.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    // -- Cache --

    /// Most recent optimal solution for a canonical hash, if any.
    /// Non-optimal outcomes are stored but never served from cache.
    pub fn lookup_cached(&self, spec_hash: &str) -> anyhow::Result<Option<CachedSolutionRow>> {
        let row = self
            .conn
            .query_row(
                "SELECT s.id, s.problem_id, s.solution_json
                 FROM solutions s
                 JOIN problems p ON p.id = s.problem_id
                 WHERE p.spec_hash = ?1 AND s.status = 'optimal'
                 ORDER BY s.created_at DESC, s.rowid DESC
                 LIMIT 1",
                params![spec_hash],
                |r| {
                    Ok(CachedSolutionRow {
                        solution_id: r.get(0)?,
                        problem_id: r.get(1)?,
                        solution_json: r.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    /// Insert a problem and its solution in one transaction.
    /// Returns the generated (problem_id, solution_id).
    pub fn persist(&self, rec: &NewSolveRecord) -> anyhow::Result<(String, String)> {
        let problem_id = Uuid::new_v4().to_string();
        let solution_id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO problems (id, spec_hash, payload_json, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![problem_id, rec.spec_hash, rec.payload_json, now],
        )?;
        tx.execute(
            "INSERT INTO solutions (id, problem_id, status, objective_value, solution_json,
             duration_ms, cached, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                solution_id,
                problem_id,
                rec.status,
                rec.objective_value,
                rec.solution_json,
                rec.duration_ms,
                rec.cached,
                now
            ],
        )?;
        tx.commit()?;

        Ok((problem_id, solution_id))
    }

    // -- History --

    pub fn list_history(&self, limit: u32, offset: u32) -> anyhow::Result<Vec<HistoryRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT p.id, p.spec_hash, p.created_at,
                    s.id, s.status, s.objective_value, s.duration_ms, s.cached, s.created_at
             FROM problems p
             JOIN solutions s ON s.problem_id = p.id
             ORDER BY p.created_at DESC, p.rowid DESC
             LIMIT ?1 OFFSET ?2",
        )?;
        let rows = stmt.query_map(params![limit, offset], |r| {
            Ok(HistoryRow {
                problem_id: r.get(0)?,
                spec_hash: r.get(1)?,
                created_at: r.get(2)?,
                solution_id: r.get(3)?,
                status: r.get(4)?,
                objective_value: r.get(5)?,
                duration_ms: r.get(6)?,
                cached: r.get(7)?,
                solved_at: r.get(8)?,
            })
        })?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    pub fn get_problem(&self, id: &str) -> anyhow::Result<Option<ProblemRow>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, spec_hash, payload_json, created_at
                 FROM problems WHERE id = ?1",
                params![id],
                |r| {
                    Ok(ProblemRow {
                        id: r.get(0)?,
                        spec_hash: r.get(1)?,
                        payload_json: r.get(2)?,
                        created_at: r.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    pub fn get_solution(&self, id: &str) -> anyhow::Result<Option<SolutionRow>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, problem_id, status, objective_value, solution_json,
                        duration_ms, cached, created_at
                 FROM solutions WHERE id = ?1",
                params![id],
                |r| {
                    Ok(SolutionRow {
                        id: r.get(0)?,
                        problem_id: r.get(1)?,
                        status: r.get(2)?,
                        objective_value: r.get(3)?,
                        solution_json: r.get(4)?,
                        duration_ms: r.get(5)?,
                        cached: r.get(6)?,
                        created_at: r.get(7)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }
}
