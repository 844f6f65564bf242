// src/storage/mod.rs — Solve cache persistence

pub mod schema;
pub mod store;
pub mod store_server;

use std::path::Path;

use rusqlite::Connection;

use crate::infra::errors::CvxError;

pub use store::{CachedSolutionRow, HistoryRow, NewSolveRecord, ProblemRow, SolutionRow, Store};
pub use store_server::{spawn_store_server, StoreCommand, StoreHandle};

/// Open (or create) the cache database at the given path.
pub fn open(path: &Path) -> Result<Store, CvxError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let conn = Connection::open(path)?;
    // WAL so history reads don't block the persist path
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;

    schema::run_migrations(&conn)?;

    Ok(Store::new(conn))
}

/// Create an in-memory database (for testing).
pub fn in_memory() -> Result<Store, CvxError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    schema::run_migrations(&conn)?;
    Ok(Store::new(conn))
}
