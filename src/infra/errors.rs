// src/infra/errors.rs — Error types for cvxserve

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CvxError {
    // User errors
    #[error("No solver configured. Set [solver] command in cvxserve.toml.")]
    NoSolver,

    // Infra
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
