// src/lib.rs — Library root for cvxserve

pub mod api;
pub mod cli;
pub mod core;
pub mod infra;
pub mod limit;
pub mod problem;
pub mod solver;
pub mod storage;
