// src/core/mod.rs — Solve orchestration

pub mod history;
pub mod orchestrator;
pub mod sanitize;
