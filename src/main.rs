// src/main.rs — cvxserve entry point

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use cvxserve::api::{self, ApiState};
use cvxserve::cli::{Cli, Commands};
use cvxserve::core::history::HistoryQuery;
use cvxserve::core::orchestrator::SolveOrchestrator;
use cvxserve::infra::config::Config;
use cvxserve::infra::errors::CvxError;
use cvxserve::infra::logger;
use cvxserve::limit::{FixedWindowLimiter, NoopLimiter, RateLimiter};
use cvxserve::problem::{self, ProblemPayload};
use cvxserve::solver::command::CommandSolver;
use cvxserve::storage;

#[tokio::main]
async fn main() {
    // Initialize logging (respects RUST_LOG)
    logger::init_logging("info");

    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load config (falls back to defaults if no cvxserve.toml)
    let mut config = if let Some(ref path) = cli.config {
        Config::load_from(path)?
    } else {
        Config::load()?
    };
    config.apply_env();

    // CLI flags win over the config file
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(ref db) = cli.db {
        config.storage.path = db.clone();
    }

    match &cli.command {
        Some(Commands::Migrate) => run_migrate(&config),
        Some(Commands::Hash { file }) => run_hash(file),
        Some(Commands::Serve) | None => serve(config).await,
    }
}

/// Apply pending migrations and report the database location.
fn run_migrate(config: &Config) -> anyhow::Result<()> {
    storage::open(&config.storage.path)?;
    println!("database ready at {}", config.storage.path.display());
    Ok(())
}

/// Canonicalize and hash a problem payload without solving it.
fn run_hash(file: &Path) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(file)?;
    let payload: ProblemPayload = serde_json::from_str(&content)?;
    let spec = problem::validate(&payload)?;
    println!("{}", problem::spec_hash(&spec));
    Ok(())
}

/// Wire up the store actor, solver pool, and HTTP server.
async fn serve(config: Config) -> anyhow::Result<()> {
    let command = config.solver.command.clone().ok_or(CvxError::NoSolver)?;

    let store = storage::open(&config.storage.path)?;
    let (store_handle, _store_server) = storage::spawn_store_server(store);

    let solver = Arc::new(CommandSolver::new(command, config.solver.args.clone()));
    let orchestrator = SolveOrchestrator::new(solver, config.solver.max_inflight);

    let limiter: Arc<dyn RateLimiter> = if config.limits.enabled {
        Arc::new(FixedWindowLimiter::new(config.limits.per_minute))
    } else {
        Arc::new(NoopLimiter)
    };

    let history = HistoryQuery::new(
        store_handle.clone(),
        config.history.default_limit,
        config.history.max_limit,
    );

    let state = ApiState {
        store: store_handle,
        orchestrator,
        history,
        limiter,
        api_token: config.server.api_token.clone(),
        budget: Duration::from_secs(config.solver.timeout_seconds),
    };

    api::start_server(&config.server, state).await
}
