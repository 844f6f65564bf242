// src/storage/store_server.rs — Async message passing for Store

use crate::storage::store::{
    CachedSolutionRow, HistoryRow, NewSolveRecord, ProblemRow, SolutionRow, Store,
};
use tokio::sync::{mpsc, oneshot};

#[derive(Debug)]
pub enum StoreCommand {
    LookupCached {
        spec_hash: String,
        resp: oneshot::Sender<anyhow::Result<Option<CachedSolutionRow>>>,
    },
    Persist {
        record: NewSolveRecord,
        resp: oneshot::Sender<anyhow::Result<(String, String)>>,
    },
    ListHistory {
        limit: u32,
        offset: u32,
        resp: oneshot::Sender<anyhow::Result<Vec<HistoryRow>>>,
    },
    GetProblem {
        id: String,
        resp: oneshot::Sender<anyhow::Result<Option<ProblemRow>>>,
    },
    GetSolution {
        id: String,
        resp: oneshot::Sender<anyhow::Result<Option<SolutionRow>>>,
    },
}

/// A handle to the Store that uses message passing.
#[derive(Clone)]
pub struct StoreHandle {
    tx: mpsc::Sender<StoreCommand>,
}

impl StoreHandle {
    pub fn new(tx: mpsc::Sender<StoreCommand>) -> Self {
        Self { tx }
    }

    pub async fn lookup_cached(
        &self,
        spec_hash: &str,
    ) -> anyhow::Result<Option<CachedSolutionRow>> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.tx
            .send(StoreCommand::LookupCached {
                spec_hash: spec_hash.to_string(),
                resp: resp_tx,
            })
            .await?;
        resp_rx.await?
    }

    pub async fn persist(&self, record: NewSolveRecord) -> anyhow::Result<(String, String)> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.tx
            .send(StoreCommand::Persist {
                record,
                resp: resp_tx,
            })
            .await?;
        resp_rx.await?
    }

    pub async fn list_history(&self, limit: u32, offset: u32) -> anyhow::Result<Vec<HistoryRow>> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.tx
            .send(StoreCommand::ListHistory {
                limit,
                offset,
                resp: resp_tx,
            })
            .await?;
        resp_rx.await?
    }

    pub async fn get_problem(&self, id: String) -> anyhow::Result<Option<ProblemRow>> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.tx
            .send(StoreCommand::GetProblem { id, resp: resp_tx })
            .await?;
        resp_rx.await?
    }

    pub async fn get_solution(&self, id: String) -> anyhow::Result<Option<SolutionRow>> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.tx
            .send(StoreCommand::GetSolution { id, resp: resp_tx })
            .await?;
        resp_rx.await?
    }
}

/// Helper to spawn the store server and return a handle.
pub fn spawn_store_server(store: Store) -> (StoreHandle, tokio::task::JoinHandle<()>) {
    let (tx, rx) = mpsc::channel(100);
    let handle = StoreHandle::new(tx);
    let join_handle = tokio::spawn(run_store_server(store, rx));
    (handle, join_handle)
}

/// The background task that owns the Store.
pub async fn run_store_server(store: Store, mut rx: mpsc::Receiver<StoreCommand>) {
    while let Some(cmd) = rx.recv().await {
        match cmd {
            StoreCommand::LookupCached { spec_hash, resp } => {
                let res = store.lookup_cached(&spec_hash);
                let _ = resp.send(res);
            }
            StoreCommand::Persist { record, resp } => {
                let res = store.persist(&record);
                let _ = resp.send(res);
            }
            StoreCommand::ListHistory {
                limit,
                offset,
                resp,
            } => {
                let res = store.list_history(limit, offset);
                let _ = resp.send(res);
            }
            StoreCommand::GetProblem { id, resp } => {
                let res = store.get_problem(&id);
                let _ = resp.send(res);
            }
            StoreCommand::GetSolution { id, resp } => {
                let res = store.get_solution(&id);
                let _ = resp.send(res);
            }
        }
    }
}
