//! Process-wide cache for the composed cost matrix.
//!
//! The cache owns an explicit load state machine (Empty → Loading →
//! Ready/Failed). The first caller claims the load; callers arriving during
//! an in-flight load wait for its outcome instead of re-fetching. Ready
//! snapshots are immutable `Arc`s replaced wholesale, so readers never see
//! a partially built matrix.

use std::future::Future;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use tokio::sync::{Mutex, Notify};
use tracing::debug;

use crate::matrix::types::CostMatrixResponse;

#[derive(Debug, Clone)]
enum LoadState {
    Empty,
    Loading,
    Ready(Arc<CostMatrixResponse>),
    Failed(String),
}

pub struct MatrixCache {
    state: Mutex<LoadState>,
    loaded: Notify,
}

impl MatrixCache {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LoadState::Empty),
            loaded: Notify::new(),
        }
    }

    /// Returns the cached matrix, running `load` if none exists yet.
    ///
    /// A failed load leaves the cache in the failed state; callers decide
    /// whether to [`invalidate`](Self::invalidate) and retry.
    pub async fn get_or_load<F, Fut>(&self, load: F) -> Result<Arc<CostMatrixResponse>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<CostMatrixResponse>>,
    {
        loop {
            // Register interest before inspecting state so a notify between
            // unlock and await is not lost.
            let notified = self.loaded.notified();
            {
                let mut state = self.state.lock().await;
                match &*state {
                    LoadState::Ready(matrix) => return Ok(Arc::clone(matrix)),
                    LoadState::Failed(err) => {
                        return Err(anyhow!("matrix load failed: {err}"));
                    }
                    LoadState::Empty => {
                        *state = LoadState::Loading;
                        break;
                    }
                    LoadState::Loading => {}
                }
            }
            debug!("Matrix load in progress, waiting");
            notified.await;
        }

        // This caller owns the load.
        let outcome = load().await;
        let mut state = self.state.lock().await;
        match outcome {
            Ok(matrix) => {
                let matrix = Arc::new(matrix);
                *state = LoadState::Ready(Arc::clone(&matrix));
                drop(state);
                self.loaded.notify_waiters();
                Ok(matrix)
            }
            Err(err) => {
                *state = LoadState::Failed(err.to_string());
                drop(state);
                self.loaded.notify_waiters();
                Err(err)
            }
        }
    }

    /// Returns the cached matrix if a load has completed successfully.
    pub async fn ready(&self) -> Option<Arc<CostMatrixResponse>> {
        match &*self.state.lock().await {
            LoadState::Ready(matrix) => Some(Arc::clone(matrix)),
            _ => None,
        }
    }

    /// Discards any cached or failed state so the next caller reloads.
    /// An in-flight load is left to finish; its result lands as usual.
    pub async fn invalidate(&self) {
        let mut state = self.state.lock().await;
        if !matches!(&*state, LoadState::Loading) {
            *state = LoadState::Empty;
        }
    }
}

impl Default for MatrixCache {
    fn default() -> Self {
        Self::new()
    }
}
