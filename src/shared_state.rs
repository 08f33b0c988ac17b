use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use axum::extract::FromRef;

use crate::config::Config;

/// Process-wide counters surfaced by the health endpoint. Evaluations are
/// independent pure calculations — no per-request state lives anywhere.
#[derive(Clone, Debug)]
pub struct AppState {
    started_at: Instant,
    proposals_generated: Arc<AtomicU64>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            proposals_generated: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn proposal_written(&self) {
        self.proposals_generated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn proposals_generated(&self) -> u64 {
        self.proposals_generated.load(Ordering::Relaxed)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Combined router state. Handlers extract the piece they need via the
/// `FromRef` substates below, so one `.with_state(shared)` covers both.
#[derive(Clone)]
pub struct SharedState {
    pub config: Config,
    pub app: AppState,
}

impl FromRef<SharedState> for Config {
    fn from_ref(shared: &SharedState) -> Config {
        shared.config.clone()
    }
}

impl FromRef<SharedState> for AppState {
    fn from_ref(shared: &SharedState) -> AppState {
        shared.app.clone()
    }
}
