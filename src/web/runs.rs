//! In-memory registry of check runs, one per browser session.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tower_sessions::Session;
use tracing::debug;

use super::csrf::random_token;
use crate::check::SharedRun;
use crate::constants::RUN_RETENTION_SECONDS;
use crate::error::PingAppError;

const RUN_ID_KEY: &str = "run_id";

#[derive(Clone, Debug, Default)]
pub(crate) struct RunRegistry {
    runs: Arc<RwLock<HashMap<String, SharedRun>>>,
}

impl RunRegistry {
    pub(crate) async fn get(&self, run_id: &str) -> Option<SharedRun> {
        self.runs.read().await.get(run_id).cloned()
    }

    /// Stores `run` under `run_id` unless the run already there is still loading.
    ///
    /// Returns false, leaving the registry untouched, when the existing run is loading.
    /// Stale runs are pruned on the way.
    pub(crate) async fn replace_unless_loading(&self, run_id: &str, run: SharedRun) -> bool {
        let mut runs = self.runs.write().await;
        if let Some(existing) = runs.get(run_id)
            && existing.read().await.loading
        {
            return false;
        }
        prune(&mut runs, Utc::now()).await;
        runs.insert(run_id.to_string(), run);
        true
    }

    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.runs.read().await.len()
    }
}

/// Drops finished runs older than [RUN_RETENTION_SECONDS].
async fn prune(runs: &mut HashMap<String, SharedRun>, now: DateTime<Utc>) {
    let cutoff = now - Duration::seconds(RUN_RETENTION_SECONDS);
    let mut stale = Vec::new();
    for (run_id, run) in runs.iter() {
        let run = run.read().await;
        if !run.loading && run.started_at < cutoff {
            stale.push(run_id.clone());
        }
    }
    for run_id in stale {
        debug!("Pruning run {run_id}");
        runs.remove(&run_id);
    }
}

/// The run id tied to this session, created on first use.
pub(crate) async fn session_run_id(session: &Session) -> Result<String, PingAppError> {
    if let Some(run_id) = session.get::<String>(RUN_ID_KEY).await? {
        return Ok(run_id);
    }
    let run_id = random_token();
    session.insert(RUN_ID_KEY, run_id.clone()).await?;
    Ok(run_id)
}
