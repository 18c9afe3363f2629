use super::actor::{FeedImportActor, FeedImportActorHandle};
use super::models::{RunMode, RunSummary};
use crate::components::record_store::RecordStoreHandle;
use crate::config::Config;
use crate::error::ImportResult;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Handle for interacting with the feed import actor
#[derive(Clone)]
pub struct FeedImportHandle {
    actor_handle: FeedImportActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl FeedImportHandle {
    /// Create a new FeedImportHandle and spawn the actor
    pub fn new(config: Arc<RwLock<Config>>, store: RecordStoreHandle) -> Self {
        let (mut actor, handle) = FeedImportActor::new(config, store);

        // Spawn a task to run the actor
        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        }
    }

    /// Run one import in the given mode
    pub async fn run_import(&self, mode: RunMode) -> ImportResult<RunSummary> {
        self.actor_handle.run_import(mode).await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> ImportResult<()> {
        self.actor_handle.shutdown().await
    }
}
