use super::models::{FeedEvent, RunMode, RunSummary};
use super::reconcile::reconcile;
use crate::components::record_store::RecordStoreHandle;
use crate::config::Config;
use crate::error::{feed_error, ImportResult};
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::info;
use url::Url;

/// The feed import actor that processes messages
pub struct FeedImportActor {
    config: Arc<RwLock<Config>>,
    client: Client,
    store: RecordStoreHandle,
    command_rx: mpsc::Receiver<FeedImportCommand>,
}

/// Commands that can be sent to the feed import actor
pub enum FeedImportCommand {
    RunImport(RunMode, mpsc::Sender<ImportResult<RunSummary>>),
    Shutdown,
}

/// Handle for communicating with the feed import actor
#[derive(Clone)]
pub struct FeedImportActorHandle {
    command_tx: mpsc::Sender<FeedImportCommand>,
}

impl FeedImportActorHandle {
    /// Run one import in the given mode
    pub async fn run_import(&self, mode: RunMode) -> ImportResult<RunSummary> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(FeedImportCommand::RunImport(mode, response_tx))
            .await
            .map_err(|e| feed_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| feed_error("Response channel closed"))?
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> ImportResult<()> {
        let _ = self.command_tx.send(FeedImportCommand::Shutdown).await;
        Ok(())
    }
}

impl FeedImportActor {
    /// Create a new actor and return its handle
    pub fn new(
        config: Arc<RwLock<Config>>,
        store: RecordStoreHandle,
    ) -> (Self, FeedImportActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);

        let actor = Self {
            config,
            client: Client::new(),
            store,
            command_rx,
        };

        let handle = FeedImportActorHandle { command_tx };

        (actor, handle)
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Feed import actor started");

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                FeedImportCommand::RunImport(mode, response_tx) => {
                    let result = self.run_import(mode).await;
                    let _ = response_tx.send(result).await;
                }
                FeedImportCommand::Shutdown => {
                    info!("Feed import actor shutting down");
                    break;
                }
            }
        }

        info!("Feed import actor shut down");
    }

    /// Run one import: fetch the feed, then reconcile it into the store
    async fn run_import(&self, mode: RunMode) -> ImportResult<RunSummary> {
        let (enabled, feed_url) = {
            let config_read = self.config.read().await;
            (config_read.import_enabled, config_read.feed_url.clone())
        };

        // When disabled the feed is not even fetched
        if !enabled {
            info!("Import is disabled, skipping run");
            return Ok(RunSummary::default());
        }

        let events = fetch_feed(&self.client, &feed_url).await?;
        info!(count = events.len(), "Fetched feed");

        reconcile(&self.store, &events, mode).await
    }
}

/// Fetch and decode the feed. Any failure here aborts the whole run; no
/// store writes have happened yet.
pub async fn fetch_feed(client: &Client, feed_url: &str) -> ImportResult<Vec<FeedEvent>> {
    let url = Url::parse(feed_url)
        .map_err(|e| feed_error(&format!("Failed to parse feed URL: {}", e)))?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| feed_error(&format!("Failed to fetch feed: {}", e)))?;

    if !response.status().is_success() {
        let status = response.status();
        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "Could not read error response".to_string());
        return Err(feed_error(&format!(
            "Failed to fetch feed: HTTP {} - {}",
            status, error_body
        )));
    }

    response
        .json::<Vec<FeedEvent>>()
        .await
        .map_err(|e| feed_error(&format!("Failed to parse feed JSON: {}", e)))
}
