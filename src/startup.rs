use crate::components::feed_import::{start_scheduler, FeedImportHandle};
use crate::components::record_store::RecordStoreActor;
use crate::config::Config;
use crate::error::Error;
use crate::shutdown;
use std::sync::Arc;
use tokio::sync::{oneshot, RwLock};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load and initialize the application config
pub fn load_config() -> miette::Result<Arc<RwLock<Config>>> {
    match Config::load() {
        Ok(config) => Ok(Arc::new(RwLock::new(config))),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Wire up the record store and feed importer, start the scheduler, and
/// block until a shutdown signal arrives
pub async fn start_importer(config: Arc<RwLock<Config>>) -> miette::Result<()> {
    {
        let config_read = config.read().await;
        info!(
            feed_url = %config_read.feed_url,
            enabled = config_read.import_enabled,
            interval_secs = config_read.import_interval_secs,
            "Starting importer"
        );
    }

    // Initialize the record store actor
    let (mut store_actor, store_handle) = RecordStoreActor::new(Arc::clone(&config))?;

    tokio::spawn(async move {
        store_actor.run().await;
    });

    // Initialize the feed import actor
    let feed_handle = FeedImportHandle::new(Arc::clone(&config), store_handle.clone());

    // Start the periodic import scheduler
    start_scheduler(Arc::clone(&config), feed_handle.clone());

    // Create shutdown channel and spawn the signal handler
    let (shutdown_send, shutdown_recv) = oneshot::channel();

    tokio::spawn(async move {
        shutdown::handle_signals(shutdown_send, feed_handle, store_handle).await;
    });

    // Wait for the shutdown signal
    let _ = shutdown_recv.await;
    info!("Importer stopped");

    Ok(())
}
