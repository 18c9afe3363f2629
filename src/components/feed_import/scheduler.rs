use super::handle::FeedImportHandle;
use super::models::RunMode;
use crate::config::Config;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{sleep, Duration as TokioDuration};
use tracing::{error, info};

/// Start the periodic import scheduler.
///
/// Runs one import immediately, then once per configured interval. A failed
/// run is logged and the next scheduled run is the retry; there are no
/// in-run retries.
pub fn start_scheduler(config: Arc<RwLock<Config>>, handle: FeedImportHandle) {
    tokio::spawn(async move {
        loop {
            match handle.run_import(RunMode::Normal).await {
                Ok(summary) => {
                    info!("Import run finished: {}", summary);
                }
                Err(e) => {
                    error!("Import run failed: {}", e);
                }
            }

            let interval_secs = {
                let config_read = config.read().await;
                config_read.import_interval_secs
            };
            info!("Next import in {} seconds", interval_secs);
            sleep(TokioDuration::from_secs(interval_secs)).await;
        }
    });
}
