//! One-shot import runner for manual and debug use.
//!
//! `manual_import` runs a single import immediately instead of waiting for
//! the scheduler. `--dump` prints the decoded feed without touching the
//! store; `--log` runs the import with per-event progress output.

use live25_import::components::feed_import::{FeedImportHandle, RunMode};
use live25_import::components::record_store::RecordStoreActor;
use live25_import::startup;
use std::env;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    startup::init_logging()?;

    let mode = match env::args().nth(1).as_deref() {
        Some("--dump") => RunMode::DumpOnly,
        Some("--log") => RunMode::VerboseLog,
        Some(other) => {
            eprintln!("Unknown option: {}", other);
            eprintln!("Usage: manual_import [--dump | --log]");
            std::process::exit(2);
        }
        None => RunMode::Normal,
    };

    let config = startup::load_config()?;

    // Manual runs honor the enable flag exactly like scheduled runs
    let (mut store_actor, store_handle) = RecordStoreActor::new(Arc::clone(&config))?;
    tokio::spawn(async move {
        store_actor.run().await;
    });

    let feed_handle = FeedImportHandle::new(Arc::clone(&config), store_handle.clone());

    let summary = feed_handle.run_import(mode).await?;
    info!("Import run finished: {}", summary);

    feed_handle.shutdown().await?;
    store_handle.shutdown().await?;

    Ok(())
}
