use live25_import::startup;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting 25Live event importer");

    // Load configuration
    let config = startup::load_config()?;

    // Start the importer and run until shutdown
    startup::start_importer(config).await
}
