use shiftsync::startup;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting shiftsync");

    // Load configuration once; the pipeline carries it from here on
    let config = startup::load_config()?;

    // Serve the sync endpoint
    startup::run_server(config).await
}
