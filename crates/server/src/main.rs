//! # sales-server
//!
//! Standalone HTTP server for the sales forecasting service.

use std::process::ExitCode;
use std::sync::Arc;

use sales_api::ServiceConfig;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    sales_server::init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let config = ServiceConfig::from_env()?;
    let addr = config.socket_addr()?;
    let service = Arc::new(config.load_service()?);

    sales_server::serve(addr, service).await
}
