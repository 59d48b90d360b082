//! sales-dashboard - standalone terminal dashboard.

use std::path::Path;
use std::sync::Arc;

use sales_api::ServiceConfig;

fn main() -> anyhow::Result<()> {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    sales_tui::init_file_logging(Path::new(sales_tui::LOG_FILE))?;

    let config = ServiceConfig::from_env()?;
    let service = match config.load_service() {
        Ok(service) => Arc::new(service),
        Err(err) => {
            tracing::error!("{err}");
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };

    sales_tui::run_dashboard(service)
}
