//! # sales
//!
//! Command-line launcher for the sales forecasting service: the HTTP
//! server, the terminal dashboard, both at once, or one-shot forecasts.

use std::fs::File;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;

use anyhow::Context;
use clap::{Parser, Subcommand};
use sales_api::{parse_date, ArtifactPaths, SalesService, ServiceConfig, ServiceConfigBuilder};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sales")]
#[command(about = "Sales forecasting API and dashboard", long_about = None)]
struct Cli {
    /// Directory holding linear_forecasting.json, random_predictive.json and encoders.csv
    #[arg(long, global = true)]
    models: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the REST API server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Open the terminal dashboard
    Dashboard,

    /// Run the API server in the background and the dashboard in the foreground
    Run {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Forecast national sales starting from a date
    Forecast {
        /// First forecast day (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,

        /// Number of days (defaults to the configured horizon)
        #[arg(long)]
        days: Option<usize>,

        /// Output file (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Predict sales of one item at one store on a date
    Predict {
        /// Day to predict (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,

        /// Store identifier, e.g. CA_1
        #[arg(short, long)]
        store_id: String,

        /// Item identifier, e.g. FOODS_1_001
        #[arg(short, long)]
        item_id: String,

        /// Output file (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        tracing::error!("{e:#}");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve { host, port } => {
            sales_server::init_tracing();
            let config = load_config(cli.models.as_deref(), host, port)?;
            let addr = config.socket_addr()?;
            let service = Arc::new(config.load_service()?);

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(sales_server::serve(addr, service))
        }

        Commands::Dashboard => {
            sales_tui::init_file_logging(Path::new(sales_tui::LOG_FILE))?;
            let config = load_config(cli.models.as_deref(), None, None)?;
            let service = Arc::new(config.load_service()?);
            sales_tui::run_dashboard(service)
        }

        Commands::Run { host, port } => {
            sales_tui::init_file_logging(Path::new(sales_tui::LOG_FILE))?;
            let config = load_config(cli.models.as_deref(), host, port)?;
            let addr = config.socket_addr()?;
            let service = Arc::new(config.load_service()?);

            let notices = spawn_server(addr, Arc::clone(&service))?;
            sales_tui::run_dashboard_with_notices(service, notices)
        }

        Commands::Forecast { date, days, output } => {
            init_stderr_tracing();
            let config = load_config(cli.models.as_deref(), None, None)?;
            let service = config.load_service()?;
            let forecast = match days {
                Some(days) => service
                    .forecaster()
                    .forecast_days(parse_date(&date)?, days)?,
                None => service.forecast(&date)?,
            };
            write_json(&forecast, output.as_deref())
        }

        Commands::Predict {
            date,
            store_id,
            item_id,
            output,
        } => {
            init_stderr_tracing();
            let config = load_config(cli.models.as_deref(), None, None)?;
            let service = config.load_service()?;
            let prediction = service.predict(&date, &store_id, &item_id)?;
            write_json(&prediction, output.as_deref())
        }
    }
}

/// Environment configuration with command-line overrides applied.
fn load_config(
    models: Option<&Path>,
    host: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<ServiceConfig> {
    let mut builder = ServiceConfigBuilder::from_config(ServiceConfig::from_env()?);

    if let Some(dir) = models {
        let paths = ArtifactPaths::in_dir(dir);
        builder = builder
            .forecast_model(paths.forecast_model)
            .predictive_model(paths.predictive_model)
            .encoders(paths.encoders);
    }
    if let Some(host) = host {
        builder = builder.host(&host);
    }
    if let Some(port) = port {
        builder = builder.port(port);
    }

    Ok(builder.build()?)
}

/// Serve the API from a background OS thread with its own runtime.
///
/// The returned receiver yields a message if the server stops with an error.
fn spawn_server(addr: SocketAddr, service: Arc<SalesService>) -> anyhow::Result<Receiver<String>> {
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("sales-api".to_string())
        .spawn(move || {
            let result = tokio::runtime::Runtime::new()
                .context("failed to start the API runtime")
                .and_then(|runtime| runtime.block_on(sales_server::serve(addr, service)));
            if let Err(e) = result {
                let notice = format!("API server stopped: {e:#}");
                tracing::error!("{notice}");
                // The dashboard may already have exited.
                let _ = tx.send(notice);
            }
        })?;
    Ok(rx)
}

fn init_stderr_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();
}

/// Print `value` as pretty JSON, or write it to `output`.
fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("Failed to create output {}", path.display()))?;
            serde_json::to_writer_pretty(&mut file, value)?;
            println!("Results written to {:?}", path);
        }
        None => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sales_api::PredictionResult;

    #[test]
    fn test_parse_forecast_command() {
        let cli = Cli::try_parse_from([
            "sales", "forecast", "--date", "2024-01-01", "--days", "3", "--models", "demo",
        ])
        .unwrap();

        assert_eq!(cli.models, Some(PathBuf::from("demo")));
        match cli.command {
            Commands::Forecast { date, days, output } => {
                assert_eq!(date, "2024-01-01");
                assert_eq!(days, Some(3));
                assert!(output.is_none());
            }
            _ => panic!("Expected forecast command"),
        }
    }

    #[test]
    fn test_parse_predict_command() {
        let cli = Cli::try_parse_from([
            "sales", "predict", "-d", "2024-01-01", "-s", "CA_1", "-i", "FOODS_1_001",
        ])
        .unwrap();

        match cli.command {
            Commands::Predict {
                store_id, item_id, ..
            } => {
                assert_eq!(store_id, "CA_1");
                assert_eq!(item_id, "FOODS_1_001");
            }
            _ => panic!("Expected predict command"),
        }
    }

    #[test]
    fn test_predict_requires_item() {
        assert!(Cli::try_parse_from(["sales", "predict", "-d", "2024-01-01", "-s", "CA_1"]).is_err());
    }

    #[test]
    fn test_parse_run_overrides() {
        let cli = Cli::try_parse_from(["sales", "run", "--host", "127.0.0.1", "-p", "9001"]).unwrap();
        match cli.command {
            Commands::Run { host, port } => {
                assert_eq!(host.as_deref(), Some("127.0.0.1"));
                assert_eq!(port, Some(9001));
            }
            _ => panic!("Expected run command"),
        }
    }

    #[test]
    fn test_models_dir_overrides_artifacts() {
        let config = load_config(Some(Path::new("/opt/models")), None, Some(9100)).unwrap();
        assert_eq!(
            config.encoders,
            PathBuf::from("/opt/models").join("encoders.csv")
        );
        assert_eq!(config.port, 9100);
    }

    fn tiny_service() -> Arc<SalesService> {
        use sales_api::identifiers::STORE_ID;
        use sales_api::{
            CategoryEncoder, LinearModel, NationalForecaster, RandomForest, StoreItemPredictor,
            TreeNode,
        };

        let national = LinearModel::new(vec!["day".to_string()], vec![1.0], 0.0).unwrap();
        let forest =
            RandomForest::new(vec!["store_id".to_string()], vec![TreeNode::leaf(1.0)]).unwrap();
        let encoder = CategoryEncoder::new().with_field(STORE_ID, ["CA_1"]);
        Arc::new(SalesService::new(
            NationalForecaster::new(Arc::new(national)),
            StoreItemPredictor::new(Arc::new(forest), Arc::new(encoder)),
        ))
    }

    #[test]
    fn test_spawn_server_reports_bind_failure() {
        let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = taken.local_addr().unwrap();

        let notices = spawn_server(addr, tiny_service()).unwrap();
        let notice = notices
            .recv_timeout(std::time::Duration::from_secs(10))
            .unwrap();
        assert!(notice.starts_with("API server stopped: "));
    }

    #[test]
    fn test_write_json_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prediction.json");
        write_json(&PredictionResult::new(1.75), Some(&path)).unwrap();

        let written: serde_json::Value =
            serde_json::from_reader(File::open(&path).unwrap()).unwrap();
        assert_eq!(written, serde_json::json!({"prediction": 1.75}));
    }
}
