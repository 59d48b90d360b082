//! Service configuration types.

use std::net::SocketAddr;
use std::path::PathBuf;

use sales_core::{ArtifactPaths, NationalForecaster, SalesService};
use sales_spi::{Result, SalesError};
use serde::{Deserialize, Serialize};

/// Default `RUST_LOG` filter for every binary in the workspace
pub const DEFAULT_LOG_FILTER: &str =
    "sales=info,sales_api=info,sales_core=info,sales_server=info,sales_tui=info,tower_http=info";

/// Runtime configuration for the server, dashboard and CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Interface the HTTP server binds to
    pub host: String,
    /// Port the HTTP server listens on
    pub port: u16,
    /// National forecasting model artifact
    pub forecast_model: PathBuf,
    /// Store/item predictive model artifact
    pub predictive_model: PathBuf,
    /// Categorical encoder export
    pub encoders: PathBuf,
    /// Days per national forecast
    pub forecast_horizon: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            forecast_model: PathBuf::from("models/linear_forecasting.json"),
            predictive_model: PathBuf::from("models/random_predictive.json"),
            encoders: PathBuf::from("models/encoders.csv"),
            forecast_horizon: NationalForecaster::DEFAULT_HORIZON,
        }
    }
}

impl ServiceConfig {
    pub const HOST: &'static str = "HOST";
    pub const PORT: &'static str = "PORT";
    pub const FORECAST_MODEL: &'static str = "FORECAST_MODEL_PATH";
    pub const PREDICTIVE_MODEL: &'static str = "PREDICTIVE_MODEL_PATH";
    pub const ENCODERS: &'static str = "ENCODERS_PATH";
    pub const FORECAST_HORIZON: &'static str = "FORECAST_HORIZON";

    /// Read configuration from the process environment, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = ServiceConfigBuilder::new();

        if let Some(host) = lookup(Self::HOST) {
            builder = builder.host(&host);
        }
        if let Some(port) = lookup(Self::PORT) {
            builder = builder.port(parse_number(Self::PORT, &port)?);
        }
        if let Some(path) = lookup(Self::FORECAST_MODEL) {
            builder = builder.forecast_model(path);
        }
        if let Some(path) = lookup(Self::PREDICTIVE_MODEL) {
            builder = builder.predictive_model(path);
        }
        if let Some(path) = lookup(Self::ENCODERS) {
            builder = builder.encoders(path);
        }
        if let Some(days) = lookup(Self::FORECAST_HORIZON) {
            builder = builder.forecast_horizon(parse_number(Self::FORECAST_HORIZON, &days)?);
        }

        builder.build()
    }

    /// Artifact locations for [`SalesService::load`].
    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths::new(
            self.forecast_model.clone(),
            self.predictive_model.clone(),
            self.encoders.clone(),
        )
    }

    /// Address the HTTP server binds to.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| SalesError::InvalidParameter {
                name: Self::HOST.to_string(),
                reason: format!("'{}:{}' is not a socket address: {e}", self.host, self.port),
            })
    }

    /// Load every artifact named by this configuration.
    pub fn load_service(&self) -> Result<SalesService> {
        tracing::info!(
            forecast_model = %self.forecast_model.display(),
            predictive_model = %self.predictive_model.display(),
            encoders = %self.encoders.display(),
            horizon = self.forecast_horizon,
            "loading sales models"
        );
        SalesService::load(&self.artifact_paths(), self.forecast_horizon)
    }
}

fn parse_number<T>(name: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e| SalesError::InvalidParameter {
        name: name.to_string(),
        reason: format!("'{raw}' is not valid: {e}"),
    })
}

/// Builder for ServiceConfig.
#[derive(Debug, Default)]
pub struct ServiceConfigBuilder {
    config: ServiceConfig,
}

impl ServiceConfigBuilder {
    /// Create a new builder starting from the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    pub fn from_config(config: ServiceConfig) -> Self {
        Self { config }
    }

    pub fn host(mut self, host: &str) -> Self {
        self.config.host = host.to_string();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn forecast_model(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.forecast_model = path.into();
        self
    }

    pub fn predictive_model(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.predictive_model = path.into();
        self
    }

    pub fn encoders(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.encoders = path.into();
        self
    }

    pub fn forecast_horizon(mut self, days: usize) -> Self {
        self.config.forecast_horizon = days;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<ServiceConfig> {
        if self.config.host.trim().is_empty() {
            return Err(SalesError::InvalidParameter {
                name: ServiceConfig::HOST.to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.config.forecast_horizon == 0 {
            return Err(SalesError::InvalidParameter {
                name: ServiceConfig::FORECAST_HORIZON.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(self.config)
    }
}
