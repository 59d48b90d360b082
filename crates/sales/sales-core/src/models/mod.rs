//! Pre-trained regressors and artifact loading
//!
//! Artifacts are JSON documents tagged with a `kind`:
//!
//! ```json
//! {"kind": "linear", "features": ["day", "month"], "coefficients": [0.5, 2.0], "intercept": 10.0}
//! {"kind": "random_forest", "features": ["day"], "trees": [{"value": 3.0}]}
//! ```

mod forest;
mod linear;

pub use forest::{RandomForest, TreeNode};
pub use linear::LinearModel;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use sales_spi::{Regressor, Result, SalesError};
use serde::Deserialize;

/// Serialized model, dispatched on its `kind` tag
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Linear(LinearModel),
    RandomForest(RandomForest),
}

impl ModelArtifact {
    /// Validate the artifact and hand it out as a shareable regressor.
    pub fn into_regressor(self, source: &str) -> Result<Arc<dyn Regressor>> {
        match self {
            ModelArtifact::Linear(model) => {
                model.validate(source)?;
                Ok(Arc::new(model))
            }
            ModelArtifact::RandomForest(model) => {
                model.validate(source)?;
                Ok(Arc::new(model))
            }
        }
    }
}

/// Load and validate a model artifact from disk.
pub fn load_model(path: &Path) -> Result<Arc<dyn Regressor>> {
    let source = path.display().to_string();
    let file = File::open(path).map_err(|e| SalesError::unavailable(&source, e))?;
    let artifact: ModelArtifact = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| SalesError::unavailable(&source, e))?;

    let model = artifact.into_regressor(&source)?;
    tracing::info!(
        path = %source,
        kind = model.kind(),
        features = model.feature_names().len(),
        "model loaded"
    );
    Ok(model)
}
