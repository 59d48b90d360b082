//! Sales error types

use thiserror::Error;

/// Errors that can occur while building features or running inference
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SalesError {
    /// Date string could not be parsed
    #[error("Invalid date '{input}': {reason}")]
    InvalidDate { input: String, reason: String },

    /// Store or item identifier does not have the expected shape
    #[error("Invalid {kind} '{value}': {reason}")]
    InvalidIdentifier {
        kind: &'static str,
        value: String,
        reason: String,
    },

    /// Category value was not part of the training-time vocabulary
    #[error("Unknown {field} '{value}': not present in the training vocabulary")]
    UnknownCategory { field: String, value: String },

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Model or encoder artifact could not be loaded
    #[error("Model unavailable at '{path}': {reason}")]
    ModelUnavailable { path: String, reason: String },

    /// Feature row does not carry a feature the model was trained on
    #[error("Feature '{feature}' required by the model is missing from the feature row")]
    FeatureMismatch { feature: String },

    /// Inference produced an unusable value
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
}

impl SalesError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            SalesError::InvalidDate { .. } => "invalid_date",
            SalesError::InvalidIdentifier { .. } => "invalid_identifier",
            SalesError::UnknownCategory { .. } => "unknown_category",
            SalesError::InvalidParameter { .. } => "invalid_parameter",
            SalesError::ModelUnavailable { .. } => "model_unavailable",
            SalesError::FeatureMismatch { .. } => "feature_mismatch",
            SalesError::InferenceFailed(_) => "inference_failed",
        }
    }

    /// Whether the error was caused by caller input rather than server state.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            SalesError::InvalidDate { .. }
                | SalesError::InvalidIdentifier { .. }
                | SalesError::UnknownCategory { .. }
                | SalesError::InvalidParameter { .. }
        )
    }

    /// Build a [`SalesError::ModelUnavailable`] from any displayable cause.
    pub fn unavailable(path: impl Into<String>, reason: impl ToString) -> Self {
        SalesError::ModelUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
