//! Error responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use sales_api::SalesError;
use serde::Serialize;

/// Error returned by a handler
#[derive(Debug)]
pub enum ApiError {
    /// Required query parameter was absent or empty
    MissingParameter(&'static str),
    /// Query string could not be decoded
    BadQuery(String),
    /// Failure raised by the forecasting stack
    Sales(SalesError),
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: ErrorDetail<'a>,
}

#[derive(Debug, Serialize)]
struct ErrorDetail<'a> {
    code: &'a str,
    message: String,
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::MissingParameter(_) => "missing_parameter",
            ApiError::BadQuery(_) => "invalid_parameter",
            ApiError::Sales(err) => err.code(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingParameter(_) | ApiError::BadQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::Sales(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Sales(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::MissingParameter(name) => {
                format!("Missing required query parameter '{name}'")
            }
            ApiError::BadQuery(reason) => format!("Invalid query string: {reason}"),
            ApiError::Sales(err) => err.to_string(),
        }
    }
}

impl From<SalesError> for ApiError {
    fn from(err: SalesError) -> Self {
        ApiError::Sales(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();
        if status.is_server_error() {
            tracing::error!(code = self.code(), %message, "request failed");
        } else {
            tracing::warn!(code = self.code(), %message, "request rejected");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code(),
                message,
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_are_bad_request() {
        let err = ApiError::from(SalesError::UnknownCategory {
            field: "store_id".to_string(),
            value: "NY_1".to_string(),
        });
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "unknown_category");
    }

    #[test]
    fn test_server_errors_are_internal() {
        let err = ApiError::from(SalesError::InferenceFailed("NaN".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "inference_failed");
    }

    #[test]
    fn test_missing_parameter() {
        let err = ApiError::MissingParameter("date");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "missing_parameter");
        assert!(err.message().contains("'date'"));
    }
}
