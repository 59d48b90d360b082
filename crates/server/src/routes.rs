//! API route handlers

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use sales_api::{ForecastResult, PredictionResult, ENDPOINTS, HEALTHY, WELCOME_MESSAGE};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub endpoints: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct NationalQuery {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StoreItemQuery {
    pub date: Option<String>,
    pub store_id: Option<String>,
    pub item_id: Option<String>,
}

pub async fn root() -> Json<RootResponse> {
    let endpoints = ENDPOINTS
        .iter()
        .map(|e| (e.path.to_string(), serde_json::Value::from(e.summary)))
        .collect();

    Json(RootResponse {
        message: WELCOME_MESSAGE,
        endpoints,
    })
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HEALTHY,
        message: WELCOME_MESSAGE,
    })
}

pub async fn national_sales(
    State(state): State<AppState>,
    query: Result<Query<NationalQuery>, QueryRejection>,
) -> Result<Json<ForecastResult>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadQuery(e.body_text()))?;
    let date = required("date", query.date)?;

    let forecast = state.service.forecast(&date)?;
    tracing::info!(%date, days = forecast.len(), "national forecast");
    Ok(Json(forecast))
}

pub async fn store_item_sales(
    State(state): State<AppState>,
    query: Result<Query<StoreItemQuery>, QueryRejection>,
) -> Result<Json<PredictionResult>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadQuery(e.body_text()))?;
    let date = required("date", query.date)?;
    let store_id = required("store_id", query.store_id)?;
    let item_id = required("item_id", query.item_id)?;

    let prediction = state.service.predict(&date, &store_id, &item_id)?;
    tracing::info!(
        %date,
        %store_id,
        %item_id,
        prediction = prediction.prediction,
        "store/item prediction"
    );
    Ok(Json(prediction))
}

fn required(name: &'static str, value: Option<String>) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::MissingParameter(name)),
    }
}
