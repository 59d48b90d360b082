//! # sales-server
//!
//! REST API for the sales forecasting service. The router is built over an
//! already-loaded [`SalesService`] so the same handles can be shared with
//! the dashboard.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use sales_api::{SalesService, DEFAULT_LOG_FILTER};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod error;
pub mod routes;

pub use error::ApiError;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SalesService>,
}

/// Build the router with middleware.
pub fn router(service: Arc<SalesService>) -> Router {
    let state = AppState { service };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::root))
        .route("/health/", get(routes::health))
        .route("/health", get(routes::health))
        .route("/sales/national/", get(routes::national_sales))
        .route("/sales/national", get(routes::national_sales))
        .route("/sales/stores/items/", get(routes::store_item_sales))
        .route("/sales/stores/items", get(routes::store_item_sales))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind `addr` and serve until the process exits.
pub async fn serve(addr: SocketAddr, service: Arc<SalesService>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        "sales-server v{} listening on {}",
        env!("CARGO_PKG_VERSION"),
        listener.local_addr()?
    );
    axum::serve(listener, router(service)).await?;
    Ok(())
}

/// Install a stdout subscriber filtered by `RUST_LOG`.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use sales_api::identifiers::{CAT_ID, DEPT_ID, ITEM_ID, STATE_ID, STORE_ID};
    use sales_api::{
        CategoryEncoder, LinearModel, NationalForecaster, RandomForest, StoreItemPredictor,
        TreeNode,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_service() -> Arc<SalesService> {
        let national = LinearModel::new(
            ["week_of_year", "day_of_year", "day_of_week", "day", "month", "year"]
                .iter()
                .map(|f| f.to_string())
                .collect(),
            vec![0.0, 0.0, 10.0, 0.0, 0.0, 0.0],
            100.0,
        )
        .unwrap();
        let forest = RandomForest::new(
            [
                "day_of_week", "day", "month", "year", "item_id", "dept_id", "cat_id",
                "store_id", "state_id",
            ]
            .iter()
            .map(|f| f.to_string())
            .collect(),
            vec![TreeNode::split(
                7,
                0.5,
                TreeNode::leaf(1.5),
                TreeNode::leaf(4.25),
            )],
        )
        .unwrap();
        let encoder = CategoryEncoder::new()
            .with_field(ITEM_ID, ["FOODS_1_001"])
            .with_field(DEPT_ID, ["FOODS_1"])
            .with_field(CAT_ID, ["FOODS"])
            .with_field(STORE_ID, ["CA_1", "CA_2"])
            .with_field(STATE_ID, ["CA"]);

        Arc::new(SalesService::new(
            NationalForecaster::new(Arc::new(national)),
            StoreItemPredictor::new(Arc::new(forest), Arc::new(encoder)),
        ))
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = router(test_service())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn get_text(uri: &str) -> (StatusCode, String) {
        let response = router(test_service())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_root_lists_endpoints() {
        let (status, body) = get_json("/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Welcome to the Sales Forecasting API!");
        assert_eq!(body["endpoints"]["/health/"], "API Health check");
        assert_eq!(body["endpoints"].as_object().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_health() {
        for uri in ["/health/", "/health"] {
            let (status, body) = get_json(uri).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(
                body,
                json!({"status": "Healthy", "message": "Welcome to the Sales Forecasting API!"})
            );
        }
    }

    #[tokio::test]
    async fn test_national_forecast_keeps_date_order() {
        let (status, text) = get_text("/sales/national/?date=2024-01-01").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            text,
            "{\"2024-01-01\":100.0,\"2024-01-02\":110.0,\"2024-01-03\":120.0,\
             \"2024-01-04\":130.0,\"2024-01-05\":140.0,\"2024-01-06\":150.0,\
             \"2024-01-07\":160.0}"
        );
    }

    #[tokio::test]
    async fn test_national_forecast_invalid_date() {
        let (status, body) = get_json("/sales/national/?date=tomorrow").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "invalid_date");
        assert!(body["error"]["message"].as_str().unwrap().contains("tomorrow"));
    }

    #[tokio::test]
    async fn test_national_forecast_missing_date() {
        let (status, body) = get_json("/sales/national/").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "missing_parameter");
    }

    #[tokio::test]
    async fn test_store_item_prediction() {
        let (status, body) =
            get_json("/sales/stores/items/?date=2024-01-01&store_id=CA_2&item_id=FOODS_1_001")
                .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"prediction": 4.25}));
    }

    #[tokio::test]
    async fn test_store_item_unknown_category() {
        let (status, body) =
            get_json("/sales/stores/items/?date=2024-01-01&store_id=TX_1&item_id=FOODS_1_001")
                .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "unknown_category");
    }

    #[tokio::test]
    async fn test_store_item_malformed_item() {
        let (status, body) =
            get_json("/sales/stores/items/?date=2024-01-01&store_id=CA_1&item_id=FOODS").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "invalid_identifier");
    }

    #[tokio::test]
    async fn test_store_item_missing_parameter() {
        let (status, body) = get_json("/sales/stores/items/?date=2024-01-01&store_id=CA_1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "missing_parameter");
        assert!(body["error"]["message"].as_str().unwrap().contains("item_id"));
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let response = router(test_service())
            .oneshot(Request::builder().uri("/sales/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
