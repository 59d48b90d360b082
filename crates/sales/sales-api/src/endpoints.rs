//! Public endpoint catalogue.

/// Title shown by the server root and the dashboard header
pub const API_TITLE: &str = "Sales Forecasting API";

/// Greeting returned by the root and health endpoints
pub const WELCOME_MESSAGE: &str = "Welcome to the Sales Forecasting API!";

/// Health status string
pub const HEALTHY: &str = "Healthy";

/// One-paragraph project objective for a forecaster with the given horizon.
pub fn objective(horizon: usize) -> String {
    format!(
        "This API provides sales forecasting for the next {horizon} days based on a \
         provided date, as well as item-level sales forecasts."
    )
}

/// A documented HTTP endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub method: &'static str,
    pub path: &'static str,
    /// Short description used by the root endpoint
    pub summary: &'static str,
    /// Longer description used by the dashboard
    pub detail: &'static str,
}

pub const ENDPOINTS: [Endpoint; 4] = [
    Endpoint {
        method: "GET",
        path: "/",
        summary: "Project info and endpoints",
        detail: "Displays project objectives and available API endpoints.",
    },
    Endpoint {
        method: "GET",
        path: "/health/",
        summary: "API Health check",
        detail: "Returns API status and a welcome message.",
    },
    Endpoint {
        method: "GET",
        path: "/sales/national/",
        summary: "7-day sales forecast (input: date)",
        detail: "Returns a 7-day forecast of national sales starting from the given date.",
    },
    Endpoint {
        method: "GET",
        path: "/sales/stores/items/",
        summary: "Store & item sales prediction (input: date, store_id, item_id)",
        detail: "Returns predicted sales for a specific store and item on a specific date.",
    },
];
