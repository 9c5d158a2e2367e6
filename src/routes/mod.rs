//! Route definitions for the dashboard API.

pub mod customers;
pub mod dashboard;
pub mod health;
pub mod invoices;
pub mod seed;

use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let mut cors = CorsLayer::new().allow_methods([Method::GET]);
    match state.config.frontend_url.parse::<HeaderValue>() {
        Ok(origin) => cors = cors.allow_origin(origin),
        Err(e) => {
            tracing::warn!(error = %e, url = %state.config.frontend_url, "Invalid FRONTEND_URL, CORS disabled");
        }
    }

    let api_routes = Router::new()
        .route("/dashboard/revenue", get(dashboard::revenue))
        .route("/dashboard/latest-invoices", get(dashboard::latest_invoices))
        .route("/dashboard/cards", get(dashboard::cards))
        .route("/invoices", get(invoices::list))
        .route("/invoices/pages", get(invoices::pages))
        .route("/invoices/{id}", get(invoices::get_by_id))
        .route("/customers", get(customers::list))
        .route("/customers/table", get(customers::table));

    let mut app = Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .nest("/api/v1", api_routes);

    if state.config.seed_endpoint_enabled {
        app = app.route("/seed", get(seed::run));
    }

    app.layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
