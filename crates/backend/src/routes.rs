use axum::{
    routing::{get, post},
    Router,
};

use crate::api::handlers;

/// All application routes
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // D400 SALES EXPLORER
        // ========================================
        .route(
            "/api/d400/explorer/init",
            get(handlers::d400_sales_explorer::get_init),
        )
        .route(
            "/api/d400/explorer/filter",
            post(handlers::d400_sales_explorer::apply_filter),
        )
        .route(
            "/api/d400/explorer/dashboard",
            post(handlers::d400_sales_explorer::get_dashboard),
        )
}
