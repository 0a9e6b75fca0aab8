use axum::{http::StatusCode, Json};
use contracts::dashboards::d400_sales_explorer::{
    DashboardResponse, ExplorerInitResponse, FilterActionRequest, FilterState,
};

use crate::dashboards::d400_sales_explorer::service;
use crate::domain::a001_sales_record::SalesTable;
use crate::shared::data::sales_store::get_sales_table;
use crate::shared::format::format_compact;

fn table() -> Result<&'static SalesTable, StatusCode> {
    get_sales_table().ok_or_else(|| {
        tracing::error!("D400 Explorer: sales table is not loaded");
        StatusCode::SERVICE_UNAVAILABLE
    })
}

/// GET /api/d400/explorer/init
pub async fn get_init() -> Result<Json<ExplorerInitResponse>, StatusCode> {
    let table = table()?;
    let response = service::init_explorer(table);
    tracing::info!(
        "D400 Explorer: init with {} segments, {} sub-categories",
        response.segments.len(),
        response.sub_categories.len()
    );
    Ok(Json(response))
}

/// POST /api/d400/explorer/filter
///
/// Applies one UI action to the state sent by the client and returns the new state.
pub async fn apply_filter(
    Json(request): Json<FilterActionRequest>,
) -> Result<Json<FilterState>, StatusCode> {
    let table = table()?;
    tracing::info!("D400 Explorer: filter action {:?}", request.action);

    match service::apply_filter_action(table, request) {
        Ok(state) => Ok(Json(state)),
        Err(e) => {
            tracing::warn!("D400 Explorer: rejected filter action: {}", e);
            Err(StatusCode::UNPROCESSABLE_ENTITY)
        }
    }
}

/// POST /api/d400/explorer/dashboard
pub async fn get_dashboard(
    Json(state): Json<FilterState>,
) -> Result<Json<DashboardResponse>, StatusCode> {
    let table = table()?;

    match service::build_dashboard(table, state) {
        Ok(response) => {
            tracing::info!(
                "D400 Explorer: {} records, ${} ({} segments)",
                response.record_count,
                format_compact(response.metrics.dollars),
                response.segment_summary.len()
            );
            Ok(Json(response))
        }
        Err(e) => {
            tracing::warn!("D400 Explorer: rejected filter state: {}", e);
            Err(StatusCode::UNPROCESSABLE_ENTITY)
        }
    }
}
