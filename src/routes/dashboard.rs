//! Dashboard routes: revenue chart, latest invoices and summary cards.

use axum::{extract::State, Json};

use crate::errors::{ApiResponse, AppError};
use crate::models::invoice::LatestInvoice;
use crate::models::revenue::Revenue;
use crate::services::dashboard::{self, CardData};
use crate::AppState;

/// GET /api/v1/dashboard/revenue — monthly revenue figures.
pub async fn revenue(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Revenue>>>, AppError> {
    let revenue = dashboard::fetch_revenue(&state.db).await?;
    Ok(ApiResponse::success(revenue))
}

/// GET /api/v1/dashboard/latest-invoices — five most recent invoices.
pub async fn latest_invoices(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<LatestInvoice>>>, AppError> {
    let invoices = dashboard::fetch_latest_invoices(&state.db).await?;
    Ok(ApiResponse::success(invoices))
}

/// GET /api/v1/dashboard/cards — invoice/customer counts and status totals.
pub async fn cards(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CardData>>, AppError> {
    let cards = dashboard::fetch_card_data(&state.db).await?;
    Ok(ApiResponse::success(cards))
}
