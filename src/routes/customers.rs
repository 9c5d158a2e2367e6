//! Customer routes: picker list and searchable customer table.

use axum::{
    extract::{Query, State},
    Json,
};
use validator::Validate;

use crate::errors::{ApiResponse, AppError};
use crate::models::customer::{CustomerField, CustomersTable};
use crate::models::pagination::Search;
use crate::services::customer as customer_service;
use crate::AppState;

/// GET /api/v1/customers — every customer's id and name.
pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CustomerField>>>, AppError> {
    let customers = customer_service::fetch_customers(&state.db).await?;
    Ok(ApiResponse::success(customers))
}

/// GET /api/v1/customers/table — customers matching `query` with invoice totals.
pub async fn table(
    State(state): State<AppState>,
    Query(search): Query<Search>,
) -> Result<Json<ApiResponse<Vec<CustomersTable>>>, AppError> {
    search.validate()?;
    let rows = customer_service::fetch_filtered_customers(&state.db, search.term()).await?;
    Ok(ApiResponse::success(rows))
}
