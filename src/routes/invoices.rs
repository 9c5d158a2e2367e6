//! Invoice table routes: search with pagination, page count, and lookup by id.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use crate::errors::{ApiResponse, AppError};
use crate::models::invoice::{InvoiceForm, InvoicesTable};
use crate::models::pagination::{PagedResult, Search};
use crate::services::invoice as invoice_service;
use crate::AppState;

/// GET /api/v1/invoices — one page of invoices matching `query`.
pub async fn list(
    State(state): State<AppState>,
    Query(search): Query<Search>,
) -> Result<Json<ApiResponse<PagedResult<InvoicesTable>>>, AppError> {
    search.validate()?;
    let result =
        invoice_service::fetch_invoices_page(&state.db, search.term(), search.current_page())
            .await?;
    Ok(ApiResponse::success(result))
}

/// GET /api/v1/invoices/pages — number of pages matching `query`.
pub async fn pages(
    State(state): State<AppState>,
    Query(search): Query<Search>,
) -> Result<Json<ApiResponse<u64>>, AppError> {
    search.validate()?;
    let pages = invoice_service::fetch_invoices_pages(&state.db, search.term()).await?;
    Ok(ApiResponse::success(pages))
}

/// GET /api/v1/invoices/{id} — invoice for the edit form; `data` is null
/// when the invoice does not exist.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Option<InvoiceForm>>>, AppError> {
    let invoice = invoice_service::fetch_invoice_by_id(&state.db, &id).await?;
    Ok(ApiResponse::success(invoice))
}
