//! Seed route: populates empty collections with placeholder data.

use axum::{extract::State, Json};

use crate::errors::{ApiResponse, AppError};
use crate::services::seed::{self, PlaceholderData, SeedReport};
use crate::AppState;

/// GET /seed — seed every empty collection.
pub async fn run(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SeedReport>>, AppError> {
    let data = PlaceholderData::bundled()?;
    let report = seed::seed_database(&state.db, &data).await?;
    Ok(ApiResponse::success(report))
}
