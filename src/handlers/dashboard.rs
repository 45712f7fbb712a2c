use axum::{Json, extract::State};

use crate::db::MessageStorage;
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::types::api::StatsResponse;

/// GET /api/dashboard/stats
pub async fn stats(
    State(messages): State<MessageStorage>,
    RequireAdmin(_): RequireAdmin,
) -> Result<Json<StatsResponse>, AppError> {
    Ok(Json(messages.stats().await?.into()))
}
