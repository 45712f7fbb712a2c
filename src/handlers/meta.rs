use axum::Json;

use crate::types::api::{CATEGORIES, CategoriesResponse, HealthResponse};

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        message: "API is running",
    })
}

pub async fn categories() -> Json<CategoriesResponse> {
    Json(CategoriesResponse {
        categories: CATEGORIES,
    })
}
