use axum::{Json, extract::State};

use crate::error::AppError;
use crate::middleware::{JsonBody, RequireAdmin};
use crate::service::AuthService;
use crate::types::api::{AdminProfile, LoginRequest, LoginResponse};

/// POST /api/auth/login
pub async fn login(
    State(auth): State<AuthService>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let (username, password) = req.into_credentials()?;
    let outcome = auth.login(&username, &password).await?;
    Ok(Json(LoginResponse {
        token: outcome.token,
        admin: outcome.admin,
    }))
}

/// GET /api/auth/profile
pub async fn profile(
    State(auth): State<AuthService>,
    RequireAdmin(admin_id): RequireAdmin,
) -> Result<Json<AdminProfile>, AppError> {
    Ok(Json(auth.profile(admin_id).await?))
}
