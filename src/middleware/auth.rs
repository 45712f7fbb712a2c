use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use headers::{Authorization, authorization::Bearer};

use crate::error::AppError;
use crate::service::AuthService;

/// Authenticated administrator id.
///
/// Requires `Authorization: Bearer <token>`; any missing, malformed,
/// mis-signed or expired token rejects with 401 before the handler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequireAdmin(pub i64);

impl<S> FromRequestParts<S> for RequireAdmin
where
    AuthService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::Unauthorized)?;

        let auth = AuthService::from_ref(state);
        let admin_id = auth.verify_token(bearer.token())?;
        Ok(Self(admin_id))
    }
}
