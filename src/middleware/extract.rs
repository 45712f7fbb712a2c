use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON body whose rejections surface as `AppError` instead of axum's
/// plain-text 4xx responses.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::MalformedBody(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Non-negative integer `{id}` segment. Anything else behaves as an unmatched route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageId(pub i64);

impl MessageId {
    fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        raw.parse().ok().map(Self)
    }
}

impl<S> FromRequestParts<S> for MessageId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound("Not found".to_string()))?;
        Self::parse(&raw).ok_or_else(|| AppError::NotFound("Not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_id_accepts_only_digits() {
        assert_eq!(MessageId::parse("42"), Some(MessageId(42)));
        assert_eq!(MessageId::parse("007"), Some(MessageId(7)));
        assert_eq!(MessageId::parse("-1"), None);
        assert_eq!(MessageId::parse("abc"), None);
        assert_eq!(MessageId::parse("1.5"), None);
        assert_eq!(MessageId::parse(""), None);
        assert_eq!(MessageId::parse("99999999999999999999999"), None);
    }
}
