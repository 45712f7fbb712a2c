use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use tracing::info;

use crate::db::{MessageStorage, NewMessage};
use crate::error::AppError;
use crate::middleware::{JsonBody, MessageId, RequireAdmin};
use crate::types::api::{
    AckResponse, CreateMessageRequest, CreatedResponse, ListMessagesQuery, MessageResponse,
    MessagesResponse, UpdateStatusRequest,
};

/// GET /api/messages
pub async fn list_messages(
    State(messages): State<MessageStorage>,
    RequireAdmin(_): RequireAdmin,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<MessagesResponse>, AppError> {
    let query = ListMessagesQuery::from_pairs(pairs);
    let messages = messages.list(query.status_filter()).await?;
    Ok(Json(MessagesResponse { messages }))
}

/// POST /api/messages (public contact form)
pub async fn create_message(
    State(messages): State<MessageStorage>,
    JsonBody(req): JsonBody<CreateMessageRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let new = NewMessage::try_from(req)?;
    let msg = messages.create(new).await?;
    info!(message_id = msg.id, "contact message stored");
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Message sent successfully",
            id: msg.id,
        }),
    ))
}

/// GET /api/messages/{id}
///
/// The id is checked before the token, so a non-numeric id is 404 even unauthenticated.
pub async fn get_message(
    State(messages): State<MessageStorage>,
    MessageId(id): MessageId,
    RequireAdmin(_): RequireAdmin,
) -> Result<Json<MessageResponse>, AppError> {
    let message = messages
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Message not found".to_string()))?;
    Ok(Json(MessageResponse { message }))
}

/// PUT /api/messages/{id}
///
/// Unknown ids still answer 200.
pub async fn update_message(
    State(messages): State<MessageStorage>,
    MessageId(id): MessageId,
    RequireAdmin(admin_id): RequireAdmin,
    JsonBody(req): JsonBody<UpdateStatusRequest>,
) -> Result<Json<AckResponse>, AppError> {
    let status = req.into_status()?;
    let touched = messages.update_status(id, &status).await?;
    info!(admin_id, message_id = id, status = %status, touched, "message status updated");
    Ok(Json(AckResponse {
        message: "Message updated",
    }))
}

/// DELETE /api/messages/{id}
///
/// Unknown ids still answer 200.
pub async fn delete_message(
    State(messages): State<MessageStorage>,
    MessageId(id): MessageId,
    RequireAdmin(admin_id): RequireAdmin,
) -> Result<Json<AckResponse>, AppError> {
    let removed = messages.delete(id).await?;
    info!(admin_id, message_id = id, removed, "message deleted");
    Ok(Json(AckResponse {
        message: "Message deleted",
    }))
}
