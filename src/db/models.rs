use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbAdmin {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A contact-form submission as stored and as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct DbMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Validated input for a new message.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMessage {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageStats {
    pub total: i64,
    pub new: i64,
    pub recent: Vec<DbMessage>,
}
