//! Request and response payloads for the `/api` surface.

use crate::db::models::{DbAdmin, DbMessage, MessageStats, NewMessage};
use crate::error::AppError;
use serde::{Deserialize, Serialize};

pub const CATEGORIES: [&str; 4] = ["Kitchen", "Wardrobe", "Cabinetry", "Custom"];

/// Absent, null and empty strings all count as missing.
fn present(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.is_empty())
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn into_credentials(self) -> Result<(String, String), AppError> {
        match (present(self.username), present(self.password)) {
            (Some(u), Some(p)) => Ok((u, p)),
            _ => Err(AppError::Validation(
                "Username and password required".to_string(),
            )),
        }
    }
}

/// Contact-form field. Numbers and booleans are stored as their text form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FormField {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl FormField {
    /// Empty text, zero and `false` count as not filled in.
    fn is_blank(&self) -> bool {
        match self {
            FormField::Text(s) => s.is_empty(),
            FormField::Int(n) => *n == 0,
            FormField::Float(f) => *f == 0.0,
            FormField::Bool(b) => !*b,
        }
    }
}

impl From<FormField> for String {
    fn from(f: FormField) -> Self {
        match f {
            FormField::Text(s) => s,
            FormField::Int(n) => n.to_string(),
            FormField::Float(x) => x.to_string(),
            FormField::Bool(b) => u8::from(b).to_string(),
        }
    }
}

fn filled(field: Option<FormField>) -> Option<String> {
    field.filter(|f| !f.is_blank()).map(String::from)
}

#[derive(Debug, Deserialize)]
pub struct CreateMessageRequest {
    #[serde(default)]
    pub name: Option<FormField>,
    #[serde(default)]
    pub email: Option<FormField>,
    #[serde(default)]
    pub phone: Option<FormField>,
    #[serde(default)]
    pub message: Option<FormField>,
}

impl TryFrom<CreateMessageRequest> for NewMessage {
    type Error = AppError;

    fn try_from(req: CreateMessageRequest) -> Result<Self, Self::Error> {
        match (filled(req.name), filled(req.email), filled(req.message)) {
            (Some(name), Some(email), Some(message)) => Ok(NewMessage {
                name,
                email,
                phone: req.phone.map(String::from).unwrap_or_default(),
                message,
            }),
            _ => Err(AppError::Validation(
                "Name, email, and message are required".to_string(),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: Option<String>,
}

impl UpdateStatusRequest {
    pub fn into_status(self) -> Result<String, AppError> {
        present(self.status).ok_or_else(|| AppError::Validation("Status is required".to_string()))
    }
}

#[derive(Debug, Default)]
pub struct ListMessagesQuery {
    pub status: Option<String>,
}

impl ListMessagesQuery {
    /// Built from raw query pairs; a repeated `status` keeps its first value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let status = pairs
            .into_iter()
            .find(|(k, _)| k == "status")
            .map(|(_, v)| v);
        Self { status }
    }

    /// `?status=` with an empty value does not filter.
    pub fn status_filter(&self) -> Option<&str> {
        self.status.as_deref().filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AdminProfile {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
}

impl From<DbAdmin> for AdminProfile {
    fn from(a: DbAdmin) -> Self {
        Self {
            id: a.id,
            username: a.username,
            email: a.email,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub admin: AdminProfile,
}

#[derive(Debug, Serialize)]
pub struct MessagesResponse {
    pub messages: Vec<DbMessage>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: DbMessage,
}

#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: &'static str,
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct StatsSummary {
    pub total_messages: i64,
    pub new_messages: i64,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub stats: StatsSummary,
    pub recent_messages: Vec<DbMessage>,
}

impl From<MessageStats> for StatsResponse {
    fn from(s: MessageStats) -> Self {
        Self {
            stats: StatsSummary {
                total_messages: s.total,
                new_messages: s.new,
            },
            recent_messages: s.recent,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: [&'static str; 4],
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_req(v: serde_json::Value) -> CreateMessageRequest {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn phone_defaults_to_empty() {
        let msg = NewMessage::try_from(create_req(
            serde_json::json!({"name": "A", "email": "a@x.com", "message": "hi"}),
        ))
        .unwrap();
        assert_eq!(msg.phone, "");
    }

    #[test]
    fn empty_or_missing_required_fields_fail() {
        for body in [
            serde_json::json!({"name": "A", "email": "a@x.com"}),
            serde_json::json!({"name": "", "email": "a@x.com", "message": "hi"}),
            serde_json::json!({"name": "A", "email": null, "message": "hi"}),
        ] {
            assert!(matches!(
                NewMessage::try_from(create_req(body)),
                Err(AppError::Validation(_))
            ));
        }
    }

    #[test]
    fn login_requires_both_fields() {
        let req: LoginRequest = serde_json::from_str(r#"{"username":"admin"}"#).unwrap();
        assert!(matches!(req.into_credentials(), Err(AppError::Validation(_))));
    }

    #[test]
    fn scalar_fields_are_stored_as_text() {
        let msg = NewMessage::try_from(create_req(serde_json::json!({
            "name": "A",
            "email": "a@x.com",
            "phone": 5551234,
            "message": 42,
        })))
        .unwrap();
        assert_eq!(msg.phone, "5551234");
        assert_eq!(msg.message, "42");

        let msg = NewMessage::try_from(create_req(serde_json::json!({
            "name": true,
            "email": "a@x.com",
            "phone": 0,
            "message": 1.5,
        })))
        .unwrap();
        assert_eq!(msg.name, "1");
        assert_eq!(msg.phone, "0");
        assert_eq!(msg.message, "1.5");
    }

    #[test]
    fn falsy_scalars_count_as_missing() {
        for body in [
            serde_json::json!({"name": 0, "email": "a@x.com", "message": "hi"}),
            serde_json::json!({"name": "A", "email": false, "message": "hi"}),
        ] {
            assert!(matches!(
                NewMessage::try_from(create_req(body)),
                Err(AppError::Validation(_))
            ));
        }
    }

    #[test]
    fn repeated_status_keeps_first_value() {
        let q = ListMessagesQuery::from_pairs(vec![
            ("page".to_string(), "2".to_string()),
            ("status".to_string(), "new".to_string()),
            ("status".to_string(), "read".to_string()),
        ]);
        assert_eq!(q.status_filter(), Some("new"));
        assert_eq!(ListMessagesQuery::from_pairs(Vec::new()).status_filter(), None);
    }

    #[test]
    fn empty_status_query_is_no_filter() {
        let q = ListMessagesQuery {
            status: Some(String::new()),
        };
        assert_eq!(q.status_filter(), None);
    }
}
