use crate::db::models::{DbMessage, MessageStats, NewMessage};
use crate::db::sqlite::SqlitePool;
use crate::error::AppError;
use chrono::Utc;

const SELECT_MESSAGE: &str =
    "SELECT id, name, email, phone, message, status, created_at FROM messages";

/// Number of rows in `MessageStats::recent`.
pub const RECENT_LIMIT: i64 = 5;

/// Message store. Every read that returns a list is newest first.
#[derive(Clone)]
pub struct MessageStorage {
    pool: SqlitePool,
}

impl MessageStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: NewMessage) -> Result<DbMessage, AppError> {
        let msg = sqlx::query_as::<_, DbMessage>(
            r#"
            INSERT INTO messages (name, email, phone, message, status, created_at)
            VALUES (?, ?, ?, ?, 'new', ?)
            RETURNING id, name, email, phone, message, status, created_at
            "#,
        )
        .bind(new.name)
        .bind(new.email)
        .bind(new.phone)
        .bind(new.message)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(msg)
    }

    pub async fn get(&self, id: i64) -> Result<Option<DbMessage>, AppError> {
        let msg = sqlx::query_as::<_, DbMessage>(&format!("{SELECT_MESSAGE} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(msg)
    }

    pub async fn list(&self, status: Option<&str>) -> Result<Vec<DbMessage>, AppError> {
        let rows = match status {
            Some(status) => {
                sqlx::query_as::<_, DbMessage>(&format!(
                    "{SELECT_MESSAGE} WHERE status = ? ORDER BY created_at DESC, id DESC"
                ))
                .bind(status)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, DbMessage>(&format!(
                    "{SELECT_MESSAGE} ORDER BY created_at DESC, id DESC"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }

    /// Returns the number of rows touched; zero for an unknown id.
    pub async fn update_status(&self, id: i64, status: &str) -> Result<u64, AppError> {
        let result = sqlx::query("UPDATE messages SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Returns the number of rows removed; zero for an unknown id.
    pub async fn delete(&self, id: i64) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM messages WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn stats(&self) -> Result<MessageStats, AppError> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM messages")
            .fetch_one(&self.pool)
            .await?;
        let (new,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM messages WHERE status = 'new'")
            .fetch_one(&self.pool)
            .await?;
        let recent = sqlx::query_as::<_, DbMessage>(&format!(
            "{SELECT_MESSAGE} ORDER BY created_at DESC, id DESC LIMIT ?"
        ))
        .bind(RECENT_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(MessageStats { total, new, recent })
    }
}
