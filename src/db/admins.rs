use crate::config::SeedAdmin;
use crate::db::models::DbAdmin;
use crate::db::sqlite::SqlitePool;
use crate::error::AppError;
use crate::service::password::hash_password;
use chrono::Utc;
use tracing::info;

/// Credential store. Administrators are only ever read or seeded.
#[derive(Clone)]
pub struct AdminStorage {
    pool: SqlitePool,
}

impl AdminStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<DbAdmin>, AppError> {
        let admin = sqlx::query_as::<_, DbAdmin>(
            "SELECT id, username, password_hash, email, created_at FROM admins WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(admin)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<DbAdmin>, AppError> {
        let admin = sqlx::query_as::<_, DbAdmin>(
            "SELECT id, username, password_hash, email, created_at FROM admins WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(admin)
    }

    /// Insert the seed administrator unless its username is already present.
    /// Returns true when a row was created.
    pub async fn ensure_seed_admin(&self, seed: &SeedAdmin) -> Result<bool, AppError> {
        if self.find_by_username(&seed.username).await?.is_some() {
            return Ok(false);
        }

        let password_hash = hash_password(&seed.password)?;
        let result = sqlx::query(
            r#"
            INSERT INTO admins (username, password_hash, email, created_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(username) DO NOTHING
            "#,
        )
        .bind(&seed.username)
        .bind(password_hash)
        .bind(&seed.email)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        let created = result.rows_affected() == 1;
        if created {
            info!(username = %seed.username, "seeded default administrator");
        }
        Ok(created)
    }
}
