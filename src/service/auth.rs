use crate::db::AdminStorage;
use crate::error::AppError;
use crate::service::password::verify_password;
use crate::service::token::TokenManager;
use crate::types::api::AdminProfile;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub admin: AdminProfile,
}

/// Credential checks and bearer-token lifecycle, independent of HTTP.
#[derive(Clone)]
pub struct AuthService {
    admins: AdminStorage,
    tokens: TokenManager,
}

impl AuthService {
    pub fn new(admins: AdminStorage, tokens: TokenManager) -> Self {
        Self { admins, tokens }
    }

    /// Unknown usernames and wrong passwords both yield `InvalidCredentials`.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, AppError> {
        let Some(admin) = self.admins.find_by_username(username).await? else {
            info!(username, "login rejected");
            return Err(AppError::InvalidCredentials);
        };
        if !verify_password(password, &admin.password_hash) {
            info!(username, "login rejected");
            return Err(AppError::InvalidCredentials);
        }

        let token = self.issue_token(admin.id)?;
        info!(admin_id = admin.id, "login succeeded");
        Ok(LoginOutcome {
            token,
            admin: admin.into(),
        })
    }

    pub fn issue_token(&self, admin_id: i64) -> Result<String, AppError> {
        Ok(self.tokens.issue(admin_id)?)
    }

    pub fn verify_token(&self, token: &str) -> Result<i64, AppError> {
        let claims = self.tokens.validate(token).map_err(|e| {
            debug!(error = %e, "token rejected");
            AppError::Unauthorized
        })?;
        claims.sub.parse().map_err(|_| AppError::Unauthorized)
    }

    pub async fn profile(&self, admin_id: i64) -> Result<AdminProfile, AppError> {
        self.admins
            .find_by_id(admin_id)
            .await?
            .map(AdminProfile::from)
            .ok_or_else(|| AppError::NotFound("Admin not found".to_string()))
    }
}
