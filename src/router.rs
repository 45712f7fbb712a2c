use axum::{
    Router,
    extract::FromRef,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::Config;
use crate::db::{self, AdminStorage, MessageStorage, SqlitePool};
use crate::error::AppError;
use crate::handlers::{auth, dashboard, messages, meta};
use crate::service::{AuthService, TokenManager};

/// Shared per-request state. Cloning only clones pool handles and keys.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub messages: MessageStorage,
}

impl AppState {
    pub fn new(pool: SqlitePool, cfg: &Config) -> Result<Self, AppError> {
        let tokens = TokenManager::new(cfg.jwt_secret_key.as_bytes(), cfg.token_ttl()?);
        Ok(Self {
            auth: AuthService::new(AdminStorage::new(pool.clone()), tokens),
            messages: MessageStorage::new(pool),
        })
    }

    /// Open the database, create missing tables and seed the default administrator.
    pub async fn bootstrap(cfg: &Config) -> Result<Self, AppError> {
        cfg.token_ttl()?;
        let pool = db::connect(&cfg.database_url).await?;
        db::init_schema(&pool).await?;
        AdminStorage::new(pool.clone())
            .ensure_seed_admin(&cfg.seed_admin)
            .await?;
        Self::new(pool, cfg)
    }
}

impl FromRef<AppState> for AuthService {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

impl FromRef<AppState> for MessageStorage {
    fn from_ref(state: &AppState) -> Self {
        state.messages.clone()
    }
}

pub fn app_router(state: AppState, cfg: &Config) -> Router {
    let api = Router::new()
        .route("/health", get(meta::health))
        .route("/categories", get(meta::categories))
        .route("/auth/login", post(auth::login))
        .route("/auth/profile", get(auth::profile))
        .route(
            "/messages",
            get(messages::list_messages).post(messages::create_message),
        )
        .route(
            "/messages/{id}",
            get(messages::get_message)
                .put(messages::update_message)
                .delete(messages::delete_message),
        )
        .route("/dashboard/stats", get(dashboard::stats))
        .layer(cors_layer(&cfg.cors_origins));

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| {
            HeaderValue::from_str(o)
                .inspect_err(|e| warn!(origin = %o, error = %e, "ignoring invalid CORS origin"))
                .ok()
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}
