use chrono::Duration;
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SECRET_KEY: &str = "your-secret-key-change-this";
pub const DEFAULT_JWT_SECRET_KEY: &str = "jwt-secret-key-change-this";
pub const DEFAULT_SEED_PASSWORD: &str = "admin123";

/// Administrator inserted on first startup when the `admins` table has no row
/// for `username`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeedAdmin {
    pub username: String,
    pub password: String,
    pub email: String,
}

impl Default for SeedAdmin {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: DEFAULT_SEED_PASSWORD.to_string(),
            email: "admin@jikonistudios.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub loglevel: String,
    /// General application secret. Nothing in the API signs with it.
    pub secret_key: String,
    /// HMAC secret for bearer tokens.
    pub jwt_secret_key: String,
    pub token_ttl_hours: i64,
    pub seed_admin: SeedAdmin,
    pub cors_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:jikonistudios.db".to_string(),
            listen_addr: "0.0.0.0:5000".to_string(),
            loglevel: "info".to_string(),
            secret_key: DEFAULT_SECRET_KEY.to_string(),
            jwt_secret_key: DEFAULT_JWT_SECRET_KEY.to_string(),
            token_ttl_hours: 24,
            seed_admin: SeedAdmin::default(),
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

impl Config {
    /// Defaults overlaid with process environment.
    ///
    /// `SEED_ADMIN_PASSWORD` and friends map onto the nested `seed_admin` table.
    pub fn load() -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(
                Env::raw()
                    .only(&[
                        "database_url",
                        "listen_addr",
                        "loglevel",
                        "secret_key",
                        "jwt_secret_key",
                        "token_ttl_hours",
                    ])
                    .lowercase(true),
            )
            .merge(
                Env::prefixed("SEED_ADMIN_")
                    .map(|key| format!("seed_admin.{}", key.as_str().to_ascii_lowercase()).into()),
            )
            .extract::<Config>()
            .and_then(|cfg| cfg.token_ttl().map(|_| cfg))
    }

    /// Bearer token lifetime. Must be positive and representable.
    pub fn token_ttl(&self) -> Result<Duration, figment::Error> {
        Duration::try_hours(self.token_ttl_hours)
            .filter(|ttl| *ttl > Duration::zero())
            .ok_or_else(|| {
                figment::Error::from(format!(
                    "token_ttl_hours must be a positive number of hours, got {}",
                    self.token_ttl_hours
                ))
            })
    }

    /// Names of secrets still set to their hardcoded fallbacks.
    pub fn insecure_defaults(&self) -> Vec<&'static str> {
        let mut hits = Vec::new();
        if self.secret_key == DEFAULT_SECRET_KEY {
            hits.push("SECRET_KEY");
        }
        if self.jwt_secret_key == DEFAULT_JWT_SECRET_KEY {
            hits.push("JWT_SECRET_KEY");
        }
        if self.seed_admin.password == DEFAULT_SEED_PASSWORD {
            hits.push("SEED_ADMIN_PASSWORD");
        }
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_are_flagged_insecure() {
        let cfg = Config::default();
        assert_eq!(
            cfg.insecure_defaults(),
            vec!["SECRET_KEY", "JWT_SECRET_KEY", "SEED_ADMIN_PASSWORD"]
        );
    }

    #[test]
    fn env_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.set_env("JWT_SECRET_KEY", "s3cret");
            jail.set_env("TOKEN_TTL_HOURS", "2");
            jail.set_env("SEED_ADMIN_PASSWORD", "hunter22");

            let cfg = Config::load()?;
            assert_eq!(cfg.jwt_secret_key, "s3cret");
            assert_eq!(cfg.token_ttl_hours, 2);
            assert_eq!(cfg.seed_admin.password, "hunter22");
            assert_eq!(cfg.seed_admin.username, "admin");
            assert_eq!(cfg.listen_addr, "0.0.0.0:5000");
            assert_eq!(cfg.insecure_defaults(), vec!["SECRET_KEY"]);
            Ok(())
        });
    }

    #[test]
    fn out_of_range_token_ttl_is_a_load_error() {
        Jail::expect_with(|jail| {
            jail.set_env("TOKEN_TTL_HOURS", i64::MAX.to_string());
            assert!(Config::load().is_err());

            jail.set_env("TOKEN_TTL_HOURS", "0");
            assert!(Config::load().is_err());

            jail.set_env("TOKEN_TTL_HOURS", "48");
            assert_eq!(Config::load()?.token_ttl().unwrap(), Duration::hours(48));
            Ok(())
        });
    }
}
