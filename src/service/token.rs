//! Bearer token issuance and validation (HS256 JWT).

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Administrator id, as a decimal string.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct TokenManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenManager {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    pub fn issue(&self, admin_id: i64) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = Claims {
            sub: admin_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)
    }

    /// Signature and expiry are checked with zero leeway.
    pub fn validate(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::default();
        validation.leeway = 0;
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> TokenManager {
        TokenManager::new(b"test-secret", Duration::hours(24))
    }

    #[test]
    fn issue_and_validate() {
        let tm = manager();
        let token = tm.issue(7).unwrap();
        let claims = tm.validate(&token).unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = manager().issue(1).unwrap();
        let other = TokenManager::new(b"other-secret", Duration::hours(24));
        assert!(other.validate(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let tm = TokenManager::new(b"test-secret", Duration::hours(-1));
        let token = tm.issue(1).unwrap();
        assert!(manager().validate(&token).is_err());
    }

    #[test]
    fn malformed_token_is_rejected() {
        assert!(manager().validate("not.a.jwt").is_err());
        assert!(manager().validate("").is_err());
    }
}
