//! JWT token issuance and validation.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};

use super::claims::Claims;
use crate::config::AuthConfig;

/// Manages JWT token creation and validation.
#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
}

impl JwtManager {
    /// Create a new `JwtManager` with the given secret.
    pub fn new(secret: &[u8], access_ttl_secs: i64, refresh_ttl_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            access_ttl_secs,
            refresh_ttl_secs,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            config.jwt_secret.as_bytes(),
            config.access_ttl_secs,
            config.refresh_ttl_secs,
        )
    }

    /// Issue an access token for the given username.
    pub fn issue_access_token(
        &self,
        username: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue(username, "access", self.access_ttl_secs)
    }

    /// Issue a refresh token for the given username.
    pub fn issue_refresh_token(
        &self,
        username: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue(username, "refresh", self.refresh_ttl_secs)
    }

    fn issue(
        &self,
        username: &str,
        token_type: &str,
        ttl_secs: i64,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = now_secs();
        let claims = Claims {
            jti: uuid::Uuid::new_v4().to_string(),
            sub: username.to_string(),
            iat: now,
            exp: now + ttl_secs,
            token_type: token_type.to_string(),
        };

        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)
    }

    /// Validate a token's signature and expiry and return its claims.
    pub fn validate(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let data =
            jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &Validation::default())?;
        Ok(data.claims)
    }
}

fn now_secs() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_jwt() -> JwtManager {
        JwtManager::new(b"test-secret-key-for-testing", 3600, 86400)
    }

    #[test]
    fn issue_and_validate_access_token() {
        let jwt = test_jwt();
        let token = jwt.issue_access_token("alice").unwrap();

        let claims = jwt.validate(&token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert!(claims.is_access());
        assert!(!claims.is_refresh());
    }

    #[test]
    fn issue_and_validate_refresh_token() {
        let jwt = test_jwt();
        let token = jwt.issue_refresh_token("alice").unwrap();

        let claims = jwt.validate(&token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert!(claims.is_refresh());
    }

    #[test]
    fn invalid_token_fails_validation() {
        let jwt = test_jwt();
        assert!(jwt.validate("not-a-valid-token").is_err());
    }

    #[test]
    fn wrong_secret_fails_validation() {
        let jwt1 = test_jwt();
        let jwt2 = JwtManager::new(b"different-secret", 3600, 86400);

        let token = jwt1.issue_access_token("alice").unwrap();
        assert!(jwt2.validate(&token).is_err());
    }

    #[test]
    fn expired_token_fails_validation() {
        // jsonwebtoken's default leeway is 60s; go well past it.
        let jwt = JwtManager::new(b"test-secret-key-for-testing", -120, -120);
        let token = jwt.issue_access_token("alice").unwrap();
        assert!(jwt.validate(&token).is_err());
    }

    #[test]
    fn tokens_have_unique_ids() {
        let jwt = test_jwt();
        let t1 = jwt.issue_access_token("alice").unwrap();
        let t2 = jwt.issue_access_token("alice").unwrap();

        let c1 = jwt.validate(&t1).unwrap();
        let c2 = jwt.validate(&t2).unwrap();
        assert_ne!(c1.jti, c2.jti);
    }
}
