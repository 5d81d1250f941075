use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::error::{AppError, AppResult};

pub const SESSION_COOKIE: &str = "token";

/// Clock skew tolerated on `exp`.
pub const TOKEN_LEEWAY_SECS: u64 = 60;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub jti: String,
}

/// Signs and verifies session tokens.
pub struct SessionTokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl SessionTokens {
    pub fn new(secret: &str, ttl_hours: i64) -> AppResult<Self> {
        let ttl = Duration::try_hours(ttl_hours).ok_or_else(|| {
            AppError::InternalError(format!("Session TTL of {} hours is out of range", ttl_hours))
        })?;

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        })
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl.num_seconds()
    }

    pub fn create_token(&self, username: &str) -> AppResult<String> {
        let expiration = Utc::now()
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::InternalError("Session expiry overflow".to_string()))?
            .timestamp();

        let claims = Claims {
            sub: username.to_string(),
            exp: expiration as usize,
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::InternalError(format!("Failed to create session token: {}", e)))
    }

    pub fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let mut validation = Validation::default();
        validation.leeway = TOKEN_LEEWAY_SECS;

        let claims = decode::<Claims>(token, &self.decoding, &validation).map(|data| data.claims)?;
        Ok(claims)
    }

    pub fn set_cookie(&self, token: &str) -> String {
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            SESSION_COOKIE,
            token,
            self.ttl_seconds()
        )
    }

    pub fn clear_cookie(&self) -> String {
        format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        let tokens = SessionTokens::new("test-secret", 1).unwrap();
        let token = tokens.create_token("alice").unwrap();
        let claims = tokens.verify_token(&token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_tokens_are_unique_per_issue() {
        let tokens = SessionTokens::new("test-secret", 1).unwrap();
        let a = tokens.verify_token(&tokens.create_token("alice").unwrap()).unwrap();
        let b = tokens.verify_token(&tokens.create_token("alice").unwrap()).unwrap();
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = SessionTokens::new("one", 1).unwrap().create_token("alice").unwrap();
        let result = SessionTokens::new("two", 1).unwrap().verify_token(&token);
        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }

    #[test]
    fn test_expired_token_rejected() {
        let tokens = SessionTokens::new("test-secret", -2).unwrap();
        let token = tokens.create_token("alice").unwrap();
        assert!(tokens.verify_token(&token).is_err());
    }

    #[test]
    fn test_oversized_ttl_is_an_error() {
        let result = SessionTokens::new("test-secret", 9_000_000_000_000_000);
        assert!(matches!(result, Err(AppError::InternalError(_))));
    }
}
