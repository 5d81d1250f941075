use chrono::Utc;
use dashmap::DashMap;
use tracing::info;

use crate::models::user_models::User;
use crate::utils::error::{AppError, AppResult, EMPTY_USERNAME_MESSAGE};
use crate::utils::session::TOKEN_LEEWAY_SECS;

/// Trims the input and rejects blank usernames.
pub fn validate_username(username: &str) -> AppResult<&str> {
    let username = username.trim();
    if username.is_empty() {
        return Err(AppError::ValidationError(EMPTY_USERNAME_MESSAGE.to_string()));
    }
    Ok(username)
}

/// Registered users and revoked session ids. Lives for the process lifetime.
#[derive(Default)]
pub struct SessionStore {
    users: DashMap<String, User>,
    /// Session id to token expiry (unix seconds). Entries past expiry plus
    /// leeway are dropped, token validation rejects those on its own.
    revoked: DashMap<String, usize>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the user if absent. Registering a known name is not an error.
    pub fn register(&self, username: &str) -> AppResult<User> {
        let username = validate_username(username)?;

        let user = self
            .users
            .entry(username.to_string())
            .or_insert_with(|| {
                info!("Registered new user: {}", username);
                User {
                    username: username.to_string(),
                    created_at: Utc::now(),
                }
            })
            .clone();

        Ok(user)
    }

    pub fn login(&self, username: &str) -> AppResult<User> {
        let username = validate_username(username)?;

        self.users
            .get(username)
            .map(|user| user.clone())
            .ok_or_else(|| {
                AppError::NotFound(format!("User '{}' not found. Please register first", username))
            })
    }

    pub fn get_user(&self, username: &str) -> Option<User> {
        self.users.get(username).map(|user| user.clone())
    }

    pub fn revoke(&self, session_id: &str, expires_at: usize) {
        let cutoff = Utc::now().timestamp().max(0) as usize;
        let cutoff = cutoff.saturating_sub(TOKEN_LEEWAY_SECS as usize);
        self.revoked.retain(|_, exp| *exp > cutoff);
        if expires_at > cutoff {
            self.revoked.insert(session_id.to_string(), expires_at);
        }
    }

    pub fn is_revoked(&self, session_id: &str) -> bool {
        self.revoked.contains_key(session_id)
    }

    #[cfg(test)]
    fn user_count(&self) -> usize {
        self.users.len()
    }
}
