use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;

use crate::state::AppState;
use crate::utils::{
    auth::extract_token,
    error::{AppError, AppResult},
    session::{Claims, TOKEN_LEEWAY_SECS},
};

/// Resolves a presented token to live claims, rejecting revoked sessions.
pub fn resolve_session(state: &AppState, token: &str) -> AppResult<Claims> {
    let claims = state.tokens.verify_token(token)?;
    ensure_session_live(state, &claims)?;
    Ok(claims)
}

/// Re-checks already verified claims. Long-lived responses call this between
/// writes so a logout or expiry ends them.
pub fn ensure_session_live(state: &AppState, claims: &Claims) -> AppResult<()> {
    let now = Utc::now().timestamp().max(0) as usize;
    if claims.exp + TOKEN_LEEWAY_SECS as usize <= now {
        return Err(AppError::AuthenticationError("Session has expired".to_string()));
    }

    if state.db.sessions.is_revoked(&claims.jti) {
        return Err(AppError::AuthenticationError("Session has been logged out".to_string()));
    }

    if state.db.sessions.get_user(&claims.sub).is_none() {
        return Err(AppError::AuthenticationError("Unknown session user".to_string()));
    }

    Ok(())
}

pub async fn jwt_auth(
    State(state): State<AppState>,
    cookie_jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(&cookie_jar, req.headers())
        .ok_or_else(|| AppError::AuthenticationError("No token found".to_string()))?;

    let claims = resolve_session(&state, &token)?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
