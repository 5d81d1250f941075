use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{debug, info};

use crate::state::AppState;
use crate::utils::{
    auth::extract_token,
    error::{AppError, AppResult},
};

/// Always succeeds; a missing or already-revoked token is not an error.
pub async fn logout(
    State(state): State<AppState>,
    cookie_jar: CookieJar,
    headers: HeaderMap,
) -> AppResult<Response> {
    match extract_token(&cookie_jar, &headers) {
        Some(token) => match state.tokens.verify_token(&token) {
            Ok(claims) => {
                state.db.sessions.revoke(&claims.jti, claims.exp);
                info!("Logout for: {}", claims.sub);
            }
            Err(e) => debug!("Logout with unusable token: {}", e),
        },
        None => debug!("Logout without a session"),
    }

    let mut resp = Json(serde_json::json!({
        "success": true,
        "message": "Logged out successfully"
    }))
    .into_response();

    resp.headers_mut().insert(
        SET_COOKIE,
        HeaderValue::from_str(&state.tokens.clear_cookie())
            .map_err(|e| {
                AppError::InternalError(format!("Failed to create cookie header: {}", e))
            })?,
    );

    Ok(resp)
}
