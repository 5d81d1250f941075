use axum::{extract::State, http::HeaderMap, Json};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    controllers::auth_controllers::models::SessionResponse,
    middleware::jwt::resolve_session,
    state::AppState,
    utils::auth::extract_token,
};

/// Current identity, or `authenticated: false` when there is none.
pub async fn current_user(
    State(state): State<AppState>,
    cookie_jar: CookieJar,
    headers: HeaderMap,
) -> Json<SessionResponse> {
    let username = extract_token(&cookie_jar, &headers)
        .and_then(|token| resolve_session(&state, &token).ok())
        .map(|claims| claims.sub);

    Json(SessionResponse {
        authenticated: username.is_some(),
        username,
    })
}
