pub mod login;
pub mod logout;
pub mod me;
pub mod models;
pub mod register;

use axum::{
    http::{header::SET_COOKIE, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};

use crate::models::user_models::User;
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};
use models::AuthResponse;

/// Issues a session token for `user`, returned both as a cookie and in the body.
pub(crate) fn start_session(state: &AppState, user: &User, message: String) -> AppResult<Response> {
    let token = state.tokens.create_token(&user.username)?;
    let cookie_value = state.tokens.set_cookie(&token);

    let response = AuthResponse {
        success: true,
        message,
        username: user.username.clone(),
        token,
    };

    let mut resp = Json(response).into_response();
    resp.headers_mut().insert(
        SET_COOKIE,
        HeaderValue::from_str(&cookie_value)
            .map_err(|e| {
                AppError::InternalError(format!("Failed to create cookie header: {}", e))
            })?,
    );

    Ok(resp)
}
