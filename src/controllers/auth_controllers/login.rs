use axum::{extract::State, response::Response, Json};
use tracing::{info, warn};

use crate::{
    controllers::auth_controllers::{models::UsernameRequest, start_session},
    state::AppState,
    utils::error::AppResult,
};

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<UsernameRequest>,
) -> AppResult<Response> {
    let user = state.db.sessions.login(&body.username).map_err(|e| {
        warn!("Login failed for '{}': {}", body.username, e);
        e
    })?;

    info!("Session started for {} via login", user.username);

    start_session(&state, &user, format!("Welcome back, {}!", user.username))
}
