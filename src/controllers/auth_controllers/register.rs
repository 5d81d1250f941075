use axum::{extract::State, response::Response, Json};
use tracing::info;

use crate::{
    controllers::auth_controllers::{models::UsernameRequest, start_session},
    state::AppState,
    utils::error::AppResult,
};

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<UsernameRequest>,
) -> AppResult<Response> {
    let user = state.db.sessions.register(&body.username)?;

    info!("Session started for {} via register", user.username);

    start_session(&state, &user, format!("Welcome, {}!", user.username))
}
