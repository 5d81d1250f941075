use axum::{
    routing::{get, post},
    Router,
};

use crate::controllers::auth_controllers::{login, logout, me, register};
use crate::state::AppState;

pub fn auth_routes(state: AppState) -> Router {
    Router::new()
        .route("/register", post(register::register))
        .route("/login", post(login::login))
        .route("/logout", post(logout::logout))
        .route("/me", get(me::current_user))
        .with_state(state)
}
