use axum::{middleware, routing::get, Router};

use crate::controllers::poll_controllers::{cast_vote, check_vote, get_poll, get_results, polls};
use crate::middleware::jwt::jwt_auth;
use crate::state::AppState;

/// Every poll route requires a session.
pub fn poll_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(polls::get_all_polls))
        .route("/:pollId", get(get_poll::get_poll))
        .route(
            "/:pollId/vote",
            get(check_vote::check_user_vote).post(cast_vote::cast_vote),
        )
        .route("/:pollId/results", get(get_results::get_results))
        .route("/:pollId/results/stream", get(get_results::poll_updates_stream))
        .route_layer(middleware::from_fn_with_state(state.clone(), jwt_auth))
        .with_state(state)
}
