use axum::{extract::State, Json};

use crate::controllers::poll_controllers::models::PollResponse;
use crate::db::results::compute_results;
use crate::state::AppState;
use crate::utils::error::AppResult;

pub async fn get_all_polls(State(state): State<AppState>) -> AppResult<Json<Vec<PollResponse>>> {
    let poll_responses: Vec<PollResponse> = state
        .db
        .list_polls()
        .iter()
        .map(|poll| {
            let total = compute_results(poll, &state.db.votes).total_votes;
            PollResponse::from_poll(poll, total)
        })
        .collect();

    Ok(Json(poll_responses))
}
