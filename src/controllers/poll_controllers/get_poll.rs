use axum::{
    extract::{Path, State},
    Json,
};

use crate::controllers::poll_controllers::models::PollResponse;
use crate::state::AppState;
use crate::utils::error::AppResult;

pub async fn get_poll(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<PollResponse>> {
    let poll = state.db.polls.get_poll(&poll_id)?;
    let results = state.db.compute_results(&poll_id)?;

    Ok(Json(PollResponse::from_poll(poll, results.total_votes)))
}
