use axum::{
    extract::{Extension, Path, State},
    Json,
};
use tracing::info;

use crate::controllers::poll_controllers::models::{CastVoteRequest, CastVoteResponse};
use crate::state::AppState;
use crate::utils::error::AppResult;
use crate::utils::session::Claims;

/// Casts a first vote or replaces the caller's existing one.
pub async fn cast_vote(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CastVoteRequest>,
) -> AppResult<Json<CastVoteResponse>> {
    let outcome = state
        .db
        .cast_or_change_vote(&claims.sub, &poll_id, &payload.option_id)?;

    let changed = match &outcome.previous_option {
        Some(previous) => {
            info!(
                "{} changed vote on {}: {} -> {}",
                claims.sub, poll_id, previous, outcome.vote.option_id
            );
            true
        }
        None => {
            info!("{} voted {} on {}", claims.sub, outcome.vote.option_id, poll_id);
            false
        }
    };

    let poll = state.db.polls.get_poll(&poll_id)?;
    let label = poll
        .option(&outcome.vote.option_id)
        .map(|option| option.text.clone())
        .unwrap_or_else(|| outcome.vote.option_id.clone());

    let results = state.db.compute_results(&poll_id)?;

    Ok(Json(CastVoteResponse {
        success: true,
        message: format!("You voted for: {}", label),
        changed,
        vote: outcome.vote,
        results,
    }))
}
