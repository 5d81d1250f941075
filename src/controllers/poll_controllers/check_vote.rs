use axum::{
    extract::{Extension, Path, State},
    Json,
};

use crate::controllers::poll_controllers::models::CheckVoteResponse;
use crate::state::AppState;
use crate::utils::error::AppResult;
use crate::utils::session::Claims;

pub async fn check_user_vote(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<Json<CheckVoteResponse>> {
    let vote_record = state.db.get_user_vote(&claims.sub, &poll_id)?;

    Ok(Json(CheckVoteResponse {
        has_voted: vote_record.is_some(),
        option_id: vote_record.map(|record| record.option_id),
    }))
}
