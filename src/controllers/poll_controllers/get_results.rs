use std::convert::Infallible;
use std::time::Duration;

use axum::{
    extract::{Extension, Path, State},
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::stream::{self, Stream};
use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::MIN_RESULTS_REFRESH;
use crate::middleware::jwt::ensure_session_live;
use crate::models::results_models::ResultSnapshot;
use crate::state::AppState;
use crate::utils::{error::AppResult, session::Claims};

pub async fn get_results(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<ResultSnapshot>> {
    Ok(Json(state.db.compute_results(&poll_id)?))
}

/// Emits a snapshot immediately, then once per refresh interval. Ends once
/// the caller's session is logged out or expires.
pub async fn poll_updates_stream(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    state.db.polls.get_poll(&poll_id)?;

    let interval = state.config.results_refresh.max(MIN_RESULTS_REFRESH);
    let seed = (state, claims, poll_id, true);

    let stream = stream::unfold(seed, move |(state, claims, poll_id, first)| async move {
        if !first {
            sleep(interval).await;
        }

        if let Err(e) = ensure_session_live(&state, &claims) {
            info!("Results stream for {} closed for {}: {}", poll_id, claims.sub, e);
            return None;
        }

        let snapshot = match state.db.compute_results(&poll_id) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Results stream for {} ended: {}", poll_id, e);
                return None;
            }
        };

        match serde_json::to_string(&snapshot) {
            Ok(json_data) => Some((
                Ok::<_, Infallible>(Event::default().event("results").data(json_data)),
                (state, claims, poll_id, false),
            )),
            Err(e) => {
                warn!("Failed to serialize results for {}: {}", poll_id, e);
                None
            }
        }
    });

    Ok(Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    ))
}
