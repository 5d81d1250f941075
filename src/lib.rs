//! Polling backend with a single-vote-per-user ledger, live result
//! aggregation, and a client-side view controller that drives it.
//!
//! The service keeps everything in process memory: registered users, the
//! seeded poll catalog and the vote ledger. Sessions are signed tokens
//! carried as a cookie or a bearer header.

use std::time::Instant;

use axum::{
    http::{HeaderValue, Method},
    response::Json,
    routing::get,
    Router,
};
use once_cell::sync::Lazy;
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod client;
pub mod config;
pub mod controllers;
pub mod db;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod utils;

use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};

static START_TIME: Lazy<Instant> = Lazy::new(Instant::now);

/// Builds the full router: health, auth and poll routes behind CORS and tracing.
pub fn app(state: AppState) -> AppResult<Router> {
    Lazy::force(&START_TIME);

    let origin = state
        .config
        .cors_origin
        .parse::<HeaderValue>()
        .map_err(|_| {
            AppError::InternalError(format!(
                "Failed to parse CORS origin: {}",
                state.config.cors_origin
            ))
        })?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
            axum::http::header::AUTHORIZATION,
            axum::http::header::COOKIE,
        ])
        .allow_credentials(true);

    Ok(Router::new()
        .route("/", get(root))
        .nest("/api/auth", routes::auth_routes::auth_routes(state.clone()))
        .nest("/api/polls", routes::poll_routes::poll_routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(cors))
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": format!(
            "Backend is running! Uptime: {}",
            format_uptime(START_TIME.elapsed().as_secs())
        )
    }))
}

fn format_uptime(seconds: u64) -> String {
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 0 {
        format!("{}d {}h {}m {}s", days, hours % 24, minutes % 60, seconds % 60)
    } else if hours > 0 {
        format!("{}h {}m {}s", hours, minutes % 60, seconds % 60)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds % 60)
    } else {
        format!("{}s", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(5), "5s");
        assert_eq!(format_uptime(65), "1m 5s");
        assert_eq!(format_uptime(3_725), "1h 2m 5s");
        assert_eq!(format_uptime(90_061), "1d 1h 1m 1s");
    }
}
