//! In-process `PollApi` that calls the route handlers directly.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::extract::{Extension, Path, State};
use axum::Json;

use crate::client::api::{ClientError, ClientResult, PollApi};
use crate::config::Config;
use crate::controllers::auth_controllers::models::AuthResponse;
use crate::controllers::poll_controllers::{
    cast_vote, check_vote, get_results,
    models::{CastVoteRequest, CastVoteResponse, CheckVoteResponse, PollResponse},
    polls,
};
use crate::db::{catalog::PollCatalog, Database};
use crate::middleware::jwt::resolve_session;
use crate::models::{results_models::ResultSnapshot, user_models::User};
use crate::state::AppState;
use crate::utils::{error::AppError, session::Claims};

impl From<AppError> for ClientError {
    fn from(err: AppError) -> Self {
        ClientError::Api {
            status: err.status().as_u16(),
            code: err.code().to_string(),
            message: err.message().to_string(),
        }
    }
}

fn unavailable() -> ClientError {
    ClientError::Api {
        status: 503,
        code: "UNAVAILABLE".to_string(),
        message: "Service unavailable".to_string(),
    }
}

pub struct LocalApi {
    pub state: AppState,
    results_calls: AtomicUsize,
    fail_results: AtomicBool,
    results_delay_ms: AtomicU64,
    offline: AtomicBool,
}

impl LocalApi {
    pub fn seeded() -> Self {
        Self {
            state: AppState::new(Database::new(PollCatalog::seeded()), Config::default())
                .expect("default session keys"),
            results_calls: AtomicUsize::new(0),
            fail_results: AtomicBool::new(false),
            results_delay_ms: AtomicU64::new(0),
            offline: AtomicBool::new(false),
        }
    }

    pub fn results_calls(&self) -> usize {
        self.results_calls.load(Ordering::SeqCst)
    }

    pub fn fail_results(&self, fail: bool) {
        self.fail_results.store(fail, Ordering::SeqCst);
    }

    pub fn delay_results(&self, delay: Duration) {
        self.results_delay_ms.store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    /// Every read fails with a non-auth error while set.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn reachable(&self) -> ClientResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(())
    }

    fn claims(&self, token: &str) -> ClientResult<Claims> {
        self.reachable()?;
        Ok(resolve_session(&self.state, token)?)
    }

    fn session(&self, user: User, message: &str) -> ClientResult<AuthResponse> {
        Ok(AuthResponse {
            success: true,
            message: message.to_string(),
            token: self.state.tokens.create_token(&user.username)?,
            username: user.username,
        })
    }
}

#[async_trait]
impl PollApi for LocalApi {
    async fn register(&self, username: &str) -> ClientResult<AuthResponse> {
        let user = self.state.db.sessions.register(username)?;
        self.session(user, "Welcome!")
    }

    async fn login(&self, username: &str) -> ClientResult<AuthResponse> {
        let user = self.state.db.sessions.login(username)?;
        self.session(user, "Welcome back!")
    }

    async fn logout(&self, token: &str) -> ClientResult<()> {
        if let Ok(claims) = self.state.tokens.verify_token(token) {
            self.state.db.sessions.revoke(&claims.jti, claims.exp);
        }
        Ok(())
    }

    async fn current_user(&self, token: &str) -> ClientResult<Option<String>> {
        self.reachable()?;
        Ok(resolve_session(&self.state, token).ok().map(|claims| claims.sub))
    }

    async fn list_polls(&self, token: &str) -> ClientResult<Vec<PollResponse>> {
        self.claims(token)?;
        let Json(polls) = polls::get_all_polls(State(self.state.clone())).await?;
        Ok(polls)
    }

    async fn check_vote(&self, token: &str, poll_id: &str) -> ClientResult<CheckVoteResponse> {
        let claims = self.claims(token)?;
        let Json(vote) = check_vote::check_user_vote(
            Path(poll_id.to_string()),
            State(self.state.clone()),
            Extension(claims),
        )
        .await?;
        Ok(vote)
    }

    async fn cast_vote(
        &self,
        token: &str,
        poll_id: &str,
        option_id: &str,
    ) -> ClientResult<CastVoteResponse> {
        let claims = self.claims(token)?;
        let Json(response) = cast_vote::cast_vote(
            Path(poll_id.to_string()),
            State(self.state.clone()),
            Extension(claims),
            Json(CastVoteRequest {
                option_id: option_id.to_string(),
            }),
        )
        .await?;
        Ok(response)
    }

    async fn results(&self, token: &str, poll_id: &str) -> ClientResult<ResultSnapshot> {
        self.results_calls.fetch_add(1, Ordering::SeqCst);
        let delay = self.results_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        if self.fail_results.load(Ordering::SeqCst) {
            return Err(unavailable());
        }

        self.claims(token)?;
        let Json(snapshot) =
            get_results::get_results(Path(poll_id.to_string()), State(self.state.clone())).await?;
        Ok(snapshot)
    }
}
