use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::controllers::auth_controllers::models::{AuthResponse, SessionResponse, UsernameRequest};
use crate::controllers::poll_controllers::models::{
    CastVoteRequest, CastVoteResponse, CheckVoteResponse, PollResponse,
};
use crate::models::results_models::ResultSnapshot;
use crate::utils::error::ErrorResponse;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },
}

impl ClientError {
    pub fn is_unauthenticated(&self) -> bool {
        matches!(
            self,
            ClientError::Api { status, .. } if *status == StatusCode::UNAUTHORIZED.as_u16()
        )
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            ClientError::Api { code, .. } => Some(code),
            ClientError::Http(_) => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Everything the view controller needs from the service.
#[async_trait]
pub trait PollApi: Send + Sync {
    async fn register(&self, username: &str) -> ClientResult<AuthResponse>;

    async fn login(&self, username: &str) -> ClientResult<AuthResponse>;

    async fn logout(&self, token: &str) -> ClientResult<()>;

    /// `None` when the token no longer maps to a session.
    async fn current_user(&self, token: &str) -> ClientResult<Option<String>>;

    async fn list_polls(&self, token: &str) -> ClientResult<Vec<PollResponse>>;

    async fn check_vote(&self, token: &str, poll_id: &str) -> ClientResult<CheckVoteResponse>;

    async fn cast_vote(
        &self,
        token: &str,
        poll_id: &str,
        option_id: &str,
    ) -> ClientResult<CastVoteResponse>;

    async fn results(&self, token: &str, poll_id: &str) -> ClientResult<ResultSnapshot>;
}

pub struct HttpPollApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPollApi {
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn parse<T: DeserializeOwned>(resp: Response) -> ClientResult<T> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json::<T>().await?);
        }

        Err(match resp.json::<ErrorResponse>().await {
            Ok(body) => ClientError::Api {
                status: status.as_u16(),
                code: body.error,
                message: body.message,
            },
            Err(_) => ClientError::Api {
                status: status.as_u16(),
                code: "HTTP_ERROR".to_string(),
                message: format!("Request failed with status {}", status),
            },
        })
    }

    async fn authenticate(&self, path: &str, username: &str) -> ClientResult<AuthResponse> {
        let resp = self
            .client
            .post(self.url(path))
            .json(&UsernameRequest {
                username: username.to_string(),
            })
            .send()
            .await?;
        Self::parse(resp).await
    }
}

#[async_trait]
impl PollApi for HttpPollApi {
    async fn register(&self, username: &str) -> ClientResult<AuthResponse> {
        self.authenticate("/api/auth/register", username).await
    }

    async fn login(&self, username: &str) -> ClientResult<AuthResponse> {
        self.authenticate("/api/auth/login", username).await
    }

    async fn logout(&self, token: &str) -> ClientResult<()> {
        let resp = self
            .client
            .post(self.url("/api/auth/logout"))
            .bearer_auth(token)
            .send()
            .await?;
        Self::parse::<serde_json::Value>(resp).await.map(|_| ())
    }

    async fn current_user(&self, token: &str) -> ClientResult<Option<String>> {
        let resp = self
            .client
            .get(self.url("/api/auth/me"))
            .bearer_auth(token)
            .send()
            .await?;
        let session: SessionResponse = Self::parse(resp).await?;
        Ok(session.username.filter(|_| session.authenticated))
    }

    async fn list_polls(&self, token: &str) -> ClientResult<Vec<PollResponse>> {
        let resp = self
            .client
            .get(self.url("/api/polls"))
            .bearer_auth(token)
            .send()
            .await?;
        Self::parse(resp).await
    }

    async fn check_vote(&self, token: &str, poll_id: &str) -> ClientResult<CheckVoteResponse> {
        let resp = self
            .client
            .get(self.url(&format!("/api/polls/{}/vote", poll_id)))
            .bearer_auth(token)
            .send()
            .await?;
        Self::parse(resp).await
    }

    async fn cast_vote(
        &self,
        token: &str,
        poll_id: &str,
        option_id: &str,
    ) -> ClientResult<CastVoteResponse> {
        let resp = self
            .client
            .post(self.url(&format!("/api/polls/{}/vote", poll_id)))
            .bearer_auth(token)
            .json(&CastVoteRequest {
                option_id: option_id.to_string(),
            })
            .send()
            .await?;
        Self::parse(resp).await
    }

    async fn results(&self, token: &str, poll_id: &str) -> ClientResult<ResultSnapshot> {
        let resp = self
            .client
            .get(self.url(&format!("/api/polls/{}/results", poll_id)))
            .bearer_auth(token)
            .send()
            .await?;
        Self::parse(resp).await
    }
}
