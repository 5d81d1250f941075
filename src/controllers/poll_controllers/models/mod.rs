use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{
    poll_models::{Poll, PollOption},
    results_models::ResultSnapshot,
    vote_record_models::VoteRecord,
};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PollResponse {
    pub id: String,
    pub question: String,
    pub options: Vec<PollOption>,
    pub created_at: DateTime<Utc>,
    pub total_votes: u32,
}

impl PollResponse {
    pub fn from_poll(poll: &Poll, total_votes: u32) -> Self {
        Self {
            id: poll.id.clone(),
            question: poll.question.clone(),
            options: poll.options.clone(),
            created_at: poll.created_at,
            total_votes,
        }
    }
}

#[derive(Deserialize, Serialize, Debug)]
pub struct CastVoteRequest {
    pub option_id: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CastVoteResponse {
    pub success: bool,
    pub message: String,
    pub changed: bool,
    pub vote: VoteRecord,
    pub results: ResultSnapshot,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CheckVoteResponse {
    pub has_voted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_id: Option<String>,
}
