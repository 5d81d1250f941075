use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user's live choice on one poll.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct VoteRecord {
    pub id: Uuid,

    pub poll_id: String,

    pub user_id: String,

    pub option_id: String,

    pub cast_at: DateTime<Utc>,
}
