use chrono::Utc;
use dashmap::{mapref::entry::Entry, DashMap};
use uuid::Uuid;

use crate::models::vote_record_models::VoteRecord;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct VoteKey {
    poll_id: String,
    user_id: String,
}

impl VoteKey {
    fn new(user_id: &str, poll_id: &str) -> Self {
        Self {
            poll_id: poll_id.to_string(),
            user_id: user_id.to_string(),
        }
    }
}

/// Result of an upsert: the stored vote plus the option it replaced, if any.
#[derive(Debug, Clone)]
pub struct VoteOutcome {
    pub vote: VoteRecord,
    pub previous_option: Option<String>,
}

/// At most one vote per (user, poll). The upsert holds the key's shard lock,
/// so concurrent writers for the same pair are serialized (last writer wins).
#[derive(Default)]
pub struct VoteLedger {
    votes: DashMap<VoteKey, VoteRecord>,
}

impl VoteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Does not validate ids; callers check them against the catalog first.
    pub fn upsert(&self, user_id: &str, poll_id: &str, option_id: &str) -> VoteOutcome {
        let now = Utc::now();

        match self.votes.entry(VoteKey::new(user_id, poll_id)) {
            Entry::Occupied(mut entry) => {
                let record = entry.get_mut();
                let previous_option =
                    std::mem::replace(&mut record.option_id, option_id.to_string());
                record.cast_at = now;
                VoteOutcome {
                    vote: record.clone(),
                    previous_option: Some(previous_option),
                }
            }
            Entry::Vacant(entry) => {
                let record = entry.insert(VoteRecord {
                    id: Uuid::new_v4(),
                    poll_id: poll_id.to_string(),
                    user_id: user_id.to_string(),
                    option_id: option_id.to_string(),
                    cast_at: now,
                });
                VoteOutcome {
                    vote: record.clone(),
                    previous_option: None,
                }
            }
        }
    }

    pub fn get_user_vote(&self, user_id: &str, poll_id: &str) -> Option<VoteRecord> {
        self.votes
            .get(&VoteKey::new(user_id, poll_id))
            .map(|record| record.clone())
    }

    /// Snapshot of every live vote on a poll.
    pub fn votes_for_poll(&self, poll_id: &str) -> Vec<VoteRecord> {
        self.votes
            .iter()
            .filter(|entry| entry.key().poll_id == poll_id)
            .map(|entry| entry.value().clone())
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.votes.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }
}
