pub mod catalog;
pub mod ledger;
pub mod results;
pub mod sessions;

use tracing::info;

use crate::config::Config;
use crate::models::{
    poll_models::Poll, results_models::ResultSnapshot, vote_record_models::VoteRecord,
};
use crate::utils::error::{AppError, AppResult};
use catalog::PollCatalog;
use ledger::{VoteLedger, VoteOutcome};
use sessions::SessionStore;

/// In-process store backing every route.
pub struct Database {
    pub sessions: SessionStore,
    pub polls: PollCatalog,
    pub votes: VoteLedger,
}

impl Database {
    pub fn new(polls: PollCatalog) -> Self {
        Self {
            sessions: SessionStore::new(),
            polls,
            votes: VoteLedger::new(),
        }
    }

    /// Validates the (poll, option) pair, then upserts the user's vote.
    pub fn cast_or_change_vote(
        &self,
        user_id: &str,
        poll_id: &str,
        option_id: &str,
    ) -> AppResult<VoteOutcome> {
        let poll = self.polls.get_poll(poll_id)?;

        if poll.option(option_id).is_none() {
            return Err(AppError::ValidationError(
                "Invalid option ID for this poll".to_string(),
            ));
        }

        Ok(self.votes.upsert(user_id, poll_id, option_id))
    }

    pub fn get_user_vote(&self, user_id: &str, poll_id: &str) -> AppResult<Option<VoteRecord>> {
        self.polls.get_poll(poll_id)?;
        Ok(self.votes.get_user_vote(user_id, poll_id))
    }

    pub fn compute_results(&self, poll_id: &str) -> AppResult<ResultSnapshot> {
        let poll = self.polls.get_poll(poll_id)?;
        Ok(results::compute_results(poll, &self.votes))
    }

    pub fn list_polls(&self) -> &[Poll] {
        self.polls.list_polls()
    }
}

pub fn init_db(config: &Config) -> AppResult<Database> {
    let catalog = match &config.polls_file {
        Some(path) => PollCatalog::from_file(path)?,
        None => PollCatalog::seeded(),
    };

    info!("Poll catalog ready with {} polls", catalog.list_polls().len());

    Ok(Database::new(catalog))
}
