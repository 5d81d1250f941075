use std::collections::HashMap;

use chrono::Utc;

use crate::db::ledger::VoteLedger;
use crate::models::poll_models::Poll;
use crate::models::results_models::{percentage, OptionResult, ResultSnapshot};

/// Tallies every live vote on `poll`, across all users, in catalog order.
pub fn compute_results(poll: &Poll, ledger: &VoteLedger) -> ResultSnapshot {
    let mut counts: HashMap<String, u32> = HashMap::new();
    for vote in ledger.votes_for_poll(&poll.id) {
        *counts.entry(vote.option_id).or_default() += 1;
    }

    let total_votes: u32 = poll
        .options
        .iter()
        .map(|option| counts.get(&option.id).copied().unwrap_or(0))
        .sum();

    let options = poll
        .options
        .iter()
        .map(|option| {
            let votes = counts.get(&option.id).copied().unwrap_or(0);
            OptionResult {
                option_id: option.id.clone(),
                text: option.text.clone(),
                votes,
                percentage: percentage(votes, total_votes),
            }
        })
        .collect();

    ResultSnapshot {
        poll_id: poll.id.clone(),
        options,
        total_votes,
        computed_at: Utc::now(),
    }
}
