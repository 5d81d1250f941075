use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OptionResult {
    pub option_id: String,
    pub text: String,
    pub votes: u32,
    pub percentage: f64,
}

/// Aggregated tallies for one poll. Never stored, always recomputed.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ResultSnapshot {
    pub poll_id: String,
    pub options: Vec<OptionResult>,
    pub total_votes: u32,
    pub computed_at: DateTime<Utc>,
}

impl ResultSnapshot {
    pub fn votes_for(&self, option_id: &str) -> Option<u32> {
        self.options
            .iter()
            .find(|result| result.option_id == option_id)
            .map(|result| result.votes)
    }

    pub fn vote_count_label(&self) -> String {
        match self.total_votes {
            1 => "1 vote".to_string(),
            n => format!("{} votes", n),
        }
    }
}

pub fn percentage(votes: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (votes as f64 * 1000.0 / total as f64).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(total_votes: u32) -> ResultSnapshot {
        ResultSnapshot {
            poll_id: "p".into(),
            options: vec![],
            total_votes,
            computed_at: Utc::now(),
        }
    }

    #[test]
    fn test_vote_count_label() {
        assert_eq!(snapshot(0).vote_count_label(), "0 votes");
        assert_eq!(snapshot(1).vote_count_label(), "1 vote");
        assert_eq!(snapshot(12).vote_count_label(), "12 votes");
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(1, 3), 33.3);
        assert_eq!(percentage(2, 3), 66.7);
        assert_eq!(percentage(4, 4), 100.0);
    }
}
