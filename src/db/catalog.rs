use std::collections::HashSet;
use std::path::Path;

use chrono::Utc;
use tracing::info;

use crate::models::poll_models::{Poll, PollOption};
use crate::utils::error::{AppError, AppResult};

/// Fixed, ordered set of polls. Read-only once built.
pub struct PollCatalog {
    polls: Vec<Poll>,
}

impl PollCatalog {
    pub fn new(polls: Vec<Poll>) -> AppResult<Self> {
        let mut poll_ids = HashSet::new();

        for poll in &polls {
            if !poll_ids.insert(poll.id.as_str()) {
                return Err(AppError::ValidationError(format!(
                    "Duplicate poll id '{}'",
                    poll.id
                )));
            }

            if poll.options.len() < 2 {
                return Err(AppError::ValidationError(format!(
                    "Poll '{}' must have at least 2 options",
                    poll.id
                )));
            }

            let mut option_ids = HashSet::new();
            for option in &poll.options {
                if !option_ids.insert(option.id.as_str()) {
                    return Err(AppError::ValidationError(format!(
                        "Poll '{}' has duplicate option id '{}'",
                        poll.id, option.id
                    )));
                }
            }
        }

        Ok(Self { polls })
    }

    pub fn seeded() -> Self {
        Self { polls: default_polls() }
    }

    pub fn from_file(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let polls: Vec<Poll> = serde_json::from_str(&raw)?;
        info!("Loaded {} polls from {}", polls.len(), path.display());
        Self::new(polls)
    }

    pub fn list_polls(&self) -> &[Poll] {
        &self.polls
    }

    pub fn get_poll(&self, poll_id: &str) -> AppResult<&Poll> {
        self.polls
            .iter()
            .find(|poll| poll.id == poll_id)
            .ok_or_else(|| AppError::NotFound("Poll not found".to_string()))
    }
}

fn poll(id: &str, question: &str, options: &[(&str, &str)]) -> Poll {
    Poll {
        id: id.to_string(),
        question: question.to_string(),
        options: options
            .iter()
            .map(|(id, text)| PollOption {
                id: id.to_string(),
                text: text.to_string(),
            })
            .collect(),
        created_at: Utc::now(),
    }
}

fn default_polls() -> Vec<Poll> {
    vec![
        poll(
            "favorite-language",
            "What is your favorite programming language?",
            &[
                ("rust", "Rust"),
                ("python", "Python"),
                ("javascript", "JavaScript"),
                ("go", "Go"),
            ],
        ),
        poll(
            "best-editor",
            "Which code editor do you use most?",
            &[("vscode", "VS Code"), ("vim", "Vim / Neovim"), ("jetbrains", "JetBrains IDE")],
        ),
        poll(
            "work-style",
            "Where do you prefer to work?",
            &[("remote", "Remote"), ("office", "Office"), ("hybrid", "Hybrid")],
        ),
        poll(
            "coffee-or-tea",
            "Coffee or tea?",
            &[("coffee", "Coffee"), ("tea", "Tea"), ("neither", "Neither")],
        ),
    ]
}
