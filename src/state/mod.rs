use std::sync::Arc;

use crate::config::Config;
use crate::db::Database;
use crate::utils::{error::AppResult, session::SessionTokens};

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub tokens: Arc<SessionTokens>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: Database, config: Config) -> AppResult<Self> {
        let tokens = SessionTokens::new(&config.session_secret, config.session_ttl_hours)?;
        Ok(Self {
            db: Arc::new(db),
            tokens: Arc::new(tokens),
            config: Arc::new(config),
        })
    }
}
