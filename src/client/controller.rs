use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::client::api::{ClientError, PollApi};
use crate::client::refresh::ResultsRefresher;
use crate::config::MIN_RESULTS_REFRESH;
use crate::controllers::auth_controllers::models::AuthResponse;
use crate::controllers::poll_controllers::models::PollResponse;
use crate::db::sessions::validate_username;
use crate::models::results_models::ResultSnapshot;

pub const RESULTS_HEADING: &str = "Live Results";
pub const CHANGE_VOTE_LABEL: &str = "Change Vote";

/// Identity held by the client. Serializable so it can outlive a reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    pub username: String,
    pub token: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Danger,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub kind: AlertKind,
    pub text: String,
}

impl Alert {
    fn success(text: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Success,
            text: text.into(),
        }
    }

    fn danger(text: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Danger,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Unauthenticated,
    PollsLoading,
    PollsReady,
}

enum PollViewState {
    NotVoted {
        selected: Option<String>,
    },
    Voted {
        choice: String,
        indicator: String,
        refresher: ResultsRefresher,
    },
}

/// One poll as rendered: either its voting form or its live results.
pub struct PollCard {
    pub poll: PollResponse,
    state: PollViewState,
}

impl PollCard {
    fn not_voted(poll: PollResponse, selected: Option<String>) -> Self {
        Self {
            poll,
            state: PollViewState::NotVoted { selected },
        }
    }

    pub fn id(&self) -> &str {
        &self.poll.id
    }

    pub fn is_voted(&self) -> bool {
        matches!(self.state, PollViewState::Voted { .. })
    }

    pub fn voting_form_visible(&self) -> bool {
        !self.is_voted()
    }

    pub fn selected_option(&self) -> Option<&str> {
        match &self.state {
            PollViewState::NotVoted { selected } => selected.as_deref(),
            PollViewState::Voted { .. } => None,
        }
    }

    pub fn voted_option(&self) -> Option<&str> {
        match &self.state {
            PollViewState::Voted { choice, .. } => Some(choice),
            PollViewState::NotVoted { .. } => None,
        }
    }

    /// "You voted for: ..." once voted.
    pub fn voted_indicator(&self) -> Option<&str> {
        match &self.state {
            PollViewState::Voted { indicator, .. } => Some(indicator),
            PollViewState::NotVoted { .. } => None,
        }
    }

    pub fn results_heading(&self) -> Option<&'static str> {
        self.is_voted().then_some(RESULTS_HEADING)
    }

    pub fn results(&self) -> Option<ResultSnapshot> {
        self.refresher().map(ResultsRefresher::latest)
    }

    pub fn vote_count_text(&self) -> Option<String> {
        self.results().map(|snapshot| snapshot.vote_count_label())
    }

    pub fn change_vote_label(&self) -> Option<&'static str> {
        self.is_voted().then_some(CHANGE_VOTE_LABEL)
    }

    pub fn refresher(&self) -> Option<&ResultsRefresher> {
        match &self.state {
            PollViewState::Voted { refresher, .. } => Some(refresher),
            PollViewState::NotVoted { .. } => None,
        }
    }

    fn option_text(&self, option_id: &str) -> String {
        self.poll
            .options
            .iter()
            .find(|option| option.id == option_id)
            .map(|option| option.text.clone())
            .unwrap_or_else(|| option_id.to_string())
    }
}

/// Drives the view through auth, poll listing, voting and live results.
/// Every error is caught here and surfaced as a danger alert.
pub struct ClientController {
    api: Arc<dyn PollApi>,
    refresh_interval: Duration,
    session: Option<SessionContext>,
    view: View,
    polls: Vec<PollCard>,
    alert: Option<Alert>,
}

impl ClientController {
    pub fn new(api: Arc<dyn PollApi>, refresh_interval: Duration) -> Self {
        Self {
            api,
            refresh_interval: refresh_interval.max(MIN_RESULTS_REFRESH),
            session: None,
            view: View::Unauthenticated,
            polls: Vec::new(),
            alert: None,
        }
    }

    /// Starts from a previously saved session; call [`reload`](Self::reload) to render it.
    pub fn with_session(
        api: Arc<dyn PollApi>,
        refresh_interval: Duration,
        session: SessionContext,
    ) -> Self {
        let mut controller = Self::new(api, refresh_interval);
        controller.session = Some(session);
        controller
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    pub fn session(&self) -> Option<&SessionContext> {
        self.session.as_ref()
    }

    pub fn current_user(&self) -> Option<&str> {
        self.session.as_ref().map(|session| session.username.as_str())
    }

    pub fn polls_visible(&self) -> bool {
        self.view == View::PollsReady
    }

    pub fn polls(&self) -> &[PollCard] {
        &self.polls
    }

    pub fn poll(&self, poll_id: &str) -> Option<&PollCard> {
        self.polls.iter().find(|card| card.id() == poll_id)
    }

    pub fn poll_mut(&mut self, poll_id: &str) -> Option<&mut PollCard> {
        self.polls.iter_mut().find(|card| card.id() == poll_id)
    }

    pub async fn register(&mut self, username: &str) {
        if let Err(e) = validate_username(username) {
            self.alert = Some(Alert::danger(e.message()));
            return;
        }

        let api = self.api.clone();
        let result = api.register(username).await;
        self.finish_auth(result).await;
    }

    pub async fn login(&mut self, username: &str) {
        if let Err(e) = validate_username(username) {
            self.alert = Some(Alert::danger(e.message()));
            return;
        }

        let api = self.api.clone();
        let result = api.login(username).await;
        self.finish_auth(result).await;
    }

    async fn finish_auth(&mut self, result: Result<AuthResponse, ClientError>) {
        match result {
            Ok(auth) => {
                info!("Signed in as {}", auth.username);
                self.teardown();
                self.session = Some(SessionContext {
                    username: auth.username,
                    token: auth.token,
                });
                self.alert = Some(Alert::success(auth.message));
                self.load_polls().await;
            }
            Err(e) => self.handle_error(e),
        }
    }

    /// Fetches the catalog and each poll's vote state for the current user.
    pub async fn load_polls(&mut self) {
        let Some(token) = self.session.as_ref().map(|session| session.token.clone()) else {
            self.teardown();
            return;
        };

        self.polls.clear();
        self.view = View::PollsLoading;

        match self.fetch_cards(&token).await {
            Ok(cards) => {
                debug!("Loaded {} polls", cards.len());
                self.polls = cards;
                self.view = View::PollsReady;
            }
            Err(e) => self.fail_load(e),
        }
    }

    /// A failed load with the session still valid shows an empty poll list
    /// and the alert instead of stalling in `PollsLoading`.
    fn fail_load(&mut self, error: ClientError) {
        self.handle_error(error);
        if self.session.is_some() {
            self.polls.clear();
            self.view = View::PollsReady;
        }
    }

    async fn fetch_cards(&self, token: &str) -> Result<Vec<PollCard>, ClientError> {
        let polls = self.api.list_polls(token).await?;
        let mut cards = Vec::with_capacity(polls.len());

        for poll in polls {
            let vote = self.api.check_vote(token, &poll.id).await?;
            let card = match vote.option_id.filter(|_| vote.has_voted) {
                Some(choice) => {
                    let results = self.api.results(token, &poll.id).await?;
                    let mut card = PollCard::not_voted(poll, None);
                    let indicator = format!("You voted for: {}", card.option_text(&choice));
                    card.state = self.voted_state(token, choice, indicator, results);
                    card
                }
                None => PollCard::not_voted(poll, None),
            };
            cards.push(card);
        }

        Ok(cards)
    }

    fn voted_state(
        &self,
        token: &str,
        choice: String,
        indicator: String,
        results: ResultSnapshot,
    ) -> PollViewState {
        PollViewState::Voted {
            choice,
            indicator,
            refresher: ResultsRefresher::spawn(
                self.api.clone(),
                token.to_string(),
                results,
                self.refresh_interval,
            ),
        }
    }

    pub fn select_option(&mut self, poll_id: &str, option_id: &str) {
        let known_option = match self.poll(poll_id) {
            Some(card) => card.poll.options.iter().any(|option| option.id == option_id),
            None => {
                self.alert = Some(Alert::danger("Poll not found"));
                return;
            }
        };

        if !known_option {
            self.alert = Some(Alert::danger("Invalid option for this poll"));
            return;
        }

        if let Some(card) = self.poll_mut(poll_id) {
            match &mut card.state {
                PollViewState::NotVoted { selected } => *selected = Some(option_id.to_string()),
                PollViewState::Voted { .. } => {
                    debug!("Ignoring selection on voted poll {}", poll_id);
                }
            }
        }
    }

    pub async fn submit_vote(&mut self, poll_id: &str) {
        let Some(token) = self.session.as_ref().map(|session| session.token.clone()) else {
            self.alert = Some(Alert::danger("Please log in to vote"));
            return;
        };

        let selected = match self.poll(poll_id) {
            Some(card) => card.selected_option().map(str::to_string),
            None => {
                self.alert = Some(Alert::danger("Poll not found"));
                return;
            }
        };

        let Some(option_id) = selected else {
            self.alert = Some(Alert::danger("Please select an option"));
            return;
        };

        let api = self.api.clone();
        match api.cast_vote(&token, poll_id, &option_id).await {
            Ok(response) => {
                let state = self.voted_state(
                    &token,
                    response.vote.option_id.clone(),
                    response.message.clone(),
                    response.results,
                );
                if let Some(card) = self.poll_mut(poll_id) {
                    card.state = state;
                }
                self.alert = Some(Alert::success(response.message));
            }
            Err(e) => self.handle_error(e),
        }
    }

    /// Back to the voting form, pre-selecting the current choice. Stops the refresh.
    pub fn change_vote(&mut self, poll_id: &str) {
        let Some(card) = self.poll_mut(poll_id) else {
            return;
        };

        if let PollViewState::Voted { choice, .. } = &card.state {
            let previous = choice.clone();
            card.state = PollViewState::NotVoted {
                selected: Some(previous),
            };
        }
    }

    pub async fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            if let Err(e) = self.api.logout(&session.token).await {
                warn!("Logout request failed: {}", e);
            }
            info!("Signed out {}", session.username);
        }

        self.teardown();
        self.alert = None;
    }

    /// Discards all view state and rebuilds it from the held session.
    pub async fn reload(&mut self) {
        let session = self.session.take();
        self.teardown();
        self.alert = None;

        let Some(mut session) = session else {
            return;
        };

        let api = self.api.clone();
        match api.current_user(&session.token).await {
            Ok(Some(username)) => {
                session.username = username;
                self.session = Some(session);
                self.load_polls().await;
            }
            Ok(None) => debug!("Saved session is no longer valid"),
            Err(e) => {
                self.session = Some(session);
                self.fail_load(e);
            }
        }
    }

    fn teardown(&mut self) {
        self.polls.clear();
        self.view = View::Unauthenticated;
        self.session = None;
    }

    fn handle_error(&mut self, error: ClientError) {
        warn!("Request failed: {}", error);
        if error.is_unauthenticated() && self.session.is_some() {
            self.teardown();
        }
        self.alert = Some(Alert::danger(error.to_string()));
    }
}
