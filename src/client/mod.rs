//! Client-side view controller and the API it drives.
//!
//! [`ClientController`] walks the view through
//! `Unauthenticated -> PollsLoading -> PollsReady`, tracks each poll's
//! voted/not-voted state and keeps a [`ResultsRefresher`] alive for every
//! poll whose results are on screen.

pub mod api;
pub mod controller;
pub mod refresh;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{ClientError, ClientResult, HttpPollApi, PollApi};
pub use controller::{Alert, AlertKind, ClientController, PollCard, SessionContext, View};
pub use refresh::ResultsRefresher;
