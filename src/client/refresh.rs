use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::client::api::PollApi;
use crate::config::MIN_RESULTS_REFRESH;
use crate::models::results_models::ResultSnapshot;

/// Re-fetches one poll's results on a fixed period for as long as the handle
/// lives. Dropping the handle cancels the task.
pub struct ResultsRefresher {
    receiver: watch::Receiver<ResultSnapshot>,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl ResultsRefresher {
    /// `initial` is shown until the first tick, one full `period` from now.
    /// Periods below [`MIN_RESULTS_REFRESH`] are raised to it.
    pub fn spawn(
        api: Arc<dyn PollApi>,
        token: String,
        initial: ResultSnapshot,
        period: Duration,
    ) -> Self {
        let poll_id = initial.poll_id.clone();
        if period < MIN_RESULTS_REFRESH {
            warn!(
                "Refresh period {:?} for {} raised to {:?}",
                period, poll_id, MIN_RESULTS_REFRESH
            );
        }
        let period = period.max(MIN_RESULTS_REFRESH);
        let (sender, receiver) = watch::channel(initial);
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    biased;
                    _ = task_cancel.cancelled() => break,
                    _ = ticker.tick() => {}
                }

                let fetched = tokio::select! {
                    biased;
                    _ = task_cancel.cancelled() => break,
                    fetched = api.results(&token, &poll_id) => fetched,
                };

                match fetched {
                    Ok(snapshot) => {
                        if sender.send(snapshot).is_err() {
                            break;
                        }
                    }
                    Err(e) => warn!("Skipping results refresh for {}: {}", poll_id, e),
                }
            }

            debug!("Results refresh for {} stopped", poll_id);
        });

        Self {
            receiver,
            cancel,
            handle,
        }
    }

    pub fn latest(&self) -> ResultSnapshot {
        self.receiver.borrow().clone()
    }

    /// Resolves once a snapshot newer than the last one seen arrives.
    pub async fn changed(&mut self) -> bool {
        self.receiver.changed().await.is_ok()
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

impl Drop for ResultsRefresher {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
