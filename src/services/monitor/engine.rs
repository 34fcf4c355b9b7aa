use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::modules::homework::{translate, PollState, TranslateError};
use crate::services::practicum::{validate, ApiError, StatusSource};
use crate::services::telegram::Notifier;

/// Anything that can abort a poll cycle before its notification step
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CycleError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Translate(#[from] TranslateError),
}

/// What a single poll cycle ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The API reported no homework in the query window
    NoUpdates,
    /// Latest status matches what was already delivered
    Unchanged,
    /// A new status message was delivered
    Notified(String),
    /// A new status message could not be delivered; it is retried next cycle
    DeliveryFailed(String),
    /// The cycle aborted; the diagnostic text was reported best-effort
    Failed(String),
}

/// Poll–evaluate–notify loop for a single tracked submission.
///
/// Owns the [`PollState`]; cycles run strictly one after another with a fixed
/// sleep in between, and no cycle failure ever stops the loop.
pub struct PollLoop {
    source: Arc<dyn StatusSource>,
    notifier: Arc<dyn Notifier>,
    retry_time: Duration,
    state: PollState,
}

impl PollLoop {
    pub fn new(
        source: Arc<dyn StatusSource>,
        notifier: Arc<dyn Notifier>,
        retry_time: Duration,
    ) -> Self {
        Self {
            source,
            notifier,
            retry_time,
            state: PollState::new(unix_now()),
        }
    }

    pub fn from_config(
        config: &Config,
        source: Arc<dyn StatusSource>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self::new(source, notifier, config.retry_time)
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    /// Run cycles until `shutdown` resolves.
    /// Shutdown is only observed while sleeping between cycles.
    pub async fn run<F>(mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tracing::info!(interval_secs = self.retry_time.as_secs(), "Homework poll loop started");
        tokio::pin!(shutdown);

        loop {
            self.run_cycle().await;

            tokio::select! {
                _ = tokio::time::sleep(self.retry_time) => {}
                _ = &mut shutdown => {
                    tracing::info!("Shutdown requested, stopping poll loop");
                    break;
                }
            }
        }
    }

    /// Execute one cycle with full error containment.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        match self.process_cycle().await {
            Ok(outcome) => outcome,
            Err(e) => {
                let message = format!("Program failure: {}", e);
                tracing::error!(error = %e, "{}", message);
                self.send_best_effort(&message).await;
                CycleOutcome::Failed(message)
            }
        }
    }

    async fn process_cycle(&mut self) -> Result<CycleOutcome, CycleError> {
        let payload = self.source.fetch(self.state.cursor_timestamp).await?;
        let response = validate(payload)?;

        let Some(latest) = response.latest() else {
            tracing::debug!("No new homework statuses");
            return Ok(CycleOutcome::NoUpdates);
        };

        tracing::info!(homework = %latest.name, "Homework status received");
        let message = translate(latest)?;
        self.state.cursor_timestamp = unix_now();

        if message == self.state.last_message {
            tracing::debug!("Homework status unchanged, skipping notification");
            return Ok(CycleOutcome::Unchanged);
        }

        match self.notifier.notify(&message).await {
            Ok(()) => {
                self.state.last_message = message.clone();
                Ok(CycleOutcome::Notified(message))
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to deliver status notification");
                Ok(CycleOutcome::DeliveryFailed(message))
            }
        }
    }

    async fn send_best_effort(&self, message: &str) {
        if let Err(e) = self.notifier.notify(message).await {
            tracing::error!(error = %e, "Failed to deliver failure report");
        }
    }
}

fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}
