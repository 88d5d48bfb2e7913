//! Display state machine for submissions
//!
//! A [`Session`] owns what the result pane shows and moves it through
//! `Idle → Submitting → AwaitingResult → Displaying`. Every submission takes
//! the next request id from the state itself; a transition is only applied
//! while its id is still the latest, so a slow response from an abandoned
//! submission can never overwrite a newer one.
//!
//! The state is published on a [`tokio::sync::watch`] channel. Front ends
//! subscribe and re-render on every change.

use log::{debug, warn};
use std::sync::Arc;
use tokio::sync::watch;

use crate::config::PollSettings;
use crate::errors::SubmissionError;
use crate::types::{SubmissionDraft, SubmissionResult, Token};
use crate::SubmissionClient;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
    AwaitingResult(Token),
    Displaying,
}

/// What the result pane shows once a submission has finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Result(SubmissionResult),
    Error(String),
}

impl Outcome {
    pub fn from_error(err: SubmissionError) -> Self {
        Outcome::Error(err.to_string())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Id of the most recent submission; zero before the first one
    pub request_id: u64,
    pub phase: Phase,
    /// Last finished outcome. Kept while a new submission runs.
    pub outcome: Option<Outcome>,
}

impl SessionState {
    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Submitting | Phase::AwaitingResult(_))
    }
}

pub struct Session {
    client: Arc<dyn SubmissionClient>,
    poll: PollSettings,
    state: watch::Sender<SessionState>,
}

impl Session {
    pub fn new(client: Arc<dyn SubmissionClient>) -> Self {
        Self {
            client,
            poll: PollSettings::default(),
            state: watch::Sender::new(SessionState::default()),
        }
    }

    pub fn with_poll(mut self, poll: PollSettings) -> Self {
        self.poll = poll;
        self
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Submit a draft and wait for its outcome.
    ///
    /// Returns `None` when a newer submission started in the meantime; the
    /// outcome of this one was discarded.
    pub async fn run(&self, draft: &SubmissionDraft) -> Option<Outcome> {
        let request_id = self.begin();

        let token = match self.client.submit(draft).await {
            Ok(Some(token)) => token,
            Ok(None) => {
                warn!("Submission {} was accepted without a token", request_id);
                return self.finish(request_id, Outcome::from_error(SubmissionError::MissingToken));
            }
            Err(err) => {
                warn!("Submission {} failed: {}", request_id, err);
                return self.finish(request_id, Outcome::from_error(err));
            }
        };

        if !self.transition(request_id, Phase::AwaitingResult(token.clone())) {
            return None;
        }

        let outcome = match self.fetch(request_id, &token).await {
            Ok(result) => Outcome::Result(result),
            Err(err) => {
                warn!("Fetching result of submission {} failed: {}", request_id, err);
                Outcome::from_error(err)
            }
        };

        self.finish(request_id, outcome)
    }

    /// Return to `Idle` after displaying, keeping the outcome on screen
    pub fn reset(&self) {
        self.state.send_if_modified(|state| {
            if state.phase == Phase::Displaying {
                state.phase = Phase::Idle;
                true
            } else {
                false
            }
        });
    }

    async fn fetch(
        &self,
        request_id: u64,
        token: &Token,
    ) -> Result<SubmissionResult, SubmissionError> {
        let mut result = self.client.fetch_result(token).await?;

        let mut attempts = 0;
        while result.status.is_pending() && attempts < self.poll.max_attempts {
            if !self.is_current(request_id) {
                break;
            }
            attempts += 1;
            debug!(
                "Submission {} still {}, re-fetching ({}/{})",
                request_id, result.status.description, attempts, self.poll.max_attempts
            );
            tokio::time::sleep(self.poll.interval()).await;
            result = self.client.fetch_result(token).await?;
        }

        Ok(result)
    }

    fn begin(&self) -> u64 {
        let mut request_id = 0;
        self.state.send_modify(|state| {
            state.request_id += 1;
            state.phase = Phase::Submitting;
            request_id = state.request_id;
        });
        debug!("Submission {} started", request_id);
        request_id
    }

    fn is_current(&self, request_id: u64) -> bool {
        self.state.borrow().request_id == request_id
    }

    fn transition(&self, request_id: u64, phase: Phase) -> bool {
        self.state.send_if_modified(|state| {
            if state.request_id != request_id {
                debug!(
                    "Dropping transition of stale submission {} (latest is {})",
                    request_id, state.request_id
                );
                return false;
            }
            state.phase = phase;
            true
        })
    }

    fn finish(&self, request_id: u64, outcome: Outcome) -> Option<Outcome> {
        let applied = self.state.send_if_modified(|state| {
            if state.request_id != request_id {
                debug!(
                    "Discarding outcome of stale submission {} (latest is {})",
                    request_id, state.request_id
                );
                return false;
            }
            state.phase = Phase::Displaying;
            state.outcome = Some(outcome.clone());
            true
        });

        applied.then_some(outcome)
    }
}
