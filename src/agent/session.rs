//! One chat session against the remote agent.
//!
//! The session owns the conversation and the busy flag. A submission
//! appends the user turn before the network call starts, and at most one
//! call is in flight. `cancel` aborts that call and clears the busy flag
//! immediately; the aborted call then resolves as cancelled and appends
//! nothing.

use futures::future::{AbortHandle, Abortable};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, error, info};

use super::error::AgentError;
use super::transport::AgentTransport;
use super::types::{Attachment, Notice, Role, Turn};

/// Assistant text used when the agent reply has no answer
pub const NO_ANSWER_TEXT: &str = "No response received";

/// How a submission ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input; nothing happened
    Ignored,
    /// Another request is still in flight; nothing happened
    Busy,
    /// A non-user turn was appended without a network call
    Appended(Turn),
    /// The agent answered and this assistant turn was appended
    Answered(Turn),
    /// The request was aborted before an answer was recorded
    Cancelled,
    /// The request failed; the message was surfaced as a notice
    Failed(String),
}

struct InFlight {
    generation: u64,
    handle: AbortHandle,
}

#[derive(Default)]
struct SessionState {
    turns: Vec<Turn>,
    in_flight: Option<InFlight>,
    generation: u64,
    notices: Vec<Notice>,
}

impl SessionState {
    /// Clear the busy flag if `generation` still owns it
    fn release(&mut self, generation: u64) -> bool {
        if self.in_flight.as_ref().map(|f| f.generation) == Some(generation) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }
}

/// Releases the busy flag when a submission ends, however it ends
struct BusyGuard<'a> {
    state: &'a Mutex<SessionState>,
    generation: u64,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(|p| p.into_inner());
        state.release(self.generation);
    }
}

pub struct AgentSession<T> {
    transport: T,
    state: Mutex<SessionState>,
}

impl<T: AgentTransport> AgentSession<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: Mutex::new(SessionState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Snapshot of the conversation so far
    pub fn turns(&self) -> Vec<Turn> {
        self.lock().turns.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.lock().in_flight.is_some()
    }

    /// Drain the notices raised since the last call
    pub fn take_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut self.lock().notices)
    }

    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        self.submit_with_attachments(text, Vec::new()).await
    }

    pub async fn submit_with_attachments(
        &self,
        text: &str,
        attachments: Vec<Attachment>,
    ) -> SubmitOutcome {
        let content = text.trim();
        if content.is_empty() {
            return SubmitOutcome::Ignored;
        }

        let (registration, generation) = {
            let mut state = self.lock();
            if state.in_flight.is_some() {
                debug!("submission refused while a request is in flight");
                return SubmitOutcome::Busy;
            }

            let mut turn = Turn::user(content);
            if !attachments.is_empty() {
                turn = turn.with_attachments(attachments);
            }
            state.turns.push(turn);

            let (handle, registration) = AbortHandle::new_pair();
            state.generation += 1;
            let generation = state.generation;
            state.in_flight = Some(InFlight { generation, handle });
            (registration, generation)
        };

        let _busy = BusyGuard {
            state: &self.state,
            generation,
        };

        debug!(generation, "sending query to agent");
        let result = Abortable::new(self.transport.ask(content), registration).await;

        let mut state = self.lock();
        // False once `cancel` has taken the in-flight slot
        let current = state.release(generation);

        match result {
            Ok(Ok(response)) if current => {
                let answer = response
                    .answer
                    .filter(|a| !a.is_empty())
                    .unwrap_or_else(|| NO_ANSWER_TEXT.to_string());
                let turn = Turn::assistant(answer);
                state.turns.push(turn.clone());
                SubmitOutcome::Answered(turn)
            }
            Ok(Err(e)) if current && !matches!(e, AgentError::Cancelled) => {
                error!(error = %e, "agent request failed");
                let message = e.to_string();
                state.notices.push(Notice::Error(message.clone()));
                SubmitOutcome::Failed(message)
            }
            _ => {
                info!(generation, "agent request was aborted");
                state.notices.push(Notice::Cancelled);
                SubmitOutcome::Cancelled
            }
        }
    }

    /// Abort the in-flight request. Returns false when nothing was running.
    pub fn cancel(&self) -> bool {
        match self.lock().in_flight.take() {
            Some(in_flight) => {
                in_flight.handle.abort();
                info!(generation = in_flight.generation, "cancelling agent request");
                true
            }
            None => false,
        }
    }

    /// Inject a turn from surrounding code. User turns go through the normal
    /// submission path; other roles are appended as-is.
    pub async fn append(&self, role: Role, content: &str) -> SubmitOutcome {
        match role {
            Role::User => self.submit(content).await,
            Role::Assistant | Role::System => {
                let turn = Turn::new(role, content);
                self.lock().turns.push(turn.clone());
                SubmitOutcome::Appended(turn)
            }
        }
    }
}
