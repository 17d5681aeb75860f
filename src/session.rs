//! session.rs
//!
//! Analysis request lifecycle state machine.
//!
//! `Idle --submit--> Submitting --completion--> Succeeded | Failed`,
//! re-entrant from `Succeeded`/`Failed`, resettable from anywhere.
//! Overlapping submissions follow a cancel-and-replace policy: each
//! accepted submit gets a monotonically increasing request id, and a
//! completion is only committed if its id matches the one stored in the
//! current `Submitting` state. A late response from a superseded
//! request is discarded, never applied.

use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;

use crate::api::ClassifierApi;
use crate::controller::CoreEvent;
use crate::state::{AnalysisOutcome, EmailInput, ErrorInfo, SessionState};

pub struct AnalysisSession {
    state: SessionState,
    next_request: u64,
    api: Arc<dyn ClassifierApi>,
    tx: Sender<CoreEvent>,
}

impl AnalysisSession {
    pub fn new(api: Arc<dyn ClassifierApi>, tx: Sender<CoreEvent>) -> Self {
        AnalysisSession {
            state: SessionState::Idle,
            next_request: 0,
            api,
            tx,
        }
    }

    /// Validates locally, then transitions to `Submitting` and issues
    /// exactly one request on a worker thread. A validation failure
    /// leaves the current state untouched and never touches the
    /// network. Returns the id of the accepted request.
    pub fn submit(&mut self, input: EmailInput) -> Result<u64, ErrorInfo> {
        input.validate()?;

        self.next_request += 1;
        let request_id = self.next_request;

        self.state = SessionState::Submitting {
            input: input.clone(),
            request_id,
        };

        let api = self.api.clone();
        let tx = self.tx.clone();

        thread::spawn(move || {
            let outcome = api.predict(&input);
            // receiver may be gone on shutdown
            let _ = tx.send(CoreEvent::Analysis {
                request_id,
                outcome,
            });
        });

        Ok(request_id)
    }

    /// Commits a completed request. Returns false when the completion
    /// was discarded: the request was superseded by a newer submit, or
    /// the session was reset while it was in flight.
    pub fn apply(&mut self, request_id: u64, outcome: Result<AnalysisOutcome, ErrorInfo>) -> bool {
        let SessionState::Submitting {
            input,
            request_id: current,
        } = &self.state
        else {
            return false;
        };

        if *current != request_id {
            return false;
        }

        let input = input.clone();
        self.state = match outcome {
            Ok(outcome) => SessionState::Succeeded { input, outcome },
            Err(error) => SessionState::Failed { input, error },
        };
        true
    }

    pub fn current_state(&self) -> &SessionState {
        &self.state
    }

    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
    }
}
