//! controller.rs
//!
//! Composition root: wires the analysis session and the health monitor
//! over one event channel. Completions are applied in completion order,
//! to disjoint state (session vs snapshot), so the two outstanding
//! operations can overlap freely. The controller owns no business
//! rules; validation lives in `EmailInput`, failure classification in
//! `api`, display derivation in `interpret`.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;

use crate::api::ClassifierApi;
use crate::health::HealthMonitor;
use crate::session::AnalysisSession;
use crate::state::{
    AnalysisOutcome, EmailInput, ErrorInfo, HealthSnapshot, LogLevel, SessionState,
};

pub enum CoreEvent {
    Analysis {
        request_id: u64,
        outcome: Result<AnalysisOutcome, ErrorInfo>,
    },
    Health {
        snapshot: HealthSnapshot,
        error: Option<String>,
    },
}

/// Log-worthy observation surfaced by `poll`, rendered by the caller.
pub struct Notice {
    pub level: LogLevel,
    pub text: String,
}

pub struct Controller {
    session: AnalysisSession,
    monitor: HealthMonitor,
    rx: Receiver<CoreEvent>,
}

impl Controller {
    pub fn new(api: Arc<dyn ClassifierApi>) -> Self {
        let (tx, rx) = mpsc::channel();
        Controller {
            session: AnalysisSession::new(api.clone(), tx.clone()),
            monitor: HealthMonitor::new(api, tx),
            rx,
        }
    }

    pub fn submit_analysis(&mut self, input: EmailInput) -> Result<u64, ErrorInfo> {
        self.session.submit(input)
    }

    pub fn refresh_health(&self) {
        self.monitor.check_now();
    }

    /// Clears the analysis result; used when the user clears the form.
    pub fn clear(&mut self) {
        self.session.reset();
    }

    /// Drains completed work and applies it. Returns notices for the
    /// log pane; the state itself is read through `view`.
    pub fn poll(&mut self) -> Vec<Notice> {
        let mut notices = Vec::new();

        loop {
            match self.rx.try_recv() {
                Ok(CoreEvent::Analysis {
                    request_id,
                    outcome,
                }) => {
                    if !self.session.apply(request_id, outcome) {
                        notices.push(Notice {
                            level: LogLevel::Info,
                            text: "Discarded response from a superseded request".into(),
                        });
                        continue;
                    }

                    match self.session.current_state() {
                        SessionState::Succeeded { outcome, .. } => notices.push(Notice {
                            level: LogLevel::Success,
                            text: format!(
                                "Analysis complete: {} ({:.1}% confidence)",
                                outcome.prediction.label, outcome.prediction.confidence
                            ),
                        }),
                        SessionState::Failed { error, .. } => notices.push(Notice {
                            level: LogLevel::Error,
                            text: error.message.clone(),
                        }),
                        _ => {}
                    }
                }

                Ok(CoreEvent::Health { snapshot, error }) => {
                    self.monitor.apply(snapshot);
                    if let Some(e) = error {
                        notices.push(Notice {
                            level: LogLevel::Warn,
                            text: format!("Health check failed: {}", e),
                        });
                    }
                }

                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        notices
    }

    /// Combined read-only view for rendering.
    pub fn view(&self) -> (&SessionState, &HealthSnapshot) {
        (self.session.current_state(), self.monitor.current_snapshot())
    }
}
