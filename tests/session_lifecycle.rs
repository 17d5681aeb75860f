//! End-to-end lifecycle tests for the orchestration core, driven
//! through a stub classifier so no network is involved.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use chrono::Utc;
use phishscope::api::ClassifierApi;
use phishscope::controller::{Controller, CoreEvent};
use phishscope::interpret::recommendation_set;
use phishscope::session::AnalysisSession;
use phishscope::state::{
    AnalysisMetadata, AnalysisOutcome, ClassificationResult, EmailInput, ErrorInfo, ErrorKind,
    HealthSnapshot, RiskLevel, SessionState,
};

/* ---------- stub classifier ---------- */

type PredictFn = Box<dyn Fn(&EmailInput) -> Result<AnalysisOutcome, ErrorInfo> + Send + Sync>;
type HealthFn = Box<dyn Fn() -> Result<HealthSnapshot, String> + Send + Sync>;

struct StubApi {
    predict_calls: AtomicUsize,
    predict_fn: PredictFn,
    health_fn: HealthFn,
}

impl StubApi {
    fn new(
        predict: impl Fn(&EmailInput) -> Result<AnalysisOutcome, ErrorInfo> + Send + Sync + 'static,
    ) -> Self {
        StubApi {
            predict_calls: AtomicUsize::new(0),
            predict_fn: Box::new(predict),
            health_fn: Box::new(|| {
                Ok(HealthSnapshot {
                    is_online: true,
                    model_loaded: true,
                    timestamp: Some(Utc::now()),
                })
            }),
        }
    }

    fn with_health(
        mut self,
        health: impl Fn() -> Result<HealthSnapshot, String> + Send + Sync + 'static,
    ) -> Self {
        self.health_fn = Box::new(health);
        self
    }
}

impl ClassifierApi for StubApi {
    fn predict(&self, input: &EmailInput) -> Result<AnalysisOutcome, ErrorInfo> {
        self.predict_calls.fetch_add(1, Ordering::SeqCst);
        (self.predict_fn)(input)
    }

    fn health(&self) -> Result<HealthSnapshot, String> {
        (self.health_fn)()
    }
}

fn phishing_outcome(label: &str) -> AnalysisOutcome {
    AnalysisOutcome {
        prediction: ClassificationResult {
            is_phishing: true,
            confidence: 95.2,
            label: label.to_string(),
            risk_level: RiskLevel::High,
        },
        input_data: EmailInput::default(),
        metadata: AnalysisMetadata {
            feature_count: 12,
            model_version: "1.0".into(),
        },
    }
}

fn unreachable() -> ErrorInfo {
    ErrorInfo {
        kind: ErrorKind::Unreachable,
        message: "Cannot reach classification service (connection failed).".into(),
    }
}

fn input(text: &str) -> EmailInput {
    EmailInput {
        email_text: text.to_string(),
        subject: String::new(),
        sender: String::new(),
    }
}

/// Polls the controller until the in-flight request settles.
fn settle(controller: &mut Controller) {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        controller.poll();
        if !controller.view().0.is_submitting() {
            return;
        }
        thread::sleep(Duration::from_millis(10));
    }
    panic!("session did not settle in time");
}

/// Polls the controller until a health snapshot with a timestamp lands.
fn settle_health(controller: &mut Controller) {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        controller.poll();
        if controller.view().1.timestamp.is_some() {
            return;
        }
        thread::sleep(Duration::from_millis(10));
    }
    panic!("health check did not settle in time");
}

/* ---------- tests ---------- */

#[test]
fn empty_input_is_rejected_locally_without_a_network_call() {
    let stub = Arc::new(StubApi::new(|_| Ok(phishing_outcome("Phishing"))));
    let mut controller = Controller::new(stub.clone());

    let err = controller.submit_analysis(input("   \n  ")).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(stub.predict_calls.load(Ordering::SeqCst), 0);
    assert!(matches!(controller.view().0, SessionState::Idle));
}

#[test]
fn unreachable_service_ends_in_failed_with_unreachable_kind() {
    let stub = Arc::new(StubApi::new(|_| Err(unreachable())));
    let mut controller = Controller::new(stub);

    controller.submit_analysis(input("test")).unwrap();
    assert!(controller.view().0.is_submitting());
    settle(&mut controller);

    match controller.view().0 {
        SessionState::Failed { error, .. } => assert_eq!(error.kind, ErrorKind::Unreachable),
        other => panic!("expected Failed, got {:?}", other),
    }
}

#[test]
fn successful_response_reaches_succeeded_with_phishing_advice() {
    let stub = Arc::new(StubApi::new(|_| Ok(phishing_outcome("Phishing"))));
    let mut controller = Controller::new(stub);

    controller
        .submit_analysis(EmailInput {
            email_text: "URGENT! Your account has been compromised...".into(),
            subject: "Account Security Alert".into(),
            sender: "security@fake-bank.net".into(),
        })
        .unwrap();
    settle(&mut controller);

    match controller.view().0 {
        SessionState::Succeeded { outcome, .. } => {
            assert!(outcome.prediction.is_phishing);
            assert_eq!(outcome.prediction.confidence, 95.2);
            assert_eq!(outcome.prediction.risk_level, RiskLevel::High);
        }
        other => panic!("expected Succeeded, got {:?}", other),
    }

    let advice = recommendation_set(true);
    assert_eq!(advice[0], "Do not click any links in this email");
    assert_eq!(advice.last().copied(), Some("Report this email as spam/phishing"));
}

#[test]
fn late_response_from_superseded_request_is_discarded() {
    let (tx, rx) = mpsc::channel();
    // label echoes the submitted body so completions are attributable
    let stub = Arc::new(StubApi::new(|input: &EmailInput| {
        Ok(phishing_outcome(&input.email_text))
    }));
    let mut session = AnalysisSession::new(stub, tx);

    let a = session.submit(input("email A")).unwrap();
    let b = session.submit(input("email B")).unwrap();
    assert_ne!(a, b);

    let mut completions = HashMap::new();
    for _ in 0..2 {
        match rx.recv_timeout(Duration::from_secs(2)).unwrap() {
            CoreEvent::Analysis {
                request_id,
                outcome,
            } => {
                completions.insert(request_id, outcome);
            }
            CoreEvent::Health { .. } => panic!("unexpected health event"),
        }
    }

    // A's response arrives first: discarded, B still pending
    assert!(!session.apply(a, completions.remove(&a).unwrap()));
    assert!(session.current_state().is_submitting());

    assert!(session.apply(b, completions.remove(&b).unwrap()));
    match session.current_state() {
        SessionState::Succeeded { outcome, .. } => {
            assert_eq!(outcome.prediction.label, "email B");
        }
        other => panic!("expected Succeeded, got {:?}", other),
    }
}

#[test]
fn reset_discards_an_in_flight_completion() {
    let (tx, rx) = mpsc::channel();
    let stub = Arc::new(StubApi::new(|_| Ok(phishing_outcome("Phishing"))));
    let mut session = AnalysisSession::new(stub, tx);

    let id = session.submit(input("test")).unwrap();
    let outcome = match rx.recv_timeout(Duration::from_secs(2)).unwrap() {
        CoreEvent::Analysis { outcome, .. } => outcome,
        CoreEvent::Health { .. } => panic!("unexpected health event"),
    };

    session.reset();
    assert!(!session.apply(id, outcome));
    assert!(matches!(session.current_state(), SessionState::Idle));
}

#[test]
fn session_is_reusable_after_a_failure() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = attempts.clone();
    let stub = Arc::new(StubApi::new(move |_| {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            Err(unreachable())
        } else {
            Ok(phishing_outcome("Phishing"))
        }
    }));
    let mut controller = Controller::new(stub);

    controller.submit_analysis(input("first try")).unwrap();
    settle(&mut controller);
    assert!(matches!(controller.view().0, SessionState::Failed { .. }));

    controller.submit_analysis(input("second try")).unwrap();
    settle(&mut controller);
    assert!(matches!(controller.view().0, SessionState::Succeeded { .. }));
}

#[test]
fn health_failure_never_touches_the_session() {
    let stub = Arc::new(
        StubApi::new(|_| Ok(phishing_outcome("Phishing")))
            .with_health(|| Err("connection refused".into())),
    );
    let mut controller = Controller::new(stub);

    controller.submit_analysis(input("test")).unwrap();
    settle(&mut controller);
    assert!(matches!(controller.view().0, SessionState::Succeeded { .. }));

    controller.refresh_health();
    settle_health(&mut controller);

    let (session, health) = controller.view();
    assert!(matches!(session, SessionState::Succeeded { .. }));
    assert!(!health.is_online);
    assert!(!health.model_loaded);
    assert!(health.timestamp.is_some());
}

#[test]
fn snapshot_is_unknown_before_the_first_health_response() {
    let stub = Arc::new(StubApi::new(|_| Ok(phishing_outcome("Phishing"))));
    let controller = Controller::new(stub);

    let health = controller.view().1;
    assert!(!health.is_online);
    assert!(!health.model_loaded);
    assert!(health.timestamp.is_none());
}
