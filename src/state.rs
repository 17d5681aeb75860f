//! state.rs
//!
//! Core data model: analysis lifecycle states, health snapshots,
//! the error taxonomy, and the application state the UI renders from.

use std::collections::VecDeque;
use std::time::Instant;

use chrono::{DateTime, Utc};

use crate::config::ApiConfig;
use crate::presets::ExamplePreset;

pub const MAX_LOGS: usize = 500;

/* ---------- input ---------- */

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmailInput {
    pub email_text: String,
    pub subject: String,
    pub sender: String,
}

impl EmailInput {
    /// Local precondition: the body must be non-empty after trimming.
    /// Violations never reach the network.
    pub fn validate(&self) -> Result<(), ErrorInfo> {
        if self.email_text.trim().is_empty() {
            return Err(ErrorInfo {
                kind: ErrorKind::Validation,
                message: "Please enter email content to analyze".into(),
            });
        }
        Ok(())
    }
}

/* ---------- classification result ---------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
    Safe,
    /// Anything the service sends outside its documented enum. Rendered
    /// with a neutral style rather than rejected.
    Unknown,
}

impl RiskLevel {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "HIGH" => RiskLevel::High,
            "MEDIUM" => RiskLevel::Medium,
            "LOW" => RiskLevel::Low,
            "SAFE" => RiskLevel::Safe,
            _ => RiskLevel::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High => "HIGH",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::Low => "LOW",
            RiskLevel::Safe => "SAFE",
            RiskLevel::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Clone, Debug)]
pub struct ClassificationResult {
    pub is_phishing: bool,
    /// Percentage in [0, 100], as reported by the service.
    pub confidence: f64,
    pub label: String,
    pub risk_level: RiskLevel,
}

#[derive(Clone, Debug)]
pub struct AnalysisMetadata {
    pub feature_count: u64,
    pub model_version: String,
}

/// Everything a successful /predict response carries. `input_data` is
/// the server's echo of what it analyzed; the email text may come back
/// truncated.
#[derive(Clone, Debug)]
pub struct AnalysisOutcome {
    pub prediction: ClassificationResult,
    pub input_data: EmailInput,
    pub metadata: AnalysisMetadata,
}

/* ---------- error taxonomy ---------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input failed the local precondition; no request was issued.
    Validation,
    /// No response obtained (connection refused, DNS, timeout).
    Unreachable,
    /// The service answered with `success: false`.
    ServiceRejected,
    /// The service claimed success but required fields are missing.
    MalformedResponse,
}

#[derive(Clone, Debug)]
pub struct ErrorInfo {
    pub kind: ErrorKind,
    pub message: String,
}

/* ---------- session lifecycle ---------- */

#[derive(Clone, Debug)]
pub enum SessionState {
    Idle,
    Submitting { input: EmailInput, request_id: u64 },
    Succeeded { input: EmailInput, outcome: AnalysisOutcome },
    Failed { input: EmailInput, error: ErrorInfo },
}

impl SessionState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SessionState::Submitting { .. })
    }
}

/* ---------- health ---------- */

#[derive(Clone, Debug)]
pub struct HealthSnapshot {
    pub is_online: bool,
    pub model_loaded: bool,
    pub timestamp: Option<DateTime<Utc>>,
}

impl HealthSnapshot {
    /// State before the first health response has arrived.
    pub fn unknown() -> Self {
        HealthSnapshot {
            is_online: false,
            model_loaded: false,
            timestamp: None,
        }
    }

    /// Replacement snapshot for a failed check. Stamped so staleness is
    /// never presented as freshness.
    pub fn offline_now() -> Self {
        HealthSnapshot {
            is_online: false,
            model_loaded: false,
            timestamp: Some(Utc::now()),
        }
    }
}

/* ---------- logging ---------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warn,
    Error,
}

#[derive(Clone, Debug)]
pub struct LogLine {
    pub level: LogLevel,
    pub text: String,
    pub at: Instant,
}

/* ---------- form / ui ---------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    EmailText,
    Subject,
    Sender,
    Examples,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::EmailText => Focus::Subject,
            Focus::Subject => Focus::Sender,
            Focus::Sender => Focus::Examples,
            Focus::Examples => Focus::EmailText,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::EmailText => Focus::Examples,
            Focus::Subject => Focus::EmailText,
            Focus::Sender => Focus::Subject,
            Focus::Examples => Focus::Sender,
        }
    }
}

pub struct FormState {
    pub email_text: String,
    pub subject: String,
    pub sender: String,
    pub focus: Focus,
    pub selected_example: usize,
}

impl FormState {
    pub fn new() -> Self {
        FormState {
            email_text: String::new(),
            subject: String::new(),
            sender: String::new(),
            focus: Focus::EmailText,
            selected_example: 0,
        }
    }

    pub fn to_input(&self) -> EmailInput {
        EmailInput {
            email_text: self.email_text.clone(),
            subject: self.subject.clone(),
            sender: self.sender.clone(),
        }
    }

    pub fn clear(&mut self) {
        self.email_text.clear();
        self.subject.clear();
        self.sender.clear();
    }

    pub fn fill(&mut self, preset: &ExamplePreset) {
        self.email_text = preset.email_text.to_string();
        self.subject = preset.subject.to_string();
        self.sender = preset.sender.to_string();
    }

    pub fn active_field_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Focus::EmailText => Some(&mut self.email_text),
            Focus::Subject => Some(&mut self.subject),
            Focus::Sender => Some(&mut self.sender),
            Focus::Examples => None,
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        FormState::new()
    }
}

pub struct UiState {
    pub should_exit: bool,
}

pub struct AppState {
    pub config: ApiConfig,
    pub form: FormState,
    pub ui: UiState,
    pub logs: VecDeque<LogLine>,
}

impl AppState {
    pub fn new(config: ApiConfig) -> Self {
        AppState {
            config,
            form: FormState::new(),
            ui: UiState { should_exit: false },
            logs: VecDeque::new(),
        }
    }
}
