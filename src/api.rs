// src/api.rs
//
// Boundary to the classification service. All failure classification
// happens here, once; the session only ever sees the taxonomy in
// `ErrorKind`, never a raw transport error.

use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::state::{
    AnalysisMetadata, AnalysisOutcome, ClassificationResult, EmailInput, ErrorInfo, ErrorKind,
    HealthSnapshot, RiskLevel,
};

/// Seam between the orchestration core and the network. Production uses
/// `HttpApi`; tests substitute stubs.
pub trait ClassifierApi: Send + Sync {
    fn predict(&self, input: &EmailInput) -> Result<AnalysisOutcome, ErrorInfo>;
    fn health(&self) -> Result<HealthSnapshot, String>;
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    email_text: &'a str,
    subject: &'a str,
    sender: &'a str,
}

pub struct HttpApi {
    cfg: ApiConfig,
}

impl HttpApi {
    pub fn new(cfg: ApiConfig) -> Self {
        HttpApi { cfg }
    }

    fn client(&self) -> Result<reqwest::blocking::Client, String> {
        reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(self.cfg.timeout_secs))
            .build()
            .map_err(|e| e.to_string())
    }
}

impl ClassifierApi for HttpApi {
    fn predict(&self, input: &EmailInput) -> Result<AnalysisOutcome, ErrorInfo> {
        let client = self.client().map_err(|e| ErrorInfo {
            kind: ErrorKind::Unreachable,
            message: e,
        })?;

        let body = PredictRequest {
            email_text: &input.email_text,
            subject: &input.subject,
            sender: &input.sender,
        };

        let resp = client
            .post(self.cfg.endpoint("/predict"))
            .json(&body)
            .send()
            .map_err(|e| classify_transport_error(&e))?;

        let status = resp.status().as_u16();
        let text = resp.text().map_err(|e| classify_transport_error(&e))?;

        interpret_predict_body(status, &text)
    }

    fn health(&self) -> Result<HealthSnapshot, String> {
        let client = self.client()?;

        let resp = client
            .get(self.cfg.endpoint("/health"))
            .send()
            .map_err(|e| e.to_string())?;

        let status = resp.status();
        if !status.is_success() {
            return Err(format!("health endpoint returned HTTP {}", status));
        }

        let json: Value = resp.json().map_err(|e| e.to_string())?;
        Ok(parse_health_body(&json))
    }
}

fn classify_transport_error(e: &reqwest::Error) -> ErrorInfo {
    let detail = if e.is_timeout() {
        "request timed out"
    } else {
        "connection failed"
    };
    ErrorInfo {
        kind: ErrorKind::Unreachable,
        message: format!(
            "Cannot reach classification service ({}). Make sure the API server is running.",
            detail
        ),
    }
}

/// Applies the response contract: the `success` field in the body is
/// authoritative; the HTTP status is only the fallback when the body is
/// absent or unparsable.
pub fn interpret_predict_body(status: u16, body: &str) -> Result<AnalysisOutcome, ErrorInfo> {
    let ok_status = (200..300).contains(&status);

    let json: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(_) if !ok_status => {
            return Err(ErrorInfo {
                kind: ErrorKind::ServiceRejected,
                message: format!("Server error occurred (HTTP {})", status),
            });
        }
        Err(_) => {
            return Err(ErrorInfo {
                kind: ErrorKind::MalformedResponse,
                message: "Classification service returned an unreadable response".into(),
            });
        }
    };

    match json.get("success").and_then(Value::as_bool) {
        Some(true) => extract_outcome(&json).ok_or_else(|| ErrorInfo {
            kind: ErrorKind::MalformedResponse,
            message: "Classification response is missing required fields".into(),
        }),
        Some(false) => Err(ErrorInfo {
            kind: ErrorKind::ServiceRejected,
            message: json
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("Analysis failed")
                .to_string(),
        }),
        None if !ok_status => Err(ErrorInfo {
            kind: ErrorKind::ServiceRejected,
            message: format!("Server error occurred (HTTP {})", status),
        }),
        None => Err(ErrorInfo {
            kind: ErrorKind::MalformedResponse,
            message: "Classification response has no success field".into(),
        }),
    }
}

fn extract_outcome(json: &Value) -> Option<AnalysisOutcome> {
    let p = json.get("prediction")?;

    let prediction = ClassificationResult {
        is_phishing: p.get("is_phishing")?.as_bool()?,
        confidence: p.get("confidence")?.as_f64()?,
        label: p.get("label")?.as_str()?.to_string(),
        risk_level: RiskLevel::parse(p.get("risk_level").and_then(Value::as_str).unwrap_or("")),
    };

    // input_data is display-only; absent fields degrade to empty strings
    let input_data = EmailInput {
        email_text: string_at(json, "/input_data/email_text"),
        subject: string_at(json, "/input_data/subject"),
        sender: string_at(json, "/input_data/sender"),
    };

    let m = json.get("metadata")?;
    let metadata = AnalysisMetadata {
        feature_count: m.get("feature_count")?.as_u64()?,
        model_version: m.get("model_version")?.as_str()?.to_string(),
    };

    Some(AnalysisOutcome {
        prediction,
        input_data,
        metadata,
    })
}

fn string_at(json: &Value, pointer: &str) -> String {
    json.pointer(pointer)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn parse_health_body(json: &Value) -> HealthSnapshot {
    let status = json.get("status").and_then(Value::as_str).unwrap_or("");

    HealthSnapshot {
        is_online: status == "healthy",
        model_loaded: json
            .get("model_loaded")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        timestamp: json
            .get("timestamp")
            .and_then(Value::as_str)
            .and_then(parse_service_timestamp)
            .or_else(|| Some(Utc::now())),
    }
}

// The service emits numpy's datetime64 repr, which has no offset.
fn parse_service_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    raw.parse::<DateTime<Utc>>().ok().or_else(|| {
        raw.parse::<NaiveDateTime>()
            .ok()
            .map(|naive| naive.and_utc())
    })
}
