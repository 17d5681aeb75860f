//! interpret.rs
//!
//! Pure mapping from a raw classification result to display-ready
//! attributes: color classes, recommendations, risk descriptions.
//! No I/O, no state; every function here is total.

use crate::state::RiskLevel;

/// Display styling bucket, named after the Bootstrap contextual classes
/// the service's web frontends use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorClass {
    Danger,
    Warning,
    Info,
    Success,
    Secondary,
}

pub fn risk_color_class(level: RiskLevel) -> ColorClass {
    match level {
        RiskLevel::High => ColorClass::Danger,
        RiskLevel::Medium => ColorClass::Warning,
        RiskLevel::Low => ColorClass::Info,
        RiskLevel::Safe => ColorClass::Success,
        RiskLevel::Unknown => ColorClass::Secondary,
    }
}

/// Confidence bands are inclusive on their lower bound: 90.0 is already
/// `Success`, 70.0 is already `Warning`.
pub fn confidence_color_class(confidence: f64) -> ColorClass {
    if confidence >= 90.0 {
        ColorClass::Success
    } else if confidence >= 70.0 {
        ColorClass::Warning
    } else {
        ColorClass::Danger
    }
}

const PHISHING_RECOMMENDATIONS: &[&str] = &[
    "Do not click any links in this email",
    "Do not provide personal information",
    "Verify sender through alternative means",
    "Report this email as spam/phishing",
];

const SAFE_RECOMMENDATIONS: &[&str] = &[
    "Email appears safe to read",
    "Still verify links before clicking",
    "Trust your instincts if something feels off",
];

/// Fixed, ordered advice per verdict branch.
pub fn recommendation_set(is_phishing: bool) -> &'static [&'static str] {
    if is_phishing {
        PHISHING_RECOMMENDATIONS
    } else {
        SAFE_RECOMMENDATIONS
    }
}

pub fn risk_description(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::High => "Immediate attention required",
        RiskLevel::Medium => "Exercise caution",
        RiskLevel::Low => "Low threat detected",
        RiskLevel::Safe => "No threat detected",
        RiskLevel::Unknown => "",
    }
}
