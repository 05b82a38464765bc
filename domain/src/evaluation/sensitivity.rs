//! Cultural sensitivity screening.

use serde::{Deserialize, Serialize};

/// Terms flagged as potentially insensitive, matched case-insensitively
pub const SENSITIVE_TERMS: &[&str] = &["primitive", "savage", "backward", "uncivilized"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityReport {
    pub is_sensitive: bool,
    pub sensitivity_score: f64,
    pub issues: Vec<String>,
}

/// Screen text for [`SENSITIVE_TERMS`].
///
/// Each distinct term found costs 0.2, floored at 0.5.
pub fn check_sensitivity(text: &str) -> SensitivityReport {
    let lower = text.to_lowercase();
    let issues: Vec<String> = SENSITIVE_TERMS
        .iter()
        .filter(|term| lower.contains(*term))
        .map(|term| format!("Potentially insensitive term: '{}'", term))
        .collect();

    let sensitivity_score = if issues.is_empty() {
        1.0
    } else {
        (1.0 - 0.2 * issues.len() as f64).max(0.5)
    };

    SensitivityReport {
        is_sensitive: issues.is_empty(),
        sensitivity_score,
        issues,
    }
}
