//! Fact quality checks.

use crate::core::string::word_count;
use crate::exhibition::timeline::contains_year;
use serde::{Deserialize, Serialize};

/// Facts this long or shorter (trimmed, in characters) are not counted as valid
pub const MIN_FACT_CHARS: usize = 20;
/// Facts with more words than this count as detailed
pub const DETAILED_FACT_WORDS: usize = 10;

/// Quality and consistency summary for a set of facts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactReport {
    pub total_facts: usize,
    pub quality_score: f64,
    pub issues: Vec<String>,
    pub validated_facts: Vec<String>,
}

/// Score a set of facts.
///
/// The score blends three ratios: 30% facts longer than
/// [`MIN_FACT_CHARS`] over all facts, 30% dated facts over valid facts, and
/// 40% detailed facts over valid facts. No facts scores 0.0.
pub fn check_facts<S: AsRef<str>>(facts: &[S]) -> FactReport {
    if facts.is_empty() {
        return FactReport {
            total_facts: 0,
            quality_score: 0.0,
            issues: vec!["No facts provided".to_string()],
            validated_facts: Vec::new(),
        };
    }

    let valid: Vec<&str> = facts
        .iter()
        .map(AsRef::as_ref)
        .filter(|f| f.trim().chars().count() > MIN_FACT_CHARS)
        .collect();
    let dated = valid.iter().filter(|f| contains_year(f)).count();
    let detailed = valid
        .iter()
        .filter(|f| word_count(f) > DETAILED_FACT_WORDS)
        .count();

    let ratio = |n: usize, of: usize| if of == 0 { 0.0 } else { n as f64 / of as f64 };
    let length_score = ratio(valid.len(), facts.len());
    let date_score = ratio(dated, valid.len());
    let detail_score = ratio(detailed, valid.len());

    let mut issues = Vec::new();
    if valid.len() < facts.len() {
        issues.push(format!("{} facts too short", facts.len() - valid.len()));
    }
    if date_score < 0.3 {
        issues.push("Few facts contain specific dates".to_string());
    }

    FactReport {
        total_facts: facts.len(),
        quality_score: length_score * 0.3 + date_score * 0.3 + detail_score * 0.4,
        issues,
        validated_facts: valid.into_iter().map(str::to_string).collect(),
    }
}
