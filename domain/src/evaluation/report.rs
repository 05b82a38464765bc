//! Composite quality evaluation.

use super::facts::{FactReport, check_facts};
use super::sensitivity::{SensitivityReport, check_sensitivity};
use super::structure::{StructureReport, validate_structure};
use crate::core::string::word_count;
use crate::exhibition::entities::Exhibition;
use serde::{Deserialize, Serialize};

/// Curator notes reach full narrative quality at this many words
pub const NARRATIVE_TARGET_WORDS: usize = 200;
/// Fewer total exhibits than this triggers a content-volume recommendation
pub const RICH_CONTENT_EXHIBITS: usize = 5;

pub const COMPLETENESS_WEIGHT: f64 = 0.30;
pub const NARRATIVE_WEIGHT: f64 = 0.25;
pub const FACTUAL_WEIGHT: f64 = 0.20;
pub const SENSITIVITY_WEIGHT: f64 = 0.25;

/// Weighted composite of the four sub-scores.
pub fn overall_score(completeness: f64, narrative: f64, factual: f64, sensitivity: f64) -> f64 {
    completeness * COMPLETENESS_WEIGHT
        + narrative * NARRATIVE_WEIGHT
        + factual * FACTUAL_WEIGHT
        + sensitivity * SENSITIVITY_WEIGHT
}

/// Saturating narrative measure over curator notes.
pub fn narrative_quality(curator_notes: &str) -> f64 {
    (word_count(curator_notes) as f64 / NARRATIVE_TARGET_WORDS as f64).min(1.0)
}

/// Read-only snapshot of one evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub overall_score: f64,
    pub completeness_score: f64,
    pub narrative_quality: f64,
    pub factual_quality: f64,
    pub cultural_sensitivity: f64,
    pub meets_threshold: bool,
    pub recommendations: Vec<String>,
    pub structure: StructureReport,
    pub facts: FactReport,
    pub sensitivity: SensitivityReport,
}

impl EvaluationReport {
    /// Evaluate an exhibition against the acceptance threshold.
    ///
    /// Pure and deterministic: the same exhibition always yields the same
    /// report.
    pub fn evaluate(exhibition: &Exhibition, min_quality_score: f64) -> Self {
        let structure = validate_structure(exhibition);
        let facts = check_facts(&exhibition.facts());
        let sensitivity = check_sensitivity(&exhibition.descriptive_text());
        let narrative = narrative_quality(&exhibition.curator_notes);

        let overall = overall_score(
            structure.completeness_score,
            narrative,
            facts.quality_score,
            sensitivity.sensitivity_score,
        );
        let recommendations = recommendations(overall, min_quality_score, &structure);

        Self {
            overall_score: overall,
            completeness_score: structure.completeness_score,
            narrative_quality: narrative,
            factual_quality: facts.quality_score,
            cultural_sensitivity: sensitivity.sensitivity_score,
            meets_threshold: overall >= min_quality_score,
            recommendations,
            structure,
            facts,
            sensitivity,
        }
    }

    pub fn total_exhibits(&self) -> usize {
        self.structure.total_exhibits
    }
}

fn recommendations(overall: f64, min_quality_score: f64, structure: &StructureReport) -> Vec<String> {
    let mut recommendations = Vec::new();
    if overall < min_quality_score {
        recommendations.push("Overall quality below threshold - consider refinement".to_string());
    }
    recommendations.extend(structure.issues.iter().map(|issue| format!("Structure: {}", issue)));
    if structure.total_exhibits < RICH_CONTENT_EXHIBITS {
        recommendations.push("Add more exhibits for richer content".to_string());
    }
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exhibition::entities::{Exhibit, Room};

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    fn rich_exhibition() -> Exhibition {
        let fact = "In 1492 the expedition reached the islands after a long and difficult voyage.";
        let rooms = (1..=3)
            .map(|i| {
                Room::new(i, format!("Room {}", i)).with_exhibits(vec![
                    Exhibit::new(format!("E{}a", i), "An exhibit.").with_facts([fact]),
                    Exhibit::new(format!("E{}b", i), "Another exhibit.").with_facts([fact]),
                ])
            })
            .collect();
        Exhibition::new("Age of Sail", "Across the Ocean")
            .with_curator_notes(words(250))
            .with_rooms(rooms)
    }

    #[test]
    fn test_overall_weights() {
        assert!((overall_score(1.0, 1.0, 1.0, 1.0) - 1.0).abs() < 1e-9);
        assert_eq!(overall_score(0.0, 0.0, 0.0, 0.0), 0.0);
        assert!((overall_score(1.0, 0.0, 0.0, 0.0) - 0.30).abs() < 1e-9);
        assert!((overall_score(0.0, 0.0, 1.0, 0.0) - 0.20).abs() < 1e-9);
    }

    #[test]
    fn test_narrative_saturates() {
        assert_eq!(narrative_quality(""), 0.0);
        assert_eq!(narrative_quality(&words(100)), 0.5);
        assert_eq!(narrative_quality(&words(400)), 1.0);
    }

    #[test]
    fn test_rich_exhibition_scores_full() {
        let report = EvaluationReport::evaluate(&rich_exhibition(), 0.70);
        assert!((report.overall_score - 1.0).abs() < 1e-9);
        assert!(report.meets_threshold);
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn test_empty_exhibition_recommendations() {
        let exhibition = Exhibition::new("Age of Sail", "Across the Ocean")
            .with_rooms(vec![Room::new(1, "Only")]);
        let report = EvaluationReport::evaluate(&exhibition, 0.70);
        assert!(!report.meets_threshold);
        assert_eq!(
            report.recommendations,
            vec![
                "Overall quality below threshold - consider refinement",
                "Structure: Room 1 has no exhibits",
                "Structure: Too few exhibits (minimum 3)",
                "Add more exhibits for richer content",
            ]
        );
        assert_eq!(report.factual_quality, 0.0);
        assert_eq!(report.total_exhibits(), 0);
    }

    #[test]
    fn test_sensitive_term_lowers_score() {
        let mut exhibition = rich_exhibition();
        exhibition.rooms[0].description = "Once called primitive by colonists.".to_string();
        let report = EvaluationReport::evaluate(&exhibition, 0.70);
        assert!(!report.sensitivity.is_sensitive);
        assert!((report.cultural_sensitivity - 0.8).abs() < 1e-9);
        assert!(report.overall_score < 1.0);
    }

    #[test]
    fn test_scores_within_unit_interval() {
        let report = EvaluationReport::evaluate(&Exhibition::new("", ""), 0.70);
        for score in [
            report.overall_score,
            report.completeness_score,
            report.narrative_quality,
            report.factual_quality,
            report.cultural_sensitivity,
        ] {
            assert!((0.0..=1.0).contains(&score));
        }
    }
}
