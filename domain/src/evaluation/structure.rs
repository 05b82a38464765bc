//! Structural completeness checks.

use crate::exhibition::entities::Exhibition;
use serde::{Deserialize, Serialize};

/// Fewer total exhibits than this is a structural issue
pub const MIN_TOTAL_EXHIBITS: usize = 3;
const ISSUE_PENALTY: f64 = 0.15;
const COMPLETENESS_FLOOR: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureReport {
    pub is_valid: bool,
    pub completeness_score: f64,
    pub issues: Vec<String>,
    pub total_exhibits: usize,
    pub total_rooms: usize,
}

/// Check an exhibition's structure.
///
/// One issue each for a missing topic, no rooms, every room without
/// exhibits, and fewer than [`MIN_TOTAL_EXHIBITS`] exhibits overall.
pub fn validate_structure(exhibition: &Exhibition) -> StructureReport {
    let mut issues = Vec::new();

    if exhibition.topic.trim().is_empty() {
        issues.push("Missing topic".to_string());
    }
    if exhibition.rooms.is_empty() {
        issues.push("No rooms defined".to_string());
    }
    for (i, room) in exhibition.rooms.iter().enumerate() {
        if room.exhibits.is_empty() {
            issues.push(format!("Room {} has no exhibits", i + 1));
        }
    }

    let total_exhibits = exhibition.total_exhibits();
    if total_exhibits < MIN_TOTAL_EXHIBITS {
        issues.push(format!(
            "Too few exhibits (minimum {})",
            MIN_TOTAL_EXHIBITS
        ));
    }

    let completeness_score =
        (1.0 - ISSUE_PENALTY * issues.len() as f64).max(COMPLETENESS_FLOOR);

    StructureReport {
        is_valid: issues.is_empty(),
        completeness_score,
        issues,
        total_exhibits,
        total_rooms: exhibition.rooms.len(),
    }
}
