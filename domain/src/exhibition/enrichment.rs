//! Auxiliary content records attached to an exhibition by enrichment stages.

use serde::{Deserialize, Serialize};

/// A typed link between the topic and a wider context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub connection: String,
    #[serde(default)]
    pub significance: String,
}

impl Connection {
    pub fn new(
        kind: impl Into<String>,
        connection: impl Into<String>,
        significance: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            connection: connection.into(),
            significance: significance.into(),
        }
    }
}

/// Output of the semantic analysis stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticAnalysis {
    pub key_concepts: Vec<String>,
    pub connections: Vec<Connection>,
    pub thematic_insights: String,
    pub semantic_score: f64,
}

impl SemanticAnalysis {
    /// Richness score: mean of connection and concept saturation.
    ///
    /// Five connections and eight concepts each saturate at 1.0.
    pub fn score(connections: usize, concepts: usize) -> f64 {
        let connection_score = (connections as f64 / 5.0).min(1.0);
        let concept_score = (concepts as f64 / 8.0).min(1.0);
        (connection_score + concept_score) / 2.0
    }

    /// Placeholder used when the semantic stage degrades.
    pub fn unavailable() -> Self {
        Self {
            key_concepts: Vec::new(),
            connections: Vec::new(),
            thematic_insights: "Analysis unavailable".to_string(),
            semantic_score: 0.5,
        }
    }
}

/// A room-level question with its teaching purpose
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomQuestion {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub hint: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    /// Index into `options`
    #[serde(default)]
    pub correct: usize,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub title: String,
    pub description: String,
    pub reward: String,
}

/// Exhibition-wide interactive content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractiveContent {
    pub quiz: Quiz,
    pub challenges: Vec<Challenge>,
}

impl InteractiveContent {
    /// Placeholder used when the interactive stage degrades.
    pub fn unavailable() -> Self {
        Self {
            quiz: Quiz {
                title: "Quiz unavailable".to_string(),
                questions: Vec::new(),
            },
            challenges: Vec::new(),
        }
    }
}

/// Media formats suggested for one exhibit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultimediaSuggestion {
    pub model_3d: String,
    pub video: String,
    pub audio: String,
    pub ar_experience: String,
    pub interactive_map: String,
    pub comparison_slider: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensoryElements {
    pub visual: String,
    pub audio: String,
    pub tactile: String,
    pub spatial: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualTour {
    pub introduction: String,
    pub room_transitions: Vec<String>,
    pub highlights: String,
    pub conclusion: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioStop {
    pub stop_number: usize,
    pub location: String,
    pub duration: String,
    pub script_preview: String,
    pub language_options: Vec<String>,
}

/// Exhibition-wide multimedia experience
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultimediaExperience {
    pub virtual_tour: VirtualTour,
    pub audio_guide: Vec<AudioStop>,
}

/// A named accommodation and how it is provided
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessibilityFeature {
    pub name: String,
    pub detail: String,
}

impl AccessibilityFeature {
    pub fn new(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessibilityProfile {
    pub visual: Vec<AccessibilityFeature>,
    pub auditory: Vec<AccessibilityFeature>,
    pub cognitive: Vec<AccessibilityFeature>,
    pub physical: Vec<AccessibilityFeature>,
    pub languages: Vec<String>,
    pub language: Vec<AccessibilityFeature>,
}

/// Result of one image request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImageStatus {
    /// Inline image bytes returned by the model service, base64 encoded
    Generated { mime_type: String, data: String },
    /// The service had no image; a placeholder URL stands in
    PlaceholderGenerated { placeholder_url: String, note: String },
    Error { error: String },
}

/// Generated-image descriptor for a poster, room entrance or exhibit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enhanced_description: Option<String>,
    #[serde(flatten)]
    pub status: ImageStatus,
}

impl ImageDescriptor {
    pub fn is_error(&self) -> bool {
        matches!(self.status, ImageStatus::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semantic_score_saturates() {
        assert_eq!(SemanticAnalysis::score(0, 0), 0.0);
        assert_eq!(SemanticAnalysis::score(5, 8), 1.0);
        assert_eq!(SemanticAnalysis::score(10, 20), 1.0);
        assert!((SemanticAnalysis::score(3, 4) - 0.55).abs() < 1e-9);
    }

    #[test]
    fn test_unavailable_defaults() {
        let semantic = SemanticAnalysis::unavailable();
        assert_eq!(semantic.thematic_insights, "Analysis unavailable");
        assert_eq!(semantic.semantic_score, 0.5);

        let interactive = InteractiveContent::unavailable();
        assert_eq!(interactive.quiz.title, "Quiz unavailable");
        assert!(interactive.quiz.questions.is_empty());
        assert!(interactive.challenges.is_empty());
    }

    #[test]
    fn test_image_descriptor_serializes_status_tag() {
        let descriptor = ImageDescriptor {
            prompt: "poster".to_string(),
            enhanced_description: None,
            status: ImageStatus::Error {
                error: "timeout".to_string(),
            },
        };
        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["error"], "timeout");
        assert!(descriptor.is_error());
    }

    #[test]
    fn test_connection_parses_type_field() {
        let c: Connection =
            serde_json::from_str(r#"{"type":"cultural","connection":"Trade","significance":"High"}"#)
                .unwrap();
        assert_eq!(c.kind, "cultural");
    }
}
