//! Topic value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// Minimum topic length after trimming
pub const MIN_TOPIC_LENGTH: usize = 3;
/// Maximum topic length after trimming
pub const MAX_TOPIC_LENGTH: usize = 200;

const FORBIDDEN_PATTERNS: &[&str] = &["<script", "javascript:", "onerror=", "onclick="];

/// A validated exhibition topic (Value Object)
///
/// The raw input string the caller hands to the pipeline, trimmed and
/// checked before any model call is made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    content: String,
}

impl Topic {
    /// Validate and create a topic.
    pub fn parse(content: impl AsRef<str>) -> Result<Self, DomainError> {
        let content = content.as_ref().trim();

        if content.is_empty() {
            return Err(DomainError::InvalidTopic(
                "Topic must be a non-empty string".to_string(),
            ));
        }

        let len = content.chars().count();
        if len < MIN_TOPIC_LENGTH {
            return Err(DomainError::InvalidTopic(format!(
                "Topic must be at least {} characters",
                MIN_TOPIC_LENGTH
            )));
        }
        if len > MAX_TOPIC_LENGTH {
            return Err(DomainError::InvalidTopic(format!(
                "Topic must not exceed {} characters",
                MAX_TOPIC_LENGTH
            )));
        }

        let lower = content.to_lowercase();
        if FORBIDDEN_PATTERNS.iter().any(|p| lower.contains(p)) {
            return Err(DomainError::InvalidTopic(
                "Topic contains forbidden content".to_string(),
            ));
        }

        if !content.chars().any(|c| c.is_ascii_alphabetic()) {
            return Err(DomainError::InvalidTopic(
                "Topic must contain at least one letter".to_string(),
            ));
        }

        Ok(Self {
            content: content.to_string(),
        })
    }

    /// Get the topic content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<&str> for Topic {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Topic::parse(s)
    }
}

/// Structured topic data produced by topic intake.
///
/// Created once at pipeline start and never mutated afterwards; the
/// exhibition copies the fields it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicRecord {
    pub original_topic: String,
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub time_period: Option<String>,
    #[serde(default)]
    pub regions: Option<String>,
    #[serde(default)]
    pub key_themes: Option<String>,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub suggested_rooms: Option<String>,
    /// The full model analysis the fields were extracted from
    #[serde(default)]
    pub enriched_text: String,
}

impl TopicRecord {
    /// A record with no enrichment: the title is the topic itself.
    pub fn bare(topic: &Topic) -> Self {
        Self {
            original_topic: topic.content().to_string(),
            title: topic.content().to_string(),
            category: None,
            time_period: None,
            regions: None,
            key_themes: None,
            overview: String::new(),
            suggested_rooms: None,
            enriched_text: String::new(),
        }
    }
}
