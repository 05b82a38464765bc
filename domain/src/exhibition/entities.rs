//! Exhibition entities: the artifact a pipeline run produces.
//!
//! The [`Exhibition`] is a growing record. Each pipeline stage adds or
//! replaces the fields it owns and never relies on what order earlier
//! stages filled theirs in.

use super::enrichment::{
    AccessibilityFeature, AccessibilityProfile, ImageDescriptor, InteractiveContent,
    MultimediaExperience, MultimediaSuggestion, RoomQuestion, SemanticAnalysis, SensoryElements,
};
use super::timeline::TimelineEvent;
use serde::{Deserialize, Serialize};

fn untitled_exhibit() -> String {
    "Untitled Exhibit".to_string()
}

fn unknown_period() -> String {
    "Unknown".to_string()
}

/// A reference to imagery that accompanies an exhibit.
///
/// Model output carries plain descriptions; the visual context stage
/// appends sourced references from search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VisualReference {
    Sourced {
        description: String,
        source: String,
        #[serde(rename = "type")]
        kind: String,
    },
    Description(String),
}

impl VisualReference {
    pub fn description(&self) -> &str {
        match self {
            VisualReference::Sourced { description, .. } => description,
            VisualReference::Description(d) => d,
        }
    }
}

/// A single exhibit (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exhibit {
    #[serde(default = "untitled_exhibit")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Free text such as "1400-1500 CE" or "Modern Era"
    #[serde(default = "unknown_period")]
    pub time_period: String,
    #[serde(default)]
    pub cultural_significance: String,
    #[serde(default)]
    pub facts: Vec<String>,
    #[serde(default)]
    pub visual_refs: Vec<VisualReference>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multimedia: Option<MultimediaSuggestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensory_elements: Option<SensoryElements>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_image: Option<ImageDescriptor>,
}

impl Exhibit {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            time_period: unknown_period(),
            cultural_significance: String::new(),
            facts: Vec::new(),
            visual_refs: Vec::new(),
            tags: Vec::new(),
            multimedia: None,
            sensory_elements: None,
            generated_image: None,
        }
    }

    pub fn with_time_period(mut self, period: impl Into<String>) -> Self {
        self.time_period = period.into();
        self
    }

    pub fn with_significance(mut self, significance: impl Into<String>) -> Self {
        self.cultural_significance = significance.into();
        self
    }

    pub fn with_facts<I, S>(mut self, facts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.facts = facts.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_visual_refs<I, S>(mut self, refs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.visual_refs = refs
            .into_iter()
            .map(|r| VisualReference::Description(r.into()))
            .collect();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// A themed room holding an ordered slice of the exhibition's exhibits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// 1-based position in the exhibition
    pub position: usize,
    pub title: String,
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub exhibits: Vec<Exhibit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narrative: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interactive_questions: Vec<RoomQuestion>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub discussion_prompts: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alt_formats: Vec<AccessibilityFeature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entrance_image: Option<ImageDescriptor>,
}

impl Room {
    pub fn new(position: usize, title: impl Into<String>) -> Self {
        Self {
            position,
            title: title.into(),
            theme: String::new(),
            description: String::new(),
            exhibits: Vec::new(),
            narrative: None,
            interactive_questions: Vec::new(),
            discussion_prompts: Vec::new(),
            alt_formats: Vec::new(),
            entrance_image: None,
        }
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_exhibits(mut self, exhibits: Vec<Exhibit>) -> Self {
        self.exhibits = exhibits;
        self
    }
}

/// The root content artifact of one pipeline run (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exhibition {
    pub topic: String,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub curator_notes: String,
    #[serde(default)]
    pub timeline: Vec<TimelineEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_analysis: Option<SemanticAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interactive: Option<InteractiveContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multimedia: Option<MultimediaExperience>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<AccessibilityProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_image: Option<ImageDescriptor>,
}

impl Exhibition {
    pub fn new(topic: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            title: title.into(),
            overview: String::new(),
            rooms: Vec::new(),
            curator_notes: String::new(),
            timeline: Vec::new(),
            semantic_analysis: None,
            interactive: None,
            multimedia: None,
            accessibility: None,
            poster_image: None,
        }
    }

    pub fn with_overview(mut self, overview: impl Into<String>) -> Self {
        self.overview = overview.into();
        self
    }

    pub fn with_rooms(mut self, rooms: Vec<Room>) -> Self {
        self.rooms = rooms;
        self
    }

    pub fn with_curator_notes(mut self, notes: impl Into<String>) -> Self {
        self.curator_notes = notes.into();
        self
    }

    /// Iterate every exhibit in room order.
    pub fn exhibits(&self) -> impl Iterator<Item = &Exhibit> {
        self.rooms.iter().flat_map(|r| r.exhibits.iter())
    }

    pub fn total_exhibits(&self) -> usize {
        self.rooms.iter().map(|r| r.exhibits.len()).sum()
    }

    /// All exhibit facts, in room order.
    pub fn facts(&self) -> Vec<&str> {
        self.exhibits()
            .flat_map(|e| e.facts.iter().map(String::as_str))
            .collect()
    }

    /// Curator notes plus every room and exhibit description, space-joined.
    pub fn descriptive_text(&self) -> String {
        let mut text = self.curator_notes.clone();
        for room in &self.rooms {
            text.push(' ');
            text.push_str(&room.description);
            for exhibit in &room.exhibits {
                text.push(' ');
                text.push_str(&exhibit.description);
            }
        }
        text
    }
}
