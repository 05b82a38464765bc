//! Multimedia curation: per-exhibit media suggestions, virtual tour and audio guide.

use super::envelope::{Agent, AgentError};
use async_trait::async_trait;
use curator_domain::{
    AudioStop, Exhibit, Exhibition, MultimediaExperience, MultimediaSuggestion, SensoryElements,
    VirtualTour,
};

const AUDIO_LANGUAGES: [&str; 4] = ["English", "Spanish", "French", "Mandarin"];

/// Deterministic; makes no model calls.
#[derive(Debug, Default)]
pub struct MultimediaCuratorAgent;

impl MultimediaCuratorAgent {
    pub fn new() -> Self {
        Self
    }
}

fn suggest_multimedia(exhibit: &Exhibit) -> MultimediaSuggestion {
    let name = &exhibit.name;
    MultimediaSuggestion {
        model_3d: format!("Interactive 3D model of {}", name),
        video: format!("Short documentary clip about {}", name),
        audio: format!("Ambient sounds from the period of {}", name),
        ar_experience: format!("Augmented reality overlay showing {} in context", name),
        interactive_map: format!("Geographic visualization of {}'s influence", name),
        comparison_slider: format!("Before/after or then/now comparison for {}", name),
    }
}

fn sensory_elements() -> SensoryElements {
    SensoryElements {
        visual: "High-resolution images and detailed close-ups".to_string(),
        audio: "Period-appropriate music or ambient sounds".to_string(),
        tactile: "Replica objects visitors can touch".to_string(),
        spatial: "Room layout that guides natural flow".to_string(),
    }
}

fn experience(exhibition: &Exhibition) -> MultimediaExperience {
    let virtual_tour = VirtualTour {
        introduction: format!(
            "Welcome to the {} exhibition. Let me guide you through this journey.",
            exhibition.topic
        ),
        room_transitions: exhibition
            .rooms
            .iter()
            .map(|room| format!("As we move to {}, notice how the theme evolves...", room.title))
            .collect(),
        highlights: "Don't miss these key exhibits...".to_string(),
        conclusion: "Thank you for exploring this exhibition with me.".to_string(),
    };

    let audio_guide = exhibition
        .rooms
        .iter()
        .enumerate()
        .map(|(i, room)| AudioStop {
            stop_number: i + 1,
            location: room.title.clone(),
            duration: "3-5 minutes".to_string(),
            script_preview: format!("In this room, we explore {}...", room.theme),
            language_options: AUDIO_LANGUAGES.iter().map(|l| l.to_string()).collect(),
        })
        .collect();

    MultimediaExperience {
        virtual_tour,
        audio_guide,
    }
}

#[async_trait]
impl Agent for MultimediaCuratorAgent {
    type Input = Exhibition;
    type Output = Exhibition;

    fn name(&self) -> &'static str {
        "MultimediaCuratorAgent"
    }

    async fn process(&self, mut exhibition: Exhibition) -> Result<Exhibition, AgentError> {
        for exhibit in exhibition.rooms.iter_mut().flat_map(|r| r.exhibits.iter_mut()) {
            exhibit.multimedia = Some(suggest_multimedia(exhibit));
            exhibit.sensory_elements = Some(sensory_elements());
        }
        exhibition.multimedia = Some(experience(&exhibition));
        Ok(exhibition)
    }
}
