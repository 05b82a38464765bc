//! Accessibility: exhibition-wide accommodations and per-room alternative formats.

use super::envelope::{Agent, AgentError};
use async_trait::async_trait;
use curator_domain::{AccessibilityFeature, AccessibilityProfile, Exhibition};

pub const SUPPORTED_LANGUAGES: [&str; 6] = ["English", "Spanish", "French", "Mandarin", "Arabic", "Hindi"];

/// Deterministic; makes no model calls.
#[derive(Debug, Default)]
pub struct AccessibilityAgent;

impl AccessibilityAgent {
    pub fn new() -> Self {
        Self
    }
}

fn features(pairs: &[(&str, &str)]) -> Vec<AccessibilityFeature> {
    pairs
        .iter()
        .map(|(name, detail)| AccessibilityFeature::new(*name, *detail))
        .collect()
}

fn profile() -> AccessibilityProfile {
    AccessibilityProfile {
        visual: features(&[
            ("screen_reader_compatible", "Yes"),
            ("high_contrast_mode", "Available"),
            ("text_descriptions", "Detailed alt text for all images"),
            ("large_print_option", "Available for all text"),
            ("audio_descriptions", "Available for visual exhibits"),
            ("tactile_graphics", "3D printed models available"),
        ]),
        auditory: features(&[
            ("captions", "All audio/video content captioned"),
            ("transcripts", "Full transcripts available"),
            ("sign_language", "ASL interpretation videos"),
            ("visual_alerts", "Visual cues for audio content"),
        ]),
        cognitive: features(&[
            ("simplified_text", "Plain language summaries available"),
            ("clear_navigation", "Intuitive room flow and signage"),
            ("rest_areas", "Quiet spaces for breaks"),
            ("sensory_friendly", "Low-stimulation options available"),
            ("time_flexibility", "Self-paced exploration encouraged"),
        ]),
        physical: features(&[
            ("wheelchair_accessible", "All areas accessible"),
            ("seating", "Benches in every room"),
            ("exhibit_height", "Adjustable viewing heights"),
            ("wide_pathways", "Easy navigation for mobility devices"),
        ]),
        languages: SUPPORTED_LANGUAGES.iter().map(|l| l.to_string()).collect(),
        language: features(&[
            ("translation_quality", "Professional translations"),
            ("cultural_adaptation", "Culturally appropriate content"),
            ("reading_level", "Multiple reading levels available"),
        ]),
    }
}

fn alternative_formats() -> Vec<AccessibilityFeature> {
    let audio_tour = format!("Available in {} languages", SUPPORTED_LANGUAGES.len());
    let mut formats = vec![AccessibilityFeature::new("audio_tour", audio_tour)];
    formats.extend(features(&[
        ("braille_guide", "Braille descriptions available"),
        ("large_print", "Large print guide available"),
        ("digital_guide", "Mobile app with customization"),
        ("simplified_guide", "Easy-read version available"),
    ]));
    formats
}

#[async_trait]
impl Agent for AccessibilityAgent {
    type Input = Exhibition;
    type Output = Exhibition;

    fn name(&self) -> &'static str {
        "AccessibilityAgent"
    }

    async fn process(&self, mut exhibition: Exhibition) -> Result<Exhibition, AgentError> {
        exhibition.accessibility = Some(profile());
        for room in &mut exhibition.rooms {
            room.alt_formats = alternative_formats();
        }
        Ok(exhibition)
    }
}
