//! Prompt templates for each pipeline stage

use crate::core::string::truncate_str;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Topic intake analysis in labeled-line format
    pub fn topic_analysis(topic: &str) -> String {
        format!(
            r#"You are a museum curator analyzing a topic for an exhibition.

Topic: {}

Provide a structured analysis in the following format:

TITLE: [Create an engaging exhibition title]
CATEGORY: [Historical/Cultural/Scientific/Artistic]
TIME_PERIOD: [Approximate time period or era]
REGIONS: [Geographic regions involved]
KEY_THEMES: [3-5 key themes to explore]
OVERVIEW: [2-3 sentence overview of the topic]
SUGGESTED_ROOMS: [3-5 thematic room titles]

Be specific, educational, and engaging."#,
            topic
        )
    }

    pub fn research_queries(topic: &str) -> String {
        format!(
            r#"Generate 5 specific search queries to research this museum exhibition topic: {}

Queries should cover:
1. Historical background
2. Cultural significance
3. Key figures or artifacts
4. Timeline and events
5. Modern relevance

Format: One query per line, no numbering."#,
            topic
        )
    }

    pub fn research_summary(topic: &str, facts: &[String]) -> String {
        format!(
            r#"Synthesize these research findings about {} into a coherent 3-paragraph summary suitable for a museum exhibition:

Facts:
{}

Create an educational, engaging summary that:
- Provides historical context
- Highlights cultural significance
- Maintains factual accuracy
- Uses accessible language"#,
            topic,
            Self::bullets(facts.iter().take(10))
        )
    }

    /// Exhibit generation as a JSON array
    pub fn exhibits(topic: &str, research_summary: &str, facts: &[String], count: usize) -> String {
        format!(
            r#"Create exactly {count} museum exhibits for an exhibition about: {topic}

Research Summary:
{research_summary}

Key Facts:
{facts}

For each exhibit, provide:
1. Name (engaging title)
2. Description (2-3 paragraphs, educational and engaging)
3. Time Period (specific dates or era)
4. Cultural Significance (why it matters)
5. Interesting Facts (3-5 bullet points)
6. Visual References (describe 2-3 images/artifacts that would accompany this exhibit)

Format as JSON array with this structure:
[
  {{
    "name": "Exhibit Name",
    "description": "Detailed description...",
    "time_period": "1400-1500 CE",
    "cultural_significance": "Why this matters...",
    "facts": ["Fact 1", "Fact 2", "Fact 3"],
    "visual_refs": ["Description of image 1", "Description of artifact 2"],
    "tags": ["tag1", "tag2"]
  }}
]

Provide ONLY the JSON array, no other text."#,
            facts = Self::bullets(facts.iter().take(20)),
        )
    }

    /// Room plan in `ROOM n: / THEME: / DESCRIPTION:` format
    pub fn room_plan(topic: &str, room_count: usize, exhibit_count: usize) -> String {
        format!(
            r#"Design {} themed rooms for a museum exhibition about: {}

Available exhibits: {}

For each room, provide:
1. Room Title (engaging, thematic)
2. Theme (what aspect of the topic)
3. Description (2-3 sentences about what visitors will experience)

Format as:
ROOM 1: [Title]
THEME: [Theme]
DESCRIPTION: [Description]

ROOM 2: [Title]
..."#,
            room_count, topic, exhibit_count
        )
    }

    pub fn curator_notes(topic: &str, overview: &str, room_titles: &[&str]) -> String {
        format!(
            r#"Write curator's notes for a museum exhibition about: {}

Overview: {}

Exhibition Rooms: {}

Write a 4-paragraph curator's introduction that:
1. Welcomes visitors and introduces the topic
2. Explains why this exhibition matters today
3. Highlights what visitors will discover
4. Provides context for understanding the exhibits

Tone: Educational, welcoming, engaging. Avoid jargon."#,
            topic,
            overview,
            room_titles.join(", ")
        )
    }

    pub fn room_narrative(room_title: &str, theme: &str, topic: &str, exhibit_names: &[&str]) -> String {
        format!(
            r#"Write a brief narrative introduction for this museum room:

Room: {}
Theme: {}
Exhibition Topic: {}
Key Exhibits: {}

Write 2-3 sentences that set the scene, connect the exhibits to the overall theme and create anticipation.

Tone: Engaging, educational, inviting."#,
            room_title,
            theme,
            topic,
            exhibit_names.join(", ")
        )
    }

    /// Refinement prompt for thin curator notes
    pub fn enhance_curator_notes(current_notes: &str, topic: &str) -> String {
        format!(
            r#"Enhance these curator notes for a museum exhibition about {}.

Current notes:
{}

Add more detail, context, and engagement while maintaining educational tone.
Target: 250-300 words."#,
            topic, current_notes
        )
    }

    /// Semantic connections in `type|connection|significance` lines
    pub fn connections(topic: &str) -> String {
        format!(
            r#"List 3 key connections for {}:
1. Historical connection
2. Cultural connection
3. Conceptual connection

Format: type|connection|significance (one per line)"#,
            topic
        )
    }

    pub fn concepts(topic: &str, research_summary: &str) -> String {
        format!(
            r#"Extract 8-10 key concepts from this topic: {}

Research:
{}

List the most important concepts, themes, and ideas.
Format: One concept per line, no numbering."#,
            topic,
            truncate_str(research_summary, 500)
        )
    }

    pub fn insights(topic: &str, connections: &[(String, String)], concepts: &[String]) -> String {
        let connection_lines = connections
            .iter()
            .take(3)
            .map(|(kind, connection)| format!("- {}: {}", kind, connection))
            .collect::<Vec<_>>()
            .join("\n");
        let concept_list = concepts.iter().take(5).cloned().collect::<Vec<_>>().join(", ");
        format!(
            r#"Generate 2-3 unique thematic insights about {}.

Connections:
{}

Key Concepts: {}

Write insights that reveal deeper meaning and unexpected connections.
Make them thought-provoking and educational."#,
            topic, connection_lines, concept_list
        )
    }

    /// Room questions in `Q|purpose|hint` lines
    pub fn room_questions(room_title: &str, theme: &str) -> String {
        format!(
            "Create 2 questions about: {} ({})\nFormat: Q|purpose|hint (one per line)",
            room_title, theme
        )
    }

    /// Multiple-choice quiz as a JSON object
    pub fn quiz(topic: &str) -> String {
        format!(
            r#"Create a 5-question multiple choice quiz about {}.

Questions should be educational but fun, mix difficulty levels and have clear correct answers.

Format as JSON:
{{
  "title": "Quiz title",
  "questions": [
    {{
      "question": "Question text",
      "options": ["A", "B", "C", "D"],
      "correct": 0,
      "explanation": "Why this is correct"
    }}
  ]
}}

Provide ONLY the JSON."#,
            topic
        )
    }

    pub fn poster_image(title: &str, topic: &str, overview: &str) -> String {
        format!(
            r#"Create a professional museum exhibition poster for "{}".

Theme: {}
Overview: {}

Style: Museum-quality poster with elegant typography, warm lighting, sophisticated composition.
Mood: Educational, inviting, culturally respectful, visually striking.
Format: Landscape poster suitable for museum display."#,
            title,
            topic,
            truncate_str(overview, 200)
        )
    }

    pub fn room_image(room_title: &str, theme: &str, topic: &str, description: &str) -> String {
        format!(
            r#"Create a museum gallery room entrance view for "{}".

Theme: {}
Context: {}
Description: {}

Style: Professional museum interior photography, warm gallery lighting, elegant display.
Perspective: Wide angle entrance view showing the gallery space."#,
            room_title,
            theme,
            topic,
            truncate_str(description, 200)
        )
    }

    pub fn exhibit_image(name: &str, description: &str, time_period: &str, room_theme: &str) -> String {
        format!(
            r#"Create a museum-quality photograph of: {}

Description: {}
Time Period: {}
Context: {}

Style: Professional museum artifact photography, dramatic lighting, clean background.
Lighting: Dramatic spotlighting with soft shadows, museum gallery lighting."#,
            name,
            truncate_str(description, 300),
            time_period,
            room_theme
        )
    }

    /// Ask for an image-generator-ready description of an image prompt
    pub fn enhance_image_description(image_prompt: &str) -> String {
        format!(
            "Create a detailed visual description for an AI image generator:\n\n{}\n\n\
             Provide a concise, vivid description optimized for image generation (max 100 words).",
            image_prompt
        )
    }

    fn bullets<'a>(items: impl Iterator<Item = &'a String>) -> String {
        items
            .map(|item| format!("- {}", item))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
