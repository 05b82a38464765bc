//! Wire types for the `generateContent` endpoint.

use serde::{Deserialize, Serialize};

// =============================================================================
// REQUEST
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GenerateContentRequest<'a> {
    pub contents: Vec<Content<'a>>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub(super) struct Content<'a> {
    pub parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
pub(super) struct TextPart<'a> {
    pub text: &'a str,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<&'static str>>,
}

impl<'a> GenerateContentRequest<'a> {
    pub fn text(prompt: &'a str, temperature: f32, max_output_tokens: u32) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![TextPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: Some(temperature),
                max_output_tokens: Some(max_output_tokens),
                response_modalities: None,
            },
        }
    }

    pub fn image(prompt: &'a str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![TextPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_modalities: Some(vec!["TEXT", "IMAGE"]),
                ..Default::default()
            },
        }
    }
}

// =============================================================================
// RESPONSE
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ResponsePart {
    pub text: Option<String>,
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PromptFeedback {
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    fn parts(&self) -> impl Iterator<Item = &ResponsePart> {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|c| c.parts.iter())
    }

    /// Concatenated text of every part of every candidate
    pub fn text(&self) -> String {
        self.parts()
            .filter_map(|p| p.text.as_deref())
            .collect::<Vec<_>>()
            .join("")
    }

    /// First inline data part, if any
    pub fn inline_data(&self) -> Option<&InlineData> {
        self.parts().find_map(|p| p.inline_data.as_ref())
    }

    /// Why the service produced nothing usable
    pub fn empty_reason(&self) -> String {
        if let Some(reason) = self
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            return format!("prompt blocked: {reason}");
        }
        match self
            .candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref())
        {
            Some(reason) => format!("no content returned (finish reason: {reason})"),
            None => "no content returned".to_string(),
        }
    }
}

// =============================================================================
// ERROR BODY
// =============================================================================

#[derive(Debug, Deserialize)]
pub(super) struct ErrorEnvelope {
    pub error: ApiError,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiError {
    pub message: Option<String>,
    pub status: Option<String>,
}
