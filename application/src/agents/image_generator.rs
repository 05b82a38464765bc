//! Image generation for the poster, room entrances and exhibits.
//!
//! Every image goes through two model calls: an enhanced visual
//! description, then the image request itself. A service that returns no
//! image gets a placeholder URL instead; any failure is recorded on the
//! descriptor rather than failing the stage.

use super::envelope::{Agent, AgentError};
use crate::model_client::ModelClient;
use crate::ports::model_gateway::ImagePayload;
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use curator_domain::core::string::truncate_str;
use curator_domain::{Exhibition, ImageDescriptor, ImageStatus, PromptTemplate};
use std::sync::Arc;
use tracing::{debug, error};

const DESCRIPTION_TEMPERATURE: f32 = 0.9;
const PLACEHOLDER_BASE: &str = "https://via.placeholder.com/800x600/8B4513/FFFFFF";
const PLACEHOLDER_TEXT_CHARS: usize = 50;
const PLACEHOLDER_NOTE: &str =
    "Using placeholder image. Connect an image generation model for actual AI-generated images";

pub struct ImageGeneratorAgent {
    client: Arc<ModelClient>,
}

impl ImageGeneratorAgent {
    pub fn new(client: Arc<ModelClient>) -> Self {
        Self { client }
    }

    async fn render(&self, prompt: String) -> ImageDescriptor {
        let description = match self
            .client
            .generate_with_temperature(
                &PromptTemplate::enhance_image_description(&prompt),
                DESCRIPTION_TEMPERATURE,
            )
            .await
        {
            Ok(description) => description,
            Err(e) => {
                error!("Image description failed: {}", e);
                return failed(prompt, e.to_string());
            }
        };

        let status = match self.client.generate_image(&description).await {
            Ok(ImagePayload::Inline { mime_type, data }) => ImageStatus::Generated {
                mime_type,
                data: STANDARD.encode(data),
            },
            Ok(ImagePayload::Unavailable { reason }) => {
                debug!("No image returned ({}), using placeholder", reason);
                ImageStatus::PlaceholderGenerated {
                    placeholder_url: placeholder_url(&prompt),
                    note: PLACEHOLDER_NOTE.to_string(),
                }
            }
            Err(e) => {
                error!("Image generation failed: {}", e);
                ImageStatus::Error {
                    error: e.to_string(),
                }
            }
        };

        ImageDescriptor {
            prompt,
            enhanced_description: Some(description),
            status,
        }
    }
}

fn failed(prompt: String, error: String) -> ImageDescriptor {
    ImageDescriptor {
        prompt,
        enhanced_description: None,
        status: ImageStatus::Error { error },
    }
}

/// Placeholder URL captioned with the prompt's first line.
fn placeholder_url(prompt: &str) -> String {
    let first_line = prompt.lines().next().unwrap_or_default();
    let caption: String = first_line.chars().take(PLACEHOLDER_TEXT_CHARS).collect();
    format!("{}?text={}", PLACEHOLDER_BASE, urlencoding::encode(&caption))
}

#[async_trait]
impl Agent for ImageGeneratorAgent {
    type Input = Exhibition;
    type Output = Exhibition;

    fn name(&self) -> &'static str {
        "ImageGeneratorAgent"
    }

    async fn process(&self, mut exhibition: Exhibition) -> Result<Exhibition, AgentError> {
        let poster = PromptTemplate::poster_image(&exhibition.title, &exhibition.topic, &exhibition.overview);
        exhibition.poster_image = Some(self.render(poster).await);

        for room in &mut exhibition.rooms {
            let prompt = PromptTemplate::room_image(
                &room.title,
                &room.theme,
                &exhibition.topic,
                truncate_str(&room.description, 200),
            );
            room.entrance_image = Some(self.render(prompt).await);

            for exhibit in &mut room.exhibits {
                let prompt = PromptTemplate::exhibit_image(
                    &exhibit.name,
                    &exhibit.description,
                    &exhibit.time_period,
                    &room.theme,
                );
                exhibit.generated_image = Some(self.render(prompt).await);
            }
        }
        Ok(exhibition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model_client::testing::{MockGateway, client};
    use crate::ports::model_gateway::GatewayError;
    use curator_domain::{Exhibit, Room};

    fn exhibition() -> Exhibition {
        Exhibition::new("Samurai", "Way of the Warrior").with_rooms(vec![
            Room::new(1, "Armor")
                .with_theme("Craft")
                .with_exhibits(vec![Exhibit::new("Kabuto", "Helmet")]),
        ])
    }

    #[tokio::test]
    async fn test_unavailable_image_becomes_placeholder() {
        let gateway = Arc::new(MockGateway::new("A vivid description."));
        let agent = ImageGeneratorAgent::new(client(gateway.clone()));
        let result = agent.process(exhibition()).await.unwrap();

        let poster = result.poster_image.unwrap();
        assert_eq!(poster.enhanced_description.as_deref(), Some("A vivid description."));
        match poster.status {
            ImageStatus::PlaceholderGenerated { placeholder_url, .. } => {
                assert!(placeholder_url.starts_with(PLACEHOLDER_BASE));
                assert!(placeholder_url.contains("?text=Create%20a%20professional"));
            }
            other => panic!("unexpected status {:?}", other),
        }
        assert!(result.rooms[0].entrance_image.is_some());
        assert!(result.rooms[0].exhibits[0].generated_image.is_some());
        // poster + room + exhibit descriptions
        assert_eq!(gateway.prompt_count(), 3);
        assert_eq!(gateway.temperatures.lock().unwrap()[0], 0.9);
    }

    #[tokio::test]
    async fn test_inline_image_base64_encoded() {
        let gateway = Arc::new(MockGateway::new("desc").with_image(Ok(ImagePayload::Inline {
            mime_type: "image/png".to_string(),
            data: vec![1, 2, 3],
        })));
        let agent = ImageGeneratorAgent::new(client(gateway));
        let result = agent.process(exhibition()).await.unwrap();
        assert_eq!(
            result.poster_image.unwrap().status,
            ImageStatus::Generated {
                mime_type: "image/png".to_string(),
                data: "AQID".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_failures_recorded_on_descriptor() {
        let gateway = Arc::new(MockGateway::new("desc").with_image(Err(GatewayError::InvalidRequest(
            "blocked".to_string(),
        ))));
        let agent = ImageGeneratorAgent::new(client(gateway));
        let result = agent.process(exhibition()).await.unwrap();
        assert!(result.poster_image.unwrap().is_error());

        let gateway = Arc::new(
            MockGateway::new("desc").route("visual description", Err(GatewayError::MissingApiKey("KEY".into()))),
        );
        let agent = ImageGeneratorAgent::new(client(gateway));
        let result = agent.process(exhibition()).await.unwrap();
        let poster = result.poster_image.unwrap();
        assert!(poster.is_error());
        assert!(poster.enhanced_description.is_none());
    }

    #[test]
    fn test_placeholder_caption_limited() {
        let url = placeholder_url(&format!("{}\nsecond line", "x".repeat(80)));
        assert_eq!(url, format!("{}?text={}", PLACEHOLDER_BASE, "x".repeat(50)));
    }
}
