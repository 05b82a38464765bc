//! Narrative: curator notes and per-room introductions.

use super::envelope::{Agent, AgentError};
use crate::model_client::ModelClient;
use async_trait::async_trait;
use curator_domain::{Exhibition, PromptTemplate};
use std::sync::Arc;

const NOTES_TEMPERATURE: f32 = 0.85;
const ROOM_TEMPERATURE: f32 = 0.7;
/// Exhibits named in a room narrative prompt
const NAMED_EXHIBITS: usize = 5;

pub struct NarrativeAgent {
    client: Arc<ModelClient>,
}

impl NarrativeAgent {
    pub fn new(client: Arc<ModelClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Agent for NarrativeAgent {
    type Input = Exhibition;
    type Output = Exhibition;

    fn name(&self) -> &'static str {
        "NarrativeAgent"
    }

    async fn process(&self, mut exhibition: Exhibition) -> Result<Exhibition, AgentError> {
        let room_titles: Vec<&str> = exhibition.rooms.iter().map(|r| r.title.as_str()).collect();
        let prompt = PromptTemplate::curator_notes(&exhibition.topic, &exhibition.overview, &room_titles);
        exhibition.curator_notes = self
            .client
            .generate_with_temperature(&prompt, NOTES_TEMPERATURE)
            .await?;

        for room in &mut exhibition.rooms {
            let names: Vec<&str> = room
                .exhibits
                .iter()
                .take(NAMED_EXHIBITS)
                .map(|e| e.name.as_str())
                .collect();
            let prompt = PromptTemplate::room_narrative(&room.title, &room.theme, &exhibition.topic, &names);
            room.narrative = Some(
                self.client
                    .generate_with_temperature(&prompt, ROOM_TEMPERATURE)
                    .await?,
            );
        }

        Ok(exhibition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model_client::testing::{MockGateway, client};
    use crate::ports::model_gateway::GatewayError;
    use curator_domain::Room;

    fn exhibition() -> Exhibition {
        Exhibition::new("Bronze Age", "Age of Bronze")
            .with_rooms(vec![Room::new(1, "Ore"), Room::new(2, "Forge")])
    }

    #[tokio::test]
    async fn test_writes_notes_and_room_narratives() {
        let gateway = Arc::new(MockGateway::scripted(vec![
            Ok("Welcome to the exhibition.".to_string()),
            Ok("Ore room intro.".to_string()),
            Ok("Forge room intro.".to_string()),
        ]));
        let agent = NarrativeAgent::new(client(gateway.clone()));
        let result = agent.process(exhibition()).await.unwrap();
        assert_eq!(result.curator_notes, "Welcome to the exhibition.");
        assert_eq!(result.rooms[1].narrative.as_deref(), Some("Forge room intro."));
        assert_eq!(*gateway.temperatures.lock().unwrap(), vec![0.85, 0.7, 0.7]);
    }

    #[tokio::test]
    async fn test_model_failure_propagates() {
        let gateway = Arc::new(MockGateway::scripted(vec![
            Err(GatewayError::Timeout),
            Err(GatewayError::Timeout),
            Err(GatewayError::Timeout),
        ]));
        let agent = NarrativeAgent::new(client(gateway));
        assert!(agent.process(exhibition()).await.is_err());
    }
}
