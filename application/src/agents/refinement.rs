//! Targeted refinement of a low-scoring exhibition.

use super::envelope::{Agent, AgentError};
use crate::model_client::ModelClient;
use async_trait::async_trait;
use curator_domain::{EvaluationReport, Exhibit, Exhibition, PromptTemplate};
use std::sync::Arc;

/// Curator notes below this narrative score are regenerated
pub const NARRATIVE_FLOOR: f64 = 0.70;
/// Rooms with fewer exhibits than this receive a filler exhibit
pub const MIN_EXHIBITS_PER_ROOM: usize = 2;
const NOTES_TEMPERATURE: f32 = 0.7;

#[derive(Debug)]
pub struct RefinementRequest {
    pub exhibition: Exhibition,
    pub evaluation: EvaluationReport,
}

#[derive(Debug)]
pub struct RefinementOutcome {
    pub exhibition: Exhibition,
    /// False when no mutation applied
    pub refined: bool,
    pub improvements: Vec<String>,
}

pub struct RefinementAgent {
    client: Arc<ModelClient>,
}

impl RefinementAgent {
    pub fn new(client: Arc<ModelClient>) -> Self {
        Self { client }
    }
}

fn filler_exhibit(topic: &str, room_title: &str) -> Exhibit {
    Exhibit::new(
        format!("Additional Exhibit: {}", room_title),
        format!(
            "Supplementary exhibit exploring aspects of {} related to {}.",
            topic, room_title
        ),
    )
    .with_time_period("Historical Period")
    .with_significance(format!("Provides additional context for understanding {}.", topic))
    .with_facts([format!("Additional information about {}", topic)])
    .with_visual_refs(["Supplementary visual reference"])
    .with_tags(["supplementary"])
}

#[async_trait]
impl Agent for RefinementAgent {
    type Input = RefinementRequest;
    type Output = RefinementOutcome;

    fn name(&self) -> &'static str {
        "RefinementAgent"
    }

    async fn process(&self, request: RefinementRequest) -> Result<RefinementOutcome, AgentError> {
        let RefinementRequest {
            mut exhibition,
            evaluation,
        } = request;
        let mut improvements = Vec::new();

        if evaluation.narrative_quality < NARRATIVE_FLOOR {
            let prompt = PromptTemplate::enhance_curator_notes(&exhibition.curator_notes, &exhibition.topic);
            let notes = self
                .client
                .generate_with_temperature(&prompt, NOTES_TEMPERATURE)
                .await?;
            if notes != exhibition.curator_notes {
                exhibition.curator_notes = notes;
                improvements.push("Enhanced curator notes".to_string());
            }
        }

        for room in &mut exhibition.rooms {
            if room.exhibits.len() < MIN_EXHIBITS_PER_ROOM {
                room.exhibits.push(filler_exhibit(&exhibition.topic, &room.title));
                improvements.push(format!("Added supplementary exhibit to {}", room.title));
            }
        }

        Ok(RefinementOutcome {
            refined: !improvements.is_empty(),
            exhibition,
            improvements,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model_client::testing::{MockGateway, client};
    use curator_domain::Room;

    fn sparse() -> Exhibition {
        Exhibition::new("Printing", "Movable Type")
            .with_curator_notes("Short notes.")
            .with_rooms(vec![
                Room::new(1, "Workshop").with_exhibits(vec![Exhibit::new("Press", "Wooden press")]),
                Room::new(2, "Books").with_exhibits(vec![
                    Exhibit::new("Bible", "Printed 1455"),
                    Exhibit::new("Pamphlet", "Cheap print"),
                ]),
            ])
    }

    fn request(exhibition: Exhibition) -> RefinementRequest {
        let evaluation = EvaluationReport::evaluate(&exhibition, 0.7);
        RefinementRequest {
            exhibition,
            evaluation,
        }
    }

    #[tokio::test]
    async fn test_regenerates_notes_and_fills_sparse_rooms() {
        let gateway = Arc::new(MockGateway::new("Much longer enhanced notes."));
        let agent = RefinementAgent::new(client(gateway.clone()));
        let outcome = agent.process(request(sparse())).await.unwrap();

        assert!(outcome.refined);
        assert_eq!(outcome.exhibition.curator_notes, "Much longer enhanced notes.");
        assert_eq!(outcome.exhibition.rooms[0].exhibits.len(), 2);
        assert_eq!(
            outcome.exhibition.rooms[0].exhibits[1].name,
            "Additional Exhibit: Workshop"
        );
        assert_eq!(outcome.exhibition.rooms[1].exhibits.len(), 2);
        assert_eq!(outcome.improvements.len(), 2);
        assert!(gateway.prompts.lock().unwrap()[0].contains("250-300 words"));
    }

    #[tokio::test]
    async fn test_nothing_to_fix_is_a_no_op() {
        let notes = "word ".repeat(220);
        let mut exhibition = sparse().with_curator_notes(notes.clone());
        exhibition.rooms.truncate(1);
        exhibition.rooms[0].exhibits.push(Exhibit::new("Type", "Metal sorts"));

        let gateway = Arc::new(MockGateway::new("unused"));
        let agent = RefinementAgent::new(client(gateway.clone()));
        let outcome = agent.process(request(exhibition.clone())).await.unwrap();

        assert!(!outcome.refined);
        assert_eq!(outcome.exhibition, exhibition);
        assert_eq!(gateway.prompt_count(), 0);
    }

    #[tokio::test]
    async fn test_identical_regenerated_notes_count_as_no_change() {
        let mut exhibition = sparse();
        exhibition.rooms[0].exhibits.push(Exhibit::new("Type", "Metal sorts"));
        let gateway = Arc::new(MockGateway::new("Short notes."));
        let agent = RefinementAgent::new(client(gateway));
        let outcome = agent.process(request(exhibition)).await.unwrap();
        assert!(!outcome.refined);
    }
}
