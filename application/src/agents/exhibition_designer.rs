//! Exhibition design: plan themed rooms and partition exhibits across them.

use super::envelope::{Agent, AgentError};
use crate::model_client::ModelClient;
use async_trait::async_trait;
use curator_domain::{
    Exhibit, Exhibition, PromptTemplate, TopicRecord, assign_exhibits, parse_room_plan, room_count,
};
use std::sync::Arc;

const TEMPERATURE: f32 = 0.7;

#[derive(Debug)]
pub struct DesignRequest {
    pub record: TopicRecord,
    pub exhibits: Vec<Exhibit>,
}

pub struct ExhibitionDesignerAgent {
    client: Arc<ModelClient>,
    max_exhibits_per_room: usize,
}

impl ExhibitionDesignerAgent {
    pub fn new(client: Arc<ModelClient>, max_exhibits_per_room: usize) -> Self {
        Self {
            client,
            max_exhibits_per_room: max_exhibits_per_room.max(1),
        }
    }

    /// Rooms to request: the standard count, raised only when exhibits
    /// would otherwise exceed the per-room maximum.
    fn rooms_for(&self, exhibit_count: usize) -> usize {
        room_count(exhibit_count).max(exhibit_count.div_ceil(self.max_exhibits_per_room))
    }
}

#[async_trait]
impl Agent for ExhibitionDesignerAgent {
    type Input = DesignRequest;
    type Output = Exhibition;

    fn name(&self) -> &'static str {
        "ExhibitionDesignerAgent"
    }

    async fn process(&self, request: DesignRequest) -> Result<Exhibition, AgentError> {
        let DesignRequest { record, exhibits } = request;
        let rooms = self.rooms_for(exhibits.len());

        let response = self
            .client
            .generate_with_temperature(
                &PromptTemplate::room_plan(&record.original_topic, rooms, exhibits.len()),
                TEMPERATURE,
            )
            .await?;
        let plans = parse_room_plan(&response);

        Ok(Exhibition::new(record.original_topic, record.title)
            .with_overview(record.overview)
            .with_rooms(assign_exhibits(plans, exhibits)))
    }
}
