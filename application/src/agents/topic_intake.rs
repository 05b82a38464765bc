//! Topic intake: validate the raw topic and enrich it into a topic record.

use super::envelope::{Agent, AgentError};
use crate::model_client::ModelClient;
use async_trait::async_trait;
use curator_domain::parsing::parse_topic_record;
use curator_domain::{PromptTemplate, Topic, TopicRecord};
use std::sync::Arc;

const TEMPERATURE: f32 = 0.7;

pub struct TopicIntakeAgent {
    client: Arc<ModelClient>,
}

impl TopicIntakeAgent {
    pub fn new(client: Arc<ModelClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Agent for TopicIntakeAgent {
    type Input = String;
    type Output = TopicRecord;

    fn name(&self) -> &'static str {
        "TopicIntakeAgent"
    }

    async fn process(&self, input: String) -> Result<TopicRecord, AgentError> {
        let topic = Topic::parse(&input)?;
        let response = self
            .client
            .generate_with_temperature(&PromptTemplate::topic_analysis(topic.content()), TEMPERATURE)
            .await?;
        Ok(parse_topic_record(&response, &topic))
    }
}
