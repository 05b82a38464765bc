//! Exhibit generation from a research brief.

use super::envelope::{Agent, AgentError};
use super::research::ResearchBrief;
use crate::model_client::ModelClient;
use async_trait::async_trait;
use curator_domain::parsing::parse_exhibits;
use curator_domain::{Exhibit, PromptTemplate};
use std::sync::Arc;
use tracing::info;

const TEMPERATURE: f32 = 0.85;

pub struct ExhibitGeneratorAgent {
    client: Arc<ModelClient>,
    exhibit_count: usize,
}

impl ExhibitGeneratorAgent {
    pub fn new(client: Arc<ModelClient>, exhibit_count: usize) -> Self {
        Self {
            client,
            exhibit_count,
        }
    }
}

#[async_trait]
impl Agent for ExhibitGeneratorAgent {
    type Input = ResearchBrief;
    type Output = Vec<Exhibit>;

    fn name(&self) -> &'static str {
        "ExhibitGeneratorAgent"
    }

    async fn process(&self, brief: ResearchBrief) -> Result<Vec<Exhibit>, AgentError> {
        let prompt = PromptTemplate::exhibits(&brief.topic, &brief.summary, &brief.facts, self.exhibit_count);
        let response = self
            .client
            .generate_with_temperature(&prompt, TEMPERATURE)
            .await?;
        let exhibits = parse_exhibits(&response, &brief.topic);
        info!("Generated {} exhibits", exhibits.len());
        Ok(exhibits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model_client::testing::{MockGateway, client};
    use curator_domain::check_facts;

    fn brief() -> ResearchBrief {
        ResearchBrief {
            topic: "Gold Rush".to_string(),
            queries: vec![],
            results: vec![],
            facts: vec![],
            summary: "Summary".to_string(),
            consistency: check_facts::<String>(&[]),
        }
    }

    #[tokio::test]
    async fn test_parses_model_json() {
        let gateway = Arc::new(MockGateway::new(
            r#"[{"name": "Pan", "description": "Miner's pan", "time_period": "1849"}]"#,
        ));
        let agent = ExhibitGeneratorAgent::new(client(gateway), 8);
        let exhibits = agent.process(brief()).await.unwrap();
        assert_eq!(exhibits.len(), 1);
        assert_eq!(exhibits[0].time_period, "1849");
    }

    #[tokio::test]
    async fn test_unparseable_output_uses_fallback() {
        let gateway = Arc::new(MockGateway::new("Sorry, no JSON today."));
        let agent = ExhibitGeneratorAgent::new(client(gateway), 8);
        let exhibits = agent.process(brief()).await.unwrap();
        assert_eq!(exhibits.len(), 3);
        assert_eq!(exhibits[1].name, "Gold Rush - Development");
    }
}
