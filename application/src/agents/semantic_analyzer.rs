//! Semantic analysis: connections, key concepts and thematic insights.

use super::envelope::{Agent, AgentError};
use crate::model_client::ModelClient;
use async_trait::async_trait;
use curator_domain::parsing::{parse_concepts, parse_connections};
use curator_domain::{Connection, PromptTemplate, SemanticAnalysis};
use std::sync::Arc;
use tracing::warn;

const CONNECTION_TEMPERATURE: f32 = 0.7;
const CONCEPT_TEMPERATURE: f32 = 0.6;
const INSIGHT_TEMPERATURE: f32 = 0.8;

#[derive(Debug)]
pub struct SemanticRequest {
    pub topic: String,
    pub research_summary: String,
}

pub struct SemanticAnalyzerAgent {
    client: Arc<ModelClient>,
}

impl SemanticAnalyzerAgent {
    pub fn new(client: Arc<ModelClient>) -> Self {
        Self { client }
    }

    /// Connections degrade to the generic pair when the model call fails.
    async fn connections(&self, topic: &str) -> Vec<Connection> {
        match self
            .client
            .generate_with_temperature(&PromptTemplate::connections(topic), CONNECTION_TEMPERATURE)
            .await
        {
            Ok(response) => parse_connections(&response, topic),
            Err(e) => {
                warn!("Connection analysis failed, using defaults: {}", e);
                parse_connections("", topic)
            }
        }
    }
}

#[async_trait]
impl Agent for SemanticAnalyzerAgent {
    type Input = SemanticRequest;
    type Output = SemanticAnalysis;

    fn name(&self) -> &'static str {
        "SemanticAnalyzerAgent"
    }

    async fn process(&self, request: SemanticRequest) -> Result<SemanticAnalysis, AgentError> {
        let topic = &request.topic;
        let connections = self.connections(topic).await;

        let response = self
            .client
            .generate_with_temperature(
                &PromptTemplate::concepts(topic, &request.research_summary),
                CONCEPT_TEMPERATURE,
            )
            .await?;
        let key_concepts = parse_concepts(&response, topic);

        let pairs: Vec<(String, String)> = connections
            .iter()
            .map(|c| (c.kind.clone(), c.connection.clone()))
            .collect();
        let thematic_insights = self
            .client
            .generate_with_temperature(
                &PromptTemplate::insights(topic, &pairs, &key_concepts),
                INSIGHT_TEMPERATURE,
            )
            .await?;

        Ok(SemanticAnalysis {
            semantic_score: SemanticAnalysis::score(connections.len(), key_concepts.len()),
            key_concepts,
            connections,
            thematic_insights,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model_client::testing::{MockGateway, client};
    use crate::ports::model_gateway::GatewayError;

    fn request() -> SemanticRequest {
        SemanticRequest {
            topic: "Jazz".to_string(),
            research_summary: "Born in New Orleans.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_full_analysis() {
        let gateway = Arc::new(
            MockGateway::new("unused")
                .route(
                    "key connections",
                    Ok("historical|Blues roots|Origin\ncultural|Harlem|Spread".to_string()),
                )
                .route("key concepts", Ok("Improvisation\nSwing\nBig band\nBebop".to_string()))
                .route("thematic insights", Ok("Freedom in structure.".to_string())),
        );
        let agent = SemanticAnalyzerAgent::new(client(gateway));
        let analysis = agent.process(request()).await.unwrap();

        assert_eq!(analysis.connections.len(), 2);
        assert_eq!(analysis.key_concepts.len(), 4);
        assert_eq!(analysis.thematic_insights, "Freedom in structure.");
        assert!((analysis.semantic_score - (0.4 + 0.5) / 2.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_connection_failure_uses_defaults() {
        let gateway = Arc::new(
            MockGateway::new("Concept one\nConcept two")
                .route("key connections", Err(GatewayError::Timeout)),
        );
        let agent = SemanticAnalyzerAgent::new(client(gateway));
        let analysis = agent.process(request()).await.unwrap();
        assert_eq!(analysis.connections[0].connection, "Historical context of Jazz");
    }

    #[tokio::test]
    async fn test_blank_concepts_fall_back_to_topic() {
        let gateway = Arc::new(
            MockGateway::new("Freedom in structure.")
                .route("key concepts", Ok("\n  \n".to_string())),
        );
        let agent = SemanticAnalyzerAgent::new(client(gateway));
        let analysis = agent.process(request()).await.unwrap();
        assert_eq!(analysis.key_concepts, vec!["Jazz"]);
    }

    #[tokio::test]
    async fn test_concept_failure_propagates() {
        let gateway = Arc::new(
            MockGateway::new("a|b|c").route("key concepts", Err(GatewayError::Timeout)),
        );
        let agent = SemanticAnalyzerAgent::new(client(gateway));
        assert!(agent.process(request()).await.is_err());
    }
}
