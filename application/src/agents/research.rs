//! Research: search the topic and synthesize a research brief.

use super::envelope::{Agent, AgentError};
use crate::model_client::ModelClient;
use crate::ports::search::{SearchPort, SearchResult, extract_facts};
use async_trait::async_trait;
use curator_domain::parsing::parse_queries;
use curator_domain::{FactReport, PromptTemplate, TopicRecord, check_facts};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Queries actually sent to search
const SEARCHED_QUERIES: usize = 3;
const RESULTS_PER_QUERY: usize = 3;
const QUERY_TEMPERATURE: f32 = 0.5;
const SUMMARY_TEMPERATURE: f32 = 0.6;

/// Research findings handed to exhibit generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchBrief {
    pub topic: String,
    pub queries: Vec<String>,
    pub results: Vec<SearchResult>,
    pub facts: Vec<String>,
    pub summary: String,
    pub consistency: FactReport,
}

pub struct ResearchAgent {
    client: Arc<ModelClient>,
    search: Arc<dyn SearchPort>,
    max_results: usize,
}

impl ResearchAgent {
    pub fn new(client: Arc<ModelClient>, search: Arc<dyn SearchPort>, max_results: usize) -> Self {
        Self {
            client,
            search,
            max_results,
        }
    }
}

#[async_trait]
impl Agent for ResearchAgent {
    type Input = TopicRecord;
    type Output = ResearchBrief;

    fn name(&self) -> &'static str {
        "ResearchAgent"
    }

    async fn process(&self, record: TopicRecord) -> Result<ResearchBrief, AgentError> {
        let topic = record.original_topic;

        let response = self
            .client
            .generate_with_temperature(&PromptTemplate::research_queries(&topic), QUERY_TEMPERATURE)
            .await?;
        let queries = parse_queries(&response, &topic);

        let mut results = Vec::new();
        for query in queries.iter().take(SEARCHED_QUERIES) {
            results.extend(self.search.search(query, RESULTS_PER_QUERY).await?);
        }
        results.truncate(self.max_results);
        debug!("Research gathered {} search results", results.len());

        let facts = extract_facts(&results);
        let summary = self
            .client
            .generate_with_temperature(
                &PromptTemplate::research_summary(&topic, &facts),
                SUMMARY_TEMPERATURE,
            )
            .await?;
        let consistency = check_facts(&facts);

        Ok(ResearchBrief {
            topic,
            queries,
            results,
            facts,
            summary,
            consistency,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model_client::testing::{MockGateway, client};
    use crate::ports::search::SearchError;
    use curator_domain::Topic;
    use std::sync::Mutex;

    /// Search returning one canned hit per query and recording queries
    #[derive(Default)]
    pub struct MockSearch {
        pub queries: Mutex<Vec<String>>,
        pub fail: bool,
    }

    #[async_trait]
    impl SearchPort for MockSearch {
        async fn search(&self, query: &str, num_results: usize) -> Result<Vec<SearchResult>, SearchError> {
            if self.fail {
                return Err(SearchError::RequestFailed("offline".to_string()));
            }
            self.queries.lock().unwrap().push(query.to_string());
            Ok((0..num_results.min(2))
                .map(|i| SearchResult {
                    title: format!("{} #{}", query, i),
                    snippet: format!("In 1850 something notable happened regarding {} (source {}).", query, i),
                    link: format!("https://example.org/{}", i),
                })
                .collect())
        }
    }

    fn record() -> TopicRecord {
        TopicRecord::bare(&Topic::parse("Gold Rush").unwrap())
    }

    #[tokio::test]
    async fn test_searches_first_three_queries() {
        let gateway = Arc::new(MockGateway::scripted(vec![
            Ok("q1\nq2\nq3\nq4\nq5".to_string()),
            Ok("A summary.".to_string()),
        ]));
        let search = Arc::new(MockSearch::default());
        let agent = ResearchAgent::new(client(gateway), search.clone(), 15);

        let brief = agent.process(record()).await.unwrap();
        assert_eq!(brief.queries.len(), 5);
        assert_eq!(*search.queries.lock().unwrap(), vec!["q1", "q2", "q3"]);
        assert_eq!(brief.results.len(), 6);
        assert_eq!(brief.facts.len(), 6);
        assert_eq!(brief.summary, "A summary.");
        assert!(brief.consistency.quality_score > 0.0);
    }

    #[tokio::test]
    async fn test_results_capped() {
        let gateway = Arc::new(MockGateway::scripted(vec![
            Ok("q1\nq2\nq3".to_string()),
            Ok("A summary.".to_string()),
        ]));
        let agent = ResearchAgent::new(client(gateway), Arc::new(MockSearch::default()), 4);
        let brief = agent.process(record()).await.unwrap();
        assert_eq!(brief.results.len(), 4);
    }

    #[tokio::test]
    async fn test_blank_query_response_searches_topic() {
        let gateway = Arc::new(MockGateway::scripted(vec![
            Ok("  \n".to_string()),
            Ok("A summary.".to_string()),
        ]));
        let search = Arc::new(MockSearch::default());
        let agent = ResearchAgent::new(client(gateway), search.clone(), 15);

        let brief = agent.process(record()).await.unwrap();
        assert_eq!(
            *search.queries.lock().unwrap(),
            vec!["Gold Rush", "Gold Rush history", "Gold Rush cultural significance"]
        );
        assert!(!brief.facts.is_empty());
    }

    #[tokio::test]
    async fn test_search_failure_propagates() {
        let gateway = Arc::new(MockGateway::new("q1"));
        let search = Arc::new(MockSearch {
            fail: true,
            ..Default::default()
        });
        let agent = ResearchAgent::new(client(gateway), search, 15);
        assert!(matches!(
            agent.process(record()).await,
            Err(AgentError::Search(_))
        ));
    }
}
