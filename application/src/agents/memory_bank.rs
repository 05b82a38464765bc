//! Persistence of finished exhibitions.

use super::envelope::{Agent, AgentError};
use crate::ports::exhibition_store::ExhibitionStore;
use async_trait::async_trait;
use curator_domain::{EvaluationReport, Exhibition};
use std::sync::Arc;
use tracing::info;

#[derive(Debug)]
pub struct StoreRequest {
    pub exhibition: Exhibition,
    pub evaluation: EvaluationReport,
}

pub struct MemoryBankAgent {
    store: Arc<dyn ExhibitionStore>,
}

impl MemoryBankAgent {
    pub fn new(store: Arc<dyn ExhibitionStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Agent for MemoryBankAgent {
    type Input = StoreRequest;
    type Output = i64;

    fn name(&self) -> &'static str {
        "MemoryBankAgent"
    }

    async fn process(&self, request: StoreRequest) -> Result<i64, AgentError> {
        let id = self
            .store
            .store(&request.exhibition, &request.evaluation)
            .await?;
        info!("Stored exhibition '{}' as #{}", request.exhibition.title, id);
        Ok(id)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::ports::exhibition_store::{ExhibitionSummary, StoreError, StoredExhibition};
    use chrono::Utc;
    use std::sync::Mutex;

    /// In-memory store assigning sequential ids from 1
    #[derive(Default)]
    pub struct MemoryStore {
        pub rows: Mutex<Vec<StoredExhibition>>,
    }

    #[async_trait]
    impl ExhibitionStore for MemoryStore {
        async fn store(&self, exhibition: &Exhibition, evaluation: &EvaluationReport) -> Result<i64, StoreError> {
            let mut rows = self.rows.lock().unwrap();
            let id = rows.len() as i64 + 1;
            rows.push(StoredExhibition {
                summary: ExhibitionSummary {
                    id,
                    topic: exhibition.topic.clone(),
                    title: exhibition.title.clone(),
                    created_at: Utc::now(),
                    quality_score: evaluation.overall_score,
                },
                exhibition: exhibition.clone(),
                evaluation: Some(evaluation.clone()),
            });
            Ok(id)
        }

        async fn retrieve(&self, id: i64) -> Result<Option<StoredExhibition>, StoreError> {
            Ok(self.rows.lock().unwrap().iter().find(|r| r.summary.id == id).cloned())
        }

        async fn list_recent(&self, limit: usize) -> Result<Vec<ExhibitionSummary>, StoreError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .rev()
                .take(limit)
                .map(|r| r.summary.clone())
                .collect())
        }
    }

    #[tokio::test]
    async fn test_store_returns_id_and_round_trips() {
        let store = Arc::new(MemoryStore::default());
        let agent = MemoryBankAgent::new(store.clone());
        let exhibition = Exhibition::new("Glass", "Through the Looking Glass");
        let evaluation = EvaluationReport::evaluate(&exhibition, 0.7);

        let id = agent
            .process(StoreRequest {
                exhibition: exhibition.clone(),
                evaluation,
            })
            .await
            .unwrap();
        assert_eq!(id, 1);
        let stored = store.retrieve(id).await.unwrap().unwrap();
        assert_eq!(stored.exhibition, exhibition);
    }
}
