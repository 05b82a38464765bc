//! Visual context: attach searched imagery references to every exhibit.

use super::envelope::{Agent, AgentError};
use crate::ports::search::SearchPort;
use async_trait::async_trait;
use curator_domain::{Exhibition, VisualReference};
use std::sync::Arc;

const RESULTS_PER_EXHIBIT: usize = 3;

pub struct VisualContextAgent {
    search: Arc<dyn SearchPort>,
}

impl VisualContextAgent {
    pub fn new(search: Arc<dyn SearchPort>) -> Self {
        Self { search }
    }
}

#[async_trait]
impl Agent for VisualContextAgent {
    type Input = Exhibition;
    type Output = Exhibition;

    fn name(&self) -> &'static str {
        "VisualContextAgent"
    }

    async fn process(&self, mut exhibition: Exhibition) -> Result<Exhibition, AgentError> {
        for room in &mut exhibition.rooms {
            for exhibit in &mut room.exhibits {
                let query = format!("{} {} museum artifact image", exhibition.topic, exhibit.name);
                let results = self.search.search(&query, RESULTS_PER_EXHIBIT).await?;
                exhibit
                    .visual_refs
                    .extend(results.into_iter().map(|r| VisualReference::Sourced {
                        description: r.title,
                        source: r.link,
                        kind: "search_result".to_string(),
                    }));
            }
        }
        Ok(exhibition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::research::tests::MockSearch;
    use curator_domain::{Exhibit, Room};

    #[tokio::test]
    async fn test_appends_sourced_references() {
        let search = Arc::new(MockSearch::default());
        let agent = VisualContextAgent::new(search.clone());
        let exhibition = Exhibition::new("Bronze Age", "Age of Bronze").with_rooms(vec![
            Room::new(1, "Ore").with_exhibits(vec![
                Exhibit::new("Axe Head", "Cast bronze.").with_visual_refs(["Sketch"]),
            ]),
        ]);

        let result = agent.process(exhibition).await.unwrap();
        let refs = &result.rooms[0].exhibits[0].visual_refs;
        assert_eq!(refs.len(), 3);
        assert_eq!(refs[0], VisualReference::Description("Sketch".to_string()));
        assert!(matches!(&refs[1], VisualReference::Sourced { kind, .. } if kind == "search_result"));
        assert_eq!(
            search.queries.lock().unwrap()[0],
            "Bronze Age Axe Head museum artifact image"
        );
    }
}
