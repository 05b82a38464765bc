//! Exhibition quality evaluation.

use super::envelope::{Agent, AgentError};
use async_trait::async_trait;
use curator_domain::{EvaluationReport, Exhibition};
use tracing::info;

pub struct EvaluatorAgent {
    min_quality_score: f64,
}

impl EvaluatorAgent {
    pub fn new(min_quality_score: f64) -> Self {
        Self { min_quality_score }
    }
}

#[async_trait]
impl Agent for EvaluatorAgent {
    type Input = Exhibition;
    type Output = EvaluationReport;

    fn name(&self) -> &'static str {
        "EvaluatorAgent"
    }

    async fn process(&self, exhibition: Exhibition) -> Result<EvaluationReport, AgentError> {
        let report = EvaluationReport::evaluate(&exhibition, self.min_quality_score);
        info!(
            "Evaluation: overall {:.2} (threshold {:.2})",
            report.overall_score, self.min_quality_score
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curator_domain::{Exhibit, Room};

    #[tokio::test]
    async fn test_empty_exhibition_scores_low() {
        let agent = EvaluatorAgent::new(0.7);
        let report = agent.process(Exhibition::new("", "")).await.unwrap();
        assert!(!report.meets_threshold);
        assert!(report.overall_score < 0.7);
    }

    #[tokio::test]
    async fn test_scores_within_unit_range() {
        let exhibition = Exhibition::new("Tea", "Leaves of History")
            .with_curator_notes("word ".repeat(250))
            .with_rooms(vec![Room::new(1, "Fields").with_exhibits(vec![
                Exhibit::new("Kettle", "Iron kettle").with_facts(["Tea reached Europe in 1610."]),
            ])]);
        let report = EvaluatorAgent::new(0.7).process(exhibition).await.unwrap();
        for score in [
            report.overall_score,
            report.completeness_score,
            report.narrative_quality,
            report.factual_quality,
            report.cultural_sensitivity,
        ] {
            assert!((0.0..=1.0).contains(&score));
        }
    }
}
