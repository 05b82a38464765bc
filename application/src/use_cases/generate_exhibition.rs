//! Generate Exhibition use case
//!
//! Runs the fixed fifteen-stage pipeline that turns a topic into a stored,
//! evaluated exhibition. Stages run strictly in sequence except for the
//! research fan-out. Critical stage failures abort the run; isolated stages
//! degrade to safe defaults and the run continues.

use super::refine::RefinementController;
use crate::agents::{
    AccessibilityAgent, AgentError, AgentStatsSource, DesignRequest, EvaluatorAgent,
    ExhibitGeneratorAgent, ExhibitionDesignerAgent, ImageGeneratorAgent, InteractiveGuideAgent,
    MemoryBankAgent, MultimediaCuratorAgent, NarrativeAgent, RefinementAgent, ResearchAgent,
    ResearchBrief, SemanticAnalyzerAgent, SemanticRequest, StoreRequest, TopicIntakeAgent,
    TrackedAgent, VisualContextAgent,
};
use crate::config::PipelineConfig;
use crate::model_client::ModelClient;
use crate::ports::event_logger::{EventLogger, RunEvent};
use crate::ports::exhibition_store::ExhibitionStore;
use crate::ports::progress::{NoProgress, ProgressNotifier, StageStatus};
use crate::ports::search::SearchPort;
use curator_domain::{
    AgentStats, Criticality, EvaluationReport, Exhibition, InteractiveContent, RunMetrics,
    SemanticAnalysis, Stage, StageOutcome, SystemStats, TopicRecord, build_timeline,
};
use serde_json::json;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Errors that abort a pipeline run
#[derive(Error, Debug)]
pub enum GenerateExhibitionError {
    #[error("Stage '{stage}' failed: {source}")]
    StageFailed {
        stage: Stage,
        #[source]
        source: AgentError,
    },
}

impl GenerateExhibitionError {
    pub fn stage(stage: Stage, source: AgentError) -> Self {
        GenerateExhibitionError::StageFailed { stage, source }
    }

    pub fn failed_stage(&self) -> Stage {
        match self {
            GenerateExhibitionError::StageFailed { stage, .. } => *stage,
        }
    }
}

/// Everything one successful run produced
#[derive(Debug, Clone)]
pub struct ExhibitionRun {
    pub exhibition_id: i64,
    pub exhibition: Exhibition,
    pub evaluation: EvaluationReport,
    pub metrics: RunMetrics,
    pub duration: Duration,
}

/// Branches of the research fan-out
enum ResearchBranch {
    Research(Result<ResearchBrief, AgentError>),
    Placeholder,
}

/// Use case for generating an exhibition from a topic
pub struct GenerateExhibitionUseCase {
    topic_intake: TrackedAgent<TopicIntakeAgent>,
    research: Arc<TrackedAgent<ResearchAgent>>,
    exhibit_generator: TrackedAgent<ExhibitGeneratorAgent>,
    designer: TrackedAgent<ExhibitionDesignerAgent>,
    narrative: TrackedAgent<NarrativeAgent>,
    visual_context: TrackedAgent<VisualContextAgent>,
    semantic_analyzer: TrackedAgent<SemanticAnalyzerAgent>,
    interactive_guide: TrackedAgent<InteractiveGuideAgent>,
    multimedia_curator: TrackedAgent<MultimediaCuratorAgent>,
    accessibility: TrackedAgent<AccessibilityAgent>,
    image_generator: TrackedAgent<ImageGeneratorAgent>,
    evaluator: Arc<TrackedAgent<EvaluatorAgent>>,
    refinement: Arc<TrackedAgent<RefinementAgent>>,
    memory_bank: TrackedAgent<MemoryBankAgent>,
    refinement_controller: RefinementController,
    config: PipelineConfig,
    events: Arc<dyn EventLogger>,
}

impl GenerateExhibitionUseCase {
    pub fn new(
        client: Arc<ModelClient>,
        search: Arc<dyn SearchPort>,
        store: Arc<dyn ExhibitionStore>,
        config: PipelineConfig,
        events: Arc<dyn EventLogger>,
    ) -> Self {
        let evaluator = Arc::new(TrackedAgent::new(
            EvaluatorAgent::new(config.min_quality_score),
            Arc::clone(&events),
        ));
        let refinement = Arc::new(TrackedAgent::new(
            RefinementAgent::new(Arc::clone(&client)),
            Arc::clone(&events),
        ));
        let refinement_controller = RefinementController::new(
            Arc::clone(&evaluator),
            Arc::clone(&refinement),
            Arc::clone(&events),
        )
        .with_threshold(config.refinement_threshold)
        .with_max_loops(config.max_refinement_loops);

        Self {
            topic_intake: TrackedAgent::new(TopicIntakeAgent::new(Arc::clone(&client)), Arc::clone(&events)),
            research: Arc::new(TrackedAgent::new(
                ResearchAgent::new(Arc::clone(&client), Arc::clone(&search), config.max_research_results),
                Arc::clone(&events),
            )),
            exhibit_generator: TrackedAgent::new(
                ExhibitGeneratorAgent::new(Arc::clone(&client), config.exhibits_per_run),
                Arc::clone(&events),
            ),
            designer: TrackedAgent::new(
                ExhibitionDesignerAgent::new(Arc::clone(&client), config.max_exhibits_per_room),
                Arc::clone(&events),
            ),
            narrative: TrackedAgent::new(NarrativeAgent::new(Arc::clone(&client)), Arc::clone(&events)),
            visual_context: TrackedAgent::new(VisualContextAgent::new(search), Arc::clone(&events)),
            semantic_analyzer: TrackedAgent::new(
                SemanticAnalyzerAgent::new(Arc::clone(&client)),
                Arc::clone(&events),
            ),
            interactive_guide: TrackedAgent::new(
                InteractiveGuideAgent::new(Arc::clone(&client)),
                Arc::clone(&events),
            ),
            multimedia_curator: TrackedAgent::new(MultimediaCuratorAgent::new(), Arc::clone(&events)),
            accessibility: TrackedAgent::new(AccessibilityAgent::new(), Arc::clone(&events)),
            image_generator: TrackedAgent::new(ImageGeneratorAgent::new(client), Arc::clone(&events)),
            evaluator,
            refinement,
            memory_bank: TrackedAgent::new(MemoryBankAgent::new(store), Arc::clone(&events)),
            refinement_controller,
            config,
            events,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, topic: &str) -> Result<ExhibitionRun, GenerateExhibitionError> {
        self.execute_with_progress(topic, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        topic: &str,
        progress: &dyn ProgressNotifier,
    ) -> Result<ExhibitionRun, GenerateExhibitionError> {
        let start = Instant::now();
        info!("Starting exhibition generation for: {}", topic);
        self.events
            .log(RunEvent::new("run_started", json!({ "topic": topic })));

        let mut degraded = Vec::new();

        // 1. Topic intake
        let record = self
            .critical(Stage::TopicIntake, progress, self.topic_intake.execute(topic.to_string()))
            .await?;

        // 2. Research, fanned out with a placeholder branch
        let brief = self
            .critical(Stage::Research, progress, self.research_fan_out(record.clone()))
            .await?;
        let research_summary = brief.summary.clone();

        // 3. Exhibits
        let exhibits = self
            .critical(Stage::ExhibitGeneration, progress, self.exhibit_generator.execute(brief))
            .await?;

        // 4. Rooms
        let exhibition = self
            .critical(
                Stage::ExhibitionDesign,
                progress,
                self.designer.execute(DesignRequest { record, exhibits }),
            )
            .await?;

        // 5-6. Narrative and visual context
        let exhibition = self
            .critical(Stage::Narrative, progress, self.narrative.execute(exhibition))
            .await?;
        let mut exhibition = self
            .critical(Stage::VisualContext, progress, self.visual_context.execute(exhibition))
            .await?;

        // 7. Timeline
        progress.on_stage_start(Stage::Timeline);
        exhibition.timeline = build_timeline(exhibition.exhibits());
        progress.on_stage_complete(Stage::Timeline, StageStatus::Completed);

        // 8. Semantic analysis
        let outcome = self
            .isolated(
                Stage::SemanticAnalysis,
                progress,
                self.semantic_analyzer.execute(SemanticRequest {
                    topic: exhibition.topic.clone(),
                    research_summary,
                }),
                SemanticAnalysis::unavailable,
            )
            .await;
        note_degraded(&mut degraded, Stage::SemanticAnalysis, &outcome);
        exhibition.semantic_analysis = Some(outcome.into_value());

        // 9. Interactive guide
        let snapshot = exhibition.clone();
        let outcome = self
            .isolated(
                Stage::InteractiveGuide,
                progress,
                self.interactive_guide.execute(exhibition),
                move || Exhibition {
                    interactive: Some(InteractiveContent::unavailable()),
                    ..snapshot
                },
            )
            .await;
        note_degraded(&mut degraded, Stage::InteractiveGuide, &outcome);
        let exhibition = outcome.into_value();

        // 10-11. Multimedia and accessibility
        let exhibition = self
            .critical(Stage::MultimediaCuration, progress, self.multimedia_curator.execute(exhibition))
            .await?;
        let exhibition = self
            .critical(Stage::Accessibility, progress, self.accessibility.execute(exhibition))
            .await?;

        // 12. Images
        let exhibition = if self.config.enable_image_generation {
            let snapshot = exhibition.clone();
            let outcome = self
                .isolated(
                    Stage::ImageGeneration,
                    progress,
                    self.image_generator.execute(exhibition),
                    move || snapshot,
                )
                .await;
            note_degraded(&mut degraded, Stage::ImageGeneration, &outcome);
            outcome.into_value()
        } else {
            debug!("Image generation disabled");
            exhibition
        };

        // 13. Evaluation
        let evaluation = self
            .critical(Stage::Evaluation, progress, self.evaluator.execute(exhibition.clone()))
            .await?;

        // 14. Refinement
        progress.on_stage_start(Stage::Refinement);
        let refined = match self
            .refinement_controller
            .run(exhibition, evaluation, progress)
            .await
        {
            Ok(refined) => {
                progress.on_stage_complete(Stage::Refinement, StageStatus::Completed);
                refined
            }
            Err(e) => {
                progress.on_stage_complete(Stage::Refinement, StageStatus::Failed);
                return Err(e);
            }
        };

        // 15. Storage
        let exhibition_id = self
            .critical(
                Stage::Storage,
                progress,
                self.memory_bank.execute(StoreRequest {
                    exhibition: refined.exhibition.clone(),
                    evaluation: refined.evaluation.clone(),
                }),
            )
            .await?;
        self.events.log(RunEvent::new(
            "exhibition_created",
            json!({ "topic": topic, "exhibition_id": exhibition_id }),
        ));

        let duration = start.elapsed();
        let metrics = RunMetrics::new(&refined.evaluation, &self.agent_stats(), duration)
            .with_refinement_iterations(refined.iterations)
            .with_degraded_stages(degraded);
        self.events.log(RunEvent::new(
            "metrics",
            serde_json::to_value(&metrics).unwrap_or_default(),
        ));
        info!(
            "Exhibition #{} generated in {:.1}s (quality {:.2})",
            exhibition_id,
            duration.as_secs_f64(),
            metrics.overall_quality_score
        );

        Ok(ExhibitionRun {
            exhibition_id,
            exhibition: refined.exhibition,
            evaluation: refined.evaluation,
            metrics,
            duration,
        })
    }

    /// Per-agent statistics for all fourteen agents, in pipeline order
    pub fn agent_stats(&self) -> Vec<AgentStats> {
        let agents: [&dyn AgentStatsSource; 14] = [
            &self.topic_intake,
            self.research.as_ref(),
            &self.exhibit_generator,
            &self.designer,
            &self.narrative,
            &self.visual_context,
            &self.semantic_analyzer,
            &self.interactive_guide,
            &self.multimedia_curator,
            &self.accessibility,
            &self.image_generator,
            self.evaluator.as_ref(),
            self.refinement.as_ref(),
            &self.memory_bank,
        ];
        agents.iter().map(|agent| agent.stats()).collect()
    }

    pub fn system_stats(&self) -> SystemStats {
        SystemStats::from_agents(self.agent_stats(), self.config.target_success_rate)
    }

    /// Run research alongside an inert placeholder task.
    ///
    /// Both branches are joined before returning, whatever the research
    /// outcome.
    async fn research_fan_out(&self, record: TopicRecord) -> Result<ResearchBrief, AgentError> {
        let mut join_set = JoinSet::new();
        let research = Arc::clone(&self.research);
        join_set.spawn(async move { ResearchBranch::Research(research.execute(record).await) });
        join_set.spawn(async { ResearchBranch::Placeholder });

        let mut research_result = None;
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok(ResearchBranch::Research(result)) => research_result = Some(result),
                Ok(ResearchBranch::Placeholder) => debug!("Placeholder branch joined"),
                Err(e) => {
                    warn!("Research fan-out task failed: {}", e);
                    research_result.get_or_insert(Err(AgentError::Aborted(e.to_string())));
                }
            }
        }

        research_result
            .unwrap_or_else(|| Err(AgentError::Aborted("research branch never reported".to_string())))
    }

    /// Run a critical stage: its failure aborts the run.
    async fn critical<T>(
        &self,
        stage: Stage,
        progress: &dyn ProgressNotifier,
        work: impl Future<Output = Result<T, AgentError>>,
    ) -> Result<T, GenerateExhibitionError> {
        debug_assert_eq!(stage.criticality(), Criticality::Critical);
        progress.on_stage_start(stage);
        match work.await {
            Ok(value) => {
                progress.on_stage_complete(stage, StageStatus::Completed);
                Ok(value)
            }
            Err(source) => {
                warn!("Critical stage {} failed: {}", stage, source);
                progress.on_stage_complete(stage, StageStatus::Failed);
                Err(GenerateExhibitionError::stage(stage, source))
            }
        }
    }

    /// Run an isolated stage: its failure is replaced by `fallback`.
    async fn isolated<T>(
        &self,
        stage: Stage,
        progress: &dyn ProgressNotifier,
        work: impl Future<Output = Result<T, AgentError>>,
        fallback: impl FnOnce() -> T,
    ) -> StageOutcome<T> {
        debug_assert_eq!(stage.criticality(), Criticality::Isolated);
        progress.on_stage_start(stage);
        match work.await {
            Ok(value) => {
                progress.on_stage_complete(stage, StageStatus::Completed);
                StageOutcome::Completed(value)
            }
            Err(e) => {
                warn!("{} skipped: {}", stage.label(), e);
                self.events.log(RunEvent::new(
                    "stage_degraded",
                    json!({ "stage": stage.as_str(), "error": e.to_string() }),
                ));
                progress.on_stage_complete(stage, StageStatus::Degraded);
                StageOutcome::Degraded {
                    value: fallback(),
                    error: e.to_string(),
                }
            }
        }
    }
}

fn note_degraded<T>(degraded: &mut Vec<String>, stage: Stage, outcome: &StageOutcome<T>) {
    if outcome.is_degraded() {
        degraded.push(stage.as_str().to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::memory_bank::tests::MemoryStore;
    use crate::agents::research::tests::MockSearch;
    use crate::model_client::testing::{MockGateway, client};
    use crate::ports::event_logger::NoEventLogger;
    use crate::ports::model_gateway::GatewayError;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingLogger(Mutex<Vec<&'static str>>);

    impl EventLogger for RecordingLogger {
        fn log(&self, event: RunEvent) {
            self.0.lock().unwrap().push(event.event_type);
        }
    }

    #[derive(Default)]
    struct RecordingProgress(Mutex<Vec<(Stage, StageStatus)>>);

    impl ProgressNotifier for RecordingProgress {
        fn on_stage_start(&self, _stage: Stage) {}

        fn on_stage_complete(&self, stage: Stage, status: StageStatus) {
            self.0.lock().unwrap().push((stage, status));
        }
    }

    fn exhibits_json() -> String {
        let exhibits: Vec<serde_json::Value> = (1..=8)
            .map(|i| {
                json!({
                    "name": format!("Engine {}", i),
                    "description": format!("A steam engine built in {}.", 1700 + i * 10),
                    "time_period": format!("{}", 1800 - i * 10),
                    "facts": [format!(
                        "In {} engineers improved the boiler design to raise working pressure safely.",
                        1700 + i * 10
                    )],
                })
            })
            .collect();
        serde_json::to_string(&exhibits).unwrap()
    }

    const ROOM_PLAN: &str = "ROOM 1: Fire\nTHEME: Coal\nDESCRIPTION: Heat.\n\
                             ROOM 2: Pressure\nTHEME: Boilers\nDESCRIPTION: Steam.\n\
                             ROOM 3: Motion\nTHEME: Pistons\nDESCRIPTION: Work.\n\
                             ROOM 4: Rails\nTHEME: Transport\nDESCRIPTION: Travel.";

    fn gateway() -> MockGateway {
        MockGateway::new("")
            .route(
                "analyzing a topic",
                Ok("TITLE: Age of Steam\nOVERVIEW: Engines change the world.".to_string()),
            )
            .route("search queries", Ok("q1\nq2\nq3".to_string()))
            .route("Synthesize these research", Ok("Steam summary.".to_string()))
            .route("Create exactly", Ok(exhibits_json()))
            .route("themed rooms", Ok(ROOM_PLAN.to_string()))
            .route("Write curator's notes", Ok("word ".repeat(250)))
            .route("narrative introduction", Ok("Room intro.".to_string()))
            .route("key connections", Ok("historical|Mills|Power".to_string()))
            .route("key concepts", Ok("Pressure\nCondensers".to_string()))
            .route("thematic insights", Ok("Power reshaped labor.".to_string()))
            .route("Create 2 questions", Ok("Why coal?|Reflect|Think cost".to_string()))
            .route(
                "multiple choice quiz",
                Ok(r#"{"title": "Steam Quiz", "questions": []}"#.to_string()),
            )
            // Image description prompts embed other prompts, so this must win
            .route("detailed visual description", Ok("A vivid image.".to_string()))
    }

    fn use_case(
        gateway: MockGateway,
        store: Arc<MemoryStore>,
        events: Arc<dyn EventLogger>,
    ) -> GenerateExhibitionUseCase {
        GenerateExhibitionUseCase::new(
            client(Arc::new(gateway)),
            Arc::new(MockSearch::default()),
            store,
            PipelineConfig::default(),
            events,
        )
    }

    #[tokio::test]
    async fn test_full_run_stores_evaluated_exhibition() {
        let store = Arc::new(MemoryStore::default());
        let events = Arc::new(RecordingLogger::default());
        let use_case = use_case(gateway(), store.clone(), events.clone());

        let run = use_case.execute("Steam power").await.unwrap();

        assert_eq!(run.exhibition_id, 1);
        assert_eq!(run.exhibition.title, "Age of Steam");
        assert_eq!(run.exhibition.rooms.len(), 4);
        assert_eq!(run.exhibition.total_exhibits(), 8);
        assert_eq!(run.exhibition.curator_notes.split_whitespace().count(), 250);
        assert!(run.exhibition.rooms.iter().all(|r| r.narrative.is_some()));

        let years: Vec<&str> = run.exhibition.timeline.iter().map(|e| e.year.as_str()).collect();
        let mut sorted = years.clone();
        sorted.sort();
        assert_eq!(years, sorted);
        assert_eq!(years.len(), 8);

        assert_eq!(
            run.exhibition.semantic_analysis.as_ref().unwrap().thematic_insights,
            "Power reshaped labor."
        );
        assert_eq!(run.exhibition.interactive.as_ref().unwrap().quiz.title, "Steam Quiz");
        assert!(run.exhibition.multimedia.is_some());
        assert!(run.exhibition.accessibility.is_some());
        assert!(run.exhibition.poster_image.is_some());

        assert!(run.evaluation.meets_threshold);
        assert_eq!(run.metrics.refinement_iterations, 0);
        assert!(run.metrics.degraded_stages.is_empty());
        // The refinement agent never ran and counts as 0.0
        assert!((run.metrics.agent_success_rate - 13.0 / 14.0).abs() < 1e-9);

        let stored = store.retrieve(1).await.unwrap().unwrap();
        assert_eq!(stored.exhibition, run.exhibition);

        let events = events.0.lock().unwrap();
        assert_eq!(events.first(), Some(&"run_started"));
        assert_eq!(events.last(), Some(&"metrics"));
        assert!(events.contains(&"exhibition_created"));
    }

    #[tokio::test]
    async fn test_isolated_failure_degrades_and_continues() {
        let gateway = gateway().route("key concepts", Err(GatewayError::Timeout));
        let store = Arc::new(MemoryStore::default());
        let use_case = use_case(gateway, store, Arc::new(NoEventLogger));
        let progress = RecordingProgress::default();

        let run = use_case.execute_with_progress("Steam power", &progress).await.unwrap();

        assert_eq!(run.exhibition.semantic_analysis, Some(SemanticAnalysis::unavailable()));
        assert_eq!(run.metrics.degraded_stages, vec!["semantic_analysis"]);
        assert!(
            progress
                .0
                .lock()
                .unwrap()
                .contains(&(Stage::SemanticAnalysis, StageStatus::Degraded))
        );
        let stats = use_case.system_stats();
        assert!(stats.overall_success_rate < 1.0);
    }

    #[tokio::test]
    async fn test_critical_failure_aborts_without_storing() {
        let gateway = gateway().route(
            "Create exactly",
            Err(GatewayError::MissingApiKey("GOOGLE_API_KEY".to_string())),
        );
        let store = Arc::new(MemoryStore::default());
        let use_case = use_case(gateway, store.clone(), Arc::new(NoEventLogger));

        let err = use_case.execute("Steam power").await.unwrap_err();
        assert_eq!(err.failed_stage(), Stage::ExhibitGeneration);
        assert!(store.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_research_failure_aborts_before_exhibits() {
        let store = Arc::new(MemoryStore::default());
        let use_case = GenerateExhibitionUseCase::new(
            client(Arc::new(gateway())),
            Arc::new(MockSearch {
                fail: true,
                ..Default::default()
            }),
            store.clone(),
            PipelineConfig::default(),
            Arc::new(NoEventLogger),
        );

        let err = use_case.execute("Steam power").await.unwrap_err();
        assert_eq!(err.failed_stage(), Stage::Research);

        let stats = use_case.agent_stats();
        assert_eq!(stats[1].executions, 1);
        assert_eq!(stats[1].successes, 0);
        assert_eq!(stats[2].name, "ExhibitGeneratorAgent");
        assert_eq!(stats[2].executions, 0);
        assert!(store.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_topic_fails_intake() {
        let use_case = use_case(gateway(), Arc::new(MemoryStore::default()), Arc::new(NoEventLogger));
        let err = use_case.execute("  ").await.unwrap_err();
        assert_eq!(err.failed_stage(), Stage::TopicIntake);
        assert_eq!(use_case.agent_stats()[0].executions, 1);
        assert_eq!(use_case.agent_stats()[1].executions, 0);
    }

    #[tokio::test]
    async fn test_images_can_be_disabled() {
        let use_case = GenerateExhibitionUseCase::new(
            client(Arc::new(gateway())),
            Arc::new(MockSearch::default()),
            Arc::new(MemoryStore::default()),
            PipelineConfig::default().with_image_generation(false),
            Arc::new(NoEventLogger),
        );
        let run = use_case.execute("Steam power").await.unwrap();
        assert!(run.exhibition.poster_image.is_none());
        let image_stats = &use_case.agent_stats()[10];
        assert_eq!(image_stats.name, "ImageGeneratorAgent");
        assert_eq!(image_stats.executions, 0);
    }
}
