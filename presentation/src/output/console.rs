//! Console output formatter for exhibitions

use crate::output::formatter::{ExhibitionView, OutputFormatter};
use colored::Colorize;
use curator_application::ExhibitionSummary;
use curator_domain::{
    EvaluationReport, Exhibit, ImageDescriptor, ImageStatus, Room, RunMetrics, SystemStats,
    format_timeline,
};

/// Formats exhibitions for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete exhibition
    pub fn format(view: ExhibitionView<'_>) -> String {
        let ex = view.exhibition;
        let mut output = String::new();

        output.push_str(&Self::header(&ex.title));
        output.push('\n');

        if let Some(id) = view.id {
            output.push_str(&format!("{} #{}\n", "Exhibition:".cyan().bold(), id));
        }
        output.push_str(&format!("{} {}\n\n", "Topic:".cyan().bold(), ex.topic));

        if !ex.overview.is_empty() {
            output.push_str(&format!("{}\n\n", ex.overview));
        }

        if !ex.curator_notes.is_empty() {
            output.push_str(&Self::section_header("Curator's Notes"));
            output.push_str(&format!("\n{}\n", ex.curator_notes));
        }

        for room in &ex.rooms {
            output.push_str(&Self::format_room(room));
        }

        output.push_str(&Self::section_header("Timeline"));
        output.push_str(&format!("\n{}\n", format_timeline(&ex.timeline)));

        if let Some(semantic) = &ex.semantic_analysis {
            output.push_str(&Self::section_header("Semantic Analysis"));
            if !semantic.key_concepts.is_empty() {
                output.push_str(&format!(
                    "\n{} {}\n",
                    "Key concepts:".bold(),
                    semantic.key_concepts.join(", ")
                ));
            }
            for connection in &semantic.connections {
                output.push_str(&format!(
                    "  * [{}] {} ({})\n",
                    connection.kind, connection.connection, connection.significance
                ));
            }
            output.push_str(&format!("\n{}\n", semantic.thematic_insights));
        }

        if let Some(interactive) = &ex.interactive {
            output.push_str(&Self::section_header("Interactive"));
            output.push_str(&format!(
                "\n{} ({} questions)\n",
                interactive.quiz.title.bold(),
                interactive.quiz.questions.len()
            ));
            for (i, q) in interactive.quiz.questions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, q.question));
            }
            for challenge in &interactive.challenges {
                output.push_str(&format!(
                    "  {} {}: {}\n",
                    "*".yellow(),
                    challenge.title.bold(),
                    challenge.description
                ));
            }
        }

        if let Some(multimedia) = &ex.multimedia {
            output.push_str(&Self::section_header("Virtual Tour"));
            output.push_str(&format!("\n{}\n", multimedia.virtual_tour.introduction));
            for stop in &multimedia.audio_guide {
                output.push_str(&format!(
                    "  Stop {}: {} ({})\n",
                    stop.stop_number, stop.location, stop.duration
                ));
            }
        }

        if let Some(access) = &ex.accessibility {
            output.push_str(&Self::section_header("Accessibility"));
            output.push_str(&format!(
                "\n{} {}\n",
                "Languages:".bold(),
                access.languages.join(", ")
            ));
            for feature in access
                .visual
                .iter()
                .chain(&access.auditory)
                .chain(&access.cognitive)
                .chain(&access.physical)
            {
                output.push_str(&format!("  * {}: {}\n", feature.name, feature.detail));
            }
        }

        if let Some(poster) = &ex.poster_image {
            output.push_str(&Self::section_header("Poster"));
            output.push_str(&format!("\n{}\n", Self::image_line(poster)));
        }

        if let Some(evaluation) = view.evaluation {
            output.push_str(&Self::section_header("Quality Evaluation"));
            output.push_str(&Self::format_evaluation(evaluation));
        }

        if let Some(metrics) = view.metrics {
            output.push_str(&Self::format_metrics(metrics));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(view: ExhibitionView<'_>) -> String {
        let value = serde_json::json!({
            "id": view.id,
            "exhibition": view.exhibition,
            "evaluation": view.evaluation,
            "metrics": view.metrics,
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format title, rooms and scores only (concise output)
    pub fn format_summary(view: ExhibitionView<'_>) -> String {
        let ex = view.exhibition;
        let mut output = String::new();

        output.push_str(&format!("{}\n", format!("=== {} ===", ex.title).cyan().bold()));
        if let Some(id) = view.id {
            output.push_str(&format!("{} #{}\n", "Stored as".dimmed(), id));
        }
        output.push_str(&format!("{} {}\n\n", "Topic:".bold(), ex.topic));

        for room in &ex.rooms {
            output.push_str(&format!(
                "  {} {} {}\n",
                format!("Room {}:", room.position).yellow(),
                room.title,
                format!("({} exhibits)", room.exhibits.len()).dimmed()
            ));
        }
        output.push_str(&format!(
            "\n{} {} exhibits, {} timeline events\n",
            "Total:".bold(),
            ex.total_exhibits(),
            ex.timeline.len()
        ));

        if let Some(evaluation) = view.evaluation {
            output.push_str(&format!(
                "{} {} {}\n",
                "Quality:".bold(),
                Self::score(evaluation.overall_score),
                Self::verdict(evaluation.meets_threshold)
            ));
        }

        if let Some(metrics) = view.metrics {
            output.push_str(&format!(
                "{} {:.1}s, {} refinement iteration(s)\n",
                "Run:".bold(),
                metrics.total_duration_secs,
                metrics.refinement_iterations
            ));
            if !metrics.degraded_stages.is_empty() {
                output.push_str(&format!(
                    "{} {}\n",
                    "Degraded:".yellow().bold(),
                    metrics.degraded_stages.join(", ")
                ));
            }
        }

        output
    }

    /// Format a listing of stored exhibitions
    pub fn format_summaries(summaries: &[ExhibitionSummary]) -> String {
        if summaries.is_empty() {
            return format!("{}\n", "No exhibitions stored yet.".dimmed());
        }

        let mut output = format!(
            "{}\n",
            format!("{:>5}  {:<19}  {:>7}  {}", "ID", "CREATED", "QUALITY", "TITLE").bold()
        );
        for s in summaries {
            output.push_str(&format!(
                "{:>5}  {:<19}  {:>7}  {} {}\n",
                s.id,
                s.created_at.format("%Y-%m-%d %H:%M:%S"),
                format!("{:.2}", s.quality_score),
                s.title,
                format!("[{}]", s.topic).dimmed()
            ));
        }
        output
    }

    /// Format per-agent statistics and the aggregate success rate
    pub fn format_system_stats(stats: &SystemStats) -> String {
        let mut output = Self::section_header("Agent Statistics");
        output.push('\n');
        for agent in &stats.agent_stats {
            let rate = format!("{:>5.1}%", agent.success_rate() * 100.0);
            let rate = if agent.executions > 0 && agent.successes == agent.executions {
                rate.green()
            } else if agent.executions == 0 {
                rate.dimmed()
            } else {
                rate.red()
            };
            output.push_str(&format!(
                "  {:<28} {}/{} {}  avg {:.2}s\n",
                agent.name,
                agent.successes,
                agent.executions,
                rate,
                agent.avg_duration_secs()
            ));
        }
        output.push_str(&format!(
            "\n{} {:.1}% (target {:.1}%) {}\n",
            "Success rate:".bold(),
            stats.overall_success_rate * 100.0,
            stats.target_success_rate * 100.0,
            Self::verdict(stats.meets_target)
        ));
        output
    }

    fn format_room(room: &Room) -> String {
        let mut output = Self::section_header(&format!("Room {}: {}", room.position, room.title));

        if !room.theme.is_empty() {
            output.push_str(&format!("{} {}\n", "Theme:".bold(), room.theme));
        }
        if !room.description.is_empty() {
            output.push_str(&format!("{}\n", room.description));
        }
        if let Some(narrative) = &room.narrative {
            output.push_str(&format!("\n{}\n", Self::indent(narrative, "  ").italic()));
        }

        for exhibit in &room.exhibits {
            output.push_str(&Self::format_exhibit(exhibit));
        }

        if !room.interactive_questions.is_empty() || !room.discussion_prompts.is_empty() {
            output.push_str(&format!("\n{}\n", "Think about it:".cyan()));
            for q in &room.interactive_questions {
                output.push_str(&format!("  ? {}\n", q.question));
            }
            for prompt in &room.discussion_prompts {
                output.push_str(&format!("  > {}\n", prompt));
            }
        }

        if let Some(image) = &room.entrance_image {
            output.push_str(&format!("\n{} {}\n", "Entrance:".dimmed(), Self::image_line(image)));
        }

        output
    }

    fn format_exhibit(exhibit: &Exhibit) -> String {
        let mut output = format!(
            "\n{} {}\n",
            format!("── {} ──", exhibit.name).yellow().bold(),
            format!("({})", exhibit.time_period).dimmed()
        );
        output.push_str(&format!("{}\n", exhibit.description));
        if !exhibit.cultural_significance.is_empty() {
            output.push_str(&format!(
                "{} {}\n",
                "Significance:".bold(),
                exhibit.cultural_significance
            ));
        }
        for fact in &exhibit.facts {
            output.push_str(&format!("  * {}\n", fact));
        }
        output
    }

    fn format_evaluation(evaluation: &EvaluationReport) -> String {
        let mut output = format!(
            "\n{} {} {}\n",
            "Overall:".bold(),
            Self::score(evaluation.overall_score),
            Self::verdict(evaluation.meets_threshold)
        );
        for (label, score) in [
            ("Completeness", evaluation.completeness_score),
            ("Narrative", evaluation.narrative_quality),
            ("Facts", evaluation.factual_quality),
            ("Cultural sensitivity", evaluation.cultural_sensitivity),
        ] {
            output.push_str(&format!("  {:<22} {}\n", label, Self::score(score)));
        }
        if !evaluation.recommendations.is_empty() {
            output.push_str(&format!("\n{}\n", "Recommendations:".yellow().bold()));
            for rec in &evaluation.recommendations {
                output.push_str(&format!("  * {}\n", rec));
            }
        }
        output
    }

    fn format_metrics(metrics: &RunMetrics) -> String {
        let mut output = Self::section_header("Run Metrics");
        output.push_str(&format!(
            "\n  {:<22} {:.1}s\n  {:<22} {:.1}%\n  {:<22} {}\n",
            "Duration",
            metrics.total_duration_secs,
            "Agent success rate",
            metrics.agent_success_rate * 100.0,
            "Refinement iterations",
            metrics.refinement_iterations
        ));
        if !metrics.degraded_stages.is_empty() {
            output.push_str(&format!(
                "  {:<22} {}\n",
                "Degraded stages",
                metrics.degraded_stages.join(", ").yellow()
            ));
        }
        output
    }

    fn image_line(image: &ImageDescriptor) -> String {
        match &image.status {
            ImageStatus::Generated { mime_type, data } => {
                format!("generated {} ({} bytes base64)", mime_type, data.len())
            }
            ImageStatus::PlaceholderGenerated { placeholder_url, .. } => {
                format!("placeholder {}", placeholder_url)
            }
            ImageStatus::Error { error } => format!("{} {}", "failed:".red(), error),
        }
    }

    fn score(score: f64) -> String {
        let text = format!("{:.2}", score);
        if score >= 0.8 {
            text.green().to_string()
        } else if score >= 0.6 {
            text.yellow().to_string()
        } else {
            text.red().to_string()
        }
    }

    fn verdict(met: bool) -> String {
        if met {
            "(meets threshold)".green().to_string()
        } else {
            "(below threshold)".red().to_string()
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, view: ExhibitionView<'_>) -> String {
        Self::format(view)
    }

    fn format_json(&self, view: ExhibitionView<'_>) -> String {
        Self::format_json(view)
    }

    fn format_summary(&self, view: ExhibitionView<'_>) -> String {
        Self::format_summary(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curator_domain::{AgentStats, build_timeline};
    use std::time::Duration;

    fn exhibition() -> curator_domain::Exhibition {
        let exhibits = vec![
            Exhibit::new("Astrolabe", "An instrument for measuring the stars.")
                .with_time_period("1200 CE")
                .with_facts(["Used for navigation"]),
            Exhibit::new("Star chart", "A map of the night sky.").with_time_period("1500 CE"),
        ];
        let mut ex = curator_domain::Exhibition::new("Astronomy", "Reading the Heavens")
            .with_overview("How people mapped the sky.")
            .with_rooms(vec![
                Room::new(1, "Instruments")
                    .with_theme("Tools")
                    .with_exhibits(exhibits),
            ])
            .with_curator_notes("Look up.");
        ex.timeline = build_timeline(ex.exhibits());
        ex
    }

    fn view(ex: &curator_domain::Exhibition) -> ExhibitionView<'_> {
        ExhibitionView {
            id: Some(7),
            exhibition: ex,
            evaluation: None,
            metrics: None,
        }
    }

    #[test]
    fn test_format_full_contains_rooms_and_exhibits() {
        let ex = exhibition();
        let output = ConsoleFormatter::format(view(&ex));
        assert!(output.contains("Reading the Heavens"));
        assert!(output.contains("Room 1: Instruments"));
        assert!(output.contains("Astrolabe"));
        assert!(output.contains("Used for navigation"));
        assert!(output.contains("1200"));
    }

    #[test]
    fn test_format_summary_counts_exhibits() {
        let ex = exhibition();
        let eval = EvaluationReport::evaluate(&ex, 0.70);
        let output = ConsoleFormatter::format_summary(ExhibitionView {
            evaluation: Some(&eval),
            ..view(&ex)
        });
        assert!(output.contains("(2 exhibits)"));
        assert!(output.contains("#7"));
    }

    #[test]
    fn test_format_json_is_valid() {
        let ex = exhibition();
        let json = ConsoleFormatter::format_json(view(&ex));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["exhibition"]["title"], "Reading the Heavens");
        assert!(value["metrics"].is_null());
    }

    #[test]
    fn test_format_summaries() {
        assert!(ConsoleFormatter::format_summaries(&[]).contains("No exhibitions"));

        let summary = ExhibitionSummary {
            id: 3,
            topic: "Astronomy".into(),
            title: "Reading the Heavens".into(),
            created_at: chrono::Utc::now(),
            quality_score: 0.8125,
        };
        let output = ConsoleFormatter::format_summaries(&[summary]);
        assert!(output.contains("Reading the Heavens"));
        assert!(output.contains("0.81"));
    }

    #[test]
    fn test_format_system_stats() {
        let stats = SystemStats::from_agents(
            vec![
                AgentStats::new("TopicIntakeAgent", 1, 1, Duration::from_millis(500)),
                AgentStats::new("ImageGeneratorAgent", 0, 0, Duration::ZERO),
            ],
            0.97,
        );
        let output = ConsoleFormatter::format_system_stats(&stats);
        assert!(output.contains("TopicIntakeAgent"));
        assert!(output.contains("1/1"));
        assert!(output.contains("0/0"));
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "  "), "  a\n  b");
    }
}
