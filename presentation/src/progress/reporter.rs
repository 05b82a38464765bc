//! Progress reporting for pipeline runs

use colored::Colorize;
use curator_application::{ProgressNotifier, StageStatus};
use curator_domain::Stage;
use indicatif::{ProgressBar, ProgressStyle};

/// Reports progress during a pipeline run with a single stage bar
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    pub fn new() -> Self {
        let bar = ProgressBar::new(Stage::ALL.len() as u64);
        bar.set_style(Self::stage_style());
        bar.set_prefix("Curating");
        Self { bar }
    }

    fn stage_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn stage_display_name(stage: Stage) -> String {
        format!("Stage {}: {}", stage.number(), stage.label())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_stage_start(&self, stage: Stage) {
        self.bar.set_message(format!("{}...", stage.label()));
    }

    fn on_stage_complete(&self, stage: Stage, status: StageStatus) {
        self.bar.set_position(stage.number() as u64);
        match status {
            StageStatus::Completed => {
                self.bar
                    .set_message(format!("{} {}", "v".green(), stage.label()));
            }
            StageStatus::Degraded => {
                self.bar.println(format!(
                    "  {} {} degraded, continuing with defaults",
                    "!".yellow(),
                    Self::stage_display_name(stage)
                ));
            }
            StageStatus::Failed => {
                self.bar.abandon_with_message(format!(
                    "{} {} failed",
                    "x".red(),
                    Self::stage_display_name(stage)
                ));
                return;
            }
        }
        if stage == Stage::Storage {
            self.bar
                .finish_with_message(format!("{}", "Exhibition complete!".green()));
        }
    }

    fn on_refinement_iteration(&self, iteration: usize, overall_score: f64) {
        self.bar.println(format!(
            "  {} refinement pass {} scored {:.2}",
            "~".cyan(),
            iteration,
            overall_score
        ));
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_stage_start(&self, stage: Stage) {
        println!(
            "{} {}",
            "->".cyan(),
            ProgressReporter::stage_display_name(stage).bold()
        );
    }

    fn on_stage_complete(&self, stage: Stage, status: StageStatus) {
        match status {
            StageStatus::Completed => println!("  {} {}", "v".green(), stage.label()),
            StageStatus::Degraded => println!("  {} {} (degraded)", "!".yellow(), stage.label()),
            StageStatus::Failed => println!("  {} {} (failed)", "x".red(), stage.label()),
        }
    }

    fn on_refinement_iteration(&self, iteration: usize, overall_score: f64) {
        println!("  {} refinement pass {} scored {:.2}", "~".cyan(), iteration, overall_score);
    }
}
