//! Output formatter trait

use curator_application::{ExhibitionRun, StoredExhibition};
use curator_domain::{EvaluationReport, Exhibition, RunMetrics};

/// Everything a formatter may show about one exhibition
///
/// Fresh runs carry metrics; stored exhibitions may lack an evaluation.
#[derive(Debug, Clone, Copy)]
pub struct ExhibitionView<'a> {
    pub id: Option<i64>,
    pub exhibition: &'a Exhibition,
    pub evaluation: Option<&'a EvaluationReport>,
    pub metrics: Option<&'a RunMetrics>,
}

impl<'a> From<&'a ExhibitionRun> for ExhibitionView<'a> {
    fn from(run: &'a ExhibitionRun) -> Self {
        Self {
            id: Some(run.exhibition_id),
            exhibition: &run.exhibition,
            evaluation: Some(&run.evaluation),
            metrics: Some(&run.metrics),
        }
    }
}

impl<'a> From<&'a StoredExhibition> for ExhibitionView<'a> {
    fn from(stored: &'a StoredExhibition) -> Self {
        Self {
            id: Some(stored.summary.id),
            exhibition: &stored.exhibition,
            evaluation: stored.evaluation.as_ref(),
            metrics: None,
        }
    }
}

/// Trait for formatting exhibitions
pub trait OutputFormatter {
    /// Format every part of the exhibition
    fn format(&self, view: ExhibitionView<'_>) -> String;

    /// Format as JSON
    fn format_json(&self, view: ExhibitionView<'_>) -> String;

    /// Format title, rooms and scores only (concise output)
    fn format_summary(&self, view: ExhibitionView<'_>) -> String;
}
