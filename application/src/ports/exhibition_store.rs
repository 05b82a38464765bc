//! Exhibition store port
//!
//! Persistence for finished exhibitions and their evaluations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use curator_domain::{EvaluationReport, Exhibition};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Stored data is corrupt: {0}")]
    Corrupt(String),
}

/// Listing entry for a stored exhibition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExhibitionSummary {
    pub id: i64,
    pub topic: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub quality_score: f64,
}

/// A stored exhibition with the evaluation it was saved with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredExhibition {
    pub summary: ExhibitionSummary,
    pub exhibition: Exhibition,
    pub evaluation: Option<EvaluationReport>,
}

#[async_trait]
pub trait ExhibitionStore: Send + Sync {
    /// Persist an exhibition, returning its id
    async fn store(&self, exhibition: &Exhibition, evaluation: &EvaluationReport) -> Result<i64, StoreError>;

    /// Load an exhibition by id; `None` when no such id exists
    async fn retrieve(&self, id: i64) -> Result<Option<StoredExhibition>, StoreError>;

    /// Summaries of the most recent exhibitions, newest first
    async fn list_recent(&self, limit: usize) -> Result<Vec<ExhibitionSummary>, StoreError>;
}
