//! Search port
//!
//! Web search used by research and visual context stages.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Search request failed: {0}")]
    RequestFailed(String),
}

/// One search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub snippet: String,
    pub link: String,
}

/// Snippets of the given results, skipping empty ones.
pub fn extract_facts(results: &[SearchResult]) -> Vec<String> {
    results
        .iter()
        .filter(|r| !r.snippet.trim().is_empty())
        .map(|r| r.snippet.clone())
        .collect()
}

#[async_trait]
pub trait SearchPort: Send + Sync {
    /// Search for `query`, returning at most `num_results` hits
    async fn search(&self, query: &str, num_results: usize) -> Result<Vec<SearchResult>, SearchError>;
}
