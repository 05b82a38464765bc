//! Deterministic search adapter that never leaves the process.
//!
//! Every query yields the same synthetic hits, so pipeline runs are
//! reproducible without a search API.

use async_trait::async_trait;
use curator_application::{SearchError, SearchPort, SearchResult};
use tracing::debug;

/// Search port implementation returning synthetic, query-derived results
#[derive(Debug, Clone, Default)]
pub struct OfflineSearch;

impl OfflineSearch {
    pub fn new() -> Self {
        Self
    }

    fn result_for(query: &str, rank: usize) -> SearchResult {
        let title = match rank {
            0 => format!("Search result for: {query}"),
            n => format!("Search result for: {query} ({})", n + 1),
        };
        SearchResult {
            title,
            snippet: format!("Relevant information about {query} from historical sources..."),
            link: format!(
                "https://example.com/search?q={}&rank={}",
                urlencoding::encode(query),
                rank + 1
            ),
        }
    }
}

#[async_trait]
impl SearchPort for OfflineSearch {
    async fn search(&self, query: &str, num_results: usize) -> Result<Vec<SearchResult>, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        debug!("Offline search for '{}' ({} results)", query, num_results);
        Ok((0..num_results).map(|rank| Self::result_for(query, rank)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_results_are_derived_from_query() {
        let results = OfflineSearch::new()
            .search("Bronze Age trade", 3)
            .await
            .unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].title, "Search result for: Bronze Age trade");
        assert!(results[0].snippet.contains("Bronze Age trade"));
        assert!(results[0].link.contains("Bronze%20Age%20trade"));
        assert_ne!(results[0].link, results[1].link);
    }

    #[tokio::test]
    async fn test_empty_query_has_no_results() {
        let results = OfflineSearch::new().search("   ", 3).await.unwrap();
        assert!(results.is_empty());
    }
}
