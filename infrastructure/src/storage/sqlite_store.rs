//! SQLite-backed exhibition store.
//!
//! One row per exhibition. The exhibition and its evaluation are kept
//! together as a JSON document in `data`; the remaining columns exist for
//! listing without decoding that document.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use curator_application::{ExhibitionStore, ExhibitionSummary, StoreError, StoredExhibition};
use curator_domain::{EvaluationReport, Exhibition};
use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Stored document layout of the `data` column
#[derive(Serialize, Deserialize)]
struct StoredDocument {
    exhibition: Exhibition,
    #[serde(default)]
    evaluation: Option<EvaluationReport>,
}

#[derive(Clone)]
pub struct SqliteExhibitionStore {
    path: PathBuf,
    conn: Arc<Mutex<Connection>>,
}

impl SqliteExhibitionStore {
    /// Open (or create) the database at `path`, creating parent directories.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Backend(format!("cannot create {}: {e}", parent.display()))
            })?;
        }
        let conn = Connection::open(&path).map_err(backend)?;
        Self::init(conn, path)
    }

    /// Database that lives only as long as the store
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(backend)?;
        Self::init(conn, PathBuf::from(":memory:"))
    }

    fn init(conn: Connection, path: PathBuf) -> Result<Self, StoreError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS exhibitions (\
               id INTEGER PRIMARY KEY AUTOINCREMENT,\
               topic TEXT NOT NULL,\
               title TEXT NOT NULL,\
               created_at TEXT NOT NULL,\
               quality_score REAL NOT NULL,\
               data TEXT NOT NULL\
             );",
        )
        .map_err(backend)?;

        Ok(Self {
            path,
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn with_conn<F, R>(&self, f: F) -> Result<R, StoreError>
    where
        F: FnOnce(&Connection) -> Result<R, StoreError>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|_| StoreError::Backend("store lock poisoned".into()))?;
        f(&guard)
    }
}

fn backend(e: rusqlite::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

fn join_error(e: tokio::task::JoinError) -> StoreError {
    StoreError::Backend(format!("task join error: {e}"))
}

fn parse_created_at(raw: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Corrupt(format!("bad created_at '{raw}': {e}")))
}

#[async_trait]
impl ExhibitionStore for SqliteExhibitionStore {
    async fn store(&self, exhibition: &Exhibition, evaluation: &EvaluationReport) -> Result<i64, StoreError> {
        let topic = exhibition.topic.clone();
        let title = exhibition.title.clone();
        let score = evaluation.overall_score;
        let data = serde_json::to_string(&StoredDocument {
            exhibition: exhibition.clone(),
            evaluation: Some(evaluation.clone()),
        })
        .map_err(|e| StoreError::Backend(format!("serialization error: {e}")))?;
        let created_at = Utc::now().to_rfc3339();

        let store = self.clone();
        let id = tokio::task::spawn_blocking(move || {
            store.with_conn(|conn| {
                conn.execute(
                    "INSERT INTO exhibitions (topic, title, created_at, quality_score, data) \
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![topic, title, created_at, score, data],
                )
                .map_err(backend)?;
                Ok(conn.last_insert_rowid())
            })
        })
        .await
        .map_err(join_error)??;

        debug!("Stored exhibition {} in {}", id, self.path.display());
        Ok(id)
    }

    async fn retrieve(&self, id: i64) -> Result<Option<StoredExhibition>, StoreError> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || {
            store.with_conn(|conn| {
                let mut stmt = conn
                    .prepare(
                        "SELECT id, topic, title, created_at, quality_score, data \
                         FROM exhibitions WHERE id = ?1",
                    )
                    .map_err(backend)?;
                let mut rows = stmt.query(params![id]).map_err(backend)?;
                let Some(row) = rows.next().map_err(backend)? else {
                    return Ok(None);
                };

                let created_at: String = row.get(3).map_err(backend)?;
                let data: String = row.get(5).map_err(backend)?;
                let document: StoredDocument = serde_json::from_str(&data)
                    .map_err(|e| StoreError::Corrupt(format!("exhibition {id}: {e}")))?;

                Ok(Some(StoredExhibition {
                    summary: ExhibitionSummary {
                        id: row.get(0).map_err(backend)?,
                        topic: row.get(1).map_err(backend)?,
                        title: row.get(2).map_err(backend)?,
                        created_at: parse_created_at(&created_at)?,
                        quality_score: row.get(4).map_err(backend)?,
                    },
                    exhibition: document.exhibition,
                    evaluation: document.evaluation,
                }))
            })
        })
        .await
        .map_err(join_error)?
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<ExhibitionSummary>, StoreError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let store = self.clone();
        tokio::task::spawn_blocking(move || {
            store.with_conn(|conn| {
                let mut stmt = conn
                    .prepare(
                        "SELECT id, topic, title, created_at, quality_score \
                         FROM exhibitions ORDER BY id DESC LIMIT ?1",
                    )
                    .map_err(backend)?;
                let mut rows = stmt.query(params![limit]).map_err(backend)?;

                let mut summaries = Vec::new();
                while let Some(row) = rows.next().map_err(backend)? {
                    let created_at: String = row.get(3).map_err(backend)?;
                    summaries.push(ExhibitionSummary {
                        id: row.get(0).map_err(backend)?,
                        topic: row.get(1).map_err(backend)?,
                        title: row.get(2).map_err(backend)?,
                        created_at: parse_created_at(&created_at)?,
                        quality_score: row.get(4).map_err(backend)?,
                    });
                }
                Ok(summaries)
            })
        })
        .await
        .map_err(join_error)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curator_domain::{Exhibit, Room};

    fn exhibition(topic: &str) -> Exhibition {
        let exhibits = vec![
            Exhibit::new("Printing press", "Movable type changed how ideas spread.")
                .with_time_period("1440"),
            Exhibit::new("Broadsheet", "Cheap printed news for the street.")
                .with_time_period("1600"),
        ];
        Exhibition::new(topic, format!("The Story of {topic}"))
            .with_overview("An overview")
            .with_rooms(vec![Room::new(1, "Origins").with_exhibits(exhibits)])
            .with_curator_notes("Notes from the curator.")
    }

    #[tokio::test]
    async fn test_store_and_retrieve() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteExhibitionStore::open(dir.path().join("data").join("exhibitions.db")).unwrap();

        let ex = exhibition("Printing");
        let eval = EvaluationReport::evaluate(&ex, 0.70);
        let id = store.store(&ex, &eval).await.unwrap();
        assert_eq!(id, 1);

        let stored = store.retrieve(id).await.unwrap().unwrap();
        assert_eq!(stored.summary.topic, "Printing");
        assert_eq!(stored.summary.title, "The Story of Printing");
        assert_eq!(stored.summary.quality_score, eval.overall_score);
        assert_eq!(stored.exhibition, ex);
        assert_eq!(stored.evaluation, Some(eval));
    }

    #[tokio::test]
    async fn test_retrieve_missing_is_none() {
        let store = SqliteExhibitionStore::in_memory().unwrap();
        assert!(store.retrieve(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_recent_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteExhibitionStore::open(dir.path().join("exhibitions.db")).unwrap();

        for topic in ["Printing", "Navigation", "Astronomy"] {
            let ex = exhibition(topic);
            let eval = EvaluationReport::evaluate(&ex, 0.70);
            store.store(&ex, &eval).await.unwrap();
        }

        let recent = store.list_recent(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].topic, "Astronomy");
        assert_eq!(recent[1].topic, "Navigation");
    }

    #[tokio::test]
    async fn test_corrupt_row_is_reported() {
        let store = SqliteExhibitionStore::in_memory().unwrap();
        store
            .with_conn(|conn| {
                conn.execute(
                    "INSERT INTO exhibitions (topic, title, created_at, quality_score, data) \
                     VALUES ('t', 'T', '2024-01-01T00:00:00Z', 0.5, 'not json')",
                    [],
                )
                .map_err(backend)?;
                Ok(())
            })
            .unwrap();

        let err = store.retrieve(1).await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }
}
