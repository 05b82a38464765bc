//! JSONL file writer for pipeline run events.
//!
//! One file per run. Every [`RunEvent`] becomes a single JSON line carrying
//! the event's payload plus `seq`, `type` and `timestamp`. Lines are
//! buffered and only flushed at run milestones, so a crashed run still
//! leaves everything up to its last milestone on disk.

use curator_application::{EventLogger, RunEvent};
use serde_json::{Map, Value, json};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Events after which buffered lines are flushed to disk
const MILESTONES: &[&str] = &[
    "run_started",
    "agent_error",
    "stage_degraded",
    "exhibition_created",
    "metrics",
];

struct RunLog {
    writer: BufWriter<File>,
    seq: u64,
}

/// JSONL logger for a single pipeline run.
pub struct JsonlEventLogger {
    log: Mutex<RunLog>,
    path: PathBuf,
}

impl JsonlEventLogger {
    /// Create the log file at `path`, with any missing parent directories.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        Ok(Self {
            log: Mutex::new(RunLog {
                writer: BufWriter::new(file),
                seq: 0,
            }),
            path: path.to_path_buf(),
        })
    }

    /// Create a logger for one pipeline run under `logs_dir`.
    ///
    /// The file is named after the start time and a slug of the topic, e.g.
    /// `20240501-142233-age-of-sail.events.jsonl`. Returns `None`, with a
    /// warning, when the file cannot be created.
    pub fn for_run(logs_dir: impl AsRef<Path>, topic: &str) -> Option<Self> {
        let stamp = chrono::Utc::now().format("%Y%m%d-%H%M%S");
        let path = logs_dir
            .as_ref()
            .join(format!("{}-{}.events.jsonl", stamp, topic_slug(topic)));
        Self::create(&path)
            .inspect_err(|e| warn!("Run event log disabled ({}): {}", path.display(), e))
            .ok()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Lowercase ASCII alphanumerics joined by single dashes, at most 40 chars.
fn topic_slug(topic: &str) -> String {
    let mut slug = String::new();
    for c in topic.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
        if slug.len() >= 40 {
            break;
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "run".to_string()
    } else {
        slug.to_string()
    }
}

/// Payload fields first, then the envelope fields, which always win.
fn record(seq: u64, event: RunEvent) -> Value {
    let mut fields = match event.payload {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            let mut map = Map::new();
            map.insert("data".to_string(), other);
            map
        }
    };
    fields.insert("seq".to_string(), json!(seq));
    fields.insert("type".to_string(), json!(event.event_type));
    fields.insert(
        "timestamp".to_string(),
        json!(chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)),
    );
    Value::Object(fields)
}

impl EventLogger for JsonlEventLogger {
    fn log(&self, event: RunEvent) {
        let milestone = MILESTONES.contains(&event.event_type);
        let Ok(mut log) = self.log.lock() else {
            return;
        };
        log.seq += 1;
        let line = record(log.seq, event);

        let written = serde_json::to_writer(&mut log.writer, &line)
            .map_err(io::Error::from)
            .and_then(|()| log.writer.write_all(b"\n"))
            .and_then(|()| if milestone { log.writer.flush() } else { Ok(()) });
        if let Err(e) = written {
            warn!("Failed to write run event to {}: {}", self.path.display(), e);
        }
    }
}

impl Drop for JsonlEventLogger {
    fn drop(&mut self) {
        if let Ok(log) = self.log.get_mut() {
            let _ = log.writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_events_written_in_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.events.jsonl");
        let logger = JsonlEventLogger::create(&path).unwrap();

        logger.log(RunEvent::new(
            "agent_complete",
            json!({"agent": "TopicIntakeAgent", "duration_ms": 42}),
        ));
        logger.log(RunEvent::new(
            "stage_degraded",
            json!({"stage": "semantic_analysis", "error": "Rate limited: quota"}),
        ));

        let events = lines(&path);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["seq"], 1);
        assert_eq!(events[0]["type"], "agent_complete");
        assert_eq!(events[0]["agent"], "TopicIntakeAgent");
        assert_eq!(events[0]["duration_ms"], 42);
        assert_eq!(events[1]["seq"], 2);
        assert_eq!(events[1]["stage"], "semantic_analysis");
        assert!(events.iter().all(|e| e["timestamp"].is_string()));
    }

    #[test]
    fn test_flushes_only_at_milestones() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.events.jsonl");
        let logger = JsonlEventLogger::create(&path).unwrap();

        logger.log(RunEvent::new("agent_start", json!({"agent": "ResearchAgent"})));
        assert!(std::fs::read_to_string(&path).unwrap().is_empty());

        logger.log(RunEvent::new("exhibition_created", json!({"exhibition_id": 7})));
        let events = lines(&path);
        assert_eq!(events.len(), 2);
        assert_eq!(events[1]["exhibition_id"], 7);
    }

    #[test]
    fn test_drop_flushes_pending_events() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.events.jsonl");
        let logger = JsonlEventLogger::create(&path).unwrap();
        logger.log(RunEvent::new("refinement_iteration", json!("not an object")));
        drop(logger);

        let events = lines(&path);
        assert_eq!(events[0]["type"], "refinement_iteration");
        assert_eq!(events[0]["data"], "not an object");
    }

    #[test]
    fn test_envelope_fields_override_payload() {
        let value = record(3, RunEvent::new("metrics", json!({"type": "spoofed", "seq": 99})));
        assert_eq!(value["type"], "metrics");
        assert_eq!(value["seq"], 3);
    }

    #[test]
    fn test_topic_slug() {
        assert_eq!(topic_slug("The Age of Sail!"), "the-age-of-sail");
        assert_eq!(topic_slug("  ***  "), "run");
        assert!(topic_slug(&"x".repeat(100)).len() <= 40);
    }

    #[test]
    fn test_for_run_names_file_after_topic() {
        let dir = tempfile::tempdir().unwrap();
        let logger = JsonlEventLogger::for_run(dir.path().join("logs"), "Ancient Rome").unwrap();
        let name = logger.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.ends_with("-ancient-rome.events.jsonl"));
        assert!(logger.path().exists());
    }

    #[test]
    fn test_for_run_unwritable_dir_disables_logging() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "file").unwrap();
        assert!(JsonlEventLogger::for_run(&blocker, "Ancient Rome").is_none());
    }
}
