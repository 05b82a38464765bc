//! Structured-output parsing for model responses.
//!
//! Each parser pulls a specific structure out of free-form model text and
//! substitutes deterministic, topic-derived fallback content when the text
//! does not contain it. None of them can fail.
//!
//! | Parser | Expected format | Fallback |
//! |--------|-----------------|----------|
//! | [`parse_topic_record`] | `LABEL: value` lines | topic as title |
//! | [`parse_queries`] | one query per line | topic, history, significance |
//! | [`parse_exhibits`] | JSON array of exhibits | Origins / Development / Legacy |
//! | [`parse_connections`] | `type\|connection\|significance` | JSON array, then two defaults |
//! | [`parse_concepts`] | one concept per line | the topic |
//! | [`parse_room_questions`] | `Q\|purpose\|hint` | JSON array, then one default |
//! | [`parse_quiz`] | JSON object | titled quiz, no questions |

pub mod extract;

use crate::core::topic::{Topic, TopicRecord};
use crate::exhibition::enrichment::{Connection, Quiz, RoomQuestion};
use crate::exhibition::entities::Exhibit;

/// Maximum research queries kept from a response
pub const MAX_QUERIES: usize = 5;
/// Maximum key concepts kept from a response
pub const MAX_CONCEPTS: usize = 10;

/// Extract topic intake fields from labeled lines.
pub fn parse_topic_record(response: &str, topic: &Topic) -> TopicRecord {
    let mut record = TopicRecord::bare(topic);
    if let Some(title) = extract::labeled_value(response, "TITLE:").filter(|t| !t.is_empty()) {
        record.title = title;
    }
    record.category = extract::labeled_value(response, "CATEGORY:");
    record.time_period = extract::labeled_value(response, "TIME_PERIOD:");
    record.regions = extract::labeled_value(response, "REGIONS:");
    record.key_themes = extract::labeled_value(response, "KEY_THEMES:");
    record.overview = extract::labeled_value(response, "OVERVIEW:").unwrap_or_default();
    record.suggested_rooms = extract::labeled_value(response, "SUGGESTED_ROOMS:");
    record.enriched_text = response.to_string();
    record
}

/// Non-empty lines as search queries, at most [`MAX_QUERIES`].
pub fn parse_queries(response: &str, topic: &str) -> Vec<String> {
    let queries = extract::lines_longer_than(response, 0, MAX_QUERIES);
    if !queries.is_empty() {
        return queries;
    }
    vec![
        topic.to_string(),
        format!("{} history", topic),
        format!("{} cultural significance", topic),
    ]
}

/// Exhibits from a JSON array, or the fallback set when none parse.
pub fn parse_exhibits(response: &str, topic: &str) -> Vec<Exhibit> {
    let exhibits: Vec<Exhibit> = extract::json_array_lenient(response);
    if exhibits.is_empty() {
        fallback_exhibits(topic)
    } else {
        exhibits
    }
}

/// Three generic exhibits spanning the topic's history.
pub fn fallback_exhibits(topic: &str) -> Vec<Exhibit> {
    vec![
        Exhibit::new(
            format!("{} - Origins", topic),
            format!("Explore the origins and early history of {}.", topic),
        )
        .with_time_period("Historical Period")
        .with_significance(format!("Understanding the roots of {}.", topic))
        .with_facts([format!("Key fact about {}", topic)])
        .with_visual_refs(["Historical artifact", "Period illustration"])
        .with_tags(["origins", "history"]),
        Exhibit::new(
            format!("{} - Development", topic),
            format!("The evolution and development of {} over time.", topic),
        )
        .with_time_period("Middle Period")
        .with_significance(format!("How {} evolved and changed.", topic))
        .with_facts([format!("Development fact about {}", topic)])
        .with_visual_refs(["Development artifact"])
        .with_tags(["development", "evolution"]),
        Exhibit::new(
            format!("{} - Legacy", topic),
            format!("The lasting impact and legacy of {}.", topic),
        )
        .with_time_period("Modern Era")
        .with_significance(format!("The continuing influence of {}.", topic))
        .with_facts([format!("Legacy fact about {}", topic)])
        .with_visual_refs(["Modern representation"])
        .with_tags(["legacy", "impact"]),
    ]
}

/// Semantic connections from `type|connection|significance` lines.
pub fn parse_connections(response: &str, topic: &str) -> Vec<Connection> {
    let rows: Vec<Connection> = extract::delimited_rows(response, 3)
        .into_iter()
        .map(|f| Connection::new(f[0].clone(), f[1].clone(), f[2].clone()))
        .collect();
    if !rows.is_empty() {
        return rows;
    }

    let from_json: Vec<Connection> = extract::json_array_lenient(response);
    if !from_json.is_empty() {
        return from_json;
    }

    vec![
        Connection::new(
            "historical",
            format!("Historical context of {}", topic),
            "Provides background",
        ),
        Connection::new(
            "cultural",
            format!("Cultural impact of {}", topic),
            "Shows influence",
        ),
    ]
}

/// Key concepts: lines longer than three characters, at most [`MAX_CONCEPTS`].
pub fn parse_concepts(response: &str, topic: &str) -> Vec<String> {
    let concepts = extract::lines_longer_than(response, 3, MAX_CONCEPTS);
    if concepts.is_empty() {
        vec![topic.to_string()]
    } else {
        concepts
    }
}

/// Room questions from `Q|purpose|hint` lines.
pub fn parse_room_questions(response: &str, room_title: &str) -> Vec<RoomQuestion> {
    let rows: Vec<RoomQuestion> = extract::delimited_rows(response, 3)
        .into_iter()
        .map(|f| RoomQuestion {
            question: f[0].clone(),
            purpose: f[1].clone(),
            hint: f[2].clone(),
        })
        .collect();
    if !rows.is_empty() {
        return rows;
    }

    let from_json: Vec<RoomQuestion> = extract::json_array_lenient(response);
    if !from_json.is_empty() {
        return from_json;
    }

    vec![RoomQuestion {
        question: format!("What surprises you most about {}?", room_title),
        purpose: "Personal reflection".to_string(),
        hint: "Think about your expectations".to_string(),
    }]
}

/// A quiz from a JSON object, or an empty titled quiz.
pub fn parse_quiz(response: &str, topic: &str) -> Quiz {
    extract::json_object::<Quiz>(response).unwrap_or_else(|| Quiz {
        title: format!("Test Your Knowledge: {}", topic),
        questions: Vec::new(),
    })
}
