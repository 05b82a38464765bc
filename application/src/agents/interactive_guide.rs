//! Interactive guide: room questions, discussion prompts, quiz and challenges.

use super::envelope::{Agent, AgentError};
use crate::model_client::ModelClient;
use async_trait::async_trait;
use curator_domain::parsing::{parse_quiz, parse_room_questions};
use curator_domain::{Challenge, Exhibition, InteractiveContent, PromptTemplate, RoomQuestion};
use std::sync::Arc;
use tracing::warn;

const QUESTION_TEMPERATURE: f32 = 0.8;
const QUIZ_TEMPERATURE: f32 = 0.7;

pub struct InteractiveGuideAgent {
    client: Arc<ModelClient>,
}

impl InteractiveGuideAgent {
    pub fn new(client: Arc<ModelClient>) -> Self {
        Self { client }
    }

    async fn room_questions(&self, title: &str, theme: &str) -> Vec<RoomQuestion> {
        match self
            .client
            .generate_with_temperature(&PromptTemplate::room_questions(title, theme), QUESTION_TEMPERATURE)
            .await
        {
            Ok(response) => parse_room_questions(&response, title),
            Err(e) => {
                warn!("Question generation for '{}' failed: {}", title, e);
                parse_room_questions("", title)
            }
        }
    }
}

fn discussion_prompts(room_title: &str) -> Vec<String> {
    vec![
        format!("How does {} connect to modern life?", room_title),
        "What questions would you ask someone from this period?".to_string(),
    ]
}

fn challenges() -> Vec<Challenge> {
    [
        (
            "Timeline Detective",
            "Find the oldest and newest items in the exhibition",
            "Discover how this topic evolved over time",
        ),
        (
            "Connection Finder",
            "Identify 3 connections between different rooms",
            "See the bigger picture of how ideas relate",
        ),
        (
            "Modern Relevance",
            "Find 3 ways this topic impacts your life today",
            "Understand why history matters now",
        ),
    ]
    .into_iter()
    .map(|(title, description, reward)| Challenge {
        title: title.to_string(),
        description: description.to_string(),
        reward: reward.to_string(),
    })
    .collect()
}

#[async_trait]
impl Agent for InteractiveGuideAgent {
    type Input = Exhibition;
    type Output = Exhibition;

    fn name(&self) -> &'static str {
        "InteractiveGuideAgent"
    }

    async fn process(&self, mut exhibition: Exhibition) -> Result<Exhibition, AgentError> {
        for room in &mut exhibition.rooms {
            room.interactive_questions = self.room_questions(&room.title, &room.theme).await;
            room.discussion_prompts = discussion_prompts(&room.title);
        }

        let response = self
            .client
            .generate_with_temperature(&PromptTemplate::quiz(&exhibition.topic), QUIZ_TEMPERATURE)
            .await?;
        exhibition.interactive = Some(InteractiveContent {
            quiz: parse_quiz(&response, &exhibition.topic),
            challenges: challenges(),
        });
        Ok(exhibition)
    }
}
