use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;

#[cfg(test)]
use mockall::automock;

use crate::{
    constants::quiz_prompt::{question_generator_user_prompt, QUESTION_GENERATOR_SYSTEM_PROMPT},
    errors::{AppError, AppResult},
    models::domain::Question,
};

/// Source of freshly generated questions in the same shape as the bank.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate(&self, count: usize) -> AppResult<Vec<Question>>;
}

pub struct OpenAiQuestionGenerator {
    client: Client<OpenAIConfig>,
    model: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeneratedQuestion {
    question: String,
    choices: Vec<String>,
    answer: GeneratedAnswer,
}

/// Models answer with a letter most of the time, occasionally with an index.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GeneratedAnswer {
    Index(u8),
    Letter(String),
}

impl GeneratedAnswer {
    fn to_index(&self) -> Option<u8> {
        match self {
            GeneratedAnswer::Index(i) => Some(*i),
            GeneratedAnswer::Letter(s) => {
                let mut chars = s.trim().chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphabetic() => {
                        Some(c.to_ascii_uppercase() as u8 - b'A')
                    }
                    _ => None,
                }
            }
        }
    }
}

impl OpenAiQuestionGenerator {
    pub fn new(api_key: &SecretString, model: &str) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key.expose_secret());
        Self {
            client: Client::with_config(config),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl QuestionGenerator for OpenAiQuestionGenerator {
    async fn generate(&self, count: usize) -> AppResult<Vec<Question>> {
        let request = json!({
            "model": self.model,
            "temperature": 0.7,
            "messages": [
                { "role": "system", "content": QUESTION_GENERATOR_SYSTEM_PROMPT },
                { "role": "user", "content": question_generator_user_prompt(count) },
            ],
        });

        let completion: ChatCompletion = self.client.chat().create_byot(request).await?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| {
                AppError::ExternalServiceError("model returned no message content".to_string())
            })?;

        parse_generated_questions(&content)
    }
}

/// Parses the model's JSON reply. Code fences around the array are tolerated.
pub fn parse_generated_questions(content: &str) -> AppResult<Vec<Question>> {
    let trimmed = content.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed)
        .trim();

    let generated: Vec<GeneratedQuestion> = serde_json::from_str(body).map_err(|e| {
        AppError::ExternalServiceError(format!("model returned malformed questions: {}", e))
    })?;

    generated
        .into_iter()
        .map(|g| {
            let correct_index = g.answer.to_index().ok_or_else(|| {
                AppError::ExternalServiceError(format!(
                    "unrecognised answer {:?} for '{}'",
                    g.answer, g.question
                ))
            })?;
            Ok(Question {
                text: g.question.trim().to_string(),
                choices: g.choices.iter().map(|c| c.trim().to_string()).collect(),
                correct_index,
            })
        })
        .collect()
}
