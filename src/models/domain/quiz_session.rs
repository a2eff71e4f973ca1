use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Question, QuestionSource};

/// A quiz handed out to one user and not yet submitted. Submissions are
/// scored against these stored questions, never against client-sent ones.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizSession {
    pub id: String,
    pub user_id: String,
    pub questions: Vec<Question>,
    pub source: QuestionSource,
    pub created_at: DateTime<Utc>,
}

impl QuizSession {
    pub fn new(user_id: &str, questions: Vec<Question>, source: QuestionSource) -> Self {
        QuizSession {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            questions,
            source,
            created_at: Utc::now(),
        }
    }

    pub fn correct_answers(&self) -> Vec<u8> {
        self.questions.iter().map(|q| q.correct_index).collect()
    }
}
