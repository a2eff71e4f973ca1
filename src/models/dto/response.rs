use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{
    Question, QuestionSource, QuizAttempt, QuizSession, UnlockMethod, User,
};

#[derive(Debug, Clone, Serialize)]
pub struct UserDto {
    pub id: String,
    pub email: String,
    pub unlocked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlock_method: Option<UnlockMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserDto {
            id: user.id,
            email: user.email,
            unlocked: user.unlocked,
            unlock_method: user.unlock_method,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterUserResponse {
    pub token: String,
    pub user: UserDto,
}

/// A freshly built quiz, in display order. Submissions refer back to it by
/// `session_id`.
#[derive(Debug, Clone, Serialize)]
pub struct QuizSessionResponse {
    pub session_id: String,
    pub questions: Vec<Question>,
    pub correct_answers: Vec<u8>,
    pub source: QuestionSource,
}

impl From<QuizSession> for QuizSessionResponse {
    fn from(session: QuizSession) -> Self {
        QuizSessionResponse {
            correct_answers: session.correct_answers(),
            session_id: session.id,
            questions: session.questions,
            source: session.source,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizResult {
    pub score: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnlockResponse {
    pub unlocked: bool,
}

#[derive(Debug, Serialize)]
pub struct AttemptPage {
    pub items: Vec<QuizAttempt>,
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
}
