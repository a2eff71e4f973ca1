use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A finished quiz. Attempts are append-only.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizAttempt {
    pub id: String,
    pub user_id: String,
    pub score: u32,
    pub total: u32,
    pub submitted_at: DateTime<Utc>,
}

impl QuizAttempt {
    pub fn new(user_id: &str, score: u32, total: u32) -> Self {
        QuizAttempt {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            score,
            total,
            submitted_at: Utc::now(),
        }
    }
}
