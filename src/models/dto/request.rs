use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Submission of a quiz built by `GET /api/quiz`.
///
/// `answers[i]` is the chosen index for the session's `questions[i]`; `null`
/// or a missing trailing entry means the question was skipped.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitQuizRequest {
    #[validate(length(min = 1, max = 64))]
    pub session_id: String,

    #[validate(length(max = 50))]
    #[serde(default)]
    pub answers: Vec<Option<u32>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UnlockRequest {
    #[validate(length(min = 1, max = 128))]
    pub code: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PaginationParams {
    #[validate(range(min = 0))]
    pub offset: Option<i64>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            offset: Some(0),
            limit: Some(20),
        }
    }
}

impl PaginationParams {
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }
}
