#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::{Question, UnlockMethod, User};

    /// `count` valid, distinct questions named "`prefix` 0", "`prefix` 1", ...
    pub fn numbered_questions(prefix: &str, count: usize) -> Vec<Question> {
        (0..count)
            .map(|i| {
                Question::new(
                    &format!("{} {}", prefix, i),
                    &["a", "b", "c", "d"],
                    (i % 4) as u8,
                )
            })
            .collect()
    }

    pub fn locked_user() -> User {
        User::new("driver@example.com")
    }

    pub fn unlocked_user(method: UnlockMethod) -> User {
        let mut user = locked_user();
        user.unlocked = true;
        user.unlock_method = Some(method);
        user.unlocked_at = Some(chrono::Utc::now());
        user
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::services::question_bank::check_quiz_set;

    #[test]
    fn numbered_questions_form_a_valid_quiz() {
        let questions = numbered_questions("Q", 10);
        assert!(check_quiz_set(&questions).is_ok());
    }

    #[test]
    fn unlocked_user_records_method() {
        let user = unlocked_user(crate::models::domain::UnlockMethod::Passcode);
        assert!(user.unlocked);
        assert!(user.unlocked_at.is_some());
    }
}
