use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Question, QuestionSource, QuizSession},
        dto::response::{AttemptPage, QuizResult, QuizSessionResponse},
    },
    repositories::{QuizAttemptRepository, QuizSessionRepository},
    services::{
        access_service::AccessService,
        question_bank::{check_quiz_set, QuestionBank, QUIZ_SIZE},
        question_generator::QuestionGenerator,
        quiz_attempt_service::QuizAttemptService,
    },
};

pub struct QuizService {
    bank: Arc<QuestionBank>,
    generator: Option<Arc<dyn QuestionGenerator>>,
    session_repository: Arc<dyn QuizSessionRepository>,
    attempt_repository: Arc<dyn QuizAttemptRepository>,
    access_service: Arc<AccessService>,
}

impl QuizService {
    pub fn new(
        bank: Arc<QuestionBank>,
        generator: Option<Arc<dyn QuestionGenerator>>,
        session_repository: Arc<dyn QuizSessionRepository>,
        attempt_repository: Arc<dyn QuizAttemptRepository>,
        access_service: Arc<AccessService>,
    ) -> Self {
        Self {
            bank,
            generator,
            session_repository,
            attempt_repository,
            access_service,
        }
    }

    /// Builds and stores a quiz for an unlocked user. Generated questions are
    /// used only when the whole set is valid; otherwise the bank is sampled.
    pub async fn build_quiz(&self, user_id: &str) -> AppResult<QuizSessionResponse> {
        self.access_service.require_unlocked(user_id).await?;

        let (questions, source) = match self.generated_questions().await {
            Some(questions) => (questions, QuestionSource::Generated),
            None => (self.bank.sample(), QuestionSource::Bank),
        };

        let session = self
            .session_repository
            .create(QuizSession::new(user_id, questions, source))
            .await?;
        Ok(session.into())
    }

    async fn generated_questions(&self) -> Option<Vec<Question>> {
        let generator = self.generator.as_ref()?;

        let mut questions = match generator.generate(QUIZ_SIZE).await {
            Ok(questions) => questions,
            Err(e) => {
                log::warn!("Question generation failed, using question bank: {}", e);
                return None;
            }
        };
        questions.truncate(QUIZ_SIZE);

        match check_quiz_set(&questions) {
            Ok(()) => Some(questions),
            Err(reason) => {
                log::warn!(
                    "Discarding generated questions, using question bank: {}",
                    reason
                );
                None
            }
        }
    }

    /// Scores `answers` against the stored session, which is consumed.
    pub async fn submit_quiz(
        &self,
        user_id: &str,
        session_id: &str,
        answers: &[Option<u32>],
    ) -> AppResult<QuizResult> {
        self.access_service.require_unlocked(user_id).await?;

        let session = self
            .session_repository
            .take(session_id, user_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Quiz session '{}' not found", session_id))
            })?;

        let result = QuizAttemptService::grade_attempt(&session.questions, answers);
        let attempt = QuizAttemptService::create_attempt(user_id, result);
        self.attempt_repository.create(attempt).await?;

        log::info!(
            "User {} scored {}/{} on session {}",
            user_id,
            result.score,
            result.total,
            session_id
        );

        Ok(result)
    }

    pub async fn list_attempts(
        &self,
        user_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<AttemptPage> {
        let (items, total) = self
            .attempt_repository
            .get_user_attempts(user_id, offset, limit)
            .await?;

        Ok(AttemptPage {
            items,
            total,
            offset,
            limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use secrecy::SecretString;

    use super::*;
    use crate::{
        config::DEFAULT_UNLOCK_PASSCODE,
        models::domain::QuizAttempt,
        repositories::{MockQuizAttemptRepository, MockQuizSessionRepository, MockUserRepository},
        services::question_generator::MockQuestionGenerator,
        test_utils::fixtures::{locked_user, numbered_questions},
    };

    fn access(unlocked: bool) -> Arc<AccessService> {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(move |id| {
            let mut user = locked_user();
            user.id = id.to_string();
            user.unlocked = unlocked;
            Ok(Some(user))
        });
        Arc::new(AccessService::new(
            Arc::new(users),
            SecretString::from(DEFAULT_UNLOCK_PASSCODE.to_string()),
        ))
    }

    /// Session store that accepts every new session.
    fn storing_sessions() -> MockQuizSessionRepository {
        let mut sessions = MockQuizSessionRepository::new();
        sessions.expect_create().returning(|session| Ok(session));
        sessions
    }

    fn service(
        unlocked: bool,
        generator: Option<MockQuestionGenerator>,
        sessions: MockQuizSessionRepository,
        attempts: MockQuizAttemptRepository,
    ) -> QuizService {
        let bank = QuestionBank::new(numbered_questions("Bank", 25)).expect("bank should build");
        QuizService::new(
            Arc::new(bank),
            generator.map(|g| Arc::new(g) as Arc<dyn QuestionGenerator>),
            Arc::new(sessions),
            Arc::new(attempts),
            access(unlocked),
        )
    }

    fn bank_service(generator: Option<MockQuestionGenerator>) -> QuizService {
        service(
            true,
            generator,
            storing_sessions(),
            MockQuizAttemptRepository::new(),
        )
    }

    #[tokio::test]
    async fn build_quiz_stores_ten_distinct_bank_questions() {
        let mut sessions = MockQuizSessionRepository::new();
        sessions
            .expect_create()
            .times(1)
            .withf(|session| {
                session.user_id == "user-1" && session.questions.len() == QUIZ_SIZE
            })
            .returning(|session| Ok(session));

        let service = service(true, None, sessions, MockQuizAttemptRepository::new());
        let session = service.build_quiz("user-1").await.expect("quiz should build");

        assert_eq!(session.source, QuestionSource::Bank);
        assert!(!session.session_id.is_empty());
        let distinct: HashSet<_> = session.questions.iter().map(|q| &q.text).collect();
        assert_eq!(distinct.len(), QUIZ_SIZE);
        assert_eq!(
            session.correct_answers,
            session
                .questions
                .iter()
                .map(|q| q.correct_index)
                .collect::<Vec<_>>()
        );
    }

    #[tokio::test]
    async fn locked_user_cannot_build_or_submit() {
        let mut generator = MockQuestionGenerator::new();
        generator.expect_generate().never();
        let mut sessions = MockQuizSessionRepository::new();
        sessions.expect_create().never();
        sessions.expect_take().never();
        let mut attempts = MockQuizAttemptRepository::new();
        attempts.expect_create().never();

        let service = service(false, Some(generator), sessions, attempts);

        let built = service.build_quiz("user-1").await;
        assert!(matches!(built, Err(AppError::AccessDenied(_))));

        let submitted = service.submit_quiz("user-1", "session-1", &[]).await;
        assert!(matches!(submitted, Err(AppError::AccessDenied(_))));
    }

    #[tokio::test]
    async fn valid_generated_questions_are_used() {
        let mut generator = MockQuestionGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .returning(|count| Ok(numbered_questions("Generated", count)));

        let service = bank_service(Some(generator));
        let session = service.build_quiz("user-1").await.unwrap();

        assert_eq!(session.source, QuestionSource::Generated);
        assert!(session.questions.iter().all(|q| q.text.starts_with("Generated")));
    }

    #[tokio::test]
    async fn generator_failure_falls_back_to_bank() {
        let mut generator = MockQuestionGenerator::new();
        generator
            .expect_generate()
            .returning(|_| Err(AppError::ExternalServiceError("timeout".to_string())));

        let service = bank_service(Some(generator));
        let session = service.build_quiz("user-1").await.expect("fallback should succeed");

        assert_eq!(session.source, QuestionSource::Bank);
        assert_eq!(session.questions.len(), QUIZ_SIZE);
    }

    #[tokio::test]
    async fn partially_invalid_generated_set_is_discarded_entirely() {
        let mut generator = MockQuestionGenerator::new();
        generator.expect_generate().returning(|count| {
            let mut questions = numbered_questions("Generated", count);
            questions[4].choices.truncate(2);
            Ok(questions)
        });

        let service = bank_service(Some(generator));
        let session = service.build_quiz("user-1").await.unwrap();

        assert_eq!(session.source, QuestionSource::Bank);
        assert!(session.questions.iter().all(|q| q.text.starts_with("Bank")));
    }

    #[tokio::test]
    async fn too_few_generated_questions_fall_back_to_bank() {
        let mut generator = MockQuestionGenerator::new();
        generator
            .expect_generate()
            .returning(|_| Ok(numbered_questions("Generated", 4)));

        let service = bank_service(Some(generator));
        let session = service.build_quiz("user-1").await.unwrap();

        assert_eq!(session.source, QuestionSource::Bank);
    }

    #[tokio::test]
    async fn submit_scores_against_stored_session() {
        let correct = [0u8, 1, 2, 3, 1, 2, 0, 1, 2, 1];
        let questions: Vec<Question> = correct
            .iter()
            .enumerate()
            .map(|(i, c)| Question::new(&format!("Q{}", i), &["a", "b", "c", "d"], *c))
            .collect();
        let stored = QuizSession::new("user-1", questions, QuestionSource::Bank);

        let mut sessions = MockQuizSessionRepository::new();
        sessions
            .expect_take()
            .times(1)
            .withf(|id, user_id| id == "session-1" && user_id == "user-1")
            .returning(move |_, _| Ok(Some(stored.clone())));

        let mut attempts = MockQuizAttemptRepository::new();
        attempts
            .expect_create()
            .times(1)
            .withf(|attempt| attempt.user_id == "user-1" && attempt.score == 8 && attempt.total == 10)
            .returning(|attempt| Ok(attempt));

        let service = service(true, None, sessions, attempts);

        let answers: Vec<Option<u32>> = [0, 1, 2, 0, 1, 2, 0, 1, 2, 0]
            .iter()
            .map(|a| Some(*a))
            .collect();

        let result = service
            .submit_quiz("user-1", "session-1", &answers)
            .await
            .expect("submission should succeed");
        assert_eq!(result, QuizResult { score: 8, total: 10 });
    }

    #[tokio::test]
    async fn submit_for_unknown_session_records_nothing() {
        let mut sessions = MockQuizSessionRepository::new();
        sessions.expect_take().returning(|_, _| Ok(None));
        let mut attempts = MockQuizAttemptRepository::new();
        attempts.expect_create().never();

        let service = service(true, None, sessions, attempts);

        let answers = vec![Some(0); QUIZ_SIZE];
        let result = service.submit_quiz("user-1", "made-up", &answers).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn list_attempts_wraps_repository_page() {
        let mut attempts = MockQuizAttemptRepository::new();
        attempts
            .expect_get_user_attempts()
            .returning(|user_id, _, _| Ok((vec![QuizAttempt::new(user_id, 5, 10)], 1)));

        let service = service(true, None, MockQuizSessionRepository::new(), attempts);
        let page = service.list_attempts("user-1", 0, 20).await.unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].score, 5);
        assert_eq!(page.limit, 20);
    }
}
