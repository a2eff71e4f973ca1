pub mod question_repository;
pub mod quiz_attempt_repository;
pub mod quiz_session_repository;
pub mod user_repository;

pub use question_repository::{MongoQuestionRepository, QuestionRepository};
pub use quiz_attempt_repository::{MongoQuizAttemptRepository, QuizAttemptRepository};
pub use quiz_session_repository::{MongoQuizSessionRepository, QuizSessionRepository};
pub use user_repository::{MongoUserRepository, UserRepository};

#[cfg(test)]
pub use question_repository::MockQuestionRepository;
#[cfg(test)]
pub use quiz_attempt_repository::MockQuizAttemptRepository;
#[cfg(test)]
pub use quiz_session_repository::MockQuizSessionRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
