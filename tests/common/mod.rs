#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use permit_tutor_server::{
    app_state::AppState,
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{Question, QuizAttempt, QuizSession, UnlockMethod, User},
    repositories::{
        QuestionRepository, QuizAttemptRepository, QuizSessionRepository, UserRepository,
    },
    services::question_bank::QuestionBank,
};

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(AppError::AlreadyExists(format!(
                "User with email '{}' already exists",
                user.email
            )));
        }
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let email = email.trim().to_lowercase();
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn mark_unlocked(&self, id: &str, method: UnlockMethod) -> AppResult<bool> {
        let mut users = self.users.write().await;
        match users.get_mut(id) {
            Some(user) if !user.unlocked => {
                user.unlocked = true;
                user.unlock_method = Some(method);
                user.unlocked_at = Some(Utc::now());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryQuizAttemptRepository {
    attempts: RwLock<Vec<QuizAttempt>>,
}

impl InMemoryQuizAttemptRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuizAttemptRepository for InMemoryQuizAttemptRepository {
    async fn create(&self, attempt: QuizAttempt) -> AppResult<QuizAttempt> {
        self.attempts.write().await.push(attempt.clone());
        Ok(attempt)
    }

    async fn get_user_attempts(
        &self,
        user_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<QuizAttempt>, i64)> {
        let attempts = self.attempts.read().await;
        // Newest first, matching the store's ordering.
        let items: Vec<_> = attempts
            .iter()
            .rev()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();

        let total = items.len() as i64;
        let page = items
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect();

        Ok((page, total))
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryQuizSessionRepository {
    sessions: RwLock<HashMap<String, QuizSession>>,
}

impl InMemoryQuizSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuizSessionRepository for InMemoryQuizSessionRepository {
    async fn create(&self, session: QuizSession) -> AppResult<QuizSession> {
        self.sessions
            .write()
            .await
            .insert(session.id.clone(), session.clone());
        Ok(session)
    }

    async fn take(&self, id: &str, user_id: &str) -> AppResult<Option<QuizSession>> {
        let mut sessions = self.sessions.write().await;
        match sessions.get(id) {
            Some(session) if session.user_id == user_id => Ok(sessions.remove(id)),
            _ => Ok(None),
        }
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryQuestionRepository {
    questions: RwLock<Vec<Question>>,
}

impl InMemoryQuestionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_questions(questions: Vec<Question>) -> Self {
        Self {
            questions: RwLock::new(questions),
        }
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn find_all(&self) -> AppResult<Vec<Question>> {
        Ok(self.questions.read().await.clone())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.questions.read().await.len() as u64)
    }

    async fn insert_many(&self, questions: Vec<Question>) -> AppResult<usize> {
        let inserted = questions.len();
        self.questions.write().await.extend(questions);
        Ok(inserted)
    }
}

/// Application state over in-memory storage and the embedded question bank.
pub fn test_state() -> AppState {
    AppState::from_parts(
        Config::test_config(),
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryQuizSessionRepository::new()),
        Arc::new(InMemoryQuizAttemptRepository::new()),
        QuestionBank::embedded().expect("embedded bank should load"),
        None,
    )
}

pub fn numbered_questions(prefix: &str, count: usize) -> Vec<Question> {
    (0..count)
        .map(|i| {
            Question::new(
                &format!("{} {}", prefix, i),
                &["a", "b", "c"],
                (i % 3) as u8,
            )
        })
        .collect()
}
