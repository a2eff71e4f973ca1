use std::collections::HashSet;

use once_cell::sync::Lazy;
use rand::{seq::SliceRandom, Rng};

use crate::{
    errors::{AppError, AppResult},
    models::domain::Question,
    repositories::QuestionRepository,
};

/// Number of questions in every quiz.
pub const QUIZ_SIZE: usize = 10;

static EMBEDDED_QUESTIONS: Lazy<Result<Vec<Question>, String>> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../data/question_bank.json")).map_err(|e| e.to_string())
});

/// The embedded permit-test dataset shipped with the binary.
pub fn embedded_questions() -> AppResult<Vec<Question>> {
    match &*EMBEDDED_QUESTIONS {
        Ok(questions) => Ok(questions.clone()),
        Err(e) => Err(AppError::ConfigurationError(format!(
            "embedded question bank: {}",
            e
        ))),
    }
}

/// Checks that `questions` is a presentable quiz: exactly `QUIZ_SIZE`
/// well-formed, distinct questions.
pub fn check_quiz_set(questions: &[Question]) -> Result<(), String> {
    if questions.len() != QUIZ_SIZE {
        return Err(format!(
            "expected {} questions, got {}",
            QUIZ_SIZE,
            questions.len()
        ));
    }
    if let Some(err) = questions.iter().find_map(Question::shape_error) {
        return Err(err);
    }
    let distinct: HashSet<&str> = questions.iter().map(|q| q.text.as_str()).collect();
    if distinct.len() != questions.len() {
        return Err("questions are not distinct".to_string());
    }
    Ok(())
}

/// Immutable set of candidate questions, validated once at startup.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> AppResult<Self> {
        if let Some(err) = questions.iter().find_map(Question::shape_error) {
            return Err(AppError::ConfigurationError(format!(
                "invalid question in bank: {}",
                err
            )));
        }

        let duplicate = {
            let mut seen = HashSet::new();
            questions
                .iter()
                .find(|q| !seen.insert(q.text.as_str()))
                .map(|q| q.text.clone())
        };
        if let Some(text) = duplicate {
            return Err(AppError::ConfigurationError(format!(
                "duplicate question in bank: '{}'",
                text
            )));
        }

        if questions.len() < QUIZ_SIZE {
            return Err(AppError::ConfigurationError(format!(
                "question bank has {} questions, at least {} are required",
                questions.len(),
                QUIZ_SIZE
            )));
        }

        Ok(Self { questions })
    }

    pub fn embedded() -> AppResult<Self> {
        Self::new(embedded_questions()?)
    }

    /// Reads a JSON array of questions from disk.
    pub fn read_file(path: &str) -> AppResult<Vec<Question>> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::ConfigurationError(format!("cannot read question bank '{}': {}", path, e))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            AppError::ConfigurationError(format!("cannot parse question bank '{}': {}", path, e))
        })
    }

    /// Seeds the store with `seed` when it holds no questions, then loads the
    /// stored set into memory.
    pub async fn load_or_seed(
        repository: &dyn QuestionRepository,
        seed: Vec<Question>,
    ) -> AppResult<Self> {
        if repository.count().await? == 0 {
            let inserted = repository.insert_many(seed).await?;
            log::info!("Seeded {} questions into the question store", inserted);
        }

        let bank = Self::new(repository.find_all().await?)?;
        log::info!("Loaded question bank with {} questions", bank.len());
        Ok(bank)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn sample(&self) -> Vec<Question> {
        self.sample_with(&mut rand::thread_rng())
    }

    /// Draws `QUIZ_SIZE` distinct questions uniformly at random, in the order
    /// they were drawn.
    pub fn sample_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Question> {
        self.questions
            .choose_multiple(rng, QUIZ_SIZE)
            .cloned()
            .collect()
    }
}
