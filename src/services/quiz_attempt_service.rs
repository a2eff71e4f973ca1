use crate::models::{
    domain::{Question, QuizAttempt},
    dto::response::QuizResult,
};

pub struct QuizAttemptService;

impl QuizAttemptService {
    /// Grade a submission against the questions it answers, by position.
    ///
    /// A missing answer (`None`, or no entry at that position) is wrong.
    /// Answers past the last question are ignored, so `score <= total` always.
    pub fn grade_attempt(questions: &[Question], answers: &[Option<u32>]) -> QuizResult {
        let score = questions
            .iter()
            .enumerate()
            .filter(|(position, question)| {
                let submitted = answers.get(*position).copied().flatten();
                Self::grade_question(question, submitted)
            })
            .count();

        QuizResult {
            score: score as u32,
            total: questions.len() as u32,
        }
    }

    fn grade_question(question: &Question, submitted: Option<u32>) -> bool {
        submitted == Some(u32::from(question.correct_index))
    }

    /// Create the attempt record for a graded submission
    pub fn create_attempt(user_id: &str, result: QuizResult) -> QuizAttempt {
        QuizAttempt::new(user_id, result.score, result.total)
    }
}
