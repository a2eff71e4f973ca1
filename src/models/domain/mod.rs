pub mod payment_event;
pub mod question;
pub mod quiz_attempt;
pub mod quiz_session;
pub mod user;
pub use payment_event::PaymentEvent;
pub use question::{Question, QuestionSource};
pub use quiz_attempt::QuizAttempt;
pub use quiz_session::QuizSession;
pub use user::{UnlockMethod, User};
