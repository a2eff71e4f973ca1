pub mod access_service;
pub mod payment_verifier;
pub mod question_bank;
pub mod question_generator;
pub mod quiz_attempt_service;
pub mod quiz_service;
pub mod user_service;
