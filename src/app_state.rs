use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        MongoQuestionRepository, MongoQuizAttemptRepository, MongoQuizSessionRepository,
        MongoUserRepository, QuizAttemptRepository, QuizSessionRepository, UserRepository,
    },
    services::{
        access_service::AccessService,
        payment_verifier::PaymentVerifier,
        question_bank::{embedded_questions, QuestionBank},
        question_generator::{OpenAiQuestionGenerator, QuestionGenerator},
        quiz_service::QuizService,
        user_service::UserService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub quiz_service: Arc<QuizService>,
    pub access_service: Arc<AccessService>,
    pub payment_verifier: Arc<PaymentVerifier>,
    pub jwt_service: Arc<JwtService>,
    /// `None` when the state is wired over in-memory repositories.
    pub db: Option<Database>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let user_repository = Arc::new(MongoUserRepository::new(&db));
        user_repository.ensure_indexes().await?;

        let session_repository = Arc::new(MongoQuizSessionRepository::new(&db));
        session_repository.ensure_indexes().await?;

        let attempt_repository = Arc::new(MongoQuizAttemptRepository::new(&db));
        attempt_repository.ensure_indexes().await?;

        let seed = match &config.question_bank_path {
            Some(path) => QuestionBank::read_file(path)?,
            None => embedded_questions()?,
        };
        let question_repository = MongoQuestionRepository::new(&db);
        let bank = QuestionBank::load_or_seed(&question_repository, seed).await?;

        let generator = match &config.openai_api_key {
            Some(key) => {
                log::info!("Question generation enabled with model {}", config.openai_model);
                Some(Arc::new(OpenAiQuestionGenerator::new(key, &config.openai_model))
                    as Arc<dyn QuestionGenerator>)
            }
            None => {
                log::info!("Question generation disabled, serving the question bank only");
                None
            }
        };

        let mut state = Self::from_parts(
            config,
            user_repository,
            session_repository,
            attempt_repository,
            bank,
            generator,
        );
        state.db = Some(db);
        Ok(state)
    }

    /// Wires the services over the given storage, without a database handle.
    pub fn from_parts(
        config: Config,
        user_repository: Arc<dyn UserRepository>,
        session_repository: Arc<dyn QuizSessionRepository>,
        attempt_repository: Arc<dyn QuizAttemptRepository>,
        bank: QuestionBank,
        generator: Option<Arc<dyn QuestionGenerator>>,
    ) -> Self {
        let jwt_service = Arc::new(JwtService::new(
            &config.jwt_secret,
            config.jwt_expiration_hours,
        ));

        let access_service = Arc::new(AccessService::new(
            user_repository.clone(),
            config.unlock_passcode.clone(),
        ));

        let user_service = Arc::new(UserService::new(user_repository, jwt_service.clone()));

        let quiz_service = Arc::new(QuizService::new(
            Arc::new(bank),
            generator,
            session_repository,
            attempt_repository,
            access_service.clone(),
        ));

        let payment_verifier = Arc::new(PaymentVerifier::new(
            config.payment_webhook_secret.clone(),
            config.payment_webhook_tolerance_secs,
        ));

        Self {
            user_service,
            quiz_service,
            access_service,
            payment_verifier,
            jwt_service,
            db: None,
            config: Arc::new(config),
        }
    }
}
