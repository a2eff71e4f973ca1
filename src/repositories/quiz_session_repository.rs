use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

#[cfg(test)]
use mockall::automock;

use crate::{
    db::{Database, QUIZ_SESSIONS_COLLECTION},
    errors::AppResult,
    models::domain::QuizSession,
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait QuizSessionRepository: Send + Sync {
    async fn create(&self, session: QuizSession) -> AppResult<QuizSession>;
    /// Removes and returns the session if it belongs to `user_id`. A session
    /// can be taken at most once.
    async fn take(&self, id: &str, user_id: &str) -> AppResult<Option<QuizSession>>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoQuizSessionRepository {
    collection: Collection<QuizSession>,
}

impl MongoQuizSessionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(QUIZ_SESSIONS_COLLECTION);
        Self { collection }
    }
}

#[async_trait]
impl QuizSessionRepository for MongoQuizSessionRepository {
    async fn create(&self, session: QuizSession) -> AppResult<QuizSession> {
        self.collection.insert_one(&session).await?;
        Ok(session)
    }

    async fn take(&self, id: &str, user_id: &str) -> AppResult<Option<QuizSession>> {
        let session = self
            .collection
            .find_one_and_delete(doc! { "id": id, "user_id": user_id })
            .await?;
        Ok(session)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quiz_sessions collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        Ok(())
    }
}
