use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection};

#[cfg(test)]
use mockall::automock;

use crate::{
    db::{Database, QUESTIONS_COLLECTION},
    errors::AppResult,
    models::domain::Question,
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Question>>;
    async fn count(&self) -> AppResult<u64>;
    async fn insert_many(&self, questions: Vec<Question>) -> AppResult<usize>;
}

pub struct MongoQuestionRepository {
    collection: Collection<Question>,
}

impl MongoQuestionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(QUESTIONS_COLLECTION);
        Self { collection }
    }
}

#[async_trait]
impl QuestionRepository for MongoQuestionRepository {
    async fn find_all(&self) -> AppResult<Vec<Question>> {
        // Question rejects unknown fields, so the generated `_id` is projected away.
        let questions = self
            .collection
            .find(doc! {})
            .projection(doc! { "_id": 0 })
            .sort(doc! { "_id": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(questions)
    }

    async fn count(&self) -> AppResult<u64> {
        let count = self.collection.count_documents(doc! {}).await?;
        Ok(count)
    }

    async fn insert_many(&self, questions: Vec<Question>) -> AppResult<usize> {
        if questions.is_empty() {
            return Ok(0);
        }
        let result = self.collection.insert_many(&questions).await?;
        Ok(result.inserted_ids.len())
    }
}
