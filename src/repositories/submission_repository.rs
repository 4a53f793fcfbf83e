use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, to_bson},
    options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument},
    Collection,
};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{Submission, SubmissionStatus},
};

#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    async fn create(&self, submission: Submission) -> AppResult<Submission>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Submission>>;
    /// Most recent first.
    async fn find_by_assignment(&self, assignment_id: &str) -> AppResult<Vec<Submission>>;
    /// Most recent first.
    async fn find_by_student(&self, student_id: &str) -> AppResult<Vec<Submission>>;
    /// Applies marks, feedback, graded status and timestamp in one write.
    /// Returns the updated record, or None when the id does not exist.
    async fn update_grade(
        &self,
        id: &str,
        marks: i32,
        feedback: Option<String>,
        graded_at: DateTime<Utc>,
    ) -> AppResult<Option<Submission>>;
    /// Removes every submission of an assignment; returns the count removed.
    async fn delete_by_assignment(&self, assignment_id: &str) -> AppResult<u64>;
}

pub struct MongoSubmissionRepository {
    collection: Collection<Submission>,
}

impl MongoSubmissionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("submissions");
        Self { collection }
    }

    async fn find_sorted(
        &self,
        filter: mongodb::bson::Document,
    ) -> AppResult<Vec<Submission>> {
        let find_options = FindOptions::builder()
            .sort(doc! { "submitted_at": -1 })
            .build();

        let cursor = self.collection.find(filter).with_options(find_options).await?;
        let submissions: Vec<Submission> = cursor.try_collect().await?;
        Ok(submissions)
    }
}

#[async_trait]
impl SubmissionRepository for MongoSubmissionRepository {
    async fn create(&self, submission: Submission) -> AppResult<Submission> {
        self.collection.insert_one(&submission).await?;
        Ok(submission)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Submission>> {
        let submission = self.collection.find_one(doc! { "id": id }).await?;
        Ok(submission)
    }

    async fn find_by_assignment(&self, assignment_id: &str) -> AppResult<Vec<Submission>> {
        self.find_sorted(doc! { "assignment_id": assignment_id })
            .await
    }

    async fn find_by_student(&self, student_id: &str) -> AppResult<Vec<Submission>> {
        self.find_sorted(doc! { "student_id": student_id }).await
    }

    async fn update_grade(
        &self,
        id: &str,
        marks: i32,
        feedback: Option<String>,
        graded_at: DateTime<Utc>,
    ) -> AppResult<Option<Submission>> {
        let update = doc! {
            "$set": {
                "marks": marks,
                "feedback": to_bson(&feedback)?,
                "status": to_bson(&SubmissionStatus::Graded)?,
                "graded_at": to_bson(&Some(graded_at))?,
            }
        };

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .collection
            .find_one_and_update(doc! { "id": id }, update)
            .with_options(options)
            .await?;

        Ok(updated)
    }

    async fn delete_by_assignment(&self, assignment_id: &str) -> AppResult<u64> {
        let result = self
            .collection
            .delete_many(doc! { "assignment_id": assignment_id })
            .await?;
        Ok(result.deleted_count)
    }
}
