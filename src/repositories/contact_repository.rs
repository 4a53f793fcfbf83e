use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{ContactSubmission, Testimonial},
};

#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn create_submission(
        &self,
        submission: ContactSubmission,
    ) -> AppResult<ContactSubmission>;
    async fn list_testimonials(&self) -> AppResult<Vec<Testimonial>>;
    async fn create_testimonial(&self, testimonial: Testimonial) -> AppResult<Testimonial>;
}

pub struct MongoContactRepository {
    submissions: Collection<ContactSubmission>,
    testimonials: Collection<Testimonial>,
}

impl MongoContactRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            submissions: db.get_collection("contact_submissions"),
            testimonials: db.get_collection("testimonials"),
        }
    }
}

#[async_trait]
impl ContactRepository for MongoContactRepository {
    async fn create_submission(
        &self,
        submission: ContactSubmission,
    ) -> AppResult<ContactSubmission> {
        self.submissions.insert_one(&submission).await?;
        Ok(submission)
    }

    async fn list_testimonials(&self) -> AppResult<Vec<Testimonial>> {
        let cursor = self.testimonials.find(doc! {}).await?;
        let testimonials: Vec<Testimonial> = cursor.try_collect().await?;
        Ok(testimonials)
    }

    async fn create_testimonial(&self, testimonial: Testimonial) -> AppResult<Testimonial> {
        self.testimonials.insert_one(&testimonial).await?;
        Ok(testimonial)
    }
}
