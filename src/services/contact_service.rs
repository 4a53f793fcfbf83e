use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::AppResult,
    models::domain::{ContactSubmission, Testimonial},
    models::dto::request::ContactRequest,
    repositories::ContactRepository,
};

pub struct ContactService {
    repository: Arc<dyn ContactRepository>,
}

impl ContactService {
    pub fn new(repository: Arc<dyn ContactRepository>) -> Self {
        Self { repository }
    }

    pub async fn submit(&self, request: ContactRequest) -> AppResult<ContactSubmission> {
        request.validate()?;

        let submission = ContactSubmission::from_request(request);
        self.repository.create_submission(submission).await
    }

    pub async fn testimonials(&self) -> AppResult<Vec<Testimonial>> {
        self.repository.list_testimonials().await
    }

    /// Populates the public testimonials shown on the marketing pages when
    /// the collection is empty.
    pub async fn seed_testimonials(&self) -> AppResult<()> {
        if !self.repository.list_testimonials().await?.is_empty() {
            return Ok(());
        }

        let seeds = [
            Testimonial::new(
                "Thabo M.",
                "Grade 12 Student",
                "The extra classes helped me jump from 40% to 80% in Mathematics. The teachers are amazing!",
                5,
                Some("/assets/stock_images/smiling_high_school__6f94400c.jpg"),
            ),
            Testimonial::new(
                "Lerato K.",
                "Matric Rewrite",
                "I passed my matric rewrite with distinction thanks to All Stars Excellency Academy.",
                5,
                Some("/assets/stock_images/smiling_high_school__93c08cc1.jpg"),
            ),
            Testimonial::new(
                "Mrs. Dlamini",
                "Parent",
                "Best decision we made for our son. His confidence in Physical Sciences has soared.",
                5,
                Some("/assets/stock_images/smiling_high_school__a55cba15.jpg"),
            ),
        ];

        for seed in seeds {
            self.repository.create_testimonial(seed).await?;
        }
        log::info!("Seeded testimonials collection");

        Ok(())
    }
}
