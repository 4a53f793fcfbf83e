use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::dto::request::ContactRequest;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ContactSubmission {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl ContactSubmission {
    pub fn from_request(request: ContactRequest) -> Self {
        ContactSubmission {
            id: Uuid::new_v4().to_string(),
            name: request.name,
            email: request.email,
            message: request.message,
            created_at: Utc::now(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Testimonial {
    pub id: String,
    pub name: String,
    /// e.g. "Grade 12 Student", "Parent"
    pub role: String,
    pub content: String,
    pub rating: i32,
    pub image: Option<String>,
}

impl Testimonial {
    pub fn new(name: &str, role: &str, content: &str, rating: i32, image: Option<&str>) -> Self {
        Testimonial {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            role: role.to_string(),
            content: content.to_string(),
            rating,
            image: image.map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_submission_from_request() {
        let request = ContactRequest {
            name: "Mrs. Dlamini".to_string(),
            email: "dlamini@example.com".to_string(),
            message: "Do you tutor on weekends?".to_string(),
        };

        let submission = ContactSubmission::from_request(request);
        assert_eq!(submission.name, "Mrs. Dlamini");
        assert!(!submission.id.is_empty());
    }
}
