use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::models::domain::material::{GradeLevel, Subject};
use crate::models::domain::user::Role;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8 to 128 characters"))]
    pub password: String,

    pub role: Role,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Metadata half of a material upload; the file itself arrives as the
/// multipart binary part.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMaterialRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    pub subject: Subject,

    pub grade: GradeLevel,
}

fn default_total_marks() -> i32 {
    100
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAssignmentRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    pub subject: Subject,

    pub grade: GradeLevel,

    pub due_date: DateTime<Utc>,

    #[serde(default = "default_total_marks")]
    #[validate(range(min = 1, max = 1000, message = "Total marks must be between 1 and 1000"))]
    pub total_marks: i32,
}

/// Marks are bounded by the owning assignment's total, which is only known at
/// grading time; the service checks that range.
#[derive(Debug, Clone, Deserialize)]
pub struct GradeRequest {
    pub marks: i32,
    pub feedback: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, max = 2000))]
    pub message: String,
}
