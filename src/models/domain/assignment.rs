use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::material::{GradeLevel, Subject};
use crate::models::dto::request::CreateAssignmentRequest;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Assignment {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub subject: Subject,
    pub grade: GradeLevel,
    pub due_date: DateTime<Utc>,
    pub total_marks: i32,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl Assignment {
    pub fn from_request(request: CreateAssignmentRequest, created_by: &str) -> Self {
        Assignment {
            id: Uuid::new_v4().to_string(),
            title: request.title,
            description: request.description,
            subject: request.subject,
            grade: request.grade,
            due_date: request.due_date,
            total_marks: request.total_marks,
            created_by: created_by.to_string(),
            created_at: Utc::now(),
        }
    }
}
