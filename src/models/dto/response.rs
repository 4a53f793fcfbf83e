use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::material::{GradeLevel, Subject};
use crate::models::domain::submission::Submission;
use crate::models::domain::user::{Role, User};
use crate::models::domain::Assignment;

/// User as exposed over the API; the password hash never leaves the store.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        MessageResponse {
            message: message.to_string(),
        }
    }
}

/// Submission joined with the submitting student's display identity, for the
/// teacher-facing listing of an assignment's submissions.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionWithStudent {
    #[serde(flatten)]
    pub submission: Submission,
    pub student_name: String,
    pub student_email: String,
}

impl SubmissionWithStudent {
    pub fn new(submission: Submission, student: &User) -> Self {
        SubmissionWithStudent {
            submission,
            student_name: student.name.clone(),
            student_email: student.email.clone(),
        }
    }
}

/// Submission joined with its assignment's metadata, for a student's own
/// submission listing.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionWithAssignment {
    #[serde(flatten)]
    pub submission: Submission,
    pub assignment_title: String,
    pub assignment_description: Option<String>,
    pub subject: Subject,
    pub grade: GradeLevel,
    pub due_date: DateTime<Utc>,
    pub total_marks: i32,
}

impl SubmissionWithAssignment {
    pub fn new(submission: Submission, assignment: &Assignment) -> Self {
        SubmissionWithAssignment {
            submission,
            assignment_title: assignment.title.clone(),
            assignment_description: assignment.description.clone(),
            subject: assignment.subject,
            grade: assignment.grade,
            due_date: assignment.due_date,
            total_marks: assignment.total_marks,
        }
    }
}
