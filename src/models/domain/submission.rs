use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::StoredFile;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Submitted,
    Graded,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Submission {
    pub id: String,
    pub assignment_id: String,
    pub student_id: String,
    pub file_name: String,
    pub file_path: String,
    pub file_size: i64,
    pub file_type: String,
    pub status: SubmissionStatus,
    pub marks: Option<i32>,
    pub feedback: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub graded_at: Option<DateTime<Utc>>,
}

impl Submission {
    pub fn new(assignment_id: &str, student_id: &str, stored: &StoredFile) -> Self {
        Submission {
            id: Uuid::new_v4().to_string(),
            assignment_id: assignment_id.to_string(),
            student_id: student_id.to_string(),
            file_name: stored.file_name.clone(),
            file_path: stored.storage_path.clone(),
            file_size: stored.size,
            file_type: stored.mime_type.clone(),
            status: SubmissionStatus::Submitted,
            marks: None,
            feedback: None,
            submitted_at: Utc::now(),
            graded_at: None,
        }
    }
}
