use std::sync::Arc;

use chrono::Utc;

use crate::{
    auth::utils::ensure_owner_or_teacher,
    errors::{AppError, AppResult},
    models::domain::{Submission, User},
    models::dto::request::GradeRequest,
    models::dto::response::{SubmissionWithAssignment, SubmissionWithStudent},
    repositories::{AssignmentRepository, SubmissionRepository, UserRepository},
    storage::{FileStore, UploadedFile, MAX_UPLOAD_BYTES},
};

pub struct SubmissionService {
    repository: Arc<dyn SubmissionRepository>,
    assignments: Arc<dyn AssignmentRepository>,
    users: Arc<dyn UserRepository>,
    file_store: Arc<FileStore>,
}

impl SubmissionService {
    pub fn new(
        repository: Arc<dyn SubmissionRepository>,
        assignments: Arc<dyn AssignmentRepository>,
        users: Arc<dyn UserRepository>,
        file_store: Arc<FileStore>,
    ) -> Self {
        Self {
            repository,
            assignments,
            users,
            file_store,
        }
    }

    pub async fn submit(
        &self,
        student_id: &str,
        assignment_id: &str,
        upload: UploadedFile,
    ) -> AppResult<Submission> {
        self.assignments
            .find_by_id(assignment_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Assignment with id '{}' not found",
                    assignment_id
                ))
            })?;

        if upload.bytes.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::ValidationError(
                "File exceeds the 10 MiB upload limit".to_string(),
            ));
        }

        let stored = self.file_store.store(&upload).await?;
        let submission = Submission::new(assignment_id, student_id, &stored);

        match self.repository.create(submission).await {
            Ok(submission) => Ok(submission),
            Err(e) => {
                if let Err(cleanup) = self.file_store.remove(&stored.storage_path).await {
                    log::warn!(
                        "Failed to remove orphaned file '{}': {}",
                        stored.storage_path,
                        cleanup
                    );
                }
                Err(e)
            }
        }
    }

    /// Teacher view: submissions of one assignment with each student's
    /// display identity. Rows whose student vanished are skipped.
    pub async fn list_for_assignment(
        &self,
        assignment_id: &str,
    ) -> AppResult<Vec<SubmissionWithStudent>> {
        let submissions = self.repository.find_by_assignment(assignment_id).await?;

        let mut rows = Vec::with_capacity(submissions.len());
        for submission in submissions {
            let Some(student) = self.users.find_by_id(&submission.student_id).await? else {
                continue;
            };
            rows.push(SubmissionWithStudent::new(submission, &student));
        }
        Ok(rows)
    }

    /// Student view: own submissions with each assignment's metadata. Rows
    /// whose assignment vanished are skipped.
    pub async fn list_for_student(
        &self,
        student_id: &str,
    ) -> AppResult<Vec<SubmissionWithAssignment>> {
        let submissions = self.repository.find_by_student(student_id).await?;

        let mut rows = Vec::with_capacity(submissions.len());
        for submission in submissions {
            let Some(assignment) = self
                .assignments
                .find_by_id(&submission.assignment_id)
                .await?
            else {
                continue;
            };
            rows.push(SubmissionWithAssignment::new(submission, &assignment));
        }
        Ok(rows)
    }

    pub async fn get(&self, id: &str) -> AppResult<Submission> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Submission with id '{}' not found", id)))
    }

    pub async fn download(&self, requester: &User, id: &str) -> AppResult<(Submission, Vec<u8>)> {
        let submission = self.get(id).await?;
        ensure_owner_or_teacher(requester, &submission.student_id)?;

        let bytes = self.file_store.retrieve(&submission.file_path).await?;
        Ok((submission, bytes))
    }

    /// Grading transition: submitted -> graded, re-grading overwrites. Marks
    /// are bounded by the owning assignment's total; a violation applies
    /// nothing.
    pub async fn grade(&self, id: &str, request: GradeRequest) -> AppResult<Submission> {
        let submission = self.get(id).await?;

        let assignment = self
            .assignments
            .find_by_id(&submission.assignment_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Assignment with id '{}' not found",
                    submission.assignment_id
                ))
            })?;

        if request.marks < 0 || request.marks > assignment.total_marks {
            return Err(AppError::ValidationError(format!(
                "Marks must be between 0 and {}",
                assignment.total_marks
            )));
        }

        self.repository
            .update_grade(id, request.marks, request.feedback, Utc::now())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Submission with id '{}' not found", id)))
    }
}
