use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::domain::Assignment,
    models::dto::request::CreateAssignmentRequest,
    repositories::{AssignmentRepository, SubmissionRepository},
};

pub struct AssignmentService {
    repository: Arc<dyn AssignmentRepository>,
    submissions: Arc<dyn SubmissionRepository>,
}

impl AssignmentService {
    pub fn new(
        repository: Arc<dyn AssignmentRepository>,
        submissions: Arc<dyn SubmissionRepository>,
    ) -> Self {
        Self {
            repository,
            submissions,
        }
    }

    pub async fn create(
        &self,
        teacher_id: &str,
        request: CreateAssignmentRequest,
    ) -> AppResult<Assignment> {
        request.validate()?;

        let assignment = Assignment::from_request(request, teacher_id);
        self.repository.create(assignment).await
    }

    pub async fn list(&self) -> AppResult<Vec<Assignment>> {
        self.repository.find_all().await
    }

    pub async fn get(&self, id: &str) -> AppResult<Assignment> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Assignment with id '{}' not found", id)))
    }

    /// Cascades to the assignment's submissions first so no row is left
    /// pointing at a deleted assignment. The two deletes are sequential, not
    /// transactional. Submission files stay on disk; only the rows go.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.get(id).await?;

        let removed = self.submissions.delete_by_assignment(id).await?;
        if removed > 0 {
            log::info!("Deleted {} submission(s) of assignment '{}'", removed, id);
        }

        self.repository.delete(id).await
    }
}
