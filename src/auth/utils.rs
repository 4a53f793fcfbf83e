use crate::{
    errors::{AppError, AppResult},
    models::domain::user::{Role, User},
};

pub fn ensure_role(user: &User, role: Role) -> AppResult<()> {
    if user.role != role {
        return Err(AppError::Forbidden("Insufficient permissions".to_string()));
    }
    Ok(())
}

/// Submission downloads are allowed to the owning student and to any teacher.
pub fn ensure_owner_or_teacher(user: &User, owner_id: &str) -> AppResult<()> {
    if user.role != Role::Teacher && user.id != owner_id {
        return Err(AppError::Forbidden(
            "You can only access your own submissions".to_string(),
        ));
    }
    Ok(())
}
