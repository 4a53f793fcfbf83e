use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::password::{hash_password, verify_password},
    auth::utils::ensure_role,
    errors::{AppError, AppResult},
    models::domain::user::{Role, User},
    models::dto::request::{LoginRequest, RegisterRequest},
    repositories::UserRepository,
};

pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<User> {
        request.validate()?;

        if self
            .repository
            .find_by_email(&request.email)
            .await?
            .is_some()
        {
            return Err(AppError::AlreadyExists(
                "An account with this email already exists".to_string(),
            ));
        }

        let password_hash = hash_password(&request.password)?;
        let user = User::new(&request.name, &request.email, &password_hash, request.role);

        self.repository.create(user).await
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<User> {
        request.validate()?;

        // Same message for unknown email and wrong password.
        let user = self
            .repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

        if !verify_password(&request.password, &user.password_hash)? {
            return Err(AppError::Unauthorized(
                "Invalid email or password".to_string(),
            ));
        }

        Ok(user)
    }

    pub async fn get_user(&self, id: &str) -> AppResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Role gate for protected routes: one store lookup, 404 when the account
    /// vanished, 403 on a role mismatch.
    pub async fn require_role(&self, id: &str, role: Role) -> AppResult<User> {
        let user = self.get_user(id).await?;
        ensure_role(&user, role)?;
        Ok(user)
    }
}
