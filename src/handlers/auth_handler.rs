use std::sync::Arc;

use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::{AppError, AppResult},
    models::dto::request::{LoginRequest, RegisterRequest},
    models::dto::response::{AuthResponse, VerifyResponse},
};

#[post("/api/auth/register")]
async fn register(
    state: web::Data<Arc<AppState>>,
    request: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let user = state.user_service.register(request.into_inner()).await?;
    let token = state.jwt_service.create_token(&user)?;

    log::info!("Registered {:?} account for user '{}'", user.role, user.id);

    Ok(HttpResponse::Created().json(AuthResponse {
        user: user.into(),
        token,
    }))
}

#[post("/api/auth/login")]
async fn login(
    state: web::Data<Arc<AppState>>,
    request: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let user = state.user_service.login(request.into_inner()).await?;
    let token = state.jwt_service.create_token(&user)?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        user: user.into(),
        token,
    }))
}

#[get("/api/auth/verify")]
async fn verify(
    state: web::Data<Arc<AppState>>,
    auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    // A token whose account has since vanished is no longer valid.
    let user = state
        .user_service
        .get_user(&auth.0.sub)
        .await
        .map_err(|_| AppError::Unauthorized("Account no longer exists".to_string()))?;

    Ok(HttpResponse::Ok().json(VerifyResponse { user: user.into() }))
}
