use std::sync::Arc;

use actix_web::{delete, get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppResult,
    models::domain::user::Role,
    models::dto::request::CreateAssignmentRequest,
    models::dto::response::MessageResponse,
};

#[post("/api/assignments")]
async fn create_assignment(
    state: web::Data<Arc<AppState>>,
    auth: AuthenticatedUser,
    request: web::Json<CreateAssignmentRequest>,
) -> AppResult<HttpResponse> {
    let teacher = state
        .user_service
        .require_role(&auth.0.sub, Role::Teacher)
        .await?;

    let assignment = state
        .assignment_service
        .create(&teacher.id, request.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(assignment))
}

#[get("/api/assignments")]
async fn list_assignments(
    state: web::Data<Arc<AppState>>,
    _auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let assignments = state.assignment_service.list().await?;
    Ok(HttpResponse::Ok().json(assignments))
}

#[get("/api/assignments/{id}")]
async fn get_assignment(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
    _auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let assignment = state.assignment_service.get(&id).await?;
    Ok(HttpResponse::Ok().json(assignment))
}

#[delete("/api/assignments/{id}")]
async fn delete_assignment(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    state
        .user_service
        .require_role(&auth.0.sub, Role::Teacher)
        .await?;

    state.assignment_service.delete(&id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Assignment deleted")))
}
