use std::sync::Arc;

use actix_multipart::Multipart;
use actix_web::{get, http::header, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::{AppError, AppResult},
    handlers::multipart::read_multipart,
    models::domain::user::Role,
    models::dto::request::GradeRequest,
};

#[post("/api/assignments/{assignment_id}/submissions")]
async fn create_submission(
    state: web::Data<Arc<AppState>>,
    assignment_id: web::Path<String>,
    auth: AuthenticatedUser,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let student = state
        .user_service
        .require_role(&auth.0.sub, Role::Student)
        .await?;

    let (file, _fields) = read_multipart(payload).await?;
    let file = file.ok_or_else(|| AppError::ValidationError("A file is required".to_string()))?;

    let submission = state
        .submission_service
        .submit(&student.id, &assignment_id, file)
        .await?;

    Ok(HttpResponse::Created().json(submission))
}

#[get("/api/assignments/{assignment_id}/submissions")]
async fn list_assignment_submissions(
    state: web::Data<Arc<AppState>>,
    assignment_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    state
        .user_service
        .require_role(&auth.0.sub, Role::Teacher)
        .await?;

    let rows = state
        .submission_service
        .list_for_assignment(&assignment_id)
        .await?;

    Ok(HttpResponse::Ok().json(rows))
}

#[get("/api/submissions/my")]
async fn list_my_submissions(
    state: web::Data<Arc<AppState>>,
    auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let student = state
        .user_service
        .require_role(&auth.0.sub, Role::Student)
        .await?;

    let rows = state
        .submission_service
        .list_for_student(&student.id)
        .await?;

    Ok(HttpResponse::Ok().json(rows))
}

#[get("/api/submissions/{id}/download")]
async fn download_submission(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let requester = state.user_service.get_user(&auth.0.sub).await?;

    let (submission, bytes) = state.submission_service.download(&requester, &id).await?;

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, submission.file_type))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", submission.file_name),
        ))
        .body(bytes))
}

#[put("/api/submissions/{id}/grade")]
async fn grade_submission(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
    request: web::Json<GradeRequest>,
) -> AppResult<HttpResponse> {
    state
        .user_service
        .require_role(&auth.0.sub, Role::Teacher)
        .await?;

    let submission = state
        .submission_service
        .grade(&id, request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(submission))
}
