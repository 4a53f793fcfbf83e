use std::sync::Arc;

use actix_multipart::Multipart;
use actix_web::{delete, get, http::header, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::{AppError, AppResult},
    handlers::multipart::{read_multipart, required_field},
    models::domain::user::Role,
    models::dto::request::CreateMaterialRequest,
    models::dto::response::MessageResponse,
};

#[post("/api/materials")]
async fn create_material(
    state: web::Data<Arc<AppState>>,
    auth: AuthenticatedUser,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let teacher = state
        .user_service
        .require_role(&auth.0.sub, Role::Teacher)
        .await?;

    let (file, mut fields) = read_multipart(payload).await?;
    let file = file.ok_or_else(|| AppError::ValidationError("A file is required".to_string()))?;

    let request = CreateMaterialRequest {
        title: required_field(&mut fields, "title")?,
        description: fields.remove("description"),
        subject: required_field(&mut fields, "subject")?.parse()?,
        grade: required_field(&mut fields, "grade")?.parse()?,
    };

    let material = state
        .material_service
        .upload(&teacher.id, file, request)
        .await?;

    Ok(HttpResponse::Created().json(material))
}

#[get("/api/materials")]
async fn list_materials(
    state: web::Data<Arc<AppState>>,
    _auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let materials = state.material_service.list().await?;
    Ok(HttpResponse::Ok().json(materials))
}

#[get("/api/materials/{id}/download")]
async fn download_material(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
    _auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let (material, bytes) = state.material_service.download(&id).await?;

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, material.file_type))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", material.file_name),
        ))
        .body(bytes))
}

#[delete("/api/materials/{id}")]
async fn delete_material(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    state
        .user_service
        .require_role(&auth.0.sub, Role::Teacher)
        .await?;

    state.material_service.delete(&id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Material deleted")))
}
