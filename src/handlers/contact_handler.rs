use std::sync::Arc;

use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState, errors::AppResult, models::dto::request::ContactRequest,
};

#[post("/api/contact")]
async fn submit_contact(
    state: web::Data<Arc<AppState>>,
    request: web::Json<ContactRequest>,
) -> AppResult<HttpResponse> {
    let submission = state.contact_service.submit(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(submission))
}

#[get("/api/testimonials")]
async fn list_testimonials(state: web::Data<Arc<AppState>>) -> AppResult<HttpResponse> {
    let testimonials = state.contact_service.testimonials().await?;
    Ok(HttpResponse::Ok().json(testimonials))
}
