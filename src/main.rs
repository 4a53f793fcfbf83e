use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use academy_server::{
    app_state::AppState,
    auth::AuthMiddleware,
    config::Config,
    handlers::{
        assignment_handler, auth_handler, contact_handler, health_check, health_check_ready,
        material_handler, submission_handler,
    },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    if std::env::var("APP_ENV").as_deref() == Ok("production") {
        config.validate_for_production();
    }

    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let state = Arc::new(
        AppState::new(config)
            .await
            .expect("failed to initialize application state"),
    );

    state
        .contact_service
        .seed_testimonials()
        .await
        .expect("failed to seed testimonials");

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .service(health_check)
            .service(health_check_ready)
            .service(auth_handler::register)
            .service(auth_handler::login)
            .service(contact_handler::submit_contact)
            .service(contact_handler::list_testimonials)
            .service(
                web::scope("")
                    .wrap(AuthMiddleware)
                    .service(auth_handler::verify)
                    .service(material_handler::create_material)
                    .service(material_handler::list_materials)
                    .service(material_handler::download_material)
                    .service(material_handler::delete_material)
                    .service(assignment_handler::create_assignment)
                    .service(assignment_handler::list_assignments)
                    .service(submission_handler::create_submission)
                    .service(submission_handler::list_assignment_submissions)
                    .service(assignment_handler::get_assignment)
                    .service(assignment_handler::delete_assignment)
                    .service(submission_handler::list_my_submissions)
                    .service(submission_handler::download_submission)
                    .service(submission_handler::grade_submission),
            )
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
