use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        MongoAssignmentRepository, MongoContactRepository, MongoMaterialRepository,
        MongoSubmissionRepository, MongoUserRepository,
    },
    services::{
        AssignmentService, ContactService, MaterialService, SubmissionService, UserService,
    },
    storage::FileStore,
};

/// Every request-handling component hangs off this one instance, built once
/// at process start and injected through actix app data.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub jwt_service: JwtService,
    pub user_service: Arc<UserService>,
    pub material_service: Arc<MaterialService>,
    pub assignment_service: Arc<AssignmentService>,
    pub submission_service: Arc<SubmissionService>,
    pub contact_service: Arc<ContactService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;
        let file_store = Arc::new(FileStore::new(&config.upload_dir).await?);

        let user_repository = Arc::new(MongoUserRepository::new(&db));
        user_repository.ensure_indexes().await?;
        let material_repository = Arc::new(MongoMaterialRepository::new(&db));
        let assignment_repository = Arc::new(MongoAssignmentRepository::new(&db));
        let submission_repository = Arc::new(MongoSubmissionRepository::new(&db));
        let contact_repository = Arc::new(MongoContactRepository::new(&db));

        let jwt_service = JwtService::new(&config.token_secret, config.token_expiry_hours);
        let user_service = Arc::new(UserService::new(user_repository.clone()));
        let material_service = Arc::new(MaterialService::new(
            material_repository,
            file_store.clone(),
        ));
        let assignment_service = Arc::new(AssignmentService::new(
            assignment_repository.clone(),
            submission_repository.clone(),
        ));
        let submission_service = Arc::new(SubmissionService::new(
            submission_repository,
            assignment_repository,
            user_repository,
            file_store,
        ));
        let contact_service = Arc::new(ContactService::new(contact_repository));

        Ok(Self {
            db,
            jwt_service,
            user_service,
            material_service,
            assignment_service,
            submission_service,
            contact_service,
            config: Arc::new(config),
        })
    }
}
