pub mod assignment_repository;
pub mod contact_repository;
pub mod material_repository;
pub mod submission_repository;
pub mod user_repository;

pub use assignment_repository::{AssignmentRepository, MongoAssignmentRepository};
pub use contact_repository::{ContactRepository, MongoContactRepository};
pub use material_repository::{MaterialRepository, MongoMaterialRepository};
pub use submission_repository::{MongoSubmissionRepository, SubmissionRepository};
pub use user_repository::{MongoUserRepository, UserRepository};
