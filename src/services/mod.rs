pub mod assignment_service;
pub mod contact_service;
pub mod material_service;
pub mod submission_service;
pub mod user_service;

pub use assignment_service::AssignmentService;
pub use contact_service::ContactService;
pub use material_service::MaterialService;
pub use submission_service::SubmissionService;
pub use user_service::UserService;
