pub mod assignment_handler;
pub mod auth_handler;
pub mod contact_handler;
pub mod health_handler;
pub mod material_handler;
pub mod multipart;
pub mod submission_handler;

pub use health_handler::{health_check, health_check_ready};
