pub mod assignment;
pub mod contact;
pub mod material;
pub mod submission;
pub mod user;

pub use assignment::Assignment;
pub use contact::{ContactSubmission, Testimonial};
pub use material::{GradeLevel, Material, Subject};
pub use submission::{Submission, SubmissionStatus};
pub use user::{Role, User};
