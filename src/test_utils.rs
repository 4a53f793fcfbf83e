use crate::models::domain::user::{Role, User};
use crate::storage::UploadedFile;

#[cfg(test)]
pub mod fixtures {
    use super::*;

    pub fn test_teacher() -> User {
        User::new("Mr. Nkosi", "nkosi@academy.example", "hash", Role::Teacher)
    }

    pub fn test_student() -> User {
        User::new("Thabo M", "thabo@example.com", "hash", Role::Student)
    }

    pub fn pdf_upload(file_name: &str) -> UploadedFile {
        UploadedFile {
            file_name: file_name.to_string(),
            mime_type: "application/pdf".to_string(),
            bytes: b"%PDF-1.4 fixture".to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::models::domain::user::Role;

    #[test]
    fn test_fixture_roles() {
        assert_eq!(test_teacher().role, Role::Teacher);
        assert_eq!(test_student().role, Role::Student);
    }

    #[test]
    fn test_pdf_upload_fixture() {
        let upload = pdf_upload("notes.pdf");
        assert_eq!(upload.mime_type, "application/pdf");
        assert!(!upload.bytes.is_empty());
    }
}
