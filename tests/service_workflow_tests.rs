use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use academy_server::{
    errors::{AppError, AppResult},
    models::domain::{
        material::{GradeLevel, Subject},
        submission::SubmissionStatus,
        user::Role,
        Assignment, Material, Submission, User,
    },
    models::dto::request::{
        CreateAssignmentRequest, CreateMaterialRequest, GradeRequest, LoginRequest,
        RegisterRequest,
    },
    repositories::{
        AssignmentRepository, MaterialRepository, SubmissionRepository, UserRepository,
    },
    services::{AssignmentService, MaterialService, SubmissionService, UserService},
    storage::{FileStore, UploadedFile},
};

// ---------------------------------------------------------------------------
// In-memory repositories
// ---------------------------------------------------------------------------

#[derive(Default)]
struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(AppError::AlreadyExists(format!(
                "User with email '{}' already exists",
                user.email
            )));
        }
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(id).cloned())
    }
}

#[derive(Default)]
struct InMemoryMaterialRepository {
    materials: RwLock<HashMap<String, Material>>,
}

#[async_trait]
impl MaterialRepository for InMemoryMaterialRepository {
    async fn create(&self, material: Material) -> AppResult<Material> {
        let mut materials = self.materials.write().await;
        materials.insert(material.id.clone(), material.clone());
        Ok(material)
    }

    async fn find_all(&self) -> AppResult<Vec<Material>> {
        let materials = self.materials.read().await;
        let mut items: Vec<_> = materials.values().cloned().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Material>> {
        let materials = self.materials.read().await;
        Ok(materials.get(id).cloned())
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let mut materials = self.materials.write().await;
        materials.remove(id);
        Ok(())
    }
}

/// Simulates a store outage on insert, for the compensating-delete path.
struct FailingMaterialRepository;

#[async_trait]
impl MaterialRepository for FailingMaterialRepository {
    async fn create(&self, _material: Material) -> AppResult<Material> {
        Err(AppError::DatabaseError("store unavailable".to_string()))
    }

    async fn find_all(&self) -> AppResult<Vec<Material>> {
        Ok(vec![])
    }

    async fn find_by_id(&self, _id: &str) -> AppResult<Option<Material>> {
        Ok(None)
    }

    async fn delete(&self, _id: &str) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
struct InMemoryAssignmentRepository {
    assignments: RwLock<HashMap<String, Assignment>>,
}

#[async_trait]
impl AssignmentRepository for InMemoryAssignmentRepository {
    async fn create(&self, assignment: Assignment) -> AppResult<Assignment> {
        let mut assignments = self.assignments.write().await;
        assignments.insert(assignment.id.clone(), assignment.clone());
        Ok(assignment)
    }

    async fn find_all(&self) -> AppResult<Vec<Assignment>> {
        let assignments = self.assignments.read().await;
        let mut items: Vec<_> = assignments.values().cloned().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Assignment>> {
        let assignments = self.assignments.read().await;
        Ok(assignments.get(id).cloned())
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let mut assignments = self.assignments.write().await;
        assignments.remove(id);
        Ok(())
    }
}

#[derive(Default)]
struct InMemorySubmissionRepository {
    submissions: RwLock<HashMap<String, Submission>>,
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissionRepository {
    async fn create(&self, submission: Submission) -> AppResult<Submission> {
        let mut submissions = self.submissions.write().await;
        submissions.insert(submission.id.clone(), submission.clone());
        Ok(submission)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Submission>> {
        let submissions = self.submissions.read().await;
        Ok(submissions.get(id).cloned())
    }

    async fn find_by_assignment(&self, assignment_id: &str) -> AppResult<Vec<Submission>> {
        let submissions = self.submissions.read().await;
        let mut items: Vec<_> = submissions
            .values()
            .filter(|s| s.assignment_id == assignment_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(items)
    }

    async fn find_by_student(&self, student_id: &str) -> AppResult<Vec<Submission>> {
        let submissions = self.submissions.read().await;
        let mut items: Vec<_> = submissions
            .values()
            .filter(|s| s.student_id == student_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(items)
    }

    async fn update_grade(
        &self,
        id: &str,
        marks: i32,
        feedback: Option<String>,
        graded_at: DateTime<Utc>,
    ) -> AppResult<Option<Submission>> {
        let mut submissions = self.submissions.write().await;
        let Some(submission) = submissions.get_mut(id) else {
            return Ok(None);
        };
        submission.marks = Some(marks);
        submission.feedback = feedback;
        submission.status = SubmissionStatus::Graded;
        submission.graded_at = Some(graded_at);
        Ok(Some(submission.clone()))
    }

    async fn delete_by_assignment(&self, assignment_id: &str) -> AppResult<u64> {
        let mut submissions = self.submissions.write().await;
        let before = submissions.len();
        submissions.retain(|_, s| s.assignment_id != assignment_id);
        Ok((before - submissions.len()) as u64)
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

struct TestEnv {
    users: Arc<InMemoryUserRepository>,
    submissions: Arc<InMemorySubmissionRepository>,
    materials: Arc<InMemoryMaterialRepository>,
    user_service: UserService,
    material_service: MaterialService,
    assignment_service: AssignmentService,
    submission_service: SubmissionService,
    upload_dir: std::path::PathBuf,
}

impl TestEnv {
    async fn new() -> Self {
        let upload_dir = std::env::temp_dir().join(format!("academy-itest-{}", Uuid::new_v4()));
        let file_store = Arc::new(FileStore::new(upload_dir.clone()).await.unwrap());

        let users = Arc::new(InMemoryUserRepository::default());
        let materials = Arc::new(InMemoryMaterialRepository::default());
        let assignments = Arc::new(InMemoryAssignmentRepository::default());
        let submissions = Arc::new(InMemorySubmissionRepository::default());

        let user_service = UserService::new(users.clone());
        let material_service = MaterialService::new(materials.clone(), file_store.clone());
        let assignment_service = AssignmentService::new(assignments.clone(), submissions.clone());
        let submission_service = SubmissionService::new(
            submissions.clone(),
            assignments,
            users.clone(),
            file_store,
        );

        TestEnv {
            users,
            submissions,
            materials,
            user_service,
            material_service,
            assignment_service,
            submission_service,
            upload_dir,
        }
    }

    async fn register(&self, name: &str, email: &str, role: Role) -> User {
        self.user_service
            .register(RegisterRequest {
                name: name.to_string(),
                email: email.to_string(),
                password: "correct horse battery".to_string(),
                role,
            })
            .await
            .unwrap()
    }

    async fn create_assignment(&self, teacher: &User, total_marks: i32) -> Assignment {
        self.assignment_service
            .create(
                &teacher.id,
                CreateAssignmentRequest {
                    title: "Trigonometry worksheet".to_string(),
                    description: Some("Sections 1-3".to_string()),
                    subject: Subject::Mathematics,
                    grade: GradeLevel::Grade11,
                    due_date: Utc::now() + Duration::days(7),
                    total_marks,
                },
            )
            .await
            .unwrap()
    }

    fn files_on_disk(&self) -> usize {
        std::fs::read_dir(&self.upload_dir).unwrap().count()
    }
}

fn pdf_upload(file_name: &str) -> UploadedFile {
    UploadedFile {
        file_name: file_name.to_string(),
        mime_type: "application/pdf".to_string(),
        bytes: b"%PDF-1.4 test content".to_vec(),
    }
}

// ---------------------------------------------------------------------------
// Registration and login
// ---------------------------------------------------------------------------

#[tokio::test]
async fn duplicate_registration_conflicts_on_second_attempt() {
    let env = TestEnv::new().await;

    env.register("Thabo M", "thabo@example.com", Role::Student)
        .await;

    let second = env
        .user_service
        .register(RegisterRequest {
            name: "Other Thabo".to_string(),
            email: "thabo@example.com".to_string(),
            password: "another password".to_string(),
            role: Role::Student,
        })
        .await;

    assert!(matches!(second, Err(AppError::AlreadyExists(_))));
}

#[tokio::test]
async fn login_checks_hashed_password() {
    let env = TestEnv::new().await;
    let registered = env
        .register("Lerato K", "lerato@example.com", Role::Student)
        .await;

    // Stored value is a hash, never the plaintext
    let stored = env
        .users
        .find_by_email("lerato@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_ne!(stored.password_hash, "correct horse battery");

    let ok = env
        .user_service
        .login(LoginRequest {
            email: "lerato@example.com".to_string(),
            password: "correct horse battery".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(ok.id, registered.id);

    let bad = env
        .user_service
        .login(LoginRequest {
            email: "lerato@example.com".to_string(),
            password: "wrong password".to_string(),
        })
        .await;
    assert!(matches!(bad, Err(AppError::Unauthorized(_))));
}

// ---------------------------------------------------------------------------
// Grading workflow
// ---------------------------------------------------------------------------

#[tokio::test]
async fn grading_workflow_end_to_end() {
    let env = TestEnv::new().await;
    let teacher = env
        .register("Mr. Nkosi", "nkosi@academy.example", Role::Teacher)
        .await;
    let student = env
        .register("Thabo M", "thabo@example.com", Role::Student)
        .await;

    let assignment = env.create_assignment(&teacher, 100).await;

    let submission = env
        .submission_service
        .submit(&student.id, &assignment.id, pdf_upload("worksheet.pdf"))
        .await
        .unwrap();
    assert_eq!(submission.status, SubmissionStatus::Submitted);
    assert_eq!(submission.marks, None);

    let graded = env
        .submission_service
        .grade(
            &submission.id,
            GradeRequest {
                marks: 85,
                feedback: Some("Good work".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(graded.status, SubmissionStatus::Graded);
    assert_eq!(graded.marks, Some(85));
    assert_eq!(graded.feedback.as_deref(), Some("Good work"));
    assert!(graded.graded_at.is_some());

    // Out-of-range re-grade is rejected and applies nothing
    let rejected = env
        .submission_service
        .grade(
            &submission.id,
            GradeRequest {
                marks: 150,
                feedback: None,
            },
        )
        .await;
    assert!(matches!(rejected, Err(AppError::ValidationError(_))));

    let current = env.submission_service.get(&submission.id).await.unwrap();
    assert_eq!(current.marks, Some(85));
    assert_eq!(current.status, SubmissionStatus::Graded);
}

#[tokio::test]
async fn negative_marks_rejected_and_status_unchanged() {
    let env = TestEnv::new().await;
    let teacher = env
        .register("Mr. Nkosi", "nkosi@academy.example", Role::Teacher)
        .await;
    let student = env
        .register("Thabo M", "thabo@example.com", Role::Student)
        .await;
    let assignment = env.create_assignment(&teacher, 50).await;

    let submission = env
        .submission_service
        .submit(&student.id, &assignment.id, pdf_upload("worksheet.pdf"))
        .await
        .unwrap();

    let result = env
        .submission_service
        .grade(
            &submission.id,
            GradeRequest {
                marks: -1,
                feedback: None,
            },
        )
        .await;

    match result {
        Err(AppError::ValidationError(msg)) => {
            assert!(msg.contains("between 0 and 50"), "message was: {}", msg)
        }
        other => panic!("Expected validation error, got {:?}", other.map(|s| s.id)),
    }

    let current = env.submission_service.get(&submission.id).await.unwrap();
    assert_eq!(current.status, SubmissionStatus::Submitted);
    assert_eq!(current.marks, None);
}

#[tokio::test]
async fn regrading_overwrites_previous_grade() {
    let env = TestEnv::new().await;
    let teacher = env
        .register("Mr. Nkosi", "nkosi@academy.example", Role::Teacher)
        .await;
    let student = env
        .register("Thabo M", "thabo@example.com", Role::Student)
        .await;
    let assignment = env.create_assignment(&teacher, 100).await;

    let submission = env
        .submission_service
        .submit(&student.id, &assignment.id, pdf_upload("worksheet.pdf"))
        .await
        .unwrap();

    env.submission_service
        .grade(
            &submission.id,
            GradeRequest {
                marks: 60,
                feedback: None,
            },
        )
        .await
        .unwrap();

    let regraded = env
        .submission_service
        .grade(
            &submission.id,
            GradeRequest {
                marks: 70,
                feedback: Some("After review".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(regraded.marks, Some(70));
    assert_eq!(regraded.status, SubmissionStatus::Graded);
}

// ---------------------------------------------------------------------------
// Cascade delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn deleting_assignment_removes_its_submissions() {
    let env = TestEnv::new().await;
    let teacher = env
        .register("Mr. Nkosi", "nkosi@academy.example", Role::Teacher)
        .await;
    let student = env
        .register("Thabo M", "thabo@example.com", Role::Student)
        .await;
    let assignment = env.create_assignment(&teacher, 100).await;
    let other = env.create_assignment(&teacher, 100).await;

    let doomed = env
        .submission_service
        .submit(&student.id, &assignment.id, pdf_upload("a.pdf"))
        .await
        .unwrap();
    let kept = env
        .submission_service
        .submit(&student.id, &other.id, pdf_upload("b.pdf"))
        .await
        .unwrap();

    env.assignment_service.delete(&assignment.id).await.unwrap();

    assert!(matches!(
        env.assignment_service.get(&assignment.id).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        env.submission_service.get(&doomed.id).await,
        Err(AppError::NotFound(_))
    ));
    // Submissions of other assignments are untouched
    assert!(env.submission_service.get(&kept.id).await.is_ok());
}

#[tokio::test]
async fn deleting_missing_assignment_is_not_found() {
    let env = TestEnv::new().await;
    let result = env.assignment_service.delete("no-such-id").await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

// ---------------------------------------------------------------------------
// Downloads and ownership
// ---------------------------------------------------------------------------

#[tokio::test]
async fn submission_download_gated_to_owner_or_teacher() {
    let env = TestEnv::new().await;
    let teacher = env
        .register("Mr. Nkosi", "nkosi@academy.example", Role::Teacher)
        .await;
    let owner = env
        .register("Thabo M", "thabo@example.com", Role::Student)
        .await;
    let other = env
        .register("Lerato K", "lerato@example.com", Role::Student)
        .await;
    let assignment = env.create_assignment(&teacher, 100).await;

    let submission = env
        .submission_service
        .submit(&owner.id, &assignment.id, pdf_upload("essay.pdf"))
        .await
        .unwrap();

    let (meta, bytes) = env
        .submission_service
        .download(&owner, &submission.id)
        .await
        .unwrap();
    assert_eq!(meta.file_name, "essay.pdf");
    assert_eq!(bytes, b"%PDF-1.4 test content");

    assert!(env
        .submission_service
        .download(&teacher, &submission.id)
        .await
        .is_ok());

    let denied = env.submission_service.download(&other, &submission.id).await;
    assert!(matches!(denied, Err(AppError::Forbidden(_))));
}

// ---------------------------------------------------------------------------
// Upload constraints
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_pdf_material_rejected_before_any_persistence() {
    let env = TestEnv::new().await;
    let teacher = env
        .register("Mr. Nkosi", "nkosi@academy.example", Role::Teacher)
        .await;

    let upload = UploadedFile {
        file_name: "notes.docx".to_string(),
        mime_type: "application/msword".to_string(),
        bytes: vec![1, 2, 3],
    };

    let result = env
        .material_service
        .upload(
            &teacher.id,
            upload,
            CreateMaterialRequest {
                title: "Algebra notes".to_string(),
                description: None,
                subject: Subject::Mathematics,
                grade: GradeLevel::Grade10,
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::ValidationError(_))));
    assert!(env.materials.find_all().await.unwrap().is_empty());
    assert_eq!(env.files_on_disk(), 0);
}

#[tokio::test]
async fn oversized_submission_rejected_before_repository() {
    let env = TestEnv::new().await;
    let teacher = env
        .register("Mr. Nkosi", "nkosi@academy.example", Role::Teacher)
        .await;
    let student = env
        .register("Thabo M", "thabo@example.com", Role::Student)
        .await;
    let assignment = env.create_assignment(&teacher, 100).await;

    let upload = UploadedFile {
        file_name: "huge.pdf".to_string(),
        mime_type: "application/pdf".to_string(),
        bytes: vec![0u8; 11 * 1024 * 1024],
    };

    let result = env
        .submission_service
        .submit(&student.id, &assignment.id, upload)
        .await;

    assert!(matches!(result, Err(AppError::ValidationError(_))));
    assert!(env
        .submissions
        .find_by_assignment(&assignment.id)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(env.files_on_disk(), 0);
}

#[tokio::test]
async fn submitting_to_missing_assignment_is_not_found() {
    let env = TestEnv::new().await;
    let student = env
        .register("Thabo M", "thabo@example.com", Role::Student)
        .await;

    let result = env
        .submission_service
        .submit(&student.id, "no-such-assignment", pdf_upload("a.pdf"))
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert_eq!(env.files_on_disk(), 0);
}

#[tokio::test]
async fn failed_row_insert_removes_written_file() {
    let upload_dir = std::env::temp_dir().join(format!("academy-itest-{}", Uuid::new_v4()));
    let file_store = Arc::new(FileStore::new(upload_dir.clone()).await.unwrap());
    let service = MaterialService::new(Arc::new(FailingMaterialRepository), file_store);

    let result = service
        .upload(
            "teacher-1",
            pdf_upload("notes.pdf"),
            CreateMaterialRequest {
                title: "Algebra notes".to_string(),
                description: None,
                subject: Subject::Mathematics,
                grade: GradeLevel::Grade10,
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::DatabaseError(_))));
    assert_eq!(std::fs::read_dir(&upload_dir).unwrap().count(), 0);
}

// ---------------------------------------------------------------------------
// Material lifecycle and joined listings
// ---------------------------------------------------------------------------

#[tokio::test]
async fn material_delete_removes_row_and_file() {
    let env = TestEnv::new().await;
    let teacher = env
        .register("Mr. Nkosi", "nkosi@academy.example", Role::Teacher)
        .await;

    let material = env
        .material_service
        .upload(
            &teacher.id,
            pdf_upload("notes.pdf"),
            CreateMaterialRequest {
                title: "Algebra notes".to_string(),
                description: Some("Chapter 4".to_string()),
                subject: Subject::Mathematics,
                grade: GradeLevel::Grade10,
            },
        )
        .await
        .unwrap();
    assert_eq!(env.files_on_disk(), 1);

    let (meta, bytes) = env.material_service.download(&material.id).await.unwrap();
    assert_eq!(meta.file_name, "notes.pdf");
    assert!(!bytes.is_empty());

    env.material_service.delete(&material.id).await.unwrap();

    assert!(matches!(
        env.material_service.get(&material.id).await,
        Err(AppError::NotFound(_))
    ));
    assert_eq!(env.files_on_disk(), 0);
}

#[tokio::test]
async fn assignment_listing_joins_student_identity() {
    let env = TestEnv::new().await;
    let teacher = env
        .register("Mr. Nkosi", "nkosi@academy.example", Role::Teacher)
        .await;
    let student = env
        .register("Thabo M", "thabo@example.com", Role::Student)
        .await;
    let assignment = env.create_assignment(&teacher, 100).await;

    env.submission_service
        .submit(&student.id, &assignment.id, pdf_upload("essay.pdf"))
        .await
        .unwrap();

    let rows = env
        .submission_service
        .list_for_assignment(&assignment.id)
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].student_name, "Thabo M");
    assert_eq!(rows[0].student_email, "thabo@example.com");
    assert_eq!(rows[0].submission.assignment_id, assignment.id);
}

#[tokio::test]
async fn student_listing_joins_assignment_metadata() {
    let env = TestEnv::new().await;
    let teacher = env
        .register("Mr. Nkosi", "nkosi@academy.example", Role::Teacher)
        .await;
    let student = env
        .register("Thabo M", "thabo@example.com", Role::Student)
        .await;
    let assignment = env.create_assignment(&teacher, 100).await;

    env.submission_service
        .submit(&student.id, &assignment.id, pdf_upload("essay.pdf"))
        .await
        .unwrap();

    let rows = env
        .submission_service
        .list_for_student(&student.id)
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].assignment_title, "Trigonometry worksheet");
    assert_eq!(rows[0].total_marks, 100);
    assert_eq!(rows[0].subject, Subject::Mathematics);
}
