use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Hard cap on a single uploaded file: 10 MiB.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// One file received in a multipart request, fully buffered.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Metadata of a file persisted by the store. The storage path is what gets
/// recorded on the owning row; the original file name is kept for downloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub storage_path: String,
    pub file_name: String,
    pub size: i64,
    pub mime_type: String,
}

/// Local-filesystem file store. Uploads get a collision-resistant uuid name;
/// the declared name and MIME type travel as row metadata only.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub async fn new(root: impl Into<PathBuf>) -> AppResult<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {}", e)))?;
        Ok(Self { root })
    }

    pub async fn store(&self, upload: &UploadedFile) -> AppResult<StoredFile> {
        let storage_name = match Path::new(&upload.file_name)
            .extension()
            .and_then(|e| e.to_str())
        {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
            None => Uuid::new_v4().to_string(),
        };
        let path = self.root.join(&storage_name);

        tokio::fs::write(&path, &upload.bytes)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to write file: {}", e)))?;

        Ok(StoredFile {
            storage_path: path.to_string_lossy().into_owned(),
            file_name: upload.file_name.clone(),
            size: upload.bytes.len() as i64,
            mime_type: upload.mime_type.clone(),
        })
    }

    pub async fn retrieve(&self, storage_path: &str) -> AppResult<Vec<u8>> {
        match tokio::fs::read(storage_path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(AppError::NotFound("File not found".to_string()))
            }
            Err(e) => Err(AppError::InternalError(format!(
                "Failed to read file: {}",
                e
            ))),
        }
    }

    /// Idempotent: removing an already-missing file is a no-op.
    pub async fn remove(&self, storage_path: &str) -> AppResult<()> {
        match tokio::fs::remove_file(storage_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::InternalError(format!(
                "Failed to remove file: {}",
                e
            ))),
        }
    }
}
