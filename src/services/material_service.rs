use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::domain::Material,
    models::dto::request::CreateMaterialRequest,
    repositories::MaterialRepository,
    storage::{FileStore, UploadedFile, MAX_UPLOAD_BYTES},
};

pub struct MaterialService {
    repository: Arc<dyn MaterialRepository>,
    file_store: Arc<FileStore>,
}

impl MaterialService {
    pub fn new(repository: Arc<dyn MaterialRepository>, file_store: Arc<FileStore>) -> Self {
        Self {
            repository,
            file_store,
        }
    }

    /// Validates before touching disk, so a rejected upload leaves nothing
    /// behind; if the row insert fails afterwards the written file is removed.
    pub async fn upload(
        &self,
        teacher_id: &str,
        upload: UploadedFile,
        request: CreateMaterialRequest,
    ) -> AppResult<Material> {
        request.validate()?;

        if upload.mime_type != "application/pdf" {
            return Err(AppError::ValidationError(
                "Materials must be PDF documents".to_string(),
            ));
        }
        if upload.bytes.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::ValidationError(
                "File exceeds the 10 MiB upload limit".to_string(),
            ));
        }

        let stored = self.file_store.store(&upload).await?;
        let material = Material::new(
            &request.title,
            request.description,
            request.subject,
            request.grade,
            &stored,
            teacher_id,
        );

        match self.repository.create(material).await {
            Ok(material) => {
                log::info!(
                    "Teacher '{}' uploaded {} material '{}'",
                    teacher_id,
                    material.subject,
                    material.title
                );
                Ok(material)
            }
            Err(e) => {
                if let Err(cleanup) = self.file_store.remove(&stored.storage_path).await {
                    log::warn!(
                        "Failed to remove orphaned file '{}': {}",
                        stored.storage_path,
                        cleanup
                    );
                }
                Err(e)
            }
        }
    }

    pub async fn list(&self) -> AppResult<Vec<Material>> {
        self.repository.find_all().await
    }

    pub async fn get(&self, id: &str) -> AppResult<Material> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Material with id '{}' not found", id)))
    }

    pub async fn download(&self, id: &str) -> AppResult<(Material, Vec<u8>)> {
        let material = self.get(id).await?;
        let bytes = self.file_store.retrieve(&material.file_path).await?;
        Ok((material, bytes))
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let material = self.get(id).await?;
        self.repository.delete(id).await?;

        if let Err(e) = self.file_store.remove(&material.file_path).await {
            log::warn!(
                "Material '{}' deleted but its file '{}' was not: {}",
                id,
                material.file_path,
                e
            );
        }

        Ok(())
    }
}
