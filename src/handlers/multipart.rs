use std::collections::HashMap;

use actix_multipart::Multipart;
use futures::TryStreamExt;

use crate::{
    errors::{AppError, AppResult},
    storage::{UploadedFile, MAX_UPLOAD_BYTES},
};

/// Drains a multipart request into at most one file part plus its text
/// fields. The size cap is enforced while streaming, so an oversized upload
/// is rejected without ever being buffered whole or written to disk.
pub async fn read_multipart(
    mut payload: Multipart,
) -> AppResult<(Option<UploadedFile>, HashMap<String, String>)> {
    let mut file = None;
    let mut fields = HashMap::new();

    while let Some(mut field) = payload.try_next().await.map_err(bad_multipart)? {
        let name = field.name().to_string();
        let file_name = field
            .content_disposition()
            .get_filename()
            .map(str::to_string);

        if let Some(file_name) = file_name {
            let mime_type = field
                .content_type()
                .map(|m| m.to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string());

            let mut bytes = Vec::new();
            while let Some(chunk) = field.try_next().await.map_err(bad_multipart)? {
                if bytes.len() + chunk.len() > MAX_UPLOAD_BYTES {
                    return Err(AppError::ValidationError(
                        "File exceeds the 10 MiB upload limit".to_string(),
                    ));
                }
                bytes.extend_from_slice(&chunk);
            }

            file = Some(UploadedFile {
                file_name,
                mime_type,
                bytes,
            });
        } else {
            let mut value = Vec::new();
            while let Some(chunk) = field.try_next().await.map_err(bad_multipart)? {
                value.extend_from_slice(&chunk);
            }
            fields.insert(name, String::from_utf8_lossy(&value).into_owned());
        }
    }

    Ok((file, fields))
}

pub fn required_field(fields: &mut HashMap<String, String>, name: &str) -> AppResult<String> {
    fields
        .remove(name)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::ValidationError(format!("Field '{}' is required", name)))
}

fn bad_multipart(err: actix_multipart::MultipartError) -> AppError {
    AppError::ValidationError(format!("Malformed multipart request: {}", err))
}
