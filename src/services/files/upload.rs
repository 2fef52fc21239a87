use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::FileService;
use crate::config::AppConfig;
use crate::errors::{ApiError, SpadaError};
use crate::models::{ApiResponse, ErrorCode, files::responses::FileUploadResponse};
use crate::services::access::current_user;
use crate::services::system::DynamicConfig;
use crate::utils::file_magic::content_type_for;
use crate::utils::validate_magic_bytes;

/// Lower-cased extension with its leading dot, empty when there is none.
pub(crate) fn extension_of(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

/// The client's name without any directory part.
fn sanitize_name(file_name: &str) -> String {
    file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

fn upload_failed(err: std::io::Error) -> actix_web::Error {
    SpadaError::file_operation(format!("{err}")).into()
}

/// A file written to the upload directory but not yet registered.
struct StoredUpload {
    original_name: String,
    stored_name: String,
    path: PathBuf,
    size: usize,
    extension: String,
}

impl StoredUpload {
    fn discard(&self) {
        if let Err(e) = fs::remove_file(&self.path) {
            tracing::warn!("Failed to remove {}: {}", self.path.display(), e);
        }
    }
}

pub async fn handle_upload(
    service: &FileService,
    req: &HttpRequest,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let claims = current_user(req)?;

    let config = AppConfig::get();
    let upload_dir = &config.upload.dir;
    let max_size = DynamicConfig::upload_max_size().await;
    let allowed_types = DynamicConfig::upload_allowed_types().await;

    if !Path::new(upload_dir).exists() {
        fs::create_dir_all(upload_dir).map_err(upload_failed)?;
    }

    let mut received: Option<StoredUpload> = None;

    loop {
        let mut field = match payload.try_next().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                if let Some(upload) = &received {
                    upload.discard();
                }
                return Err(e.into());
            }
        };
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();
        if name != "file" {
            continue;
        }
        if let Some(first) = &received {
            first.discard();
            return Err(ApiError::bad_request(
                ErrorCode::MultifileUploadNotAllowed,
                "Only one file can be uploaded at a time",
            )
            .into());
        }

        let original_name = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(sanitize_name)
            .unwrap_or_default();
        let extension = extension_of(&original_name);
        if extension.is_empty() || !allowed_types.iter().any(|t| t.to_lowercase() == extension) {
            return Err(ApiError::bad_request(
                ErrorCode::FileTypeNotAllowed,
                format!("File type '{extension}' is not allowed"),
            )
            .into());
        }

        let stored_name = format!("{}-{}{}", chrono::Utc::now().timestamp(), Uuid::new_v4(), extension);
        let file_path = Path::new(upload_dir).join(&stored_name);
        let mut file = File::create(&file_path).map_err(upload_failed)?;

        let mut total_size: usize = 0;
        let mut first_chunk = true;
        while let Some(chunk) = field.next().await {
            let data = match chunk {
                Ok(data) => data,
                Err(e) => {
                    let _ = fs::remove_file(&file_path);
                    return Err(e.into());
                }
            };

            if first_chunk {
                first_chunk = false;
                if !validate_magic_bytes(&data, &extension) {
                    let _ = fs::remove_file(&file_path);
                    return Err(ApiError::bad_request(
                        ErrorCode::FileTypeNotAllowed,
                        "File content does not match its extension",
                    )
                    .into());
                }
            }

            total_size += data.len();
            if total_size > max_size {
                let _ = fs::remove_file(&file_path);
                return Err(ApiError::new(
                    StatusCode::PAYLOAD_TOO_LARGE,
                    ErrorCode::FileSizeExceeded,
                    format!("File exceeds the {max_size} byte limit"),
                )
                .into());
            }
            if let Err(e) = file.write_all(&data) {
                let _ = fs::remove_file(&file_path);
                return Err(upload_failed(e));
            }
        }

        if total_size == 0 {
            let _ = fs::remove_file(&file_path);
            return Err(ApiError::bad_request(ErrorCode::FileUploadFailed, "Uploaded file is empty").into());
        }

        received = Some(StoredUpload {
            original_name,
            stored_name,
            path: file_path,
            size: total_size,
            extension,
        });
    }

    let Some(upload) = received else {
        return Err(ApiError::bad_request(
            ErrorCode::FileNotFound,
            "No file found in upload payload",
        )
        .into());
    };

    let storage = match service.get_storage(req) {
        Ok(storage) => storage,
        Err(e) => {
            upload.discard();
            return Err(e);
        }
    };
    let download_token = Uuid::new_v4().to_string();
    let file = match storage
        .create_file(
            &download_token,
            &upload.original_name,
            &upload.stored_name,
            upload.size as i64,
            content_type_for(&upload.extension),
            claims.user_id,
        )
        .await
    {
        Ok(file) => file,
        Err(e) => {
            upload.discard();
            return Err(e.into());
        }
    };

    tracing::info!(
        "User {} uploaded '{}' ({} bytes)",
        claims.user_id,
        file.original_name,
        file.file_size
    );

    Ok(HttpResponse::Created().json(ApiResponse::success(
        FileUploadResponse {
            download_token: file.download_token,
            file_name: file.original_name,
            size: file.file_size,
            content_type: file.content_type,
            uploaded_at: file.created_at,
        },
        "File uploaded successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_and_name() {
        assert_eq!(extension_of("Tugas Akhir.PDF"), ".pdf");
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
        assert_eq!(extension_of("README"), "");
        assert_eq!(sanitize_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_name("C:\\Users\\siswa\\laporan.docx"), "laporan.docx");
    }
}
