use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};
use std::fs;
use std::path::Path;

use super::FileService;
use crate::config::AppConfig;
use crate::errors::{ApiError, SpadaError};
use crate::models::ErrorCode;

fn file_not_found() -> ApiError {
    ApiError::not_found(ErrorCode::FileNotFound, "File not found")
}

/// Quotes a file name for `Content-Disposition`.
fn disposition(original_name: &str) -> String {
    let escaped: String = original_name
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| if c == '"' { '\'' } else { c })
        .collect();
    format!("attachment; filename=\"{escaped}\"")
}

pub async fn handle_download(
    service: &FileService,
    request: &HttpRequest,
    download_token: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let file = storage
        .get_file_by_token(&download_token)
        .await?
        .ok_or_else(file_not_found)?;

    let config = AppConfig::get();
    let file_path = Path::new(&config.upload.dir).join(&file.stored_name);
    if !file_path.exists() {
        tracing::warn!(
            "File {} is registered but missing on disk at {}",
            download_token,
            file_path.display()
        );
        return Err(file_not_found().into());
    }

    let bytes = fs::read(&file_path).map_err(|e| SpadaError::file_operation(format!("{e}")))?;

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, file.content_type.as_str()))
        .insert_header((header::CONTENT_DISPOSITION, disposition(&file.original_name)))
        .body(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disposition_quotes_name() {
        assert_eq!(disposition("rpp.pdf"), "attachment; filename=\"rpp.pdf\"");
        assert_eq!(
            disposition("a\"b\n.txt"),
            "attachment; filename=\"a'b.txt\""
        );
    }
}
