pub mod download;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::storage_service;

storage_service! {
    /// Attachment uploads, referenced elsewhere by download token.
    FileService
}

impl FileService {
    pub async fn handle_upload(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::handle_upload(self, request, payload).await
    }

    pub async fn handle_download(
        &self,
        request: &HttpRequest,
        download_token: String,
    ) -> ActixResult<HttpResponse> {
        download::handle_download(self, request, download_token).await
    }
}
