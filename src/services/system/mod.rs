pub mod public;
pub mod settings_cache;

pub use settings_cache::DynamicConfig;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

pub struct SystemService;

impl SystemService {
    pub fn new_lazy() -> Self {
        Self
    }

    /// Read-only settings any signed-in user may see.
    pub async fn get_public_settings(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        public::get_public_settings(self, request).await
    }
}
