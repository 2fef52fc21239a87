//! Runtime-editable settings.
//!
//! Loaded from the settings table at startup and updated in place when an
//! admin changes a value. Every getter falls back to the static configuration
//! when the key is missing or does not parse.

use std::collections::HashMap;
use std::sync::OnceLock;
use tokio::sync::RwLock;

use crate::config::AppConfig;
use crate::models::system::entities::KnownSettingKey;

static DYNAMIC_CONFIG: OnceLock<RwLock<DynamicConfigCache>> = OnceLock::new();

#[derive(Debug, Default)]
struct DynamicConfigCache {
    settings: HashMap<String, String>,
    initialized: bool,
}

pub struct DynamicConfig;

impl DynamicConfig {
    /// Replaces the cached settings with `settings`.
    pub async fn init(settings: Vec<(String, String)>) {
        let cache = DYNAMIC_CONFIG.get_or_init(|| RwLock::new(DynamicConfigCache::default()));

        let mut guard = cache.write().await;
        guard.settings = settings.into_iter().collect();
        guard.initialized = true;

        tracing::info!("Dynamic settings loaded: {} entries", guard.settings.len());
    }

    pub async fn update(key: &str, value: &str) {
        if let Some(cache) = DYNAMIC_CONFIG.get() {
            let mut guard = cache.write().await;
            guard.settings.insert(key.to_string(), value.to_string());
            tracing::debug!("Dynamic setting updated: {} = {}", key, value);
        }
    }

    async fn get_string(key: KnownSettingKey) -> Option<String> {
        let cache = DYNAMIC_CONFIG.get()?;
        let guard = cache.read().await;
        guard.settings.get(key.as_str()).cloned()
    }

    async fn get_i64(key: KnownSettingKey) -> Option<i64> {
        Self::get_string(key)
            .await
            .and_then(|v| v.trim().parse().ok())
    }

    async fn get_json_array(key: KnownSettingKey) -> Option<Vec<String>> {
        Self::get_string(key)
            .await
            .and_then(|v| serde_json::from_str(&v).ok())
    }

    pub async fn school_name() -> String {
        Self::get_string(KnownSettingKey::SchoolName)
            .await
            .unwrap_or_else(|| AppConfig::get().app.school_name.clone())
    }

    pub async fn academic_year() -> String {
        Self::get_string(KnownSettingKey::AcademicYear)
            .await
            .unwrap_or_else(|| AppConfig::get().app.academic_year.clone())
    }

    pub async fn semester() -> u8 {
        Self::get_i64(KnownSettingKey::Semester)
            .await
            .and_then(|v| u8::try_from(v).ok())
            .unwrap_or(AppConfig::get().app.semester)
    }

    /// Access token lifetime in minutes.
    pub async fn access_token_expiry() -> i64 {
        Self::get_i64(KnownSettingKey::AccessTokenExpiry)
            .await
            .filter(|v| *v > 0)
            .unwrap_or(AppConfig::get().jwt.access_token_expiry)
    }

    /// Bytes.
    pub async fn upload_max_size() -> usize {
        Self::get_i64(KnownSettingKey::UploadMaxSize)
            .await
            .and_then(|v| usize::try_from(v).ok())
            .unwrap_or(AppConfig::get().upload.max_size)
    }

    pub async fn upload_allowed_types() -> Vec<String> {
        Self::get_json_array(KnownSettingKey::UploadAllowedTypes)
            .await
            .unwrap_or_else(|| AppConfig::get().upload.allowed_types.clone())
    }

    pub async fn is_initialized() -> bool {
        match DYNAMIC_CONFIG.get() {
            Some(cache) => cache.read().await.initialized,
            None => false,
        }
    }
}
