use crate::cache::{ObjectCache, register::get_object_cache_plugin};
use crate::config::AppConfig;
use crate::errors::{Result, SpadaError};
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::services::system::DynamicConfig;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

async fn build_cache(cache_type: &str) -> Option<Arc<dyn ObjectCache>> {
    let constructor = get_object_cache_plugin(cache_type)?;
    match constructor().await {
        Ok(cache) => {
            warn!("Using {} cache backend", cache_type);
            Some(Arc::from(cache))
        }
        Err(e) => {
            warn!("Failed to create {} cache: {}", cache_type, e);
            None
        }
    }
}

/// Builds the configured cache backend, falling back to the in-memory one.
async fn create_cache() -> Result<Arc<dyn ObjectCache>> {
    let cache_type = &AppConfig::get().cache.cache_type;

    if let Some(cache) = build_cache(cache_type).await {
        return Ok(cache);
    }
    if cache_type != "moka" {
        warn!("Falling back to in-memory cache");
        if let Some(cache) = build_cache("moka").await {
            return Ok(cache);
        }
    }

    Err(SpadaError::cache_plugin_not_found(format!(
        "No cache backend available (tried: {cache_type})"
    )))
}

fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz23456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

/// Loads runtime settings; an unreadable table leaves the static config in charge.
async fn init_dynamic_config(storage: &Arc<dyn Storage>) {
    match storage.list_all_settings().await {
        Ok(settings) => {
            DynamicConfig::init(settings.into_iter().map(|s| (s.key, s.value)).collect()).await;
        }
        Err(e) => {
            warn!("Failed to load settings from database: {}, using defaults", e);
            DynamicConfig::init(vec![]).await;
        }
    }
}

/// Creates the bootstrap admin when the database has none.
async fn seed_admin(storage: &Arc<dyn Storage>) {
    match storage.count_users_by_role(UserRole::Admin).await {
        Ok(count) if count > 0 => {
            debug!("Found {} admin account(s), skipping admin seed", count);
            return;
        }
        Ok(_) => info!("No admin account found, creating one"),
        Err(e) => {
            warn!("Failed to count admins: {}, skipping admin seed", e);
            return;
        }
    }

    let bootstrap = &AppConfig::get().bootstrap;
    let password = if bootstrap.admin_password.is_empty() {
        let generated = generate_random_password(16);
        warn!("==========================================================");
        warn!("  bootstrap.admin_password is not set");
        warn!("  Generated password for '{}': {}", bootstrap.admin_username, generated);
        warn!("  Change it after the first login");
        warn!("==========================================================");
        generated
    } else {
        bootstrap.admin_password.clone()
    };

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash admin password: {}, skipping admin seed", e);
            return;
        }
    };

    let admin = CreateUserRequest {
        username: bootstrap.admin_username.clone(),
        email: bootstrap.admin_email.clone(),
        password: password_hash,
        role: UserRole::Admin,
        display_name: Some("Administrator".to_string()),
        identity_number: None,
        class_id: None,
        avatar_url: None,
    };

    match storage.create_user(admin).await {
        Ok(user) => info!("Admin account '{}' created (ID: {})", user.username, user.id),
        Err(e) => warn!("Failed to create admin account: {}", e),
    }
}

/// Storage, runtime settings, bootstrap admin and cache, in that order.
pub async fn prepare_server_startup() -> Result<StartupContext> {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    crate::cache::register::register_builtin_plugins();
    if cfg!(debug_assertions) {
        crate::cache::register::debug_object_cache_registry();
    }

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    init_dynamic_config(&storage).await;
    seed_admin(&storage).await;

    let cache = create_cache().await?;

    Ok(StartupContext { storage, cache })
}
