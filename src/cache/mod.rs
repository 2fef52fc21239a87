//! Object cache abstraction with pluggable backends.
//!
//! Backends register a constructor under a name (`moka`, `redis`); startup picks one
//! by `cache.type` and falls back to the in-memory backend when it cannot be built.

pub mod object_cache;
pub mod register;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    /// The backend failed to answer; treat as a miss but do not repopulate blindly.
    ExistsButNoValue,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    /// `ttl` in seconds, 0 means the backend default.
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}

/// Typed JSON helpers over any [`ObjectCache`].
pub async fn get_json<T: DeserializeOwned>(cache: &dyn ObjectCache, key: &str) -> Option<T> {
    match cache.get_raw(key).await {
        CacheResult::Found(json) => match serde_json::from_str(&json) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Dropping undecodable cache entry '{}': {}", key, e);
                cache.remove(key).await;
                None
            }
        },
        CacheResult::NotFound | CacheResult::ExistsButNoValue => None,
    }
}

pub async fn insert_json<T: Serialize>(cache: &dyn ObjectCache, key: &str, value: &T, ttl: u64) {
    match serde_json::to_string(value) {
        Ok(json) => cache.insert_raw(key.to_string(), json, ttl).await,
        Err(e) => tracing::warn!("Failed to serialize cache entry '{}': {}", key, e),
    }
}

/// Declares a cache backend. Generates a `register()` function that adds the
/// backend's constructor to the plugin registry under `$name`.
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:expr, $ty:ty) => {
        pub fn register() {
            let constructor: $crate::cache::register::ObjectCacheConstructor =
                std::sync::Arc::new(|| {
                    Box::pin(async {
                        let cache = <$ty>::new()
                            .map_err($crate::errors::SpadaError::cache_connection)?;
                        Ok::<Box<dyn $crate::cache::ObjectCache>, $crate::errors::SpadaError>(
                            Box::new(cache),
                        )
                    }) as $crate::cache::register::BoxedObjectCacheFuture
                });
            $crate::cache::register::register_object_cache_plugin($name, constructor);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::object_cache::moka::MokaCacheWrapper;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Entry {
        id: i64,
        name: String,
    }

    #[tokio::test]
    async fn test_json_helpers_roundtrip_through_moka() {
        let cache = MokaCacheWrapper::with_capacity(16, 60);
        let entry = Entry {
            id: 7,
            name: "X IPA 1".to_string(),
        };

        insert_json(&cache, "class:7", &entry, 0).await;
        let cached: Option<Entry> = get_json(&cache, "class:7").await;
        assert_eq!(cached, Some(entry));

        cache.remove("class:7").await;
        let missing: Option<Entry> = get_json(&cache, "class:7").await;
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_undecodable_entry_is_dropped() {
        let cache = MokaCacheWrapper::with_capacity(16, 60);
        cache
            .insert_raw("bad".to_string(), "not json".to_string(), 0)
            .await;

        let value: Option<Entry> = get_json(&cache, "bad").await;
        assert!(value.is_none());
        assert_eq!(cache.get_raw("bad").await, CacheResult::NotFound);
    }

    #[test]
    fn test_builtin_plugins_are_registered() {
        register::register_builtin_plugins();
        assert!(register::get_object_cache_plugin("moka").is_some());
        assert!(register::get_object_cache_plugin("redis").is_some());
        assert!(register::get_object_cache_plugin("memcached").is_none());
    }
}
