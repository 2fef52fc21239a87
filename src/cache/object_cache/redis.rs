use async_trait::async_trait;
use redis::{AsyncCommands, aio::MultiplexedConnection};
use tokio::sync::Mutex;
use tracing::{debug, error, warn};

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::declare_object_cache_plugin;

declare_object_cache_plugin!("redis", RedisObjectCache);

/// Redis-backed cache. Keys are namespaced with `cache.redis.key_prefix` so
/// several deployments can share one server.
pub struct RedisObjectCache {
    client: redis::Client,
    connection: Mutex<Option<MultiplexedConnection>>,
    key_prefix: String,
    default_ttl: u64,
}

fn namespaced(prefix: &str, key: &str) -> String {
    format!("{prefix}{key}")
}

fn ttl_or_default(ttl: u64, default_ttl: u64) -> u64 {
    if ttl == 0 { default_ttl } else { ttl }
}

impl RedisObjectCache {
    pub fn new() -> Result<Self, String> {
        let config = AppConfig::get();
        let redis = &config.cache.redis;

        let client = redis::Client::open(redis.url.as_str())
            .map_err(|e| format!("Invalid Redis URL '{}': {e}", redis.url))?;

        // fail at startup so the moka fallback kicks in
        let mut probe = client
            .get_connection()
            .map_err(|e| format!("Redis at '{}' is unreachable: {e}", redis.url))?;
        redis::cmd("PING")
            .query::<String>(&mut probe)
            .map_err(|e| format!("Redis at '{}' did not answer PING: {e}", redis.url))?;

        debug!(
            "Redis cache ready (prefix '{}', default TTL {}s)",
            redis.key_prefix, config.cache.default_ttl
        );

        Ok(Self {
            client,
            connection: Mutex::new(None),
            key_prefix: redis.key_prefix.clone(),
            default_ttl: config.cache.default_ttl,
        })
    }

    /// Shared multiplexed connection, opened on first use and after a reset.
    async fn connection(&self) -> Option<MultiplexedConnection> {
        let mut slot = self.connection.lock().await;
        if let Some(conn) = slot.as_ref() {
            return Some(conn.clone());
        }
        match self.client.get_multiplexed_async_connection().await {
            Ok(conn) => Some(slot.insert(conn).clone()),
            Err(e) => {
                error!("Redis connection unavailable: {}", e);
                None
            }
        }
    }

    /// Logs a failed command and drops the shared connection when it is broken.
    async fn command_failed(&self, what: &str, e: redis::RedisError) {
        warn!("Redis {} failed: {}", what, e);
        if e.is_io_error() || e.is_connection_dropped() {
            self.connection.lock().await.take();
        }
    }
}

#[async_trait]
impl ObjectCache for RedisObjectCache {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        let Some(mut conn) = self.connection().await else {
            return CacheResult::ExistsButNoValue;
        };

        match conn
            .get::<_, Option<String>>(namespaced(&self.key_prefix, key))
            .await
        {
            Ok(Some(value)) => CacheResult::Found(value),
            Ok(None) => CacheResult::NotFound,
            Err(e) => {
                self.command_failed(&format!("GET '{key}'"), e).await;
                CacheResult::ExistsButNoValue
            }
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        let Some(mut conn) = self.connection().await else {
            return;
        };

        let ttl = ttl_or_default(ttl, self.default_ttl);
        if let Err(e) = conn
            .set_ex::<_, _, ()>(namespaced(&self.key_prefix, &key), value, ttl)
            .await
        {
            self.command_failed(&format!("SETEX '{key}'"), e).await;
        }
    }

    async fn remove(&self, key: &str) {
        let Some(mut conn) = self.connection().await else {
            return;
        };

        if let Err(e) = conn
            .del::<_, i64>(namespaced(&self.key_prefix, key))
            .await
        {
            self.command_failed(&format!("DEL '{key}'"), e).await;
        }
    }

    async fn invalidate_all(&self) {
        let Some(mut conn) = self.connection().await else {
            return;
        };

        let pattern = namespaced(&self.key_prefix, "*");
        let keys: Vec<String> = match conn.keys(&pattern).await {
            Ok(keys) => keys,
            Err(e) => {
                self.command_failed(&format!("KEYS '{pattern}'"), e).await;
                return;
            }
        };
        if keys.is_empty() {
            return;
        }

        match conn.del::<_, i64>(keys).await {
            Ok(count) => debug!("Invalidated {} Redis cache entries", count),
            Err(e) => self.command_failed("bulk DEL", e).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_and_ttl() {
        assert_eq!(namespaced("spada:", "schedule:class:4"), "spada:schedule:class:4");
        assert_eq!(namespaced("", "k"), "k");
        assert_eq!(ttl_or_default(0, 300), 300);
        assert_eq!(ttl_or_default(15, 300), 15);
    }
}
