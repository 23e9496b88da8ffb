use redis::aio::ConnectionManager;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cache miss: {0}")]
    CacheMiss(String),
}

/// Multi-tier cache manager
///
/// L1 is an in-process moka cache, L2 is Redis shared across instances.
/// Holds the listings snapshot and each user's persisted filters.
pub struct CacheManager {
    redis: Arc<tokio::sync::Mutex<ConnectionManager>>,
    l1_cache: moka::future::Cache<String, Vec<u8>>,
    ttl_secs: u64,
}

impl CacheManager {
    /// Create a new cache manager
    pub async fn new(redis_url: &str, l1_size: u64, ttl_secs: u64) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let redis = redis::aio::ConnectionManager::new(client).await?;

        let l1_cache = moka::future::CacheBuilder::new(l1_size)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Ok(Self {
            redis: Arc::new(tokio::sync::Mutex::new(redis)),
            l1_cache,
            ttl_secs,
        })
    }

    /// Get a value from cache (L1 first, then L2)
    pub async fn get<T>(&self, key: &str) -> Result<T, CacheError>
    where
        T: for<'de> Deserialize<'de>,
    {
        if let Some(bytes) = self.l1_cache.get(key).await {
            tracing::trace!("L1 cache hit: {}", key);
            return Ok(serde_json::from_slice(&bytes)?);
        }

        let mut conn = self.redis.lock().await;
        let value: Option<String> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut *conn)
            .await?;
        drop(conn);

        if let Some(json) = value {
            tracing::trace!("L2 cache hit: {}", key);

            let bytes = json.as_bytes().to_vec();
            self.l1_cache.insert(key.to_string(), bytes).await;

            return Ok(serde_json::from_str(&json)?);
        }

        tracing::trace!("Cache miss: {}", key);
        Err(CacheError::CacheMiss(key.to_string()))
    }

    /// Set a value in both tiers with the default TTL
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        self.set_with_ttl(key, value, self.ttl_secs).await
    }

    /// Set a value in both tiers; `ttl_secs` applies to Redis
    pub async fn set_with_ttl<T>(&self, key: &str, value: &T, ttl_secs: u64) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let json = serde_json::to_string(value)?;

        // L1 entries expire on the manager-wide TTL
        self.l1_cache.insert(key.to_string(), json.as_bytes().to_vec()).await;

        let mut conn = self.redis.lock().await;
        let _: () = redis::cmd("SETEX")
            .arg(key)
            .arg(ttl_secs)
            .arg(json)
            .query_async(&mut *conn)
            .await?;
        drop(conn);

        tracing::trace!("Cache set: {} (ttl {}s)", key, ttl_secs);
        Ok(())
    }

    /// Delete a value from both cache tiers
    pub async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.l1_cache.invalidate(key).await;
        let mut conn = self.redis.lock().await;
        let _: () = redis::cmd("DEL")
            .arg(key)
            .query_async(&mut *conn)
            .await?;
        Ok(())
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for a listings snapshot of at most `limit` jobs
    pub fn listings(limit: usize) -> String {
        format!("listings:{}", limit)
    }

    /// Build a cache key for a user's persisted filters
    pub fn filters(user_id: &str) -> String {
        format!("filters:{}", user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FilterSpec;

    #[tokio::test]
    #[ignore = "Requires Redis"]
    async fn test_cache_round_trips_filters() {
        let cache = CacheManager::new("redis://127.0.0.1:6379", 1000, 60)
            .await
            .expect("Failed to create cache");

        let key = CacheKey::filters("test_user");
        let spec = FilterSpec {
            keyword: "nurse".to_string(),
            urgent_only: true,
            ..FilterSpec::default()
        };

        cache.set(&key, &spec).await.unwrap();
        let restored: FilterSpec = cache.get(&key).await.unwrap();
        assert_eq!(restored, spec);

        cache.delete(&key).await.unwrap();
        assert!(matches!(
            cache.get::<FilterSpec>(&key).await,
            Err(CacheError::CacheMiss(_))
        ));
    }

    #[test]
    fn test_cache_key_builder() {
        assert_eq!(CacheKey::listings(1000), "listings:1000");
        assert_eq!(CacheKey::filters("user123"), "filters:user123");
    }
}
