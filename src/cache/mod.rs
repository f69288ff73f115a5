use redis::{Client, RedisError, aio::ConnectionManager};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct RedisCache {
    connection: ConnectionManager,
}

impl RedisCache {
    pub async fn new(redis_url: &str) -> Result<Self, RedisError> {
        let client = Client::open(redis_url)?;
        let connection = ConnectionManager::new(client).await?;
        Ok(Self { connection })
    }

    /// Get a value from cache
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> redis::RedisResult<Option<T>> {
        let value: Option<String> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut self.connection.clone())
            .await?;

        match value {
            Some(v) => {
                let deserialized = serde_json::from_str(&v).map_err(|e| {
                    redis::RedisError::from((
                        redis::ErrorKind::TypeError,
                        "Deserialization error",
                        e.to_string(),
                    ))
                })?;
                Ok(Some(deserialized))
            }
            None => Ok(None),
        }
    }

    /// Set a value in cache with optional TTL (in seconds)
    pub async fn set<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: Option<u64>,
    ) -> redis::RedisResult<()> {
        let serialized = serde_json::to_string(value).map_err(|e| {
            redis::RedisError::from((
                redis::ErrorKind::TypeError,
                "Serialization error",
                e.to_string(),
            ))
        })?;

        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(serialized);

        if let Some(ttl) = ttl_seconds {
            cmd.arg("EX").arg(ttl);
        }

        cmd.query_async(&mut self.connection.clone()).await
    }

    /// Delete a key from cache
    pub async fn delete(&self, key: &str) -> redis::RedisResult<()> {
        redis::cmd("DEL")
            .arg(key)
            .query_async(&mut self.connection.clone())
            .await
    }

    /// Drop a key after a write, logging instead of failing the request when
    /// Redis is unreachable.
    pub async fn invalidate(&self, key: &str) {
        if let Err(e) = self.delete(key).await {
            tracing::warn!(key, error = %e, "cache invalidation failed");
        }
    }
}

/// Cache key generators
pub mod keys {
    use uuid::Uuid;

    /// Generate key for the admin review queue
    pub fn admin_orders() -> String {
        "admin:orders".to_string()
    }

    /// Generate key for a user's order list
    pub fn orders(user_id: Uuid) -> String {
        format!("orders:{user_id}")
    }

    /// Generate key for a user's saved designs
    pub fn designs(user_id: Uuid) -> String {
        format!("designs:{user_id}")
    }

    /// Generate key for a user's conversation list
    pub fn conversations(user_id: Uuid) -> String {
        format!("conversations:{user_id}")
    }
}

/// Cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub admin_orders_ttl: Duration,
    pub order_list_ttl: Duration,
    pub design_list_ttl: Duration,
    pub conversation_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            admin_orders_ttl: Duration::from_secs(60), // 1 minute
            order_list_ttl: Duration::from_secs(120),  // 2 minutes
            design_list_ttl: Duration::from_secs(300), // 5 minutes
            conversation_ttl: Duration::from_secs(60), // 1 minute
        }
    }
}

impl CacheConfig {
    pub fn from_env() -> Self {
        Self {
            admin_orders_ttl: parse_duration_secs("CACHE_TTL_ADMIN_ORDERS", 60),
            order_list_ttl: parse_duration_secs("CACHE_TTL_ORDERS", 120),
            design_list_ttl: parse_duration_secs("CACHE_TTL_DESIGNS", 300),
            conversation_ttl: parse_duration_secs("CACHE_TTL_CONVERSATIONS", 60),
        }
    }
}

fn parse_duration_secs(env_var: &str, default: u64) -> Duration {
    std::env::var(env_var)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(default))
}

/// Wrapper type for Actix-web app data
pub type CacheData = Arc<RedisCache>;
