use moka::future::Cache;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::db;
use crate::error::ApiError;
use crate::models::users::{self, AccountStatus};

/// How long a resolved token may be served from memory before the store is
/// consulted again. Short enough that a deleted or expired token loses
/// access promptly.
const CACHE_TTL: Duration = Duration::from_secs(60);

#[derive(Clone)]
struct CachedAuth {
    user: users::Model,
    expires_at: chrono::DateTime<chrono::Utc>,
}

/// Resolves opaque bearer tokens to user accounts.
///
/// Lookups go through an in-process TTL cache first, then the `user_tokens`
/// table. Expiry is enforced on both paths, and only active accounts
/// resolve.
#[derive(Clone)]
pub struct TokenCache {
    cache: Arc<Cache<String, CachedAuth>>,
}

impl TokenCache {
    pub fn new() -> Self {
        let cache = Arc::new(
            Cache::builder()
                .time_to_live(CACHE_TTL)
                .max_capacity(10_000)
                .build(),
        );

        Self { cache }
    }

    pub async fn resolve(
        &self,
        db: &DatabaseConnection,
        token: &str,
    ) -> Result<users::Model, ApiError> {
        let now = chrono::Utc::now();

        if let Some(cached) = self.cache.get(token).await {
            if cached.expires_at > now {
                return Ok(cached.user);
            }
            // The token aged out mid-TTL; drop it and fall through to the
            // store, which will reject it.
            self.cache.invalidate(token).await;
        }

        let token_row = db::tokens::find_valid_token(db, token, now)
            .await?
            .ok_or_else(|| ApiError::auth("Invalid or expired token"))?;

        let user = db::users::get_user_by_id(db, token_row.user_id)
            .await?
            .ok_or_else(|| ApiError::auth("Token does not resolve to a user"))?;

        if user.status != AccountStatus::Active {
            return Err(ApiError::forbidden("Account is not active"));
        }

        debug!(user_id = %user.id, "resolved bearer token");

        self.cache
            .insert(
                token.to_string(),
                CachedAuth {
                    user: user.clone(),
                    expires_at: token_row.expires_at,
                },
            )
            .await;

        Ok(user)
    }
}

impl Default for TokenCache {
    fn default() -> Self {
        Self::new()
    }
}
