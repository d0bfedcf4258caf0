//! Runtime selection of the user-cache backend.
//!
//! The server runs with redis when `CCS_REDIS_URL` is configured and reachable, and degrades to
//! uncached lookups otherwise. Both arms sit behind one type so the actix app data has a single
//! concrete shape.

use canteen_engine::{
    cache::{NullCache, RedisCache},
    db_types::User,
    traits::UserCache,
};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Error)]
#[error("User cache error: {0}")]
pub struct AppCacheError(String);

#[derive(Clone)]
pub enum AppCache {
    Redis(RedisCache),
    Null(NullCache),
}

impl AppCache {
    pub fn none() -> Self {
        AppCache::Null(NullCache)
    }
}

impl UserCache for AppCache {
    type Error = AppCacheError;

    async fn user(&self, user_id: Uuid) -> Result<Option<User>, Self::Error> {
        match self {
            AppCache::Redis(cache) => cache.user(user_id).await.map_err(|e| AppCacheError(e.to_string())),
            AppCache::Null(cache) => cache.user(user_id).await.map_err(|e| AppCacheError(e.to_string())),
        }
    }

    async fn set_user(&self, user: User) -> Result<(), Self::Error> {
        match self {
            AppCache::Redis(cache) => cache.set_user(user).await.map_err(|e| AppCacheError(e.to_string())),
            AppCache::Null(cache) => cache.set_user(user).await.map_err(|e| AppCacheError(e.to_string())),
        }
    }
}
