use std::fmt::Debug;

use log::{trace, warn};
use uuid::Uuid;

use crate::{
    api::errors::UserApiError,
    db::traits::{UserCache, UserStore},
    db_types::User,
};

/// `UserApi` provides cache-aside user lookups: the cache is tried first, a miss falls through
/// to the store, and the cache is repopulated without blocking the caller. Cache failures are
/// logged and otherwise invisible — the store is always the authority.
pub struct UserApi<B, C> {
    db: B,
    cache: C,
}

impl<B, C> Debug for UserApi<B, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "UserApi")
    }
}

impl<B, C> UserApi<B, C> {
    pub fn new(db: B, cache: C) -> Self {
        Self { db, cache }
    }
}

impl<B, C> UserApi<B, C>
where
    B: UserStore,
    C: UserCache,
{
    pub async fn fetch_user(&self, user_id: Uuid) -> Result<User, UserApiError> {
        match self.cache.user(user_id).await {
            Ok(Some(user)) => {
                trace!("👤️ Cache hit for user {user_id}");
                return Ok(user);
            },
            Ok(None) => trace!("👤️ Cache miss for user {user_id}"),
            Err(e) => warn!("👤️ User cache read failed for {user_id}: {e}. Falling through to the store."),
        }
        let user = self
            .db
            .user_by_id(user_id)
            .await
            .map_err(|e| UserApiError::DatabaseError(e.to_string()))?
            .ok_or(UserApiError::UserNotFound(user_id))?;
        // Population is handed off inside the cache impl; this must not block the lookup path.
        if let Err(e) = self.cache.set_user(user.clone()).await {
            warn!("👤️ User cache population failed for {user_id}: {e}");
        }
        Ok(user)
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}
