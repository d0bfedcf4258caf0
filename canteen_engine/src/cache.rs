//! Cache-aside backends for user lookups.
//!
//! The cache is a read-through accelerant only. It is never the authority for anything, and it
//! must never back correctness-sensitive decisions (stock, order status, payments). Reads fall
//! through to the store on miss or error; writes are handed to a background task so the lookup
//! path never waits on the cache.

use std::{convert::Infallible, time::Duration};

use log::warn;
use redis::{
    aio::{ConnectionManager, ConnectionManagerConfig},
    AsyncCommands,
    Client,
    RedisError,
};
use uuid::Uuid;

use crate::{db::traits::UserCache, db_types::User};

const USER_KEY_PREFIX: &str = "user:";
const USER_TTL_SECS: u64 = 900;

/// Redis-backed user cache. Entries are JSON-encoded [`User`] rows with a short TTL.
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
}

impl RedisCache {
    pub async fn connect(url: &str) -> Result<Self, RedisError> {
        let config = ConnectionManagerConfig::new()
            .set_number_of_retries(1)
            .set_connection_timeout(Some(Duration::from_millis(500)));
        let client = Client::open(url)?;
        let conn = client.get_connection_manager_with_config(config).await?;
        Ok(Self { conn })
    }

    fn key(user_id: Uuid) -> String {
        format!("{USER_KEY_PREFIX}{user_id}")
    }
}

impl UserCache for RedisCache {
    type Error = RedisError;

    async fn user(&self, user_id: Uuid) -> Result<Option<User>, Self::Error> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn.get(Self::key(user_id)).await?;
        Ok(raw.and_then(|json| match serde_json::from_str(&json) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!("👤️ Discarding unreadable cache entry for {user_id}: {e}");
                None
            },
        }))
    }

    async fn set_user(&self, user: User) -> Result<(), Self::Error> {
        // Fire-and-forget: the write happens on its own task, and failure is only ever a log
        // line. The caller has the authoritative row already.
        let mut conn = self.conn.clone();
        tokio::spawn(async move {
            let key = Self::key(user.id);
            let json = match serde_json::to_string(&user) {
                Ok(json) => json,
                Err(e) => {
                    warn!("👤️ Could not encode user {} for caching: {e}", user.id);
                    return;
                },
            };
            if let Err(e) = conn.set_ex::<_, _, ()>(key, json, USER_TTL_SECS).await {
                warn!("👤️ User cache write failed for {}: {e}", user.id);
            }
        });
        Ok(())
    }
}

/// A cache that never hits. Backs tests and cacheless deployments.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCache;

impl UserCache for NullCache {
    type Error = Infallible;

    async fn user(&self, _user_id: Uuid) -> Result<Option<User>, Self::Error> {
        Ok(None)
    }

    async fn set_user(&self, _user: User) -> Result<(), Self::Error> {
        Ok(())
    }
}
