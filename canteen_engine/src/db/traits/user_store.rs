use uuid::Uuid;

use crate::db_types::User;

/// Read-only access to user accounts. Account registration and credential handling live outside
/// the engine; the engine only needs users for authorization context and gateway customer
/// details.
#[allow(async_fn_in_trait)]
pub trait UserStore {
    type Error: std::error::Error;

    async fn user_by_id(&self, user_id: Uuid) -> Result<Option<User>, Self::Error>;
}

/// A best-effort cache-aside accelerant for user lookups.
///
/// The cache is never the authority for anything: a miss or an error simply falls through to the
/// store, and `set_user` must not block the caller on the cache write (implementations hand the
/// write to a background task and surface failures via logging only). It must never be consulted
/// for correctness-sensitive state such as stock, order status or payments.
#[allow(async_fn_in_trait)]
pub trait UserCache {
    type Error: std::error::Error;

    async fn user(&self, user_id: Uuid) -> Result<Option<User>, Self::Error>;

    async fn set_user(&self, user: User) -> Result<(), Self::Error>;
}
