use uuid::Uuid;

use crate::db_types::{Canteen, CanteenListEntry, NewCanteen};

/// Backend contract for canteen records.
#[allow(async_fn_in_trait)]
pub trait CanteenManagement {
    type Error: std::error::Error;

    async fn insert_canteen(&self, canteen: NewCanteen) -> Result<Canteen, Self::Error>;

    async fn canteen_by_id(&self, canteen_id: Uuid) -> Result<Option<Canteen>, Self::Error>;

    /// All canteens that have not been soft-deleted, as trimmed listing rows.
    async fn fetch_canteens(&self) -> Result<Vec<CanteenListEntry>, Self::Error>;
}
