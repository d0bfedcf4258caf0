use ccs_common::Rupiah;
use uuid::Uuid;

use crate::db_types::{Menu, MenuUpdate, NewMenu};

/// Backend contract for menu maintenance.
///
/// Every write takes an `owner` argument: `Some(user_id)` scopes the statement to canteens owned
/// by that user (the vendor path), `None` skips the ownership clause (the admin path). A write
/// that matches no row — wrong owner, soft-deleted, or simply absent — reports `None`/`false`
/// rather than an error, and the caller maps that to its not-found policy.
#[allow(async_fn_in_trait)]
pub trait MenuManagement {
    type Error: std::error::Error;

    /// Inserts a new menu item. Returns `None` when the target canteen does not exist, is
    /// soft-deleted, or is not owned by `owner`.
    async fn insert_menu(&self, menu: NewMenu, owner: Option<Uuid>) -> Result<Option<Menu>, Self::Error>;

    /// Applies a partial update. Returns the updated row, or `None` on the zero-rows outcome.
    async fn update_menu(
        &self,
        menu_id: Uuid,
        update: MenuUpdate,
        owner: Option<Uuid>,
    ) -> Result<Option<Menu>, Self::Error>;

    /// Soft-deletes a menu item. Returns `false` on the zero-rows outcome.
    async fn soft_delete_menu(&self, menu_id: Uuid, owner: Option<Uuid>) -> Result<bool, Self::Error>;

    /// Fetches a menu item that has not been soft-deleted.
    async fn menu_by_id(&self, menu_id: Uuid) -> Result<Option<Menu>, Self::Error>;

    /// The unit price of a menu item, *including* soft-deleted rows. Orders placed before a menu
    /// was retired still need their price resolved at payment time.
    async fn menu_price(&self, menu_id: Uuid) -> Result<Option<Rupiah>, Self::Error>;
}
