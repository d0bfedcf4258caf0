use std::fmt::Debug;

use log::debug;
use uuid::Uuid;

use crate::{
    api::errors::CanteenApiError,
    db::traits::{CanteenManagement, MenuManagement},
    db_types::{Canteen, CanteenListEntry, Menu, MenuUpdate, NewCanteen, NewMenu, Role},
};

/// `CanteenApi` covers vendor-side catalogue maintenance: canteens and their menus.
///
/// Menu writes are scoped to canteens the acting user owns. Admins bypass the ownership clause;
/// everyone else gets the zero-rows-as-not-found treatment from the backend.
pub struct CanteenApi<B> {
    db: B,
}

impl<B> Debug for CanteenApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CanteenApi")
    }
}

impl<B> CanteenApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }

    fn ownership_scope(acting_user_id: Uuid, role: Role) -> Option<Uuid> {
        match role {
            Role::Admin => None,
            _ => Some(acting_user_id),
        }
    }
}

impl<B> CanteenApi<B>
where B: CanteenManagement + MenuManagement
{
    pub async fn create_canteen(&self, canteen: NewCanteen) -> Result<Canteen, CanteenApiError> {
        let canteen =
            self.db.insert_canteen(canteen).await.map_err(|e| CanteenApiError::DatabaseError(e.to_string()))?;
        debug!("🏪️ Canteen {} ({}) registered for user {}", canteen.id, canteen.name, canteen.user_id);
        Ok(canteen)
    }

    pub async fn canteen_by_id(&self, canteen_id: Uuid) -> Result<Canteen, CanteenApiError> {
        self.db
            .canteen_by_id(canteen_id)
            .await
            .map_err(|e| CanteenApiError::DatabaseError(e.to_string()))?
            .ok_or(CanteenApiError::CanteenNotFound(canteen_id))
    }

    pub async fn fetch_canteens(&self) -> Result<Vec<CanteenListEntry>, CanteenApiError> {
        self.db.fetch_canteens().await.map_err(|e| CanteenApiError::DatabaseError(e.to_string()))
    }

    /// Creates a menu item on a canteen the actor owns (or any canteen, for admins). A canteen
    /// that is absent, soft-deleted or owned by someone else yields
    /// [`CanteenApiError::CanteenNotFound`].
    pub async fn create_menu(&self, menu: NewMenu, acting_user_id: Uuid, role: Role) -> Result<Menu, CanteenApiError> {
        let canteen_id = menu.canteen_id;
        let owner = Self::ownership_scope(acting_user_id, role);
        self.db
            .insert_menu(menu, owner)
            .await
            .map_err(|e| CanteenApiError::DatabaseError(e.to_string()))?
            .ok_or(CanteenApiError::CanteenNotFound(canteen_id))
    }

    pub async fn update_menu(
        &self,
        menu_id: Uuid,
        update: MenuUpdate,
        acting_user_id: Uuid,
        role: Role,
    ) -> Result<Menu, CanteenApiError> {
        let owner = Self::ownership_scope(acting_user_id, role);
        self.db
            .update_menu(menu_id, update, owner)
            .await
            .map_err(|e| CanteenApiError::DatabaseError(e.to_string()))?
            .ok_or(CanteenApiError::MenuNotFound(menu_id))
    }

    pub async fn delete_menu(&self, menu_id: Uuid, acting_user_id: Uuid, role: Role) -> Result<(), CanteenApiError> {
        let owner = Self::ownership_scope(acting_user_id, role);
        let deleted =
            self.db.soft_delete_menu(menu_id, owner).await.map_err(|e| CanteenApiError::DatabaseError(e.to_string()))?;
        if deleted {
            debug!("🏪️ Menu {menu_id} soft-deleted by {acting_user_id}");
            Ok(())
        } else {
            Err(CanteenApiError::MenuNotFound(menu_id))
        }
    }

    pub async fn menu_by_id(&self, menu_id: Uuid) -> Result<Menu, CanteenApiError> {
        self.db
            .menu_by_id(menu_id)
            .await
            .map_err(|e| CanteenApiError::DatabaseError(e.to_string()))?
            .ok_or(CanteenApiError::MenuNotFound(menu_id))
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}
