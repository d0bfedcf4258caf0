use ccs_common::Rupiah;
use log::{debug, trace};
use sqlx::{QueryBuilder, SqliteConnection};
use uuid::Uuid;

use crate::{
    db::sqlite::SqliteDatabaseError,
    db_types::{Menu, MenuUpdate, NewMenu},
};

const MENU_COLUMNS: &str = "id, canteen_id, name, price, stock, created_at, updated_at";

/// Inserts a new menu item onto a canteen. When `owner` is given, the target canteen must be
/// owned by that user; admins pass `None` and skip the ownership clause. Returns `None` when no
/// eligible canteen matched.
pub async fn insert_menu(
    menu: NewMenu,
    owner: Option<Uuid>,
    conn: &mut SqliteConnection,
) -> Result<Option<Menu>, SqliteDatabaseError> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM canteens WHERE deleted_at IS NULL AND id = ");
    builder.push_bind(menu.canteen_id);
    if let Some(user_id) = owner {
        builder.push(" AND user_id = ");
        builder.push_bind(user_id);
    }
    let eligible = builder.build_query_scalar::<i64>().fetch_one(&mut *conn).await?;
    if eligible == 0 {
        return Ok(None);
    }
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO menus (id, canteen_id, name, price, stock) VALUES (?, ?, ?, ?, ?)")
        .bind(id)
        .bind(menu.canteen_id)
        .bind(&menu.name)
        .bind(menu.price)
        .bind(menu.stock)
        .execute(&mut *conn)
        .await?;
    menu_by_id(id, conn).await
}

/// Applies a partial update to a menu row, scoped to the owner's canteens unless `owner` is
/// `None`. Returns the updated row, or `None` when the conditional update matched nothing.
pub async fn update_menu(
    menu_id: Uuid,
    update: MenuUpdate,
    owner: Option<Uuid>,
    conn: &mut SqliteConnection,
) -> Result<Option<Menu>, SqliteDatabaseError> {
    if update.is_empty() {
        debug!("🗃️ No fields to update for menu {menu_id}. Update request skipped.");
        return menu_by_id(menu_id, conn).await;
    }
    let mut builder = QueryBuilder::new("UPDATE menus SET updated_at = CURRENT_TIMESTAMP,");
    let mut set_clause = builder.separated(", ");
    if let Some(name) = update.name {
        set_clause.push("name = ");
        set_clause.push_bind_unseparated(name);
    }
    if let Some(price) = update.price {
        set_clause.push("price = ");
        set_clause.push_bind_unseparated(price);
    }
    if let Some(stock) = update.stock {
        set_clause.push("stock = ");
        set_clause.push_bind_unseparated(stock);
    }
    builder.push(" WHERE deleted_at IS NULL AND id = ");
    builder.push_bind(menu_id);
    if let Some(user_id) = owner {
        builder.push(" AND canteen_id IN (SELECT id FROM canteens WHERE deleted_at IS NULL AND user_id = ");
        builder.push_bind(user_id);
        builder.push(")");
    }
    trace!("🗃️ Executing query: {}", builder.sql());
    let res = builder.build().execute(&mut *conn).await?;
    if res.rows_affected() == 0 {
        return Ok(None);
    }
    menu_by_id(menu_id, conn).await
}

/// Soft-deletes a menu item, scoped to the owner's canteens unless `owner` is `None`.
pub async fn soft_delete_menu(
    menu_id: Uuid,
    owner: Option<Uuid>,
    conn: &mut SqliteConnection,
) -> Result<bool, SqliteDatabaseError> {
    let mut builder = QueryBuilder::new(
        "UPDATE menus SET deleted_at = CURRENT_TIMESTAMP, updated_at = CURRENT_TIMESTAMP WHERE deleted_at IS NULL AND id = ",
    );
    builder.push_bind(menu_id);
    if let Some(user_id) = owner {
        builder.push(" AND canteen_id IN (SELECT id FROM canteens WHERE deleted_at IS NULL AND user_id = ");
        builder.push_bind(user_id);
        builder.push(")");
    }
    let res = builder.build().execute(&mut *conn).await?;
    Ok(res.rows_affected() > 0)
}

pub async fn menu_by_id(menu_id: Uuid, conn: &mut SqliteConnection) -> Result<Option<Menu>, SqliteDatabaseError> {
    let menu = sqlx::query_as::<_, Menu>(&format!("SELECT {MENU_COLUMNS} FROM menus WHERE id = ? AND deleted_at IS NULL"))
        .bind(menu_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(menu)
}

/// Unit price lookup that deliberately ignores the soft-delete marker: an order placed before a
/// menu was retired must still resolve its price at payment time.
pub async fn price_of(menu_id: Uuid, conn: &mut SqliteConnection) -> Result<Option<Rupiah>, SqliteDatabaseError> {
    let price = sqlx::query_scalar::<_, Rupiah>("SELECT price FROM menus WHERE id = ?")
        .bind(menu_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(price)
}
