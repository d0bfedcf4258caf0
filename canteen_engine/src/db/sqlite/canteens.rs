use sqlx::SqliteConnection;
use uuid::Uuid;

use crate::{
    db::sqlite::SqliteDatabaseError,
    db_types::{Canteen, CanteenListEntry, NewCanteen},
};

const CANTEEN_COLUMNS: &str = "id, user_id, name, created_at, updated_at";

pub async fn insert_canteen(canteen: NewCanteen, conn: &mut SqliteConnection) -> Result<Canteen, SqliteDatabaseError> {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO canteens (id, user_id, name) VALUES (?, ?, ?)")
        .bind(id)
        .bind(canteen.user_id)
        .bind(&canteen.name)
        .execute(&mut *conn)
        .await?;
    canteen_by_id(id, conn)
        .await?
        .ok_or_else(|| SqliteDatabaseError::QueryError(format!("Canteen {id} vanished after insert")))
}

pub async fn canteen_by_id(canteen_id: Uuid, conn: &mut SqliteConnection) -> Result<Option<Canteen>, SqliteDatabaseError> {
    let canteen =
        sqlx::query_as::<_, Canteen>(&format!("SELECT {CANTEEN_COLUMNS} FROM canteens WHERE id = ? AND deleted_at IS NULL"))
            .bind(canteen_id)
            .fetch_optional(&mut *conn)
            .await?;
    Ok(canteen)
}

pub async fn fetch_canteens(conn: &mut SqliteConnection) -> Result<Vec<CanteenListEntry>, SqliteDatabaseError> {
    let canteens =
        sqlx::query_as::<_, CanteenListEntry>("SELECT id, name FROM canteens WHERE deleted_at IS NULL ORDER BY name ASC")
            .fetch_all(&mut *conn)
            .await?;
    Ok(canteens)
}
