use sqlx::SqliteConnection;
use uuid::Uuid;

use crate::{
    db::sqlite::SqliteDatabaseError,
    db_types::{Role, User},
};

const USER_COLUMNS: &str = "id, name, email, role, created_at, updated_at";

pub async fn user_by_id(user_id: Uuid, conn: &mut SqliteConnection) -> Result<Option<User>, SqliteDatabaseError> {
    let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(user)
}

/// Account registration lives outside the engine; this insert exists for bootstrapping and test
/// fixtures.
pub async fn insert_user(
    id: Uuid,
    name: &str,
    email: &str,
    role: Role,
    conn: &mut SqliteConnection,
) -> Result<(), SqliteDatabaseError> {
    sqlx::query("INSERT INTO users (id, name, email, role) VALUES (?, ?, ?, ?)")
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(role)
        .execute(&mut *conn)
        .await?;
    Ok(())
}
