use sqlx::SqliteConnection;
use uuid::Uuid;

use crate::{
    db::sqlite::SqliteDatabaseError,
    db_types::{NewPayment, Payment},
};

const PAYMENT_COLUMNS: &str = "id, order_id, user_id, price, redirect_url, created_at, updated_at";

/// Inserts a payment record. The id is supplied by the caller because it has already been used
/// as the gateway-facing order reference by the time the row is written.
pub async fn insert_payment(payment: NewPayment, conn: &mut SqliteConnection) -> Result<Payment, SqliteDatabaseError> {
    sqlx::query("INSERT INTO payments (id, order_id, user_id, price, redirect_url) VALUES (?, ?, ?, ?, ?)")
        .bind(payment.id)
        .bind(payment.order_id)
        .bind(payment.user_id)
        .bind(payment.price)
        .bind(&payment.redirect_url)
        .execute(&mut *conn)
        .await?;
    payment_by_id(payment.id, conn)
        .await?
        .ok_or_else(|| SqliteDatabaseError::QueryError(format!("Payment {} vanished after insert", payment.id)))
}

pub async fn payment_by_id(payment_id: Uuid, conn: &mut SqliteConnection) -> Result<Option<Payment>, SqliteDatabaseError> {
    let payment = sqlx::query_as::<_, Payment>(&format!("SELECT {PAYMENT_COLUMNS} FROM payments WHERE id = ?"))
        .bind(payment_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(payment)
}
