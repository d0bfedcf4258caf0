use log::trace;
use sqlx::{QueryBuilder, SqliteConnection};
use uuid::Uuid;

use crate::{
    api::order_objects::OrderQueryFilter,
    db::{
        sqlite::SqliteDatabaseError,
        traits::{CreateOrderResult, MarkPaidResult, UpdateOrderResult},
    },
    db_types::{NewOrder, Order, OrderStatus},
};

const ORDER_COLUMNS: &str = "id, canteen_id, user_id, menu_id, quantity, status, created_at, updated_at";

/// Inserts a new order, consuming menu stock. This is not atomic on its own; the caller embeds it
/// in a transaction and passes `&mut *tx` as the connection argument.
///
/// The stock check-and-decrement is a single conditional update, so two racing order creations
/// against the same menu serialize here and at most one can take the last portion. The update is
/// deliberately the *first* statement of the transaction: starting with a write means racing
/// transactions queue on the writer lock instead of failing a deferred read-to-write upgrade.
pub async fn create_order(order: NewOrder, conn: &mut SqliteConnection) -> Result<CreateOrderResult, SqliteDatabaseError> {
    let res = sqlx::query(
        "UPDATE menus SET stock = stock - ?, updated_at = CURRENT_TIMESTAMP WHERE id = ? AND deleted_at IS NULL AND stock >= ?",
    )
    .bind(order.quantity)
    .bind(order.menu_id)
    .bind(order.quantity)
    .execute(&mut *conn)
    .await?;
    if res.rows_affected() == 0 {
        let available = sqlx::query_scalar::<_, i64>("SELECT stock FROM menus WHERE id = ? AND deleted_at IS NULL")
            .bind(order.menu_id)
            .fetch_optional(&mut *conn)
            .await?;
        return Ok(match available {
            Some(available) => CreateOrderResult::InsufficientStock { available },
            None => CreateOrderResult::MenuNotFound,
        });
    }
    let canteen_id = sqlx::query_scalar::<_, Uuid>("SELECT canteen_id FROM menus WHERE id = ?")
        .bind(order.menu_id)
        .fetch_one(&mut *conn)
        .await?;
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO orders (id, canteen_id, user_id, menu_id, quantity, status) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(canteen_id)
    .bind(order.user_id)
    .bind(order.menu_id)
    .bind(order.quantity)
    .bind(OrderStatus::Unpaid)
    .execute(&mut *conn)
    .await?;
    let order = order_by_id(id, conn)
        .await?
        .ok_or_else(|| SqliteDatabaseError::QueryError(format!("Order {id} vanished after insert")))?;
    Ok(CreateOrderResult::Created(order))
}

/// Conditional status advance for a canteen-owner edge. The single UPDATE pins the expected
/// current status and scopes ownership through the canteens table, so a zero-row result covers
/// missing orders, wrong current status and foreign canteens alike.
pub async fn advance_order_for_owner(
    order_id: Uuid,
    expected: OrderStatus,
    new_status: OrderStatus,
    owner_id: Uuid,
    conn: &mut SqliteConnection,
) -> Result<UpdateOrderResult, SqliteDatabaseError> {
    let res = sqlx::query(
        "UPDATE orders SET status = ?, updated_at = CURRENT_TIMESTAMP \
         WHERE id = ? AND status = ? \
         AND canteen_id IN (SELECT id FROM canteens WHERE user_id = ? AND deleted_at IS NULL)",
    )
    .bind(new_status)
    .bind(order_id)
    .bind(expected)
    .bind(owner_id)
    .execute(&mut *conn)
    .await?;
    if res.rows_affected() == 0 {
        return Ok(UpdateOrderResult::NotFound);
    }
    match order_by_id(order_id, conn).await? {
        Some(order) => Ok(UpdateOrderResult::Updated(order)),
        None => Ok(UpdateOrderResult::NotFound),
    }
}

/// The UNPAID → PAID system edge, keyed by the gateway-facing payment id.
pub async fn mark_order_paid(payment_id: Uuid, conn: &mut SqliteConnection) -> Result<MarkPaidResult, SqliteDatabaseError> {
    let res = sqlx::query(
        "UPDATE orders SET status = ?, updated_at = CURRENT_TIMESTAMP \
         WHERE status = ? AND id = (SELECT order_id FROM payments WHERE id = ?)",
    )
    .bind(OrderStatus::Paid)
    .bind(OrderStatus::Unpaid)
    .bind(payment_id)
    .execute(&mut *conn)
    .await?;
    let order = order_for_payment(payment_id, conn).await?;
    match (res.rows_affected(), order) {
        (_, None) => Ok(MarkPaidResult::NotFound),
        (0, Some(order)) if order.status == OrderStatus::Unpaid => Ok(MarkPaidResult::NotFound),
        (0, Some(order)) => Ok(MarkPaidResult::AlreadyPaid(order)),
        (_, Some(order)) => Ok(MarkPaidResult::Paid(order)),
    }
}

pub async fn order_by_id(order_id: Uuid, conn: &mut SqliteConnection) -> Result<Option<Order>, SqliteDatabaseError> {
    let order = sqlx::query_as::<_, Order>(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?"))
        .bind(order_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(order)
}

async fn order_for_payment(payment_id: Uuid, conn: &mut SqliteConnection) -> Result<Option<Order>, SqliteDatabaseError> {
    let order = sqlx::query_as::<_, Order>(
        "SELECT o.id, o.canteen_id, o.user_id, o.menu_id, o.quantity, o.status, o.created_at, o.updated_at \
         FROM orders o INNER JOIN payments p ON p.order_id = o.id WHERE p.id = ?",
    )
    .bind(payment_id)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(order)
}

/// Fetches orders according to criteria specified in the `OrderQueryFilter`.
///
/// Resulting orders are ordered by `created_at` in ascending order.
pub async fn fetch_orders(query: OrderQueryFilter, conn: &mut SqliteConnection) -> Result<Vec<Order>, SqliteDatabaseError> {
    let mut builder = QueryBuilder::new(format!("SELECT {ORDER_COLUMNS} FROM orders "));
    if !query.is_empty() {
        builder.push("WHERE ");
    }
    let mut where_clause = builder.separated(" AND ");
    if let Some(user_id) = query.user_id {
        where_clause.push("user_id = ");
        where_clause.push_bind_unseparated(user_id);
    }
    if let Some(canteen_id) = query.canteen_id {
        where_clause.push("canteen_id = ");
        where_clause.push_bind_unseparated(canteen_id);
    }
    if !query.statuses.is_empty() {
        let statuses = query.statuses.iter().map(|s| format!("'{s}'")).collect::<Vec<_>>().join(",");
        where_clause.push(format!("status IN ({statuses})"));
    }
    builder.push(" ORDER BY created_at ASC");
    trace!("🗃️ Executing query: {}", builder.sql());
    let orders = builder.build_query_as::<Order>().fetch_all(&mut *conn).await?;
    trace!("🗃️ Result of fetch_orders: {:?}", orders.len());
    Ok(orders)
}
