use sqlx::SqliteConnection;
use uuid::Uuid;

use crate::{
    db::{sqlite::SqliteDatabaseError, traits::CreateFeedbackResult},
    db_types::{Feedback, NewFeedback, OrderStatus},
};

const FEEDBACK_COLUMNS: &str = "id, order_id, user_id, content, created_at, updated_at";

/// The feedback gate. Not atomic on its own; the caller embeds it in a transaction and passes
/// `&mut *tx` as the connection argument.
///
/// The COMPLETED → FEEDBACKSENT flip is conditional on the order id, the author and the current
/// status all matching; if it affects zero rows no feedback is inserted.
pub async fn create_feedback(
    feedback: NewFeedback,
    conn: &mut SqliteConnection,
) -> Result<CreateFeedbackResult, SqliteDatabaseError> {
    let res = sqlx::query(
        "UPDATE orders SET status = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ? AND user_id = ? AND status = ?",
    )
    .bind(OrderStatus::FeedbackSent)
    .bind(feedback.order_id)
    .bind(feedback.user_id)
    .bind(OrderStatus::Completed)
    .execute(&mut *conn)
    .await?;
    if res.rows_affected() == 0 {
        return Ok(CreateFeedbackResult::OrderNotFound);
    }
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO feedbacks (id, order_id, user_id, content) VALUES (?, ?, ?, ?)")
        .bind(id)
        .bind(feedback.order_id)
        .bind(feedback.user_id)
        .bind(&feedback.content)
        .execute(&mut *conn)
        .await?;
    let feedback = feedback_by_id(id, conn)
        .await?
        .ok_or_else(|| SqliteDatabaseError::QueryError(format!("Feedback {id} vanished after insert")))?;
    Ok(CreateFeedbackResult::Created(feedback))
}

/// Soft delete, scoped to feedback on FEEDBACKSENT orders under canteens owned by
/// `canteen_owner`.
pub async fn soft_delete_feedback(
    feedback_id: Uuid,
    canteen_owner: Uuid,
    conn: &mut SqliteConnection,
) -> Result<bool, SqliteDatabaseError> {
    let res = sqlx::query(
        "UPDATE feedbacks SET deleted_at = CURRENT_TIMESTAMP, updated_at = CURRENT_TIMESTAMP \
         WHERE id = ? AND deleted_at IS NULL \
         AND order_id IN ( \
             SELECT o.id FROM orders o \
             INNER JOIN canteens c ON o.canteen_id = c.id \
             WHERE c.user_id = ? AND c.deleted_at IS NULL AND o.status = ? \
         )",
    )
    .bind(feedback_id)
    .bind(canteen_owner)
    .bind(OrderStatus::FeedbackSent)
    .execute(&mut *conn)
    .await?;
    Ok(res.rows_affected() > 0)
}

pub async fn feedback_by_id(feedback_id: Uuid, conn: &mut SqliteConnection) -> Result<Option<Feedback>, SqliteDatabaseError> {
    let feedback =
        sqlx::query_as::<_, Feedback>(&format!("SELECT {FEEDBACK_COLUMNS} FROM feedbacks WHERE id = ? AND deleted_at IS NULL"))
            .bind(feedback_id)
            .fetch_optional(&mut *conn)
            .await?;
    Ok(feedback)
}
