use uuid::Uuid;

use crate::{
    db::traits::CreateFeedbackResult,
    db_types::{Feedback, NewFeedback},
};

/// Backend contract for the feedback gate.
#[allow(async_fn_in_trait)]
pub trait FeedbackManagement {
    type Error: std::error::Error;

    /// In a single transaction, flips the order `COMPLETED → FEEDBACKSENT` — conditional on the
    /// order existing, belonging to the feedback author, and currently being `COMPLETED` — and
    /// inserts the feedback row. If the conditional flip affects zero rows, nothing is inserted
    /// and [`CreateFeedbackResult::OrderNotFound`] is returned.
    async fn create_feedback(&self, feedback: NewFeedback) -> Result<CreateFeedbackResult, Self::Error>;

    /// Soft-deletes a feedback entry. Permitted only when the feedback's order belongs to a
    /// canteen owned by `canteen_owner` and the order has reached `FEEDBACKSENT`. Returns
    /// `false` on the zero-rows outcome.
    async fn soft_delete_feedback(&self, feedback_id: Uuid, canteen_owner: Uuid) -> Result<bool, Self::Error>;

    /// Fetches a feedback entry that has not been soft-deleted.
    async fn feedback_by_id(&self, feedback_id: Uuid) -> Result<Option<Feedback>, Self::Error>;
}
