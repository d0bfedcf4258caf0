use std::fmt::Debug;

use log::debug;
use uuid::Uuid;

use crate::{
    api::errors::FeedbackApiError,
    db::traits::{CreateFeedbackResult, FeedbackManagement},
    db_types::{Feedback, NewFeedback},
};

/// `FeedbackApi` gates feedback creation on completed orders and lets canteen owners moderate
/// feedback left on their canteens.
pub struct FeedbackApi<B> {
    db: B,
}

impl<B> Debug for FeedbackApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FeedbackApi")
    }
}

impl<B> FeedbackApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> FeedbackApi<B>
where B: FeedbackManagement
{
    /// Records feedback for an order the author owns that has reached `COMPLETED`, flipping the
    /// order to `FEEDBACKSENT` in the same transaction. Wrong owner, wrong status and a missing
    /// order are indistinguishable: all fail with [`FeedbackApiError::OrderNotFound`] and no
    /// feedback row is created.
    pub async fn create_feedback(&self, feedback: NewFeedback) -> Result<Feedback, FeedbackApiError> {
        let order_id = feedback.order_id;
        let result =
            self.db.create_feedback(feedback).await.map_err(|e| FeedbackApiError::DatabaseError(e.to_string()))?;
        match result {
            CreateFeedbackResult::Created(feedback) => {
                debug!("🔄️📝️ Feedback {} recorded; order {order_id} is now FEEDBACKSENT", feedback.id);
                Ok(feedback)
            },
            CreateFeedbackResult::OrderNotFound => Err(FeedbackApiError::OrderNotFound(order_id)),
        }
    }

    /// Soft-deletes feedback under a canteen owned by `acting_user_id`.
    pub async fn delete_feedback(&self, feedback_id: Uuid, acting_user_id: Uuid) -> Result<(), FeedbackApiError> {
        let deleted = self
            .db
            .soft_delete_feedback(feedback_id, acting_user_id)
            .await
            .map_err(|e| FeedbackApiError::DatabaseError(e.to_string()))?;
        if deleted {
            debug!("🔄️📝️ Feedback {feedback_id} soft-deleted by {acting_user_id}");
            Ok(())
        } else {
            Err(FeedbackApiError::FeedbackNotFound(feedback_id))
        }
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}
