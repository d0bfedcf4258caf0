use uuid::Uuid;

use crate::db_types::{NewPayment, Payment};

/// Backend contract for payment records. Payments are written once when a gateway transaction is
/// opened and are immutable thereafter.
#[allow(async_fn_in_trait)]
pub trait PaymentManagement {
    type Error: std::error::Error;

    async fn insert_payment(&self, payment: NewPayment) -> Result<Payment, Self::Error>;

    async fn payment_by_id(&self, payment_id: Uuid) -> Result<Option<Payment>, Self::Error>;
}
