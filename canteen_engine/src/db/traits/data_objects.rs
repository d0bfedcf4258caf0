use serde::{Deserialize, Serialize};

use crate::db_types::{Feedback, Order};

/// Outcome of the atomic stock check-and-decrement plus order insert.
///
/// Exactly one of {order inserted + stock decremented} or {nothing changed} happened; no partial
/// state is ever observable.
#[derive(Debug, Clone)]
pub enum CreateOrderResult {
    Created(Order),
    /// The menu does not exist, or has been soft-deleted.
    MenuNotFound,
    /// The conditional decrement affected zero rows.
    InsufficientStock { available: i64 },
}

/// Outcome of an ownership-scoped conditional status update. `NotFound` covers both "no such
/// order" and "order not under a canteen owned by the caller" — the two are deliberately not
/// distinguishable.
#[derive(Debug, Clone)]
pub enum UpdateOrderResult {
    Updated(Order),
    NotFound,
}

/// Outcome of reconciling a verified gateway callback against the order linked to a payment.
#[derive(Debug, Clone)]
pub enum MarkPaidResult {
    /// The order moved UNPAID → PAID.
    Paid(Order),
    /// The order had already left UNPAID; a replayed callback lands here.
    AlreadyPaid(Order),
    /// No payment with that id, or no order linked to it.
    NotFound,
}

/// Outcome of the feedback gate. `OrderNotFound` covers a missing order, an order owned by
/// someone else, and an order that has not reached COMPLETED.
#[derive(Debug, Clone)]
pub enum CreateFeedbackResult {
    Created(Feedback),
    OrderNotFound,
}

//--------------------------------------   Gateway objects   ---------------------------------------------------------
/// Customer details forwarded to the payment provider when opening a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayCustomer {
    pub first_name: String,
    pub email: String,
}

/// An open transaction at the payment provider: the Snap token and the page the customer is
/// redirected to in order to complete payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayTransaction {
    pub token: String,
    pub redirect_url: String,
}
