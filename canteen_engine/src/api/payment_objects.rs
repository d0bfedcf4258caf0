use serde::{Deserialize, Serialize};

use crate::db_types::Order;

/// The asynchronous notification the payment gateway posts after a transaction settles.
///
/// `order_id` is the gateway-facing order reference, i.e. the *payment* id generated at
/// create-payment time. `gross_amount` arrives as a string with a two-digit fraction
/// (`"15000.00"`) and participates verbatim in the signature, so it is never parsed into a
/// number before verification. The signature is the hex-encoded SHA-512 of
/// `order_id ‖ status_code ‖ gross_amount ‖ server_key`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentNotification {
    pub order_id: String,
    pub status_code: String,
    pub gross_amount: String,
    pub transaction_status: String,
    pub signature_key: String,
}

/// Result of reconciling a verified callback.
#[derive(Debug, Clone)]
pub enum PaymentOutcome {
    /// The linked order moved UNPAID → PAID.
    Paid(Order),
    /// Replay of an already-settled callback; nothing changed.
    AlreadyPaid(Order),
    /// A non-settlement status (pending, deny, cancel, expire). Logged and ignored.
    Ignored(String),
}

/// Transaction statuses that settle a payment. Everything else leaves the order untouched.
pub fn is_settlement_status(status: &str) -> bool {
    matches!(status, "settlement" | "capture")
}
