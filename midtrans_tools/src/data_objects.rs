use ccs_common::Rupiah;
use serde::{Deserialize, Serialize};

/// The body of a Snap transaction request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapRequest {
    pub transaction_details: TransactionDetails,
    pub customer_details: CustomerDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionDetails {
    /// The merchant-side transaction reference. Must be unique per transaction.
    pub order_id: String,
    /// Gross amount in whole rupiah.
    pub gross_amount: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// An open Snap transaction: the token for the embedded widget flow and the hosted payment page
/// the customer can be redirected to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapTransaction {
    pub token: String,
    pub redirect_url: String,
}

impl SnapRequest {
    pub fn new(order_id: String, gross_amount: Rupiah, customer: CustomerDetails) -> Self {
        Self {
            transaction_details: TransactionDetails { order_id, gross_amount: gross_amount.value() },
            customer_details: customer,
        }
    }
}
