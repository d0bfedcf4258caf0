//! # Gateway callback signatures
//!
//! The payment gateway's notification endpoint is unauthenticated by design — the caller is the
//! gateway, not an end user — so the *only* thing establishing a callback's authenticity is its
//! signature. The gateway signs each notification by hashing the concatenation
//!
//! ```text
//!     {order_id}{status_code}{gross_amount}{server_key}
//! ```
//!
//! with SHA-512 and hex-encoding the digest (lowercase). `gross_amount` participates verbatim as
//! the string the gateway sent (`"15000.00"`); parsing it into a number before verification
//! would change the signed bytes.
//!
//! Because this check is the trust boundary, the comparison against the provided signature runs
//! in constant time.

use ccs_common::Secret;
use sha2::{Digest, Sha512};
use subtle::ConstantTimeEq;
use thiserror::Error;

use crate::api::payment_objects::PaymentNotification;

#[derive(Debug, Clone, Error)]
#[error("Invalid callback signature: {0}")]
pub struct CallbackSignatureError(String);

/// The expected signature for a callback with the given fields, as lowercase hex.
pub fn calculate_signature(order_id: &str, status_code: &str, gross_amount: &str, server_key: &str) -> String {
    let mut hasher = Sha512::new();
    hasher.update(order_id.as_bytes());
    hasher.update(status_code.as_bytes());
    hasher.update(gross_amount.as_bytes());
    hasher.update(server_key.as_bytes());
    hex::encode(hasher.finalize())
}

/// Verifies the signature on a gateway callback. Returns an error on any mismatch; callers must
/// not mutate any state when this fails.
pub fn verify_callback_signature(
    callback: &PaymentNotification,
    server_key: &Secret<String>,
) -> Result<(), CallbackSignatureError> {
    let expected = calculate_signature(
        &callback.order_id,
        &callback.status_code,
        &callback.gross_amount,
        server_key.reveal(),
    );
    let provided = callback.signature_key.as_bytes();
    if provided.len() != expected.len() {
        return Err(CallbackSignatureError("signature length mismatch".into()));
    }
    if bool::from(expected.as_bytes().ct_eq(provided)) {
        Ok(())
    } else {
        Err(CallbackSignatureError("signature does not match payload".into()))
    }
}
