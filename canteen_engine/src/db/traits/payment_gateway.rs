use ccs_common::Rupiah;
use uuid::Uuid;

use crate::db::traits::{GatewayCustomer, GatewayTransaction};

/// The external payment provider, as consumed by the engine.
///
/// `reference` is the gateway-facing order identifier — the *payment* id, which is generated
/// fresh for every create-payment call and is distinct from the domain order id. The provider
/// later confirms the outcome asynchronously through a signed callback; callback verification
/// does not go through this trait.
#[allow(async_fn_in_trait)]
pub trait PaymentGateway {
    type Error: std::error::Error;

    async fn create_transaction(
        &self,
        reference: Uuid,
        gross_amount: Rupiah,
        customer: GatewayCustomer,
    ) -> Result<GatewayTransaction, Self::Error>;
}
