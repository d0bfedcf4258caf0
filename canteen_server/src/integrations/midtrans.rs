//! Glue between the engine's [`PaymentGateway`] seam and the Midtrans Snap client.

use canteen_engine::traits::{GatewayCustomer, GatewayTransaction, PaymentGateway};
use ccs_common::Rupiah;
use midtrans_tools::{CustomerDetails, MidtransApi, MidtransApiError, MidtransConfig, SnapRequest};
use uuid::Uuid;

#[derive(Clone)]
pub struct MidtransGateway {
    api: MidtransApi,
}

impl MidtransGateway {
    pub fn new(config: MidtransConfig) -> Result<Self, MidtransApiError> {
        let api = MidtransApi::new(config)?;
        Ok(Self { api })
    }
}

impl PaymentGateway for MidtransGateway {
    type Error = MidtransApiError;

    async fn create_transaction(
        &self,
        reference: Uuid,
        gross_amount: Rupiah,
        customer: GatewayCustomer,
    ) -> Result<GatewayTransaction, Self::Error> {
        let customer = CustomerDetails { first_name: Some(customer.first_name), email: Some(customer.email) };
        let request = SnapRequest::new(reference.to_string(), gross_amount, customer);
        let transaction = self.api.create_transaction(&request).await?;
        Ok(GatewayTransaction { token: transaction.token, redirect_url: transaction.redirect_url })
    }
}
