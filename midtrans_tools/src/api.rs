use std::sync::Arc;

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
};

use crate::{MidtransApiError, MidtransConfig, SnapRequest, SnapTransaction};

#[derive(Clone)]
pub struct MidtransApi {
    config: MidtransConfig,
    client: Arc<Client>,
}

impl MidtransApi {
    pub fn new(config: MidtransConfig) -> Result<Self, MidtransApiError> {
        let mut headers = HeaderMap::with_capacity(2);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| MidtransApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }

    /// Opens a Snap transaction. The server key is the basic-auth username with an empty
    /// password, per the Midtrans API contract.
    pub async fn create_transaction(&self, request: &SnapRequest) -> Result<SnapTransaction, MidtransApiError> {
        let url = self.url("/snap/v1/transactions");
        trace!("Sending Snap transaction request for [{}]", request.transaction_details.order_id);
        let response = self
            .client
            .post(url)
            .basic_auth(self.config.server_key.reveal(), Some(""))
            .json(request)
            .send()
            .await
            .map_err(|e| MidtransApiError::RestResponseError(e.to_string()))?;
        if response.status().is_success() {
            let transaction =
                response.json::<SnapTransaction>().await.map_err(|e| MidtransApiError::JsonError(e.to_string()))?;
            debug!("Snap transaction open for [{}]", request.transaction_details.order_id);
            Ok(transaction)
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| MidtransApiError::RestResponseError(e.to_string()))?;
            Err(MidtransApiError::QueryError { status, message })
        }
    }
}
