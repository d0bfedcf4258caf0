use ccs_common::Secret;
use log::*;

pub const MIDTRANS_SANDBOX_URL: &str = "https://app.sandbox.midtrans.com";

#[derive(Debug, Clone, Default)]
pub struct MidtransConfig {
    /// Base URL of the Snap API, without a trailing slash. Defaults to the sandbox environment.
    pub base_url: String,
    /// The merchant server key. Doubles as the basic-auth username on Snap calls and as the
    /// signing key for callback signatures.
    pub server_key: Secret<String>,
}

impl MidtransConfig {
    pub fn new_from_env_or_default() -> Self {
        let base_url = std::env::var("CCS_MIDTRANS_BASE_URL").unwrap_or_else(|_| {
            warn!("CCS_MIDTRANS_BASE_URL not set, using the sandbox environment");
            MIDTRANS_SANDBOX_URL.to_string()
        });
        let server_key = Secret::new(std::env::var("CCS_MIDTRANS_SERVER_KEY").unwrap_or_else(|_| {
            warn!("CCS_MIDTRANS_SERVER_KEY not set, using (probably useless) default");
            "SB-Mid-server-00000000000000".to_string()
        }));
        Self { base_url, server_key }
    }
}
