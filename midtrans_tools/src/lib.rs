//! # Midtrans Snap client
//!
//! A thin client for the Midtrans Snap API, used to open payment transactions. The gateway
//! answers with a Snap token and a redirect URL; settlement is confirmed later through a signed
//! callback, which the engine verifies — callbacks never pass through this crate.

mod api;
mod config;
pub mod data_objects;
mod error;

pub use api::MidtransApi;
pub use config::MidtransConfig;
pub use data_objects::{CustomerDetails, SnapRequest, SnapTransaction, TransactionDetails};
pub use error::MidtransApiError;
