//! # Campus Canteen Engine
//!
//! The canteen engine holds the core logic of the campus canteen ordering service: the stock
//! ledger, the order state machine, payment reconciliation and the feedback gate. It is
//! HTTP-agnostic; the server crate wires it to actix-web.
//!
//! The library is divided into two main sections:
//! 1. Database management and control ([`mod@db`]). Sqlite is the supported backend. You should
//!    never need to access the database directly — use the public API instead. The exception is
//!    the data types stored in the database, which are defined in [`db_types`] and are public.
//! 2. The engine public API ([`mod@api`]). Each API is generic over the backend traits it needs,
//!    so storage backends (and test mocks) plug in at the seams defined in [`traits`].
//!
//! The engine also emits events (order created, order paid) through a small hook system in
//! [`events`], so deployments can attach async side effects without touching the request path.
pub mod api;
pub mod cache;
pub mod db;
pub mod db_types;
pub mod events;
pub mod helpers;

#[cfg(feature = "sqlite")]
pub use db::sqlite::{SqliteDatabase, SqliteDatabaseError};
pub use api::{
    canteen_api::CanteenApi,
    errors::{CanteenApiError, FeedbackApiError, OrderFlowError, PaymentApiError, UserApiError},
    feedback_api::FeedbackApi,
    order_flow_api::OrderFlowApi,
    order_objects,
    payment_api::PaymentApi,
    payment_objects,
    user_api::UserApi,
};
pub use db::traits;
