//! # Database backend contracts.
//!
//! This module defines the interface contracts that storage backends must implement to support
//! the canteen engine. The relational store is the single source of truth and the sole point of
//! mutual exclusion: every contract that guards an invariant (stock, status transitions, the
//! feedback gate) is expressed as a *conditional* write whose outcome reports whether the guard
//! held, so that callers never need a read-check-write cycle of their own.
//!
//! * [`OrderManagement`] covers the order flow: the atomic stock check-and-decrement, forward
//!   status transitions and order queries.
//! * [`MenuManagement`] and [`CanteenManagement`] cover vendor-side catalogue maintenance.
//! * [`PaymentManagement`] persists gateway transaction records.
//! * [`FeedbackManagement`] implements the feedback gate.
//! * [`UserStore`] and [`UserCache`] provide the (read-only) user lookup surface and its
//!   cache-aside accelerant.
//! * [`PaymentGateway`] abstracts the external payment provider.
mod canteen_management;
mod feedback_management;
mod menu_management;
mod order_management;
mod payment_gateway;
mod payment_management;
mod user_store;

mod data_objects;

pub use canteen_management::CanteenManagement;
pub use data_objects::{
    CreateFeedbackResult,
    CreateOrderResult,
    GatewayCustomer,
    GatewayTransaction,
    MarkPaidResult,
    UpdateOrderResult,
};
pub use feedback_management::FeedbackManagement;
pub use menu_management::MenuManagement;
pub use order_management::OrderManagement;
pub use payment_gateway::PaymentGateway;
pub use payment_management::PaymentManagement;
pub use user_store::{UserCache, UserStore};
