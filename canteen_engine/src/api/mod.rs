//! # Canteen engine public API
//!
//! The `api` module exposes the programmatic API of the canteen engine. The API is modular:
//! clients pick the pieces they need, and each piece is generic over the backend traits it
//! requires, so different deployments can wire different storage backends (or mocks, in tests).
//!
//! * [`order_flow_api`] handles the order lifecycle: stock-guarded creation and the forward-only
//!   status transitions.
//! * [`payment_api`] opens gateway transactions and reconciles signed gateway callbacks.
//! * [`feedback_api`] implements the feedback gate on completed orders.
//! * [`canteen_api`] covers canteen and menu maintenance.
//! * [`user_api`] provides cache-aside user lookups.
//!
//! The pattern for using all the APIs is the same: construct the API with a backend that
//! implements the traits the API is bounded on.
//!
//! ```rust,ignore
//! use canteen_engine::{OrderFlowApi, SqliteDatabase};
//! let db = SqliteDatabase::new_with_url("sqlite://data/canteen_store.db", 25).await?;
//! let api = OrderFlowApi::new(db, producers);
//! let order = api.create_order(new_order).await?;
//! ```

pub mod canteen_api;
pub mod errors;
pub mod feedback_api;
pub mod order_flow_api;
pub mod order_objects;
pub mod payment_api;
pub mod payment_objects;
pub mod user_api;
