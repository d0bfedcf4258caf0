//! # Campus canteen server
//! This crate hosts the REST surface of the campus canteen ordering service. It is responsible
//! for request parsing and validation, bearer-token authentication and role checks, and wiring
//! the canteen engine's APIs to actix-web routes.
//!
//! ## Configuration
//! The server is configured via `CCS_*` environment variables. See [config](config/index.html)
//! for more information.
//!
//! ## Routes
//! All business routes live under `/canteen`. The `/payment/notification` route is the payment
//! gateway's callback endpoint and is deliberately unauthenticated: authenticity is established
//! by the callback signature, not by a bearer token.

pub mod auth;
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod integrations;
pub mod middleware;
pub mod payment_routes;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
