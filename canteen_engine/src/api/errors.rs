use thiserror::Error;
use uuid::Uuid;

use crate::db_types::OrderStatus;

#[derive(Debug, Clone, Error)]
pub enum OrderFlowError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Order quantity must be at least 1, got {0}")]
    InvalidQuantity(i64),
    #[error("Menu {0} not found")]
    MenuNotFound(Uuid),
    #[error("Insufficient stock on menu {menu_id}: requested {requested}, available {available}")]
    InsufficientStock { menu_id: Uuid, requested: i64, available: i64 },
    #[error("Order {0} not found")]
    OrderNotFound(Uuid),
    #[error("Orders cannot be moved to {0} by this call")]
    InvalidStatusTransition(OrderStatus),
}

#[derive(Debug, Clone, Error)]
pub enum PaymentApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Order {0} not found")]
    OrderNotFound(Uuid),
    #[error("Order {order_id} is {status}, only UNPAID orders can be paid for")]
    OrderNotPayable { order_id: Uuid, status: OrderStatus },
    #[error("The callback signature does not match the payload")]
    SignatureInvalid,
    #[error("Malformed gateway callback: {0}")]
    MalformedCallback(String),
    #[error("Payment gateway error: {0}")]
    GatewayError(String),
}

#[derive(Debug, Clone, Error)]
pub enum FeedbackApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Order {0} not found")]
    OrderNotFound(Uuid),
    #[error("Feedback {0} not found")]
    FeedbackNotFound(Uuid),
}

#[derive(Debug, Clone, Error)]
pub enum CanteenApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Canteen {0} not found")]
    CanteenNotFound(Uuid),
    #[error("Menu {0} not found")]
    MenuNotFound(Uuid),
}

#[derive(Debug, Clone, Error)]
pub enum UserApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("User {0} not found")]
    UserNotFound(Uuid),
}
