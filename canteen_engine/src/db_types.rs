use std::{fmt::Display, str::FromStr};

use ccs_common::Rupiah;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct ConversionError(String);

//--------------------------------------        Role        ----------------------------------------------------------
/// The closed set of roles a user account can hold. Stored as the uppercase strings used by the
/// HTTP clients ("ADMIN", "CANTEEN", "USER").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Back-office operator. May manage menus on any canteen.
    Admin,
    /// A canteen owner. May manage their own canteens, menus and order fulfilment.
    Canteen,
    /// A regular customer. Places orders, pays for them and leaves feedback.
    User,
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "ADMIN"),
            Role::Canteen => write!(f, "CANTEEN"),
            Role::User => write!(f, "USER"),
        }
    }
}

impl FromStr for Role {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Self::Admin),
            "CANTEEN" => Ok(Self::Canteen),
            "USER" => Ok(Self::User),
            s => Err(ConversionError(format!("Invalid role: {s}"))),
        }
    }
}

//--------------------------------------     OrderStatus     ---------------------------------------------------------
/// The order lifecycle. Transitions only ever move forward:
///
/// ```text
/// UNPAID → PAID → COOKING → COMPLETED → FEEDBACKSENT
/// ```
///
/// `Unpaid → Paid` is driven by a verified gateway callback, `Paid → Cooking` and
/// `Cooking → Completed` by the canteen owner, and `Completed → FeedbackSent` by feedback
/// creation. There are no reverse edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    /// Newly created; no verified payment yet.
    Unpaid,
    /// The payment gateway confirmed settlement.
    Paid,
    /// The canteen has started preparing the order.
    Cooking,
    /// Ready and handed over; the customer may now leave feedback.
    Completed,
    /// Terminal. Feedback has been recorded for this order.
    FeedbackSent,
}

impl OrderStatus {
    /// The status an order must currently hold for a forward transition into `self`.
    /// `Unpaid` is the initial status and has no predecessor.
    pub fn preceding(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Unpaid => None,
            OrderStatus::Paid => Some(OrderStatus::Unpaid),
            OrderStatus::Cooking => Some(OrderStatus::Paid),
            OrderStatus::Completed => Some(OrderStatus::Cooking),
            OrderStatus::FeedbackSent => Some(OrderStatus::Completed),
        }
    }

    /// True for the edges a canteen owner may trigger via the update-order call.
    /// The remaining edges belong to the system (payment callback, feedback gate).
    pub fn is_owner_transition(self) -> bool {
        matches!(self, OrderStatus::Cooking | OrderStatus::Completed)
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Unpaid => write!(f, "UNPAID"),
            OrderStatus::Paid => write!(f, "PAID"),
            OrderStatus::Cooking => write!(f, "COOKING"),
            OrderStatus::Completed => write!(f, "COMPLETED"),
            OrderStatus::FeedbackSent => write!(f, "FEEDBACKSENT"),
        }
    }
}

impl FromStr for OrderStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UNPAID" => Ok(Self::Unpaid),
            "PAID" => Ok(Self::Paid),
            "COOKING" => Ok(Self::Cooking),
            "COMPLETED" => Ok(Self::Completed),
            "FEEDBACKSENT" => Ok(Self::FeedbackSent),
            s => Err(ConversionError(format!("Invalid order status: {s}"))),
        }
    }
}

//--------------------------------------        User        ----------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------      Canteen       ----------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Canteen {
    pub id: Uuid,
    /// The owning vendor account. Ownership of menus, orders and feedback chains up through this.
    pub user_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCanteen {
    pub user_id: Uuid,
    pub name: String,
}

/// The trimmed row returned by the public canteen listing.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CanteenListEntry {
    pub id: Uuid,
    pub name: String,
}

//--------------------------------------        Menu        ----------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Menu {
    pub id: Uuid,
    pub canteen_id: Uuid,
    pub name: String,
    pub price: Rupiah,
    pub stock: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewMenu {
    pub canteen_id: Uuid,
    pub name: String,
    pub price: Rupiah,
    pub stock: i64,
}

/// Partial update for a menu row. Only the listed fields may change; stock adjustments through
/// this path are absolute (restocking), not relative.
#[derive(Debug, Clone, Default)]
pub struct MenuUpdate {
    pub name: Option<String>,
    pub price: Option<Rupiah>,
    pub stock: Option<i64>,
}

impl MenuUpdate {
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_price(mut self, price: Rupiah) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = Some(stock);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.stock.is_none()
    }
}

//--------------------------------------        Order       ----------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    /// Copied from the menu row at creation time, never taken from the caller.
    pub canteen_id: Uuid,
    pub user_id: Uuid,
    pub menu_id: Uuid,
    pub quantity: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: Uuid,
    pub menu_id: Uuid,
    pub quantity: i64,
}

impl NewOrder {
    pub fn new(user_id: Uuid, menu_id: Uuid, quantity: i64) -> Self {
        Self { user_id, menu_id, quantity }
    }
}

//--------------------------------------      Payment       ----------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Payment {
    /// Independently generated. This id, not the order id, is the gateway-facing order reference.
    pub id: Uuid,
    pub order_id: Uuid,
    pub user_id: Uuid,
    pub price: Rupiah,
    pub redirect_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPayment {
    pub id: Uuid,
    pub order_id: Uuid,
    pub user_id: Uuid,
    pub price: Rupiah,
    pub redirect_url: String,
}

//--------------------------------------      Feedback      ----------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Feedback {
    pub id: Uuid,
    pub order_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub order_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
}
