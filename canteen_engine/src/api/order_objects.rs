use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db_types::{Order, OrderStatus};

/// Filter criteria for order queries. An empty filter matches every order, so callers building
/// user-facing listings always scope by user or canteen.
#[derive(Debug, Clone, Default)]
pub struct OrderQueryFilter {
    pub user_id: Option<Uuid>,
    pub canteen_id: Option<Uuid>,
    pub statuses: Vec<OrderStatus>,
}

impl OrderQueryFilter {
    pub fn with_user_id(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_canteen_id(mut self, canteen_id: Uuid) -> Self {
        self.canteen_id = Some(canteen_id);
        self
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.statuses.push(status);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.user_id.is_none() && self.canteen_id.is_none() && self.statuses.is_empty()
    }
}

/// An order listing as returned to HTTP clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResult {
    pub user_id: Uuid,
    pub total_orders: usize,
    pub orders: Vec<Order>,
}
