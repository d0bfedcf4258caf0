use serde::{Deserialize, Serialize};

use crate::db_types::Order;

/// Emitted after the stock ledger accepts an order. The stock decrement has already been
/// committed when subscribers see this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreatedEvent {
    pub order: Order,
}

impl OrderCreatedEvent {
    pub fn new(order: Order) -> Self {
        Self { order }
    }
}

/// Emitted after a verified gateway callback moves an order to PAID. Not emitted for replays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPaidEvent {
    pub order: Order,
}

impl OrderPaidEvent {
    pub fn new(order: Order) -> Self {
        Self { order }
    }
}
