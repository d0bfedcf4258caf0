use std::fmt::Debug;

use log::*;
use uuid::Uuid;

use crate::{
    api::{errors::OrderFlowError, order_objects::OrderQueryFilter},
    db::traits::{CreateOrderResult, OrderManagement, UpdateOrderResult},
    db_types::{NewOrder, Order, OrderStatus},
    events::{EventProducers, OrderCreatedEvent},
};

/// `OrderFlowApi` is the primary API for the order lifecycle: stock-guarded order creation and
/// the canteen-owner transitions of the state machine.
pub struct OrderFlowApi<B> {
    db: B,
    producers: EventProducers,
}

impl<B> Debug for OrderFlowApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi")
    }
}

impl<B> OrderFlowApi<B> {
    pub fn new(db: B, producers: EventProducers) -> Self {
        Self { db, producers }
    }
}

impl<B> OrderFlowApi<B>
where B: OrderManagement
{
    /// Submit a new order.
    ///
    /// In a single atomic operation the referenced menu's stock is checked against the requested
    /// quantity and decremented, and the order is inserted with status `UNPAID` and the canteen
    /// id copied from the menu. If the stock guard fails, nothing is changed and
    /// [`OrderFlowError::InsufficientStock`] is returned.
    pub async fn create_order(&self, order: NewOrder) -> Result<Order, OrderFlowError> {
        if order.quantity < 1 {
            return Err(OrderFlowError::InvalidQuantity(order.quantity));
        }
        let menu_id = order.menu_id;
        let quantity = order.quantity;
        let result =
            self.db.create_order(order).await.map_err(|e| OrderFlowError::DatabaseError(e.to_string()))?;
        match result {
            CreateOrderResult::Created(order) => {
                debug!("🔄️📦️ Order {} created on menu {menu_id} for {quantity} portion(s)", order.id);
                self.call_order_created_hook(&order).await;
                Ok(order)
            },
            CreateOrderResult::MenuNotFound => Err(OrderFlowError::MenuNotFound(menu_id)),
            CreateOrderResult::InsufficientStock { available } => {
                debug!("🔄️📦️ Rejecting order on menu {menu_id}: requested {quantity}, available {available}");
                Err(OrderFlowError::InsufficientStock { menu_id, requested: quantity, available })
            },
        }
    }

    /// Advances the status of an order on behalf of the canteen owner.
    ///
    /// The state machine only ever moves forward:
    ///
    /// | From      | To           | Actor         |
    /// |-----------|--------------|---------------|
    /// | UNPAID    | PAID         | system (payment callback) |
    /// | PAID      | COOKING      | canteen owner |
    /// | COOKING   | COMPLETED    | canteen owner |
    /// | COMPLETED | FEEDBACKSENT | system (feedback gate) |
    ///
    /// This call accepts only the two canteen-owner edges; requesting any other target status
    /// fails with [`OrderFlowError::InvalidStatusTransition`] and the order is left unchanged.
    /// The ownership check and the current-status check are folded into the backend's
    /// conditional update, and a zero-row result is reported as
    /// [`OrderFlowError::OrderNotFound`] whether the order is absent or simply not under one of
    /// the caller's canteens.
    pub async fn update_order_status(
        &self,
        order_id: Uuid,
        new_status: OrderStatus,
        acting_user_id: Uuid,
    ) -> Result<Order, OrderFlowError> {
        if !new_status.is_owner_transition() {
            return Err(OrderFlowError::InvalidStatusTransition(new_status));
        }
        let Some(expected) = new_status.preceding() else {
            return Err(OrderFlowError::InvalidStatusTransition(new_status));
        };
        let result = self
            .db
            .advance_order_for_owner(order_id, expected, new_status, acting_user_id)
            .await
            .map_err(|e| OrderFlowError::DatabaseError(e.to_string()))?;
        match result {
            UpdateOrderResult::Updated(order) => {
                debug!("🔄️📦️ Order {order_id} advanced {expected} → {new_status}");
                Ok(order)
            },
            UpdateOrderResult::NotFound => Err(OrderFlowError::OrderNotFound(order_id)),
        }
    }

    pub async fn order_by_id(&self, order_id: Uuid) -> Result<Option<Order>, OrderFlowError> {
        self.db.order_by_id(order_id).await.map_err(|e| OrderFlowError::DatabaseError(e.to_string()))
    }

    /// All orders placed by the given user, oldest first.
    pub async fn orders_for_user(&self, user_id: Uuid) -> Result<Vec<Order>, OrderFlowError> {
        let query = OrderQueryFilter::default().with_user_id(user_id);
        self.db.fetch_orders(query).await.map_err(|e| OrderFlowError::DatabaseError(e.to_string()))
    }

    async fn call_order_created_hook(&self, order: &Order) {
        for emitter in &self.producers.order_created_producer {
            trace!("🔄️📦️ Notifying order created hook subscribers");
            let event = OrderCreatedEvent { order: order.clone() };
            emitter.publish_event(event).await;
        }
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}
