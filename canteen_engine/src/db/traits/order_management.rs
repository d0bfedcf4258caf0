use uuid::Uuid;

use crate::{
    api::order_objects::OrderQueryFilter,
    db::traits::{CreateOrderResult, MarkPaidResult, UpdateOrderResult},
    db_types::{NewOrder, Order, OrderStatus},
};

/// Backend contract for the order flow: stock-guarded creation, forward status transitions and
/// queries.
#[allow(async_fn_in_trait)]
pub trait OrderManagement {
    type Error: std::error::Error;

    /// Takes a new order, and in a single atomic transaction,
    /// * verifies that the referenced menu exists and is not soft-deleted,
    /// * decrements the menu stock by the order quantity, *conditional* on `stock >= quantity`
    ///   (`UPDATE menus SET stock = stock - :q WHERE id = :id AND stock >= :q`),
    /// * inserts the order with status `UNPAID` and the canteen id copied from the menu row.
    ///
    /// If the conditional decrement affects zero rows the transaction is rolled back and
    /// [`CreateOrderResult::InsufficientStock`] is returned. Two concurrent calls against the
    /// same menu serialize on the decrement; they must never both succeed when only one has
    /// sufficient stock.
    async fn create_order(&self, order: NewOrder) -> Result<CreateOrderResult, Self::Error>;

    /// Advances an order along a canteen-owner edge of the state machine with a single
    /// conditional update. The WHERE clause pins the expected current status (`expected`) and
    /// scopes ownership with a sub-query joining the order's canteen to `owner_id`. Zero rows
    /// affected is reported as [`UpdateOrderResult::NotFound`], deliberately conflating "absent"
    /// with "not yours".
    async fn advance_order_for_owner(
        &self,
        order_id: Uuid,
        expected: OrderStatus,
        new_status: OrderStatus,
        owner_id: Uuid,
    ) -> Result<UpdateOrderResult, Self::Error>;

    /// Marks the order linked to the given payment id as `PAID`, conditional on it currently
    /// being `UNPAID`. This is the system edge driven by a verified gateway callback; the
    /// payment id is the gateway-facing order reference.
    async fn mark_order_paid(&self, payment_id: Uuid) -> Result<MarkPaidResult, Self::Error>;

    /// Fetches a single order by its primary key. Returns `None` if no such order exists.
    async fn order_by_id(&self, order_id: Uuid) -> Result<Option<Order>, Self::Error>;

    /// Fetches orders matching the filter, ordered by creation time ascending.
    async fn fetch_orders(&self, query: OrderQueryFilter) -> Result<Vec<Order>, Self::Error>;
}
