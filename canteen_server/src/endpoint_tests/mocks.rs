use canteen_engine::{
    order_objects::OrderQueryFilter,
    traits::{
        CanteenManagement,
        CreateFeedbackResult,
        CreateOrderResult,
        FeedbackManagement,
        MarkPaidResult,
        MenuManagement,
        OrderManagement,
        PaymentManagement,
        UpdateOrderResult,
    },
    db_types::{
        Canteen,
        CanteenListEntry,
        Feedback,
        Menu,
        MenuUpdate,
        NewCanteen,
        NewFeedback,
        NewMenu,
        NewOrder,
        NewPayment,
        Order,
        OrderStatus,
        Payment,
    },
};
use ccs_common::Rupiah;
use mockall::mock;
use uuid::Uuid;

#[derive(Debug, Clone, thiserror::Error)]
#[error("mock database error: {0}")]
pub struct MockDbError(pub String);

mock! {
    pub OrderBackend {}
    impl OrderManagement for OrderBackend {
        type Error = MockDbError;
        async fn create_order(&self, order: NewOrder) -> Result<CreateOrderResult, MockDbError>;
        async fn advance_order_for_owner(
            &self,
            order_id: Uuid,
            expected: OrderStatus,
            new_status: OrderStatus,
            owner_id: Uuid,
        ) -> Result<UpdateOrderResult, MockDbError>;
        async fn mark_order_paid(&self, payment_id: Uuid) -> Result<MarkPaidResult, MockDbError>;
        async fn order_by_id(&self, order_id: Uuid) -> Result<Option<Order>, MockDbError>;
        async fn fetch_orders(&self, query: OrderQueryFilter) -> Result<Vec<Order>, MockDbError>;
    }
}

mock! {
    pub PaymentBackend {}
    impl OrderManagement for PaymentBackend {
        type Error = MockDbError;
        async fn create_order(&self, order: NewOrder) -> Result<CreateOrderResult, MockDbError>;
        async fn advance_order_for_owner(
            &self,
            order_id: Uuid,
            expected: OrderStatus,
            new_status: OrderStatus,
            owner_id: Uuid,
        ) -> Result<UpdateOrderResult, MockDbError>;
        async fn mark_order_paid(&self, payment_id: Uuid) -> Result<MarkPaidResult, MockDbError>;
        async fn order_by_id(&self, order_id: Uuid) -> Result<Option<Order>, MockDbError>;
        async fn fetch_orders(&self, query: OrderQueryFilter) -> Result<Vec<Order>, MockDbError>;
    }
    impl PaymentManagement for PaymentBackend {
        type Error = MockDbError;
        async fn insert_payment(&self, payment: NewPayment) -> Result<Payment, MockDbError>;
        async fn payment_by_id(&self, payment_id: Uuid) -> Result<Option<Payment>, MockDbError>;
    }
    impl MenuManagement for PaymentBackend {
        type Error = MockDbError;
        async fn insert_menu(&self, menu: NewMenu, owner: Option<Uuid>) -> Result<Option<Menu>, MockDbError>;
        async fn update_menu(&self, menu_id: Uuid, update: MenuUpdate, owner: Option<Uuid>) -> Result<Option<Menu>, MockDbError>;
        async fn soft_delete_menu(&self, menu_id: Uuid, owner: Option<Uuid>) -> Result<bool, MockDbError>;
        async fn menu_by_id(&self, menu_id: Uuid) -> Result<Option<Menu>, MockDbError>;
        async fn menu_price(&self, menu_id: Uuid) -> Result<Option<Rupiah>, MockDbError>;
    }
}

mock! {
    pub FeedbackBackend {}
    impl FeedbackManagement for FeedbackBackend {
        type Error = MockDbError;
        async fn create_feedback(&self, feedback: NewFeedback) -> Result<CreateFeedbackResult, MockDbError>;
        async fn soft_delete_feedback(&self, feedback_id: Uuid, canteen_owner: Uuid) -> Result<bool, MockDbError>;
        async fn feedback_by_id(&self, feedback_id: Uuid) -> Result<Option<Feedback>, MockDbError>;
    }
}

mock! {
    pub CanteenBackend {}
    impl CanteenManagement for CanteenBackend {
        type Error = MockDbError;
        async fn insert_canteen(&self, canteen: NewCanteen) -> Result<Canteen, MockDbError>;
        async fn canteen_by_id(&self, canteen_id: Uuid) -> Result<Option<Canteen>, MockDbError>;
        async fn fetch_canteens(&self) -> Result<Vec<CanteenListEntry>, MockDbError>;
    }
    impl MenuManagement for CanteenBackend {
        type Error = MockDbError;
        async fn insert_menu(&self, menu: NewMenu, owner: Option<Uuid>) -> Result<Option<Menu>, MockDbError>;
        async fn update_menu(&self, menu_id: Uuid, update: MenuUpdate, owner: Option<Uuid>) -> Result<Option<Menu>, MockDbError>;
        async fn soft_delete_menu(&self, menu_id: Uuid, owner: Option<Uuid>) -> Result<bool, MockDbError>;
        async fn menu_by_id(&self, menu_id: Uuid) -> Result<Option<Menu>, MockDbError>;
        async fn menu_price(&self, menu_id: Uuid) -> Result<Option<Rupiah>, MockDbError>;
    }
}
