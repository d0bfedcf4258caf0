use std::fmt::Debug;

use ccs_common::Rupiah;
use log::{debug, trace};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::{canteens, db_url, feedback, menus, new_pool, orders, payments, users, SqliteDatabaseError};
use crate::{
    api::order_objects::OrderQueryFilter,
    db::traits::{
        CanteenManagement,
        CreateFeedbackResult,
        CreateOrderResult,
        FeedbackManagement,
        MarkPaidResult,
        MenuManagement,
        OrderManagement,
        PaymentManagement,
        UpdateOrderResult,
        UserStore,
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
        User,
    },
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Creates a new database API object using the URL from the environment.
    pub async fn new(max_connections: u32) -> Result<Self, SqliteDatabaseError> {
        let url = db_url();
        SqliteDatabase::new_with_url(url.as_str(), max_connections).await
    }

    /// Creates a connection pool against `url` and brings the schema up to date.
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, SqliteDatabaseError> {
        trace!("🗃️ Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl OrderManagement for SqliteDatabase {
    type Error = SqliteDatabaseError;

    async fn create_order(&self, order: NewOrder) -> Result<CreateOrderResult, Self::Error> {
        let mut tx = self.pool.begin().await?;
        let result = orders::create_order(order, &mut tx).await?;
        match &result {
            CreateOrderResult::Created(order) => {
                tx.commit().await?;
                debug!("🗃️ Order {} saved. Stock on menu {} reduced by {}", order.id, order.menu_id, order.quantity);
            },
            _ => {
                tx.rollback().await?;
            },
        }
        Ok(result)
    }

    async fn advance_order_for_owner(
        &self,
        order_id: Uuid,
        expected: OrderStatus,
        new_status: OrderStatus,
        owner_id: Uuid,
    ) -> Result<UpdateOrderResult, Self::Error> {
        let mut tx = self.pool.begin().await?;
        let result = orders::advance_order_for_owner(order_id, expected, new_status, owner_id, &mut tx).await?;
        tx.commit().await?;
        Ok(result)
    }

    async fn mark_order_paid(&self, payment_id: Uuid) -> Result<MarkPaidResult, Self::Error> {
        let mut tx = self.pool.begin().await?;
        let result = orders::mark_order_paid(payment_id, &mut tx).await?;
        tx.commit().await?;
        Ok(result)
    }

    async fn order_by_id(&self, order_id: Uuid) -> Result<Option<Order>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        orders::order_by_id(order_id, &mut conn).await
    }

    async fn fetch_orders(&self, query: OrderQueryFilter) -> Result<Vec<Order>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        orders::fetch_orders(query, &mut conn).await
    }
}

impl MenuManagement for SqliteDatabase {
    type Error = SqliteDatabaseError;

    async fn insert_menu(&self, menu: NewMenu, owner: Option<Uuid>) -> Result<Option<Menu>, Self::Error> {
        let mut tx = self.pool.begin().await?;
        let result = menus::insert_menu(menu, owner, &mut tx).await?;
        tx.commit().await?;
        Ok(result)
    }

    async fn update_menu(&self, menu_id: Uuid, update: MenuUpdate, owner: Option<Uuid>) -> Result<Option<Menu>, Self::Error> {
        let mut tx = self.pool.begin().await?;
        let result = menus::update_menu(menu_id, update, owner, &mut tx).await?;
        tx.commit().await?;
        Ok(result)
    }

    async fn soft_delete_menu(&self, menu_id: Uuid, owner: Option<Uuid>) -> Result<bool, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        menus::soft_delete_menu(menu_id, owner, &mut conn).await
    }

    async fn menu_by_id(&self, menu_id: Uuid) -> Result<Option<Menu>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        menus::menu_by_id(menu_id, &mut conn).await
    }

    async fn menu_price(&self, menu_id: Uuid) -> Result<Option<Rupiah>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        menus::price_of(menu_id, &mut conn).await
    }
}

impl CanteenManagement for SqliteDatabase {
    type Error = SqliteDatabaseError;

    async fn insert_canteen(&self, canteen: NewCanteen) -> Result<Canteen, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        canteens::insert_canteen(canteen, &mut conn).await
    }

    async fn canteen_by_id(&self, canteen_id: Uuid) -> Result<Option<Canteen>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        canteens::canteen_by_id(canteen_id, &mut conn).await
    }

    async fn fetch_canteens(&self) -> Result<Vec<CanteenListEntry>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        canteens::fetch_canteens(&mut conn).await
    }
}

impl PaymentManagement for SqliteDatabase {
    type Error = SqliteDatabaseError;

    async fn insert_payment(&self, payment: NewPayment) -> Result<Payment, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        payments::insert_payment(payment, &mut conn).await
    }

    async fn payment_by_id(&self, payment_id: Uuid) -> Result<Option<Payment>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        payments::payment_by_id(payment_id, &mut conn).await
    }
}

impl FeedbackManagement for SqliteDatabase {
    type Error = SqliteDatabaseError;

    async fn create_feedback(&self, feedback: NewFeedback) -> Result<CreateFeedbackResult, Self::Error> {
        let mut tx = self.pool.begin().await?;
        let result = feedback::create_feedback(feedback, &mut tx).await?;
        match &result {
            CreateFeedbackResult::Created(feedback) => {
                tx.commit().await?;
                debug!("🗃️ Feedback {} recorded for order {}", feedback.id, feedback.order_id);
            },
            CreateFeedbackResult::OrderNotFound => {
                tx.rollback().await?;
            },
        }
        Ok(result)
    }

    async fn soft_delete_feedback(&self, feedback_id: Uuid, canteen_owner: Uuid) -> Result<bool, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        feedback::soft_delete_feedback(feedback_id, canteen_owner, &mut conn).await
    }

    async fn feedback_by_id(&self, feedback_id: Uuid) -> Result<Option<Feedback>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        feedback::feedback_by_id(feedback_id, &mut conn).await
    }
}

impl UserStore for SqliteDatabase {
    type Error = SqliteDatabaseError;

    async fn user_by_id(&self, user_id: Uuid) -> Result<Option<User>, Self::Error> {
        let mut conn = self.pool.acquire().await?;
        users::user_by_id(user_id, &mut conn).await
    }
}
