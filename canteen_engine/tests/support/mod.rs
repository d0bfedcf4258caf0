// Shared across the integration test binaries; each binary uses a different subset.
#![allow(dead_code)]

use canteen_engine::{
    db_types::{Canteen, Menu, NewCanteen, NewMenu, NewOrder, NewPayment, Order, Role},
    traits::{
        CanteenManagement,
        GatewayCustomer,
        GatewayTransaction,
        MarkPaidResult,
        MenuManagement,
        OrderManagement,
        PaymentGateway,
        PaymentManagement,
    },
    SqliteDatabase,
};
use ccs_common::Rupiah;
use log::debug;
use tempfile::TempDir;
use uuid::Uuid;

pub const SERVER_KEY: &str = "SB-Mid-server-engine-test";

pub struct TestEnv {
    pub db: SqliteDatabase,
    // Keeps the database file alive for the duration of the test.
    _dir: TempDir,
}

pub async fn prepare_test_env() -> TestEnv {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    let dir = tempfile::tempdir().expect("Error creating temporary directory");
    let url = format!("sqlite://{}/test.db?mode=rwc", dir.path().display());
    let db = SqliteDatabase::new_with_url(&url, 8).await.expect("Error creating test database");
    debug!("🚀 Test database ready at {url}");
    TestEnv { db, _dir: dir }
}

pub async fn seed_user(db: &SqliteDatabase, name: &str, role: Role) -> Uuid {
    let id = Uuid::new_v4();
    let mut conn = db.pool().acquire().await.expect("Error acquiring connection");
    canteen_engine::db::sqlite::users::insert_user(id, name, &format!("{name}@campus.test"), role, &mut conn)
        .await
        .expect("Error seeding user");
    id
}

pub async fn seed_canteen(db: &SqliteDatabase, owner: Uuid, name: &str) -> Canteen {
    db.insert_canteen(NewCanteen { user_id: owner, name: name.to_string() }).await.expect("Error seeding canteen")
}

pub async fn seed_menu(db: &SqliteDatabase, canteen_id: Uuid, name: &str, price: i64, stock: i64) -> Menu {
    db.insert_menu(NewMenu { canteen_id, name: name.to_string(), price: Rupiah::from(price), stock }, None)
        .await
        .expect("Error seeding menu")
        .expect("Seed canteen was not eligible for a menu")
}

pub async fn place_order(db: &SqliteDatabase, user_id: Uuid, menu_id: Uuid, quantity: i64) -> Order {
    use canteen_engine::traits::CreateOrderResult;
    match db.create_order(NewOrder::new(user_id, menu_id, quantity)).await.expect("Error placing order") {
        CreateOrderResult::Created(order) => order,
        other => panic!("Expected order to be created, got {other:?}"),
    }
}

/// Inserts a payment record and settles it, moving the order to PAID.
pub async fn pay_order(db: &SqliteDatabase, order: &Order, price: i64) -> Uuid {
    let payment_id = Uuid::new_v4();
    let payment = NewPayment {
        id: payment_id,
        order_id: order.id,
        user_id: order.user_id,
        price: Rupiah::from(price),
        redirect_url: format!("https://pay.example/{payment_id}"),
    };
    db.insert_payment(payment).await.expect("Error inserting payment");
    match db.mark_order_paid(payment_id).await.expect("Error settling payment") {
        MarkPaidResult::Paid(_) => payment_id,
        other => panic!("Expected order to settle, got {other:?}"),
    }
}

/// A payment gateway that always opens a transaction. The reference is echoed back in the token
/// and redirect URL so tests can recover the payment id.
#[derive(Debug, Default, Clone)]
pub struct TestGateway;

impl PaymentGateway for TestGateway {
    type Error = std::convert::Infallible;

    async fn create_transaction(
        &self,
        reference: Uuid,
        _gross_amount: Rupiah,
        _customer: GatewayCustomer,
    ) -> Result<GatewayTransaction, Self::Error> {
        Ok(GatewayTransaction {
            token: format!("token-{reference}"),
            redirect_url: format!("https://pay.example/{reference}"),
        })
    }
}

pub fn test_customer() -> GatewayCustomer {
    GatewayCustomer { first_name: "Siti".to_string(), email: "siti@campus.test".to_string() }
}
