use actix_web::{http::StatusCode, web, web::ServiceConfig};
use canteen_engine::{
    db_types::{NewOrder, Order, OrderStatus, Role},
    events::EventProducers,
    traits::{CreateOrderResult, UpdateOrderResult},
    OrderFlowApi,
};
use chrono::{TimeZone, Utc};
use uuid::Uuid;

use super::{
    helpers::{get_request, issue_token, patch_request, post_request},
    mocks::MockOrderBackend,
};
use crate::routes::{CreateOrderRoute, MyOrdersRoute, UpdateOrderRoute};

fn order_fixture(user_id: Uuid, status: OrderStatus) -> Order {
    Order {
        id: Uuid::new_v4(),
        canteen_id: Uuid::new_v4(),
        user_id,
        menu_id: Uuid::new_v4(),
        quantity: 2,
        status,
        created_at: Utc.with_ymd_and_hms(2026, 2, 11, 11, 30, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2026, 2, 11, 11, 30, 0).unwrap(),
    }
}

fn configure_with(backend: MockOrderBackend) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let api = OrderFlowApi::new(backend, EventProducers::default());
        cfg.service(CreateOrderRoute::<MockOrderBackend>::new())
            .service(MyOrdersRoute::<MockOrderBackend>::new())
            .service(UpdateOrderRoute::<MockOrderBackend>::new())
            .app_data(web::Data::new(api));
    }
}

#[actix_web::test]
async fn create_order_succeeds() {
    let _ = env_logger::try_init();
    let user_id = Uuid::new_v4();
    let order = order_fixture(user_id, OrderStatus::Unpaid);
    let menu_id = order.menu_id;
    let mut backend = MockOrderBackend::new();
    backend
        .expect_create_order()
        .withf(move |o: &NewOrder| o.menu_id == menu_id && o.quantity == 2)
        .returning(move |_| Ok(CreateOrderResult::Created(order.clone())));
    let token = issue_token(user_id, Role::User);
    let body = serde_json::json!({ "menu_id": menu_id, "quantity": 2 });
    let (status, body) =
        post_request(&token, "/canteen/menu/order", body, configure_with(backend)).await.expect("Request failed");
    assert_eq!(status, StatusCode::CREATED);
    assert!(body.contains("\"status\":\"UNPAID\""), "unexpected body: {body}");
}

#[actix_web::test]
async fn create_order_with_insufficient_stock_conflicts() {
    let _ = env_logger::try_init();
    let mut backend = MockOrderBackend::new();
    backend.expect_create_order().returning(|_| Ok(CreateOrderResult::InsufficientStock { available: 1 }));
    let token = issue_token(Uuid::new_v4(), Role::User);
    let body = serde_json::json!({ "menu_id": Uuid::new_v4(), "quantity": 5 });
    let (status, body) =
        post_request(&token, "/canteen/menu/order", body, configure_with(backend)).await.expect("Request failed");
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body.contains("Insufficient stock"), "unexpected body: {body}");
}

#[actix_web::test]
async fn create_order_without_token_is_unauthorized() {
    let _ = env_logger::try_init();
    let body = serde_json::json!({ "menu_id": Uuid::new_v4(), "quantity": 1 });
    let err = post_request("", "/canteen/menu/order", body, configure_with(MockOrderBackend::new()))
        .await
        .expect_err("Expected the request to be rejected");
    assert_eq!(err, "No bearer token was provided.");
}

#[actix_web::test]
async fn create_order_as_canteen_owner_is_forbidden() {
    let _ = env_logger::try_init();
    let token = issue_token(Uuid::new_v4(), Role::Canteen);
    let body = serde_json::json!({ "menu_id": Uuid::new_v4(), "quantity": 1 });
    let err = post_request(&token, "/canteen/menu/order", body, configure_with(MockOrderBackend::new()))
        .await
        .expect_err("Expected the request to be rejected");
    assert_eq!(err, "Insufficient permissions");
}

#[actix_web::test]
async fn fetch_my_orders() {
    let _ = env_logger::try_init();
    let user_id = Uuid::new_v4();
    let orders = vec![order_fixture(user_id, OrderStatus::Paid), order_fixture(user_id, OrderStatus::Unpaid)];
    let mut backend = MockOrderBackend::new();
    backend.expect_fetch_orders().returning(move |_| Ok(orders.clone()));
    let token = issue_token(user_id, Role::User);
    let (status, body) =
        get_request(&token, "/canteen/menu/order", configure_with(backend)).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("\"total_orders\":2"), "unexpected body: {body}");
}

#[actix_web::test]
async fn owner_advances_paid_order_to_cooking() {
    let _ = env_logger::try_init();
    let owner_id = Uuid::new_v4();
    let updated = order_fixture(Uuid::new_v4(), OrderStatus::Cooking);
    let order_id = updated.id;
    let mut backend = MockOrderBackend::new();
    backend
        .expect_advance_order_for_owner()
        .withf(move |oid, expected, new_status, owner| {
            *oid == order_id &&
                *expected == OrderStatus::Paid &&
                *new_status == OrderStatus::Cooking &&
                *owner == owner_id
        })
        .returning(move |_, _, _, _| Ok(UpdateOrderResult::Updated(updated.clone())));
    let token = issue_token(owner_id, Role::Canteen);
    let body = serde_json::json!({ "order_id": order_id, "status": "COOKING" });
    let (status, body) =
        patch_request(&token, "/canteen/menu/order", body, configure_with(backend)).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("\"status\":\"COOKING\""), "unexpected body: {body}");
}

#[actix_web::test]
async fn requesting_a_system_edge_is_forbidden() {
    let _ = env_logger::try_init();
    // PAID is the payment callback's edge; the update-order call must refuse it outright.
    let token = issue_token(Uuid::new_v4(), Role::Canteen);
    let body = serde_json::json!({ "order_id": Uuid::new_v4(), "status": "PAID" });
    let (status, _) = patch_request(&token, "/canteen/menu/order", body, configure_with(MockOrderBackend::new()))
        .await
        .expect("Request failed");
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn advancing_a_foreign_order_reads_as_not_found() {
    let _ = env_logger::try_init();
    let mut backend = MockOrderBackend::new();
    backend.expect_advance_order_for_owner().returning(|_, _, _, _| Ok(UpdateOrderResult::NotFound));
    let token = issue_token(Uuid::new_v4(), Role::Canteen);
    let body = serde_json::json!({ "order_id": Uuid::new_v4(), "status": "COMPLETED" });
    let (status, _) =
        patch_request(&token, "/canteen/menu/order", body, configure_with(backend)).await.expect("Request failed");
    assert_eq!(status, StatusCode::NOT_FOUND);
}
