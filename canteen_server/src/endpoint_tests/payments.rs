use actix_web::{http::StatusCode, web, web::ServiceConfig};
use canteen_engine::{
    db_types::{Order, OrderStatus},
    events::EventProducers,
    helpers::calculate_signature,
    traits::MarkPaidResult,
    PaymentApi,
};
use ccs_common::Secret;
use chrono::{TimeZone, Utc};
use midtrans_tools::MidtransConfig;
use uuid::Uuid;

use super::{helpers::post_request, mocks::MockPaymentBackend};
use crate::{integrations::midtrans::MidtransGateway, payment_routes::PaymentCallbackRoute};

const SERVER_KEY: &str = "SB-Mid-server-endpoint-test";

fn paid_order_fixture() -> Order {
    Order {
        id: Uuid::new_v4(),
        canteen_id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        menu_id: Uuid::new_v4(),
        quantity: 1,
        status: OrderStatus::Paid,
        created_at: Utc.with_ymd_and_hms(2026, 2, 11, 12, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2026, 2, 11, 12, 5, 0).unwrap(),
    }
}

fn configure_with(backend: MockPaymentBackend) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let gateway = MidtransGateway::new(MidtransConfig::default()).expect("Failed to build gateway");
        let api =
            PaymentApi::new(backend, gateway, Secret::new(SERVER_KEY.to_string()), EventProducers::default());
        cfg.service(PaymentCallbackRoute::<MockPaymentBackend>::new()).app_data(web::Data::new(api));
    }
}

fn signed_callback(payment_id: Uuid, transaction_status: &str) -> serde_json::Value {
    let order_id = payment_id.to_string();
    let signature = calculate_signature(&order_id, "200", "25000.00", SERVER_KEY);
    serde_json::json!({
        "order_id": order_id,
        "status_code": "200",
        "gross_amount": "25000.00",
        "transaction_status": transaction_status,
        "signature_key": signature,
    })
}

#[actix_web::test]
async fn settlement_callback_marks_order_paid() {
    let _ = env_logger::try_init();
    let payment_id = Uuid::new_v4();
    let order = paid_order_fixture();
    let mut backend = MockPaymentBackend::new();
    backend
        .expect_mark_order_paid()
        .withf(move |id| *id == payment_id)
        .returning(move |_| Ok(MarkPaidResult::Paid(order.clone())));
    let body = signed_callback(payment_id, "settlement");
    let (status, body) = post_request("", "/payment/notification", body, configure_with(backend)).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("is paid"), "unexpected body: {body}");
}

#[actix_web::test]
async fn tampered_signature_is_rejected() {
    let _ = env_logger::try_init();
    let mut body = signed_callback(Uuid::new_v4(), "settlement");
    let mut signature = body["signature_key"].as_str().unwrap().to_string();
    // Flip a single hex digit.
    let flipped = if signature.starts_with('0') { "1" } else { "0" };
    signature.replace_range(0..1, flipped);
    body["signature_key"] = serde_json::Value::String(signature);
    // No expectations on the mock: the request must die at the signature check.
    let (status, _) = post_request("", "/payment/notification", body, configure_with(MockPaymentBackend::new()))
        .await
        .expect("Request failed");
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn replayed_callback_is_a_no_op() {
    let _ = env_logger::try_init();
    let payment_id = Uuid::new_v4();
    let order = paid_order_fixture();
    let mut backend = MockPaymentBackend::new();
    backend.expect_mark_order_paid().returning(move |_| Ok(MarkPaidResult::AlreadyPaid(order.clone())));
    let body = signed_callback(payment_id, "settlement");
    let (status, body) = post_request("", "/payment/notification", body, configure_with(backend)).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("already settled"), "unexpected body: {body}");
}

#[actix_web::test]
async fn non_settlement_status_is_acknowledged_without_changes() {
    let _ = env_logger::try_init();
    // No expectations on the mock: a "deny" must not touch any order.
    let body = signed_callback(Uuid::new_v4(), "deny");
    let (status, body) = post_request("", "/payment/notification", body, configure_with(MockPaymentBackend::new()))
        .await
        .expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("noted"), "unexpected body: {body}");
}

#[actix_web::test]
async fn callback_for_unknown_payment_is_not_found() {
    let _ = env_logger::try_init();
    let mut backend = MockPaymentBackend::new();
    backend.expect_mark_order_paid().returning(|_| Ok(MarkPaidResult::NotFound));
    let body = signed_callback(Uuid::new_v4(), "settlement");
    let (status, _) = post_request("", "/payment/notification", body, configure_with(backend)).await.expect("Request failed");
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn malformed_callback_is_a_bad_request() {
    let _ = env_logger::try_init();
    let body = serde_json::json!({ "order_id": "not-json-the-gateway-would-send" });
    let (status, _) = post_request("", "/payment/notification", body, configure_with(MockPaymentBackend::new()))
        .await
        .expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
