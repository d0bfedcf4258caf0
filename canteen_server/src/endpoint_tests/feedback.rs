use actix_web::{http::StatusCode, web, web::ServiceConfig};
use canteen_engine::{
    db_types::{Feedback, Role},
    traits::CreateFeedbackResult,
    FeedbackApi,
};
use chrono::{TimeZone, Utc};
use uuid::Uuid;

use super::{
    helpers::{delete_request, issue_token, post_request},
    mocks::MockFeedbackBackend,
};
use crate::routes::{CreateFeedbackRoute, DeleteFeedbackRoute};

fn feedback_fixture(order_id: Uuid, user_id: Uuid) -> Feedback {
    Feedback {
        id: Uuid::new_v4(),
        order_id,
        user_id,
        content: "Sambalnya mantap!".to_string(),
        created_at: Utc.with_ymd_and_hms(2026, 2, 12, 9, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2026, 2, 12, 9, 0, 0).unwrap(),
    }
}

fn configure_with(backend: MockFeedbackBackend) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let api = FeedbackApi::new(backend);
        cfg.service(CreateFeedbackRoute::<MockFeedbackBackend>::new())
            .service(DeleteFeedbackRoute::<MockFeedbackBackend>::new())
            .app_data(web::Data::new(api));
    }
}

#[actix_web::test]
async fn feedback_on_completed_order_succeeds() {
    let _ = env_logger::try_init();
    let user_id = Uuid::new_v4();
    let order_id = Uuid::new_v4();
    let feedback = feedback_fixture(order_id, user_id);
    let mut backend = MockFeedbackBackend::new();
    backend
        .expect_create_feedback()
        .withf(move |f| f.order_id == order_id && f.user_id == user_id)
        .returning(move |_| Ok(CreateFeedbackResult::Created(feedback.clone())));
    let token = issue_token(user_id, Role::User);
    let body = serde_json::json!({ "order_id": order_id, "content": "Sambalnya mantap!" });
    let (status, body) = post_request(&token, "/canteen/menu/order/feedback", body, configure_with(backend))
        .await
        .expect("Request failed");
    assert_eq!(status, StatusCode::CREATED);
    assert!(body.contains("Sambalnya mantap!"), "unexpected body: {body}");
}

#[actix_web::test]
async fn feedback_on_unfinished_order_is_not_found() {
    let _ = env_logger::try_init();
    let mut backend = MockFeedbackBackend::new();
    backend.expect_create_feedback().returning(|_| Ok(CreateFeedbackResult::OrderNotFound));
    let token = issue_token(Uuid::new_v4(), Role::User);
    let body = serde_json::json!({ "order_id": Uuid::new_v4(), "content": "too early" });
    let (status, _) = post_request(&token, "/canteen/menu/order/feedback", body, configure_with(backend))
        .await
        .expect("Request failed");
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn empty_feedback_is_rejected_before_the_backend() {
    let _ = env_logger::try_init();
    // No expectations on the mock: validation happens at the boundary.
    let token = issue_token(Uuid::new_v4(), Role::User);
    let body = serde_json::json!({ "order_id": Uuid::new_v4(), "content": "   " });
    let (status, _) =
        post_request(&token, "/canteen/menu/order/feedback", body, configure_with(MockFeedbackBackend::new()))
            .await
            .expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn owner_deletes_feedback() {
    let _ = env_logger::try_init();
    let owner_id = Uuid::new_v4();
    let feedback_id = Uuid::new_v4();
    let mut backend = MockFeedbackBackend::new();
    backend
        .expect_soft_delete_feedback()
        .withf(move |fid, owner| *fid == feedback_id && *owner == owner_id)
        .returning(|_, _| Ok(true));
    let token = issue_token(owner_id, Role::Canteen);
    let path = format!("/canteen/menu/order/feedback/{feedback_id}");
    let (status, _) = delete_request(&token, &path, configure_with(backend)).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn deleting_foreign_feedback_is_not_found() {
    let _ = env_logger::try_init();
    let mut backend = MockFeedbackBackend::new();
    backend.expect_soft_delete_feedback().returning(|_, _| Ok(false));
    let token = issue_token(Uuid::new_v4(), Role::Canteen);
    let path = format!("/canteen/menu/order/feedback/{}", Uuid::new_v4());
    let (status, _) = delete_request(&token, &path, configure_with(backend)).await.expect("Request failed");
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn users_cannot_delete_feedback() {
    let _ = env_logger::try_init();
    let token = issue_token(Uuid::new_v4(), Role::User);
    let path = format!("/canteen/menu/order/feedback/{}", Uuid::new_v4());
    let err = delete_request(&token, &path, configure_with(MockFeedbackBackend::new()))
        .await
        .expect_err("Expected the request to be rejected");
    assert_eq!(err, "Insufficient permissions");
}
