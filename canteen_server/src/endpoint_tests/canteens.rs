use actix_web::{http::StatusCode, web, web::ServiceConfig};
use canteen_engine::{
    db_types::{Canteen, CanteenListEntry, Menu, Role},
    CanteenApi,
};
use ccs_common::Rupiah;
use chrono::{TimeZone, Utc};
use uuid::Uuid;

use super::{
    helpers::{get_request, issue_token, post_request},
    mocks::MockCanteenBackend,
};
use crate::routes::{CanteenListRoute, CreateCanteenRoute, CreateMenuRoute};

fn canteen_fixture(user_id: Uuid) -> Canteen {
    Canteen {
        id: Uuid::new_v4(),
        user_id,
        name: "Warung Bu Tini".to_string(),
        created_at: Utc.with_ymd_and_hms(2026, 2, 10, 8, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2026, 2, 10, 8, 0, 0).unwrap(),
    }
}

fn menu_fixture(canteen_id: Uuid) -> Menu {
    Menu {
        id: Uuid::new_v4(),
        canteen_id,
        name: "Nasi Goreng".to_string(),
        price: Rupiah::from(15_000),
        stock: 20,
        created_at: Utc.with_ymd_and_hms(2026, 2, 10, 8, 30, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2026, 2, 10, 8, 30, 0).unwrap(),
    }
}

fn configure_with(backend: MockCanteenBackend) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let api = CanteenApi::new(backend);
        cfg.service(CreateCanteenRoute::<MockCanteenBackend>::new())
            .service(CanteenListRoute::<MockCanteenBackend>::new())
            .service(CreateMenuRoute::<MockCanteenBackend>::new())
            .app_data(web::Data::new(api));
    }
}

#[actix_web::test]
async fn canteen_owner_registers_a_canteen() {
    let _ = env_logger::try_init();
    let owner_id = Uuid::new_v4();
    let canteen = canteen_fixture(owner_id);
    let mut backend = MockCanteenBackend::new();
    backend
        .expect_insert_canteen()
        .withf(move |c| c.user_id == owner_id && c.name == "Warung Bu Tini")
        .returning(move |_| Ok(canteen.clone()));
    let token = issue_token(owner_id, Role::Canteen);
    let body = serde_json::json!({ "name": "Warung Bu Tini" });
    let (status, body) = post_request(&token, "/canteen", body, configure_with(backend)).await.expect("Request failed");
    assert_eq!(status, StatusCode::CREATED);
    assert!(body.contains("Warung Bu Tini"), "unexpected body: {body}");
}

#[actix_web::test]
async fn users_cannot_register_canteens() {
    let _ = env_logger::try_init();
    let token = issue_token(Uuid::new_v4(), Role::User);
    let body = serde_json::json!({ "name": "Kantin Gelap" });
    let err = post_request(&token, "/canteen", body, configure_with(MockCanteenBackend::new()))
        .await
        .expect_err("Expected the request to be rejected");
    assert_eq!(err, "Insufficient permissions");
}

#[actix_web::test]
async fn blank_canteen_names_are_rejected() {
    let _ = env_logger::try_init();
    let token = issue_token(Uuid::new_v4(), Role::Canteen);
    let body = serde_json::json!({ "name": "  " });
    let (status, _) = post_request(&token, "/canteen", body, configure_with(MockCanteenBackend::new()))
        .await
        .expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn anyone_authenticated_lists_canteens() {
    let _ = env_logger::try_init();
    let listing = vec![
        CanteenListEntry { id: Uuid::new_v4(), name: "Kantin Pusat".to_string() },
        CanteenListEntry { id: Uuid::new_v4(), name: "Warung Bu Tini".to_string() },
    ];
    let mut backend = MockCanteenBackend::new();
    backend.expect_fetch_canteens().returning(move || Ok(listing.clone()));
    let token = issue_token(Uuid::new_v4(), Role::User);
    let (status, body) = get_request(&token, "/canteen", configure_with(backend)).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Kantin Pusat"), "unexpected body: {body}");
}

#[actix_web::test]
async fn menu_creation_is_scoped_to_owned_canteens() {
    let _ = env_logger::try_init();
    let owner_id = Uuid::new_v4();
    let mut backend = MockCanteenBackend::new();
    // The backend reports "no eligible canteen" for the foreign canteen id.
    backend.expect_insert_menu().withf(move |_, owner| *owner == Some(owner_id)).returning(|_, _| Ok(None));
    let token = issue_token(owner_id, Role::Canteen);
    let body = serde_json::json!({ "canteen_id": Uuid::new_v4(), "name": "Nasi Goreng", "price": 15000, "stock": 20 });
    let (status, _) =
        post_request(&token, "/canteen/menu", body, configure_with(backend)).await.expect("Request failed");
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn admins_create_menus_on_any_canteen() {
    let _ = env_logger::try_init();
    let canteen_id = Uuid::new_v4();
    let menu = menu_fixture(canteen_id);
    let mut backend = MockCanteenBackend::new();
    backend.expect_insert_menu().withf(move |_, owner| owner.is_none()).returning(move |_, _| Ok(Some(menu.clone())));
    let token = issue_token(Uuid::new_v4(), Role::Admin);
    let body = serde_json::json!({ "canteen_id": canteen_id, "name": "Nasi Goreng", "price": 15000, "stock": 20 });
    let (status, body) =
        post_request(&token, "/canteen/menu", body, configure_with(backend)).await.expect("Request failed");
    assert_eq!(status, StatusCode::CREATED);
    assert!(body.contains("Nasi Goreng"), "unexpected body: {body}");
}

#[actix_web::test]
async fn negative_prices_are_rejected() {
    let _ = env_logger::try_init();
    let token = issue_token(Uuid::new_v4(), Role::Canteen);
    let body = serde_json::json!({ "canteen_id": Uuid::new_v4(), "name": "Gratisan", "price": -1, "stock": 3 });
    let (status, _) = post_request(&token, "/canteen/menu", body, configure_with(MockCanteenBackend::new()))
        .await
        .expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
