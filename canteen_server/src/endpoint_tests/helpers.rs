use actix_web::{http::StatusCode, test, web, web::ServiceConfig, App};
use canteen_engine::db_types::Role;
use ccs_common::Secret;
use chrono::Duration;
use uuid::Uuid;

use crate::{auth::TokenIssuer, config::AuthConfig};

pub const TEST_JWT_SECRET: &str = "an-absolutely-terrible-test-secret-key";

pub fn test_auth_config() -> AuthConfig {
    AuthConfig { jwt_secret: Secret::new(TEST_JWT_SECRET.to_string()), jwt_expiry: Duration::hours(1) }
}

pub fn issue_token(user_id: Uuid, role: Role) -> String {
    TokenIssuer::new(&test_auth_config()).issue_token(user_id, role).expect("Failed to issue test token")
}

/// Runs a request against a test app. Handler and extractor failures are rendered into
/// responses and come back as `Ok((status, body))`; errors raised by the ACL middleware
/// propagate as service errors and come back as `Err(message)`.
async fn send_request<F>(
    method: actix_web::http::Method,
    token: &str,
    path: &str,
    body: Option<serde_json::Value>,
    configure: F,
) -> Result<(StatusCode, String), String>
where
    F: FnOnce(&mut ServiceConfig),
{
    let issuer = TokenIssuer::new(&test_auth_config());
    let app = test::init_service(App::new().app_data(web::Data::new(issuer)).configure(configure)).await;
    let mut req = test::TestRequest::default().method(method).uri(path);
    if !token.is_empty() {
        req = req.insert_header(("Authorization", format!("Bearer {token}")));
    }
    if let Some(body) = body {
        req = req.set_json(body);
    }
    let res = test::try_call_service(&app, req.to_request()).await.map_err(|e| e.to_string())?;
    let status = res.status();
    let body = test::read_body(res).await;
    Ok((status, String::from_utf8_lossy(&body).to_string()))
}

pub async fn get_request<F>(token: &str, path: &str, configure: F) -> Result<(StatusCode, String), String>
where F: FnOnce(&mut ServiceConfig) {
    send_request(actix_web::http::Method::GET, token, path, None, configure).await
}

pub async fn post_request<F>(
    token: &str,
    path: &str,
    body: serde_json::Value,
    configure: F,
) -> Result<(StatusCode, String), String>
where
    F: FnOnce(&mut ServiceConfig),
{
    send_request(actix_web::http::Method::POST, token, path, Some(body), configure).await
}

pub async fn patch_request<F>(
    token: &str,
    path: &str,
    body: serde_json::Value,
    configure: F,
) -> Result<(StatusCode, String), String>
where
    F: FnOnce(&mut ServiceConfig),
{
    send_request(actix_web::http::Method::PATCH, token, path, Some(body), configure).await
}

pub async fn delete_request<F>(token: &str, path: &str, configure: F) -> Result<(StatusCode, String), String>
where F: FnOnce(&mut ServiceConfig) {
    send_request(actix_web::http::Method::DELETE, token, path, None, configure).await
}
