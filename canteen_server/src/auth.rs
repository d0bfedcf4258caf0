use std::future::{ready, Ready};

use actix_web::{dev::Payload, http::header, web, FromRequest, HttpMessage, HttpRequest};
use canteen_engine::db_types::Role;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::AuthConfig,
    errors::{AuthError, ServerError},
};

/// The claims carried by an access token. The engine trusts these completely; issuing tokens
/// (login) happens outside this service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// The authenticated user id.
    pub sub: Uuid,
    pub role: Role,
    /// Issued at (UTC timestamp).
    pub iat: usize,
    /// Expiry (UTC timestamp).
    pub exp: usize,
}

pub struct TokenIssuer {
    secret: ccs_common::Secret<String>,
    expiry: chrono::Duration,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        Self { secret: config.jwt_secret.clone(), expiry: config.jwt_expiry }
    }

    /// Issue a new access token for the given user. The caller is responsible for having
    /// authenticated the user first.
    pub fn issue_token(&self, user_id: Uuid, role: Role) -> Result<String, AuthError> {
        let now = Utc::now().timestamp() as usize;
        let claims = JwtClaims { sub: user_id, role, iat: now, exp: now + self.expiry.num_seconds() as usize };
        let key = EncodingKey::from_secret(self.secret.reveal().as_bytes());
        jsonwebtoken::encode(&Header::default(), &claims, &key).map_err(|e| AuthError::ValidationError(e.to_string()))
    }

    pub fn decode_token(&self, token: &str) -> Result<JwtClaims, AuthError> {
        let key = DecodingKey::from_secret(self.secret.reveal().as_bytes());
        jsonwebtoken::decode::<JwtClaims>(token, &key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| AuthError::ValidationError(e.to_string()))
    }
}

/// Pulls the bearer token out of the `Authorization` header and validates it against the
/// configured signing key.
pub fn claims_from_request(req: &HttpRequest) -> Result<JwtClaims, ServerError> {
    // The ACL middleware has usually validated the token already and left the claims behind.
    if let Some(claims) = req.extensions().get::<JwtClaims>() {
        return Ok(claims.clone());
    }
    let issuer = req
        .app_data::<web::Data<TokenIssuer>>()
        .ok_or_else(|| ServerError::InitializeError("TokenIssuer is not configured".to_string()))?;
    let header = req.headers().get(header::AUTHORIZATION).ok_or(AuthError::MissingToken)?;
    let token = header
        .to_str()
        .ok()
        .and_then(|s| s.strip_prefix("Bearer "))
        .ok_or_else(|| AuthError::PoorlyFormattedToken("expected 'Bearer <token>'".to_string()))?;
    Ok(issuer.decode_token(token)?)
}

impl FromRequest for JwtClaims {
    type Error = ServerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(claims_from_request(req))
    }
}
