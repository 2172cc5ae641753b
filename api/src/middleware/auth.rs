//! JWT authentication for protected API endpoints.
//!
//! Tokens are HS256-signed and carry the user id in `sub`. [`JwtAuth`]
//! rejects requests without a valid `Authorization: Bearer` header and
//! injects an [`AuthContext`] that handlers take as an extractor.

use actix_web::{
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use chrono::Utc;
use futures_util::future::LocalBoxFuture;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};
use tracing::debug;
use uuid::Uuid;

use otp_core::User;
use otp_shared::JwtConfig;

use crate::handlers::ApiError;

/// Access token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub phone: String,
    pub iat: i64,
    pub exp: i64,
}

/// Authenticated caller injected into requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub phone: String,
}

impl AuthContext {
    pub fn from_claims(claims: Claims) -> Result<Self, ApiError> {
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| ApiError::Unauthorized("Invalid token subject".to_string()))?;
        Ok(Self {
            user_id,
            phone: claims.phone,
        })
    }
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let context = req.extensions().get::<AuthContext>().cloned();
        ready(context.ok_or_else(|| {
            ApiError::Unauthorized("Authentication required".to_string()).into()
        }))
    }
}

/// Sign an access token for `user`
pub fn issue_token(config: &JwtConfig, user: &User) -> Result<String, ApiError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user.id.to_string(),
        phone: user.phone.clone(),
        iat: now,
        exp: now + config.token_ttl_seconds,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(format!("Failed to sign token: {}", e)))
}

/// Verify signature and expiry of an access token
pub fn verify_token(token: &str, secret: &str) -> Result<AuthContext, ApiError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        debug!("Token rejected: {}", e);
        ApiError::Unauthorized("Invalid or expired token".to_string())
    })?;

    AuthContext::from_claims(token_data.claims)
}

/// JWT authentication middleware factory
pub struct JwtAuth {
    jwt_secret: Rc<str>,
}

impl JwtAuth {
    /// Creates a JWT authentication middleware verifying with `secret`
    pub fn with_secret(secret: impl AsRef<str>) -> Self {
        Self {
            jwt_secret: Rc::from(secret.as_ref()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            jwt_secret: self.jwt_secret.clone(),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    jwt_secret: Rc<str>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let jwt_secret = Rc::clone(&self.jwt_secret);

        Box::pin(async move {
            let verified = extract_bearer_token(&req)
                .ok_or_else(|| {
                    ApiError::Unauthorized("Missing or invalid Authorization header".to_string())
                })
                .and_then(|token| verify_token(&token, &jwt_secret));

            match verified {
                Ok(auth_context) => {
                    req.extensions_mut().insert(auth_context);
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                // Rejected requests never reach the inner service
                Err(e) => Ok(req.error_response(e).map_into_right_body()),
            }
        })
    }
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
