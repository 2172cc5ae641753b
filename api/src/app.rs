//! Application state and factory
//!
//! This module holds the shared state handed to every handler and builds
//! the Actix-web application around it.

use actix_web::{web, App};
use std::sync::Arc;
use std::time::Duration;
use tracing_actix_web::TracingLogger;

use otp_core::{Context, OtpService, RateLimiter, UserRepository};
use otp_infra::{BackendKind, OtpBackends};
use otp_shared::{AppConfig, Environment, JwtConfig, ServerConfig};

use crate::handlers::ApiError;
use crate::middleware::{cors::create_cors, auth::JwtAuth};
use crate::routes;

/// Services shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub otp: Arc<dyn OtpService>,
    pub limiter: Arc<dyn RateLimiter>,
    pub users: Arc<dyn UserRepository>,
    pub backend: BackendKind,
    pub jwt: JwtConfig,
    /// Lifetime of issued codes, reported to clients
    pub otp_ttl: Duration,
    /// Deadline applied to each backend call chain
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(backends: &OtpBackends, users: Arc<dyn UserRepository>, config: &AppConfig) -> Self {
        Self {
            otp: backends.otp.clone(),
            limiter: backends.limiter.clone(),
            users,
            backend: backends.kind,
            jwt: config.auth.clone(),
            otp_ttl: config.otp.ttl(),
            request_timeout: config.server.request_timeout(),
        }
    }

    /// Fresh context bounded by the request timeout
    pub fn request_context(&self) -> Context {
        Context::with_timeout(self.request_timeout)
    }
}

/// Register every route on `cfg`
pub fn configure(cfg: &mut web::ServiceConfig, jwt_secret: &str) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::Validation(err.to_string()).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        ApiError::Validation(err.to_string()).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        ApiError::Validation(err.to_string()).into()
    }))
    .route("/health", web::get().to(routes::health::health_check))
    .service(
        web::scope("/api/v1")
            .service(
                web::scope("/auth")
                    .route("/request-otp", web::post().to(routes::auth::request_otp))
                    .route("/verify-otp", web::post().to(routes::auth::verify_otp)),
            )
            .service(
                web::scope("/users")
                    .wrap(JwtAuth::with_secret(jwt_secret))
                    .route("", web::get().to(routes::users::list_users))
                    .route("/{id}", web::get().to(routes::users::get_user)),
            ),
    );
}

/// Create and configure the application
pub fn create_app(
    state: web::Data<AppState>,
    environment: Environment,
    server: &ServerConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let jwt_secret = state.jwt.secret.clone();

    App::new()
        .app_data(state)
        .wrap(create_cors(environment, server))
        .wrap(TracingLogger::default())
        .configure(move |cfg| configure(cfg, &jwt_secret))
}
