use actix_web::{web, HttpServer};
use anyhow::Context as _;
use std::sync::Arc;
use tracing::{info, warn};

use otp_api::{create_app, telemetry, AppState};
use otp_infra::build_backends;
use otp_infra::database::MemoryUserRepository;
use otp_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    telemetry::init_tracing(&config.logging)?;

    info!(environment = %config.environment, "Starting OTP API server");
    if config.auth.uses_default_secret() {
        warn!("JWT_SECRET is not set; using the development secret");
    }

    let backends = build_backends(&config)
        .await
        .context("failed to initialize OTP backends")?;
    info!(backend = %backends.kind, "OTP backends ready");

    let users = Arc::new(MemoryUserRepository::new());
    let state = web::Data::new(AppState::new(&backends, users, &config));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let environment = config.environment;
    let server_config = config.server.clone();
    let mut server = HttpServer::new(move || {
        create_app(state.clone(), environment, &server_config)
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    let result = server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await;

    backends.shutdown().await;
    info!("Server stopped");
    result.context("server error")
}
