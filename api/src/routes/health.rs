use actix_web::{web, HttpResponse};

use crate::app::AppState;

/// Handler for GET /health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "backend": state.backend.as_str(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
