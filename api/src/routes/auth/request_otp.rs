use actix_web::{web, HttpResponse};
use tracing::{info, warn};
use validator::Validate;

use otp_shared::phone::mask_phone;

use super::parse_phone;
use crate::app::AppState;
use crate::dto::{RequestOtpRequest, RequestOtpResponse};
use crate::handlers::ApiError;

/// Handler for POST /api/v1/auth/request-otp
///
/// Checks the per-phone rate limit, then issues a code. The code itself is
/// delivered out of band and never returned.
///
/// # Request Body
///
/// ```json
/// { "phone": "+15550102030" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "message": "OTP sent", "expires_in": 120 }
/// ```
///
/// ## Errors
/// - 400 invalid phone number
/// - 429 rate limit exceeded
/// - 503 backend unavailable
pub async fn request_otp(
    state: web::Data<AppState>,
    request: web::Json<RequestOtpRequest>,
) -> Result<HttpResponse, ApiError> {
    request.validate()?;
    let phone = parse_phone(&request.phone)?;
    let ctx = state.request_context();

    if !state.limiter.allow(&ctx, &phone).await? {
        warn!(phone = %mask_phone(&phone), "OTP request rate limited");
        return Err(ApiError::RateLimited);
    }

    state.otp.generate(&ctx, &phone).await?;
    info!(phone = %mask_phone(&phone), "OTP requested");

    Ok(HttpResponse::Ok().json(RequestOtpResponse {
        message: "OTP sent".to_string(),
        expires_in: state.otp_ttl.as_secs(),
    }))
}
