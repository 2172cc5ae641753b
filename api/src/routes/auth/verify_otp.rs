use actix_web::{web, HttpResponse};
use tracing::{info, warn};
use validator::Validate;

use otp_core::errors::RepositoryError;
use otp_core::User;
use otp_shared::phone::mask_phone;

use super::parse_phone;
use crate::app::AppState;
use crate::dto::{TokenResponse, VerifyOtpRequest};
use crate::handlers::ApiError;
use crate::middleware::auth::issue_token;

/// Handler for POST /api/v1/auth/verify-otp
///
/// Consumes the code and returns an access token. The first successful
/// verification for a phone registers the user.
///
/// # Request Body
///
/// ```json
/// { "phone": "+15550102030", "code": "042137" }
/// ```
///
/// ## Errors
/// - 400 invalid request
/// - 401 `invalid_or_expired` for a wrong, missing or expired code
/// - 503 backend unavailable
pub async fn verify_otp(
    state: web::Data<AppState>,
    request: web::Json<VerifyOtpRequest>,
) -> Result<HttpResponse, ApiError> {
    request.validate()?;
    let phone = parse_phone(&request.phone)?;
    let ctx = state.request_context();

    if !state.otp.validate(&ctx, &phone, request.code.trim()).await? {
        warn!(phone = %mask_phone(&phone), "OTP verification failed");
        return Err(ApiError::InvalidOrExpiredCode);
    }

    let (user, registered) = find_or_register(&state, &phone).await?;
    let token = issue_token(&state.jwt, &user)?;
    info!(user_id = %user.id, registered, "OTP verified");

    Ok(HttpResponse::Ok().json(TokenResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt.token_ttl_seconds,
        user: user.into(),
        registered,
    }))
}

async fn find_or_register(state: &AppState, phone: &str) -> Result<(User, bool), ApiError> {
    if let Some(user) = state.users.get_by_phone(phone).await? {
        return Ok((user, false));
    }

    match state.users.create(User::new(phone)).await {
        Ok(user) => Ok((user, true)),
        // Registered concurrently by another verification
        Err(RepositoryError::Conflict { .. }) => state
            .users
            .get_by_phone(phone)
            .await?
            .map(|user| (user, false))
            .ok_or_else(|| ApiError::Internal("user vanished after conflict".to_string())),
        Err(e) => Err(e.into()),
    }
}
