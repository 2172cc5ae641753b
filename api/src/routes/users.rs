//! Protected user endpoints

use actix_web::{web, HttpResponse};
use tracing::debug;
use uuid::Uuid;

use otp_core::UserFilter;

use crate::app::AppState;
use crate::dto::{ListUsersQuery, UserListResponse, UserResponse};
use crate::handlers::ApiError;
use crate::middleware::auth::AuthContext;

/// Handler for GET /api/v1/users/{id}
pub async fn get_user(
    auth: AuthContext,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = Uuid::parse_str(&path.into_inner())
        .map_err(|_| ApiError::Validation("User id must be a UUID".to_string()))?;
    debug!(caller = %auth.user_id, user_id = %id, "Fetching user");

    let user = state
        .users
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User {} not found", id)))?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// Handler for GET /api/v1/users?search=&page=&size=
pub async fn list_users(
    auth: AuthContext,
    state: web::Data<AppState>,
    query: web::Query<ListUsersQuery>,
) -> Result<HttpResponse, ApiError> {
    let filter = UserFilter {
        search: query.search.clone(),
        limit: query.size(),
        offset: query.offset(),
    };
    debug!(caller = %auth.user_id, ?filter, "Listing users");

    let (users, total) = state.users.list(&filter).await?;

    Ok(HttpResponse::Ok().json(UserListResponse {
        items: users.into_iter().map(UserResponse::from).collect(),
        total,
        page: query.page(),
        size: filter.limit,
    }))
}
