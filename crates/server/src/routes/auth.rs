use crate::{error::ErrorResponse, utils::auth::CurrentUser};
use axum::http::StatusCode;

/// Returns a greeting with the user's subject identifier from their JWT claims
#[utoipa::path(
    get,
    path = "/me",
    responses(
        (status = 200, description = "Successfully authenticated", content_type = "text/plain", body = String),
        (status = 401, description = "Unauthorized - invalid or missing JWT", body = ErrorResponse)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Authentication"
)]
pub async fn me(CurrentUser(user): CurrentUser) -> (StatusCode, String) {
    (StatusCode::OK, format!("Hello, {}", user.subject))
}
