use crate::error::ApiError;
use axum::{extract::FromRequestParts, http::request::Parts};
use models::UserContext;
use tower_oauth2_resource_server::claims::DefaultClaims;

/// The verified identity behind a request.
///
/// Built from the claims the OAuth2 layer attaches to the request; rejects
/// with 401 when there are none or they carry no subject.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserContext);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<DefaultClaims>()
            .and_then(|claims| claims.sub.as_ref().map(|sub| sub.to_string()))
            .map(|subject| Self(UserContext::new(subject)))
            .ok_or(ApiError::Unauthorized)
    }
}
