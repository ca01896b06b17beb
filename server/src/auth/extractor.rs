use crate::api::ErrorResponse;
use crate::AppContext;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use super::jwt::{verify_token, AuthMode, DEV_CALLER_ID};

/// Caller identity derived from a verified credential. Used to scope every
/// store operation; never taken from the request body.
#[derive(Debug, Clone)]
pub struct Caller {
    pub id: String,
}

/// Extractor that validates the Authorization header and provides the
/// caller identity.
///
/// Use this in any handler that requires authentication:
/// ```ignore
/// async fn my_handler(AuthUser(caller): AuthUser) -> impl IntoResponse {
///     // caller.id scopes the operation
/// }
/// ```
pub struct AuthUser(pub Caller);

pub enum AuthError {
    MissingHeader,
    InvalidHeader,
    InvalidFormat,
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match self {
            AuthError::MissingHeader => "Missing Authorization header",
            AuthError::InvalidHeader => "Invalid Authorization header",
            AuthError::InvalidFormat => "Invalid Authorization header format",
            AuthError::InvalidToken => "Invalid or expired token",
        };

        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<AppContext>: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = Arc::<AppContext>::from_ref(state);

        let key = match &state.auth {
            AuthMode::DevPermissive => {
                return Ok(AuthUser(Caller {
                    id: DEV_CALLER_ID.to_string(),
                }))
            }
            AuthMode::Enforced(key) => key,
        };

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(AuthError::MissingHeader)?;

        let auth_str = auth_header.to_str().map_err(|_| AuthError::InvalidHeader)?;

        let token = auth_str
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidFormat)?;

        let id = verify_token(key, token).map_err(|_| AuthError::InvalidToken)?;

        Ok(AuthUser(Caller { id }))
    }
}
