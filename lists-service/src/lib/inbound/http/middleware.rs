use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::Response;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Caller identity taken from a validated access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub user_name: String,
    pub is_admin: bool,
}

impl From<auth::AccessClaims> for AuthenticatedUser {
    fn from(claims: auth::AccessClaims) -> Self {
        Self {
            user_id: claims.user_id,
            user_name: claims.user_name,
            is_admin: claims.is_admin,
        }
    }
}

/// Middleware that validates the bearer access token and adds the caller to
/// request extensions.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)?;
    let claims = state.auth.validate_access_token(token)?;

    req.extensions_mut().insert(AuthenticatedUser::from(claims));

    Ok(next.run(req).await)
}

/// Middleware that lets only administrators through. Must run after
/// [`authenticate`].
pub async fn require_admin(req: Request, next: Next) -> Result<Response, ApiError> {
    let user = req
        .extensions()
        .get::<AuthenticatedUser>()
        .cloned()
        .ok_or_else(|| ApiError::Unauthorized("Invalid token".to_string()))?;

    if !user.is_admin {
        tracing::warn!(user_id = %user.user_id, uri = %req.uri(), "Admin route refused");
        return Err(ApiError::Forbidden("Access denied".to_string()));
    }

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, ApiError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

    auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        ApiError::Unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
        )
    })
}
