use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::JsonBody;
use crate::inbound::http::router::AppState;

/// `POST /auth/token`: trade user name and password for a token pair.
pub async fn create_token(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    body.validate()?;

    let user = state
        .users
        .check_password(&body.user_name, &body.password)
        .await?;

    let tokens = state.auth.issue_tokens(&user)?;
    tracing::info!(user_id = %user.id, "Tokens issued");

    Ok(ApiSuccess::new(StatusCode::OK, tokens.into()))
}

/// `POST /auth/refreshtoken`: trade a refresh token for a new token pair.
pub async fn refresh_token(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RefreshTokenRequest>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    if body.refresh_token.is_empty() {
        return Err(ApiError::BadRequest("RefreshToken is mandatory".to_string()));
    }

    state
        .auth
        .refresh(&body.refresh_token)
        .await
        .map_err(ApiError::from)
        .map(|tokens| ApiSuccess::new(StatusCode::OK, tokens.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    user_name: String,
    #[serde(default)]
    password: String,
}

impl LoginRequest {
    fn validate(&self) -> Result<(), ApiError> {
        if self.user_name.is_empty() {
            return Err(ApiError::BadRequest("UserName is mandatory".to_string()));
        }
        if self.password.is_empty() {
            return Err(ApiError::BadRequest("Password is mandatory".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[serde(default)]
    refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponseData {
    pub token: String,
    pub refresh_token: String,
}

impl From<::auth::TokenPair> for TokenResponseData {
    fn from(tokens: ::auth::TokenPair) -> Self {
        Self {
            token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        }
    }
}
