use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::JsonBody;
use crate::domain::user::models::UserDto;
use crate::domain::user::models::UserSummary;
use crate::inbound::http::router::AppState;

pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<UserDto>,
) -> Result<ApiSuccess<String>, ApiError> {
    state
        .users
        .add_user(&body)
        .await
        .map_err(ApiError::from)
        .map(|id| ApiSuccess::new(StatusCode::CREATED, id))
}

pub async fn get_users(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<UserSummary>>, ApiError> {
    state
        .users
        .get_users()
        .await
        .map_err(ApiError::from)
        .map(|users| ApiSuccess::new(StatusCode::OK, users))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.users.remove_user(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
