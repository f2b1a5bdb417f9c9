use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::JsonBody;
use crate::domain::list::models::Item;
use crate::domain::list::models::List;
use crate::domain::list::models::ListDto;
use crate::domain::list::models::ListSummary;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn get_lists(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<Vec<ListSummary>>, ApiError> {
    state
        .lists
        .get_user_lists(&user.user_id)
        .await
        .map_err(ApiError::from)
        .map(|lists| ApiSuccess::new(StatusCode::OK, lists))
}

pub async fn get_list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<ListData>, ApiError> {
    state
        .lists
        .get_single_user_list(&id, &user.user_id)
        .await
        .map_err(ApiError::from)
        .map(|list| ApiSuccess::new(StatusCode::OK, list.into()))
}

pub async fn create_list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    JsonBody(body): JsonBody<ListDto>,
) -> Result<ApiSuccess<String>, ApiError> {
    state
        .lists
        .add_user_list(&user.user_id, &body)
        .await
        .map_err(ApiError::from)
        .map(|id| ApiSuccess::new(StatusCode::CREATED, id))
}

pub async fn update_list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<ListDto>,
) -> Result<ApiSuccess<ListData>, ApiError> {
    state
        .lists
        .update_user_list(&id, &user.user_id, &body)
        .await
        .map_err(ApiError::from)
        .map(|list| ApiSuccess::new(StatusCode::OK, list.into()))
}

pub async fn delete_list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.lists.remove_user_list(&id, &user.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List as returned to its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListData {
    pub id: String,
    pub name: String,
    pub items: Vec<Item>,
}

impl From<List> for ListData {
    fn from(list: List) -> Self {
        Self {
            id: list.id,
            name: list.name,
            items: list.items,
        }
    }
}
