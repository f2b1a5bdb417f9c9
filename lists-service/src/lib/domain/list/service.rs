use std::sync::Arc;

use crate::domain::errors::AppError;
use crate::domain::list::models::List;
use crate::domain::list::models::ListDto;
use crate::domain::list::models::ListSummary;
use crate::domain::repository::DocumentRepository;
use crate::domain::repository::DocumentStore;
use crate::domain::repository::Filter;
use crate::domain::repository::Projection;

const LISTS_COLLECTION: &str = "lists";
const USER_ID_FIELD: &str = "userId";

/// Domain service for per-user lists.
///
/// Every store call is filtered on the owner as well as the list id, so a
/// user can never read or touch another user's lists.
#[derive(Clone)]
pub struct ListsService {
    repository: DocumentRepository,
}

impl ListsService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            repository: DocumentRepository::new(store, LISTS_COLLECTION),
        }
    }

    /// Create a list owned by `user_id`.
    ///
    /// # Returns
    /// Identifier of the new list
    pub async fn add_user_list(&self, user_id: &str, dto: &ListDto) -> Result<String, AppError> {
        let mut list = dto.to_list();
        list.user_id = user_id.to_string();

        self.repository.add(&mut list).await
    }

    /// Delete list `id` if it belongs to `user_id`.
    ///
    /// # Errors
    /// * `BadRequest` - Malformed identifier
    /// * `NotFound` - No such list for this user
    /// * `Unexpected` - Delete failed
    pub async fn remove_user_list(&self, id: &str, user_id: &str) -> Result<(), AppError> {
        self.check_id(id)?;
        self.repository.remove(&owned_by(id, user_id)).await
    }

    /// Replace name and items of list `id` if it belongs to `user_id`.
    ///
    /// # Returns
    /// The list as stored
    ///
    /// # Errors
    /// * `BadRequest` - Malformed identifier
    /// * `NotFound` - No such list for this user
    /// * `Unexpected` - Update failed
    pub async fn update_user_list(
        &self,
        id: &str,
        user_id: &str,
        dto: &ListDto,
    ) -> Result<List, AppError> {
        self.check_id(id)?;

        let mut list = dto.to_list();
        list.id = id.to_string();
        list.user_id = user_id.to_string();

        self.repository.update(&owned_by(id, user_id), &list).await?;

        Ok(list)
    }

    /// Fetch list `id` if it belongs to `user_id`.
    ///
    /// # Errors
    /// * `BadRequest` - Malformed identifier
    /// * `NotFound` - No such list for this user
    /// * `Unexpected` - Lookup failed
    pub async fn get_single_user_list(&self, id: &str, user_id: &str) -> Result<List, AppError> {
        self.check_id(id)?;
        self.repository.get_one(&owned_by(id, user_id), None).await
    }

    /// Identifier and name of every list owned by `user_id`.
    pub async fn get_user_lists(&self, user_id: &str) -> Result<Vec<ListSummary>, AppError> {
        let projection = Projection::fields(["name"]);
        self.repository
            .get(&Filter::new().eq(USER_ID_FIELD, user_id), Some(&projection))
            .await
    }

    fn check_id(&self, id: &str) -> Result<(), AppError> {
        if self.repository.is_valid_id(id) {
            Ok(())
        } else {
            Err(AppError::invalid_id(id))
        }
    }
}

fn owned_by(id: &str, user_id: &str) -> Filter {
    Filter::by_id(id).eq(USER_ID_FIELD, user_id)
}
