use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use super::models::Filter;
use super::models::JsonDocument;
use super::models::Projection;

/// Outcome of a failed store call. A miss is always `NotFound`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No document matched the filter")]
    NotFound,

    #[error("Document store failure: {0}")]
    Backend(anyhow::Error),
}

/// Document store collaborator, addressed by collection name.
///
/// Implementations must be safe to share across concurrently served requests.
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Insert a document. The identifier is already set under `_id`.
    ///
    /// # Errors
    /// * `Backend` - Store operation failed
    async fn insert(&self, collection: &str, document: JsonDocument) -> Result<(), StoreError>;

    /// Every document matching `filter`, optionally projected.
    ///
    /// Filter values are scalars and must match by equality. Backends with
    /// containment semantics rely on that.
    ///
    /// # Errors
    /// * `Backend` - Store operation failed
    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        projection: &Projection,
    ) -> Result<Vec<JsonDocument>, StoreError>;

    /// First document matching `filter`, optionally projected.
    ///
    /// # Errors
    /// * `NotFound` - No document matched
    /// * `Backend` - Store operation failed
    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
        projection: &Projection,
    ) -> Result<JsonDocument, StoreError>;

    /// Replace the first document matching `filter` with `document`.
    ///
    /// # Errors
    /// * `NotFound` - No document matched
    /// * `Backend` - Store operation failed
    async fn update(
        &self,
        collection: &str,
        filter: &Filter,
        document: JsonDocument,
    ) -> Result<(), StoreError>;

    /// Delete the first document matching `filter`.
    ///
    /// # Errors
    /// * `NotFound` - No document matched
    /// * `Backend` - Store operation failed
    async fn remove(&self, collection: &str, filter: &Filter) -> Result<(), StoreError>;

    /// Fresh identifier for a document about to be inserted.
    fn new_id(&self) -> String {
        Uuid::new_v4().to_string()
    }

    /// Whether `id` has the format this store issues.
    ///
    /// Only the canonical form is accepted: lowercase, hyphenated UUID.
    fn is_valid_id(&self, id: &str) -> bool {
        Uuid::try_parse(id).map_or(false, |uuid| uuid.hyphenated().to_string() == id)
    }
}
