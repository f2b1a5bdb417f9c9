use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::models::Document;
use super::models::Filter;
use super::models::JsonDocument;
use super::models::Projection;
use super::ports::DocumentStore;
use super::ports::StoreError;
use crate::domain::errors::AppError;

const INSERT_ERROR: &str = "Error inserting in the database";
const RETRIEVE_ERROR: &str = "Error retrieving from the database";
const UPDATE_ERROR: &str = "Error updating the database";
const REMOVE_ERROR: &str = "Error removing from the database";

/// Generic CRUD over one named collection of a [`DocumentStore`].
///
/// Translates every store outcome into the [`AppError`] taxonomy: a miss
/// becomes `NotFound` (tagged with the collection name), anything else
/// becomes `Unexpected` with a fixed message.
#[derive(Clone)]
pub struct DocumentRepository {
    store: Arc<dyn DocumentStore>,
    collection: String,
}

impl DocumentRepository {
    /// Create a repository bound to `collection`.
    ///
    /// # Arguments
    /// * `store` - Shared store handle
    /// * `collection` - Collection name, also used as the model name in `NotFound`
    pub fn new(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    /// Format check on an identifier. Does not touch the store.
    pub fn is_valid_id(&self, id: &str) -> bool {
        self.store.is_valid_id(id)
    }

    /// Assign a new identifier to `document` and insert it.
    ///
    /// # Returns
    /// The generated identifier
    ///
    /// # Errors
    /// * `Unexpected` - Serialization or insert failed
    pub async fn add<D: Document>(&self, document: &mut D) -> Result<String, AppError> {
        let id = self.store.new_id();
        document.set_id(id.clone());

        let json = to_json_document(document).map_err(|e| AppError::unexpected(INSERT_ERROR, e))?;

        self.store
            .insert(&self.collection, json)
            .await
            .map_err(|e| store_failure(INSERT_ERROR, e))?;

        tracing::debug!(collection = %self.collection, id = %id, "Document inserted");

        Ok(id)
    }

    /// Every document matching `filter`.
    ///
    /// # Errors
    /// * `Unexpected` - Read or deserialization failed
    pub async fn get<D: DeserializeOwned>(
        &self,
        filter: &Filter,
        projection: Option<&Projection>,
    ) -> Result<Vec<D>, AppError> {
        let all = Projection::all();
        let documents = self
            .store
            .find(&self.collection, filter, projection.unwrap_or(&all))
            .await
            .map_err(|e| store_failure(RETRIEVE_ERROR, e))?;

        documents
            .into_iter()
            .map(|document| {
                from_json_document(document).map_err(|e| AppError::unexpected(RETRIEVE_ERROR, e))
            })
            .collect()
    }

    /// Single document matching `filter`.
    ///
    /// # Errors
    /// * `NotFound` - No document matched
    /// * `Unexpected` - Read or deserialization failed
    pub async fn get_one<D: DeserializeOwned>(
        &self,
        filter: &Filter,
        projection: Option<&Projection>,
    ) -> Result<D, AppError> {
        let all = Projection::all();
        let document = self
            .store
            .find_one(&self.collection, filter, projection.unwrap_or(&all))
            .await
            .map_err(|e| self.map_store_error(filter, RETRIEVE_ERROR, e))?;

        from_json_document(document).map_err(|e| AppError::unexpected(RETRIEVE_ERROR, e))
    }

    /// Replace the document matching `filter`.
    ///
    /// # Errors
    /// * `NotFound` - No document matched
    /// * `Unexpected` - Serialization or update failed
    pub async fn update<D: Document>(&self, filter: &Filter, document: &D) -> Result<(), AppError> {
        let json = to_json_document(document).map_err(|e| AppError::unexpected(UPDATE_ERROR, e))?;

        self.store
            .update(&self.collection, filter, json)
            .await
            .map_err(|e| self.map_store_error(filter, UPDATE_ERROR, e))
    }

    /// Delete the document matching `filter`.
    ///
    /// # Errors
    /// * `NotFound` - No document matched
    /// * `Unexpected` - Delete failed
    pub async fn remove(&self, filter: &Filter) -> Result<(), AppError> {
        self.store
            .remove(&self.collection, filter)
            .await
            .map_err(|e| self.map_store_error(filter, REMOVE_ERROR, e))
    }

    fn map_store_error(&self, filter: &Filter, msg: &str, err: StoreError) -> AppError {
        match err {
            StoreError::NotFound => {
                let id = filter.id().unwrap_or_default();
                tracing::debug!(collection = %self.collection, id = %id, "Document not found");
                AppError::not_found(id, &self.collection)
            }
            other => store_failure(msg, other),
        }
    }
}

fn store_failure(msg: &str, err: StoreError) -> AppError {
    match err {
        StoreError::Backend(cause) => AppError::unexpected(msg, cause),
        other => AppError::unexpected(msg, other),
    }
}

fn to_json_document<D: Serialize>(document: &D) -> anyhow::Result<JsonDocument> {
    match serde_json::to_value(document)? {
        Value::Object(map) => Ok(map),
        other => Err(anyhow::anyhow!(
            "document must serialize to an object, got {}",
            other
        )),
    }
}

fn from_json_document<D: DeserializeOwned>(document: JsonDocument) -> anyhow::Result<D> {
    Ok(serde_json::from_value(Value::Object(document))?)
}
