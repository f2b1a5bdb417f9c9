use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::repository::DocumentStore;
use crate::domain::repository::Filter;
use crate::domain::repository::JsonDocument;
use crate::domain::repository::Projection;
use crate::domain::repository::StoreError;

/// Process-local document store. Documents keep their insertion order.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<JsonDocument>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert(&self, collection: &str, document: JsonDocument) -> Result<(), StoreError> {
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(())
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        projection: &Projection,
    ) -> Result<Vec<JsonDocument>, StoreError> {
        let collections = self.collections.read().await;
        let documents = collections
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|document| filter.matches(document))
                    .map(|document| projection.apply(document.clone()))
                    .collect()
            })
            .unwrap_or_default();
        Ok(documents)
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
        projection: &Projection,
    ) -> Result<JsonDocument, StoreError> {
        let collections = self.collections.read().await;
        collections
            .get(collection)
            .and_then(|documents| documents.iter().find(|document| filter.matches(document)))
            .map(|document| projection.apply(document.clone()))
            .ok_or(StoreError::NotFound)
    }

    async fn update(
        &self,
        collection: &str,
        filter: &Filter,
        document: JsonDocument,
    ) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let stored = collections
            .get_mut(collection)
            .and_then(|documents| documents.iter_mut().find(|stored| filter.matches(stored)))
            .ok_or(StoreError::NotFound)?;
        *stored = document;
        Ok(())
    }

    async fn remove(&self, collection: &str, filter: &Filter) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let documents = collections.get_mut(collection).ok_or(StoreError::NotFound)?;
        let position = documents
            .iter()
            .position(|document| filter.matches(document))
            .ok_or(StoreError::NotFound)?;
        documents.remove(position);
        Ok(())
    }
}
