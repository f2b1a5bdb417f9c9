use async_trait::async_trait;
use mockall::mock;

use super::models::Filter;
use super::models::JsonDocument;
use super::models::Projection;
use super::ports::DocumentStore;
use super::ports::StoreError;

mock! {
    pub TestStore {}

    #[async_trait]
    impl DocumentStore for TestStore {
        async fn insert(&self, collection: &str, document: JsonDocument) -> Result<(), StoreError>;
        async fn find(&self, collection: &str, filter: &Filter, projection: &Projection) -> Result<Vec<JsonDocument>, StoreError>;
        async fn find_one(&self, collection: &str, filter: &Filter, projection: &Projection) -> Result<JsonDocument, StoreError>;
        async fn update(&self, collection: &str, filter: &Filter, document: JsonDocument) -> Result<(), StoreError>;
        async fn remove(&self, collection: &str, filter: &Filter) -> Result<(), StoreError>;
    }
}

/// Store that fails the test on any call.
pub fn untouched_store() -> MockTestStore {
    let mut store = MockTestStore::new();
    store.expect_insert().times(0);
    store.expect_find().times(0);
    store.expect_find_one().times(0);
    store.expect_update().times(0);
    store.expect_remove().times(0);
    store
}
